/*
[INPUT]:  Error sources (HTTP transport, body decoding, URL building, WebSocket, config)
[OUTPUT]: Tagged error type separating transport faults from undecodable bodies
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Main error type for the Stockfighter client
///
/// Business-level failures reported by the service (`"ok": false`) are not
/// errors; they come back as a normal [`crate::ApiResponse`].
#[derive(Error, Debug)]
pub enum StockfighterError {
    /// HTTP request failed before a body could be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Invalid JSON response ({} bytes): {detail}", .raw.len())]
    InvalidJson { detail: String, raw: Vec<u8> },

    /// Request body serialization or typed decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`StockfighterError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Url,
    WebSocket,
    Config,
}

impl StockfighterError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockfighterError::Http(_) => ErrorKind::Transport,
            StockfighterError::InvalidJson { .. } | StockfighterError::Serialization(_) => {
                ErrorKind::Decode
            }
            StockfighterError::UrlParse(_) => ErrorKind::Url,
            StockfighterError::WebSocket(_) => ErrorKind::WebSocket,
            StockfighterError::Config(_) => ErrorKind::Config,
        }
    }

    /// Raw response bytes, present only when the body failed to decode
    pub fn raw_content(&self) -> Option<&[u8]> {
        match self {
            StockfighterError::InvalidJson { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Build the decode error for a body that is not JSON
    pub(crate) fn invalid_json(err: serde_json::Error, raw: impl Into<Vec<u8>>) -> Self {
        StockfighterError::InvalidJson {
            detail: err.to_string(),
            raw: raw.into(),
        }
    }
}

/// Result type alias for Stockfighter operations
pub type Result<T> = std::result::Result<T, StockfighterError>;
