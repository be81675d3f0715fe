/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Stockfighter client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

//! Thin async client for the Stockfighter trading simulation.
//!
//! REST calls return the decoded body as an [`ApiResponse`]; a reply with
//! `"ok": false` is logged and still returned. Only transport faults and
//! undecodable bodies surface as [`StockfighterError`].

pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from http
pub use http::{
    ApiPrefix,
    ApiResponse,
    ClientConfig,
    Credentials,
    ErrorKind,
    Result,
    StockfighterClient,
    StockfighterError,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    ChannelHandler,
    FrameHandler,
    JsonLogHandler,
    StockfighterStream,
    StreamEndpoint,
    StreamState,
};

// Frame type handed to custom handlers
pub use tokio_tungstenite::tungstenite::Message;
