/*
[INPUT]:  HTTP configuration (base URLs, user agent) and API key credentials
[OUTPUT]: Configured reqwest client plus the six primitive request helpers
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{ApiResponse, Result, StockfighterError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use std::env;
use std::fmt;
use tracing::debug;

/// Base URL for Stockfighter REST API
pub const DEFAULT_BASE_URL: &str = "https://api.stockfighter.io";
/// Base URL for Stockfighter WebSocket feeds
pub const DEFAULT_WS_BASE_URL: &str = "wss://api.stockfighter.io/ob/api";
/// Header carrying the API key on every request (`X-Starfighter-Authorization`)
pub const AUTH_HEADER: &str = "x-starfighter-authorization";

const BASE_URL_ENV: &str = "STOCKFIGHTER_BASE_URL";
const WS_BASE_URL_ENV: &str = "STOCKFIGHTER_WS_URL";
const API_KEY_ENV: &str = "STOCKFIGHTER_API_KEY";

/// Path prefix selecting one of the two REST APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPrefix {
    /// Trading API (`/ob/api`)
    Trading,
    /// Game master API (`/gm`)
    GameMaster,
}

impl ApiPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiPrefix::Trading => "/ob/api",
            ApiPrefix::GameMaster => "/gm",
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub ws_base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ws_base_url: DEFAULT_WS_BASE_URL.to_string(),
            user_agent: concat!("stockfighter-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `STOCKFIGHTER_BASE_URL` / `STOCKFIGHTER_WS_URL` when set
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_or(BASE_URL_ENV, defaults.base_url),
            ws_base_url: env_or(WS_BASE_URL_ENV, defaults.ws_base_url),
            user_agent: defaults.user_agent,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

/// API key forwarded on every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read the key from `STOCKFIGHTER_API_KEY`
    pub fn from_env() -> Result<Self> {
        match env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(StockfighterError::Config(format!("{API_KEY_ENV} is not set"))),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Main HTTP client for the Stockfighter API
///
/// Holds only immutable configuration, so a single instance can be shared
/// across tasks; each call performs exactly one round trip.
#[derive(Debug, Clone)]
pub struct StockfighterClient {
    http_client: Client,
    base_url: String,
    config: ClientConfig,
}

impl StockfighterClient {
    /// Create a new client against the live service
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let mut auth_value = HeaderValue::from_str(&credentials.api_key)
            .map_err(|err| StockfighterError::Config(format!("invalid API key: {err}")))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_HEADER), auth_value);

        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        // Reject an unusable base early rather than on the first call
        Url::parse(&config.base_url)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the full URL for `path` under the given API prefix
    pub fn url(&self, prefix: ApiPrefix, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}{}{}",
            self.base_url,
            prefix.as_str(),
            path
        ))?)
    }

    /// GET on the trading API
    pub async fn api_get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiPrefix::Trading, Method::GET, path, None).await
    }

    /// DELETE on the trading API
    pub async fn api_delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiPrefix::Trading, Method::DELETE, path, None).await
    }

    /// POST a JSON body on the trading API
    pub async fn api_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        self.send(ApiPrefix::Trading, Method::POST, path, Some(body)).await
    }

    /// GET on the game master API
    pub async fn gm_get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiPrefix::GameMaster, Method::GET, path, None).await
    }

    /// DELETE on the game master API
    pub async fn gm_delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiPrefix::GameMaster, Method::DELETE, path, None).await
    }

    /// POST a JSON body on the game master API
    pub async fn gm_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        self.send(ApiPrefix::GameMaster, Method::POST, path, Some(body)).await
    }

    /// POST with no body on the game master API (level control calls)
    pub(crate) async fn gm_post_empty(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiPrefix::GameMaster, Method::POST, path, None).await
    }

    async fn send(
        &self,
        prefix: ApiPrefix,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let url = self.url(prefix, path)?;
        debug!(%method, %url, "sending request");

        let mut builder = self.http_client.request(method, url);
        if let Some(body) = body {
            debug!(body = %String::from_utf8_lossy(&body), "request body");
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");

        ApiResponse::from_body(&bytes)
    }
}
