/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: Decoded API responses or transport/decode errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod gm;
pub mod paths;
pub mod response;
pub mod trading;

pub use error::{ErrorKind, Result, StockfighterError};
pub use response::ApiResponse;

pub use client::{ApiPrefix, ClientConfig, Credentials, StockfighterClient};
