/*
[INPUT]:  Feed endpoint descriptors and frame handlers
[OUTPUT]: Live ticker tape and execution feeds
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new feeds or changing connection logic
*/

pub mod client;
pub mod endpoint;
pub mod handler;

pub use client::{StockfighterStream, StreamState};
pub use endpoint::StreamEndpoint;
pub use handler::{ChannelHandler, FrameHandler, JsonLogHandler};
