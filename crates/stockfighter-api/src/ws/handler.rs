/*
[INPUT]:  Inbound WebSocket frames and close notifications
[OUTPUT]: Logged JSON payloads or caller-defined side effects
[POS]:    WebSocket layer - per-frame dispatch
[UPDATE]: When adding handler variants or changing default frame logging
*/

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tracing::{debug, error, info};

/// Receives frames from a stream
///
/// Runs on the stream's own tokio task, not on the task that opened the
/// stream. Keep `on_frame` short; it blocks the receive loop while it runs.
pub trait FrameHandler: Send + 'static {
    /// Called for every text or binary frame
    fn on_frame(&mut self, frame: Message);

    /// Called once when the connection ends, with the peer's close frame if any
    fn on_close(&mut self, frame: Option<&CloseFrame>) {
        match frame {
            Some(frame) => info!(code = u16::from(frame.code), reason = frame.reason.as_str(), "stream closed"),
            None => info!("stream closed"),
        }
    }
}

impl<F> FrameHandler for F
where
    F: FnMut(Message) + Send + 'static,
{
    fn on_frame(&mut self, frame: Message) {
        self(frame)
    }
}

/// Default handler: decodes text frames as JSON and logs them
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLogHandler;

impl JsonLogHandler {
    /// Decode a frame, logging and dropping anything that is not JSON text
    pub fn decode(&self, frame: &Message) -> Option<Value> {
        let Message::Text(text) = frame else {
            debug!(kind = frame_kind(frame), "ignoring non-text frame");
            return None;
        };
        debug!(bytes = text.len(), "received text frame");

        match serde_json::from_str::<Value>(text.as_str()) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(error = %err, bytes = text.len(), "could not decode stream message");
                None
            }
        }
    }
}

impl FrameHandler for JsonLogHandler {
    fn on_frame(&mut self, frame: Message) {
        if let Some(value) = self.decode(&frame) {
            info!(payload = %value, "stream message");
        }
    }
}

/// Forwards frames to a channel so they can be consumed on another task
#[derive(Debug)]
pub struct ChannelHandler {
    tx: mpsc::UnboundedSender<Message>,
}

impl ChannelHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FrameHandler for ChannelHandler {
    fn on_frame(&mut self, frame: Message) {
        if self.tx.send(frame).is_err() {
            debug!("frame receiver dropped");
        }
    }
}

fn frame_kind(frame: &Message) -> &'static str {
    match frame {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
        Message::Frame(_) => "frame",
    }
}
