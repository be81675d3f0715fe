/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for stockfighter-api tests

#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use std::io;
use std::sync::{Arc, Mutex};
use stockfighter_api::{ClientConfig, Credentials, Message, StockfighterClient};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> StockfighterClient {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    StockfighterClient::with_config(Credentials::new(TEST_API_KEY), config).expect("client init")
}

/// In-memory sink for log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture this thread's log output until the guard is dropped
///
/// Only reliable with the current-thread runtime `#[tokio::test]` uses.
pub fn capture_logs() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("stockfighter_api=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}

/// What the fake feed saw from the client
#[derive(Debug)]
pub struct ServerLog {
    pub path: String,
    pub received: Vec<Message>,
}

impl ServerLog {
    pub fn close_frames(&self) -> usize {
        self.received.iter().filter(|m| m.is_close()).count()
    }
}

/// One-connection WebSocket server that sends `frames`, optionally closes,
/// then records everything the client sends until the socket ends
pub async fn spawn_feed(frames: Vec<Message>, close_after: bool) -> (String, JoinHandle<ServerLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("accept");
        let mut path = String::new();
        let mut ws = tokio_tungstenite::accept_hdr_async(
            tcp,
            |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
                path = request.uri().path().to_string();
                Ok(response)
            },
        )
        .await
        .expect("handshake");

        for frame in frames {
            ws.send(frame).await.expect("send frame");
        }
        if close_after {
            ws.send(Message::Close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "feed finished".into(),
            })))
            .await
            .expect("send close");
        }

        let mut received = Vec::new();
        while let Some(Ok(message)) = ws.next().await {
            received.push(message);
        }
        ServerLog { path, received }
    });

    (format!("ws://{addr}/ob/api"), handle)
}
