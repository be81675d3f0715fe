/*
[INPUT]:  Feed endpoint descriptor and an optional frame handler
[OUTPUT]: One open WebSocket connection delivering frames to the handler
[POS]:    WebSocket layer - connection lifecycle
[UPDATE]: When changing connection logic or close behavior
*/

use crate::http::{Result, StockfighterClient};
use crate::types::StreamKind;
use crate::ws::{FrameHandler, JsonLogHandler, StreamEndpoint};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use url::Url;

const CLOSE_REASON: &str = "Client requested close";
// Upper bound on waiting for the peer to acknowledge our close frame
const CLOSE_GRACE: Duration = Duration::from_secs(5);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection state; `Closed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    Closed,
}

/// A single WebSocket feed
///
/// The receive loop runs on a spawned tokio task and the handler is invoked
/// from there. There is no reconnect: once `Closed`, open a new stream.
#[derive(Debug)]
pub struct StockfighterStream {
    endpoint: StreamEndpoint,
    url: Url,
    state: watch::Receiver<StreamState>,
    close_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StockfighterStream {
    /// Open the feed; returns once the handshake has completed
    ///
    /// Without a handler, frames go to [`JsonLogHandler`].
    pub async fn connect(
        ws_base: &str,
        endpoint: StreamEndpoint,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<Self> {
        let url = endpoint.url(ws_base)?;
        debug!(%url, "creating stream");

        let (socket, _response) = connect_async(url.as_str()).await?;
        info!(%url, kind = %endpoint.kind, "stream connected");

        let handler = handler.unwrap_or_else(|| Box::new(JsonLogHandler) as Box<dyn FrameHandler>);
        let (state_tx, state_rx) = watch::channel(StreamState::Open);
        let (close_tx, close_rx) = oneshot::channel();
        let task = tokio::spawn(run_stream(socket, handler, close_rx, state_tx));

        Ok(Self {
            endpoint,
            url,
            state: state_rx,
            close_tx: Some(close_tx),
            task: Some(task),
        })
    }

    pub fn endpoint(&self) -> &StreamEndpoint {
        &self.endpoint
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    pub fn is_open(&self) -> bool {
        self.state() == StreamState::Open
    }

    /// Wait until the connection is closed, by either side
    pub async fn closed(&self) {
        let mut state = self.state.clone();
        // A dropped sender means the task is gone, which is also closed
        let _ = state.wait_for(|s| *s == StreamState::Closed).await;
    }

    /// Send a close frame and wait for the receive loop to finish
    ///
    /// Calling this again, or after the peer closed, does nothing.
    pub async fn close(&mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            // Err means the loop already ended on its own
            let _ = close_tx.send(());
        }
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            warn!(error = %err, url = %self.url, "stream task ended abnormally");
        }
    }
}

// Publishes `Closed` on every exit from the receive loop, unwinding included
struct ClosedOnDrop(watch::Sender<StreamState>);

impl Drop for ClosedOnDrop {
    fn drop(&mut self) {
        self.0.send_replace(StreamState::Closed);
    }
}

async fn run_stream(
    socket: Socket,
    mut handler: Box<dyn FrameHandler>,
    mut close_rx: oneshot::Receiver<()>,
    state_tx: watch::Sender<StreamState>,
) {
    let _closed = ClosedOnDrop(state_tx);
    let (mut write, mut read) = socket.split();

    let close_frame = loop {
        tokio::select! {
            // Fires on close() and when the stream handle is dropped
            _ = &mut close_rx => {
                let frame = CloseFrame {
                    code: CloseCode::Normal,
                    reason: CLOSE_REASON.into(),
                };
                if let Err(err) = write.send(WsMessage::Close(Some(frame.clone()))).await {
                    warn!(error = %err, "failed to send close frame");
                    break Some(frame);
                }
                let drained = tokio::time::timeout(CLOSE_GRACE, async {
                    while let Some(Ok(message)) = read.next().await {
                        if message.is_close() {
                            break;
                        }
                    }
                })
                .await;
                if drained.is_err() {
                    debug!("peer did not acknowledge close frame");
                }
                break Some(frame);
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Close(frame))) => {
                        debug!("close frame received from peer");
                        break frame;
                    }
                    Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => {}
                    Some(Ok(message)) => handler.on_frame(message),
                    Some(Err(err)) => {
                        warn!(error = %err, "stream read failed");
                        break None;
                    }
                    None => break None,
                }
            }
        }
    };

    // Flushes the close reply when the peer started the handshake
    let _ = write.close().await;
    handler.on_close(close_frame.as_ref());
}

impl StockfighterClient {
    /// Open any feed using this client's WebSocket base URL
    pub async fn stream(
        &self,
        endpoint: StreamEndpoint,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<StockfighterStream> {
        StockfighterStream::connect(&self.config().ws_base_url, endpoint, handler).await
    }

    /// Quotes for one stock
    pub async fn stock_ticker_stream(
        &self,
        venue: &str,
        stock: &str,
        account: &str,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<StockfighterStream> {
        let endpoint = StreamEndpoint::new(venue, account, StreamKind::TickerTape).with_stock(stock);
        self.stream(endpoint, handler).await
    }

    /// Quotes for every stock on a venue
    pub async fn tickertape_stream(
        &self,
        venue: &str,
        account: &str,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<StockfighterStream> {
        self.stream(StreamEndpoint::ticker_tape(venue, account), handler)
            .await
    }

    /// Fills on one stock
    pub async fn stock_execution_stream(
        &self,
        venue: &str,
        stock: &str,
        account: &str,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<StockfighterStream> {
        let endpoint = StreamEndpoint::new(venue, account, StreamKind::Executions).with_stock(stock);
        self.stream(endpoint, handler).await
    }

    /// Fills on every stock on a venue
    pub async fn executions_stream(
        &self,
        venue: &str,
        account: &str,
        handler: Option<Box<dyn FrameHandler>>,
    ) -> Result<StockfighterStream> {
        self.stream(StreamEndpoint::executions(venue, account), handler)
            .await
    }
}
