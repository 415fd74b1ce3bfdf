//! Message transport between the client and the browser.
//!
//! A transport is split in two halves so reads and writes never contend on
//! one lock:
//!
//! - [`Transport`]: the write half, sends one JSON message at a time.
//! - [`TransportReceiver`]: the read half, a loop that forwards every inbound
//!   JSON message into an unbounded channel until the peer goes away.
//!
//! [`TransportParts`] bundles both halves with the receiving end of that
//! channel; [`Connection`](crate::connection::Connection) consumes it.

use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Write half of a transport.
pub trait Transport: Send {
	fn send(&mut self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Read half of a transport.
pub trait TransportReceiver: Send {
	/// Runs until the peer closes; inbound messages go to the channel created
	/// alongside this receiver.
	fn run(self: Box<Self>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>;
}

/// Both transport halves plus the inbound message channel.
pub struct TransportParts {
	pub sender: Box<dyn Transport>,
	pub receiver: Box<dyn TransportReceiver>,
	pub message_rx: mpsc::UnboundedReceiver<Value>,
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport over the browser's DevTools WebSocket.
pub struct WebSocketTransport {
	sink: SplitSink<WsStream, WsMessage>,
	stream: SplitStream<WsStream>,
	message_tx: mpsc::UnboundedSender<Value>,
}

impl WebSocketTransport {
	/// Connects to `url` (usually `webSocketDebuggerUrl` from `/json/version`).
	pub async fn connect(url: &str) -> Result<(Self, mpsc::UnboundedReceiver<Value>)> {
		let (ws, _response) = tokio_tungstenite::connect_async(url)
			.await
			.map_err(|e| Error::Transport(format!("WebSocket connect to {url} failed: {e}")))?;
		debug!(target: "resume_pdf.cdp", %url, "websocket connected");

		let (sink, stream) = ws.split();
		let (message_tx, message_rx) = mpsc::unbounded_channel();
		Ok((
			Self {
				sink,
				stream,
				message_tx,
			},
			message_rx,
		))
	}

	pub fn into_transport_parts(self, message_rx: mpsc::UnboundedReceiver<Value>) -> TransportParts {
		TransportParts {
			sender: Box::new(WebSocketTransportSender { sink: self.sink }),
			receiver: Box::new(WebSocketTransportReceiver {
				stream: self.stream,
				message_tx: self.message_tx,
			}),
			message_rx,
		}
	}
}

pub struct WebSocketTransportSender {
	sink: SplitSink<WsStream, WsMessage>,
}

impl Transport for WebSocketTransportSender {
	fn send(&mut self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
		Box::pin(async move {
			let text = serde_json::to_string(&message)?;
			trace!(target: "resume_pdf.cdp", len = text.len(), "send");
			self.sink
				.send(WsMessage::Text(text.into()))
				.await
				.map_err(|e| Error::Transport(e.to_string()))
		})
	}
}

pub struct WebSocketTransportReceiver {
	stream: SplitStream<WsStream>,
	message_tx: mpsc::UnboundedSender<Value>,
}

impl TransportReceiver for WebSocketTransportReceiver {
	fn run(mut self: Box<Self>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
		Box::pin(async move {
			while let Some(frame) = self.stream.next().await {
				let frame = frame.map_err(|e| Error::Transport(e.to_string()))?;
				let value: Value = match frame {
					WsMessage::Text(text) => serde_json::from_str(&text)?,
					WsMessage::Binary(bytes) => serde_json::from_slice(&bytes)?,
					WsMessage::Close(_) => break,
					_ => continue,
				};
				if self.message_tx.send(value).is_err() {
					break;
				}
			}
			debug!(target: "resume_pdf.cdp", "websocket closed");
			Ok(())
		})
	}
}
