//! In-memory transport for testing the protocol layer without a browser.
//!
//! # Example
//!
//! ```ignore
//! let (parts, mut controller) = FakeTransportBuilder::new().build();
//! let connection = Connection::start(parts);
//!
//! let fut = connection.send(None, "Browser.getVersion", json!({}));
//! let sent = controller.recv_sent().await.unwrap();
//! controller.inject_response(sent["id"].as_u64().unwrap(), json!({"product": "Chrome/1"}));
//! let result = fut.await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use serde_json::{Value, json};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::transport::{Transport, TransportParts, TransportReceiver};

#[derive(Default)]
pub struct FakeTransportBuilder {}

impl FakeTransportBuilder {
	pub fn new() -> Self {
		Self {}
	}

	/// Returns [`TransportParts`] for a [`Connection`] and a controller that
	/// plays the browser side.
	///
	/// [`Connection`]: crate::connection::Connection
	pub fn build(self) -> (TransportParts, FakeTransportController) {
		let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
		let (message_tx, message_rx) = mpsc::unbounded_channel();
		let (sent_tx, sent_rx) = mpsc::unbounded_channel();

		let parts = TransportParts {
			sender: Box::new(FakeTransportSender { sent_tx }),
			receiver: Box::new(FakeTransportReceiver {
				inbound_rx,
				message_tx,
			}),
			message_rx,
		};

		let controller = FakeTransportController {
			inbound_tx: Some(inbound_tx),
			sent_rx,
		};

		(parts, controller)
	}
}

/// Browser side of a fake transport.
pub struct FakeTransportController {
	inbound_tx: Option<mpsc::UnboundedSender<Value>>,
	sent_rx: mpsc::UnboundedReceiver<Value>,
}

impl FakeTransportController {
	/// Injects a raw message as if the browser had sent it.
	pub fn inject(&self, message: Value) {
		if let Some(tx) = &self.inbound_tx {
			let _ = tx.send(message);
		}
	}

	pub fn inject_response(&self, id: u64, result: Value) {
		self.inject(json!({ "id": id, "result": result }));
	}

	pub fn inject_error(&self, id: u64, code: i64, message: &str) {
		self.inject(json!({
			"id": id,
			"error": { "code": code, "message": message }
		}));
	}

	pub fn inject_event(&self, session_id: Option<&str>, method: &str, params: Value) {
		let mut event = json!({ "method": method, "params": params });
		if let Some(session_id) = session_id {
			event["sessionId"] = Value::String(session_id.to_string());
		}
		self.inject(event);
	}

	/// Waits for the next message the client sends.
	pub async fn recv_sent(&mut self) -> Option<Value> {
		self.sent_rx.recv().await
	}

	/// Simulates the browser dropping the connection.
	pub fn disconnect(&mut self) {
		self.inbound_tx = None;
	}
}

struct FakeTransportSender {
	sent_tx: mpsc::UnboundedSender<Value>,
}

impl Transport for FakeTransportSender {
	fn send(&mut self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
		let _ = self.sent_tx.send(message);
		Box::pin(async { Ok(()) })
	}
}

struct FakeTransportReceiver {
	inbound_rx: mpsc::UnboundedReceiver<Value>,
	message_tx: mpsc::UnboundedSender<Value>,
}

impl TransportReceiver for FakeTransportReceiver {
	fn run(mut self: Box<Self>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
		Box::pin(async move {
			while let Some(message) = self.inbound_rx.recv().await {
				if self.message_tx.send(message).is_err() {
					break;
				}
			}
			Ok(())
		})
	}
}
