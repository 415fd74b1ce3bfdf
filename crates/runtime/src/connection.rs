//! Request/response correlation over a [`TransportParts`].
//!
//! # Message Flow
//!
//! 1. Caller invokes [`Connection::send`] with an optional session id, a
//!    method and params.
//! 2. The connection allocates an id, parks a `oneshot` sender under it and
//!    queues the request for the writer task.
//! 3. The reader loop decodes every inbound frame. Responses complete the
//!    parked sender with the same id; events are broadcast to subscribers.
//! 4. When the transport ends, every pending request fails with
//!    [`Error::TargetClosed`] and later sends fail immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use resume_pdf_protocol::{DEFAULT_TIMEOUT_MS, Event, Message, Request};
use serde_json::Value;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::transport::TransportParts;

const EVENT_CAPACITY: usize = 1024;

type Callback = oneshot::Sender<Result<Value>>;

struct Pending {
	method: String,
	tx: Callback,
}

/// DevTools connection shared by the browser and its pages.
pub struct Connection {
	last_id: AtomicU64,
	callbacks: Mutex<HashMap<u64, Pending>>,
	outbound_tx: mpsc::UnboundedSender<Value>,
	events: Mutex<Option<broadcast::Sender<Event>>>,
	closed: AtomicBool,
	command_timeout: Duration,
	tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Connection {
	/// Starts the reader, writer and dispatch tasks for `parts`.
	pub fn start(parts: TransportParts) -> Arc<Self> {
		Self::start_with_timeout(parts, Duration::from_millis(DEFAULT_TIMEOUT_MS))
	}

	pub fn start_with_timeout(parts: TransportParts, command_timeout: Duration) -> Arc<Self> {
		let TransportParts {
			mut sender,
			receiver,
			mut message_rx,
		} = parts;
		let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Value>();
		let (events, _) = broadcast::channel(EVENT_CAPACITY);

		let connection = Arc::new(Self {
			last_id: AtomicU64::new(0),
			callbacks: Mutex::new(HashMap::new()),
			outbound_tx,
			events: Mutex::new(Some(events)),
			closed: AtomicBool::new(false),
			command_timeout,
			tasks: Mutex::new(Vec::new()),
		});

		let reader = tokio::spawn(async move {
			if let Err(e) = receiver.run().await {
				warn!(target: "resume_pdf.cdp", error = %e, "transport read error");
			}
		});

		let writer = tokio::spawn(async move {
			while let Some(message) = outbound_rx.recv().await {
				if let Err(e) = sender.send(message).await {
					error!(target: "resume_pdf.cdp", error = %e, "transport write error");
					break;
				}
			}
		});

		let conn = Arc::clone(&connection);
		let dispatcher = tokio::spawn(async move {
			while let Some(value) = message_rx.recv().await {
				match serde_json::from_value::<Message>(value) {
					Ok(message) => conn.dispatch(message),
					Err(e) => warn!(target: "resume_pdf.cdp", error = %e, "unparseable message"),
				}
			}
			conn.mark_closed("connection closed by browser");
		});

		connection.tasks.lock().extend([reader, writer, dispatcher]);
		connection
	}

	/// Sends `method` to the browser (or to the target attached as
	/// `session_id`) and waits for its result.
	pub async fn send(&self, session_id: Option<&str>, method: &str, params: Value) -> Result<Value> {
		self.send_with_timeout(session_id, method, params, self.command_timeout)
			.await
	}

	pub async fn send_with_timeout(
		&self,
		session_id: Option<&str>,
		method: &str,
		params: Value,
		timeout: Duration,
	) -> Result<Value> {
		let (id, rx) = self.register(method)?;

		let request = Request {
			id,
			method: method.to_string(),
			params,
			session_id: session_id.map(str::to_string),
		};
		trace!(target: "resume_pdf.cdp", id, method, session = ?session_id, "request");

		if self.outbound_tx.send(serde_json::to_value(&request)?).is_err() {
			self.callbacks.lock().remove(&id);
			return Err(Error::TargetClosed(format!("cannot send {method}: writer stopped")));
		}

		match tokio::time::timeout(timeout, rx).await {
			Ok(result) => result.map_err(|_| Error::ChannelClosed)?,
			Err(_) => {
				self.callbacks.lock().remove(&id);
				Err(Error::Timeout {
					operation: method.to_string(),
					ms: timeout.as_millis() as u64,
				})
			}
		}
	}

	/// Parks a callback for a new request id.
	///
	/// The callback is inserted before `closed` is read, so either this
	/// check sees the close or [`Connection::mark_closed`] drains the entry.
	fn register(&self, method: &str) -> Result<(u64, oneshot::Receiver<Result<Value>>)> {
		let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
		let (tx, rx) = oneshot::channel();
		self.callbacks.lock().insert(
			id,
			Pending {
				method: method.to_string(),
				tx,
			},
		);

		if self.is_closed() {
			self.callbacks.lock().remove(&id);
			return Err(Error::TargetClosed(format!("cannot send {method}: connection closed")));
		}
		Ok((id, rx))
	}

	/// Subscribes to every event received after this call.
	///
	/// The receiver reports `Closed` once the connection ends.
	pub fn subscribe(&self) -> broadcast::Receiver<Event> {
		match &*self.events.lock() {
			Some(events) => events.subscribe(),
			None => broadcast::channel(1).1,
		}
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	/// Stops the background tasks; pending requests fail as closed.
	pub fn shutdown(&self) {
		for task in self.tasks.lock().drain(..) {
			task.abort();
		}
		self.mark_closed("connection shut down");
	}

	fn dispatch(&self, message: Message) {
		match message {
			Message::Response(response) => {
				let Some(pending) = self.callbacks.lock().remove(&response.id) else {
					debug!(target: "resume_pdf.cdp", id = response.id, "response for unknown request");
					return;
				};

				let result = match response.error {
					Some(err) => Err(Error::Protocol {
						method: pending.method,
						code: err.code,
						message: err.message,
					}),
					None => Ok(response.result.unwrap_or(Value::Null)),
				};
				let _ = pending.tx.send(result);
			}
			Message::Event(event) => {
				trace!(target: "resume_pdf.cdp", method = %event.method, session = ?event.session_id, "event");
				if let Some(events) = &*self.events.lock() {
					// No subscribers is fine.
					let _ = events.send(event);
				}
			}
		}
	}

	fn mark_closed(&self, reason: &str) {
		if self.closed.swap(true, Ordering::SeqCst) {
			return;
		}
		debug!(target: "resume_pdf.cdp", reason, "connection closed");
		self.events.lock().take();
		let pending: Vec<Pending> = self.callbacks.lock().drain().map(|(_, p)| p).collect();
		for p in pending {
			let _ = p.tx.send(Err(Error::TargetClosed(format!("{} while waiting for {}", reason, p.method))));
		}
	}
}

impl Drop for Connection {
	fn drop(&mut self) {
		for task in self.tasks.get_mut().drain(..) {
			task.abort();
		}
	}
}
