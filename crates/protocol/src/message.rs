//! DevTools message envelopes.
//!
//! Every frame on the debugging socket is a JSON object. Commands carry an
//! `id`, responses echo it back, and events have no `id` at all:
//!
//! ```json
//! {"id": 7, "method": "Page.navigate", "params": {"url": "file:///r.html"}, "sessionId": "A1B2"}
//! {"id": 7, "result": {"frameId": "F1", "loaderId": "L1"}, "sessionId": "A1B2"}
//! {"method": "Page.lifecycleEvent", "params": {"name": "networkIdle"}, "sessionId": "A1B2"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command sent to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Correlation id, unique per connection.
    pub id: u64,
    /// Fully qualified method, e.g. `Target.createTarget`.
    pub method: String,
    /// Method parameters; `{}` when the method takes none.
    pub params: Value,
    /// Flattened target session the command is routed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Reply to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Error member of a failed [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Unsolicited notification from the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Any inbound frame.
///
/// Untagged: a frame with an `id` is a [`Response`], anything else is an
/// [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Response(Response),
    Event(Event),
}

impl Event {
    /// Returns `true` when this event was emitted for `session_id`.
    ///
    /// Browser-level events carry no session and only match `None`.
    pub fn is_for(&self, session_id: Option<&str>) -> bool {
        self.session_id.as_deref() == session_id
    }
}
