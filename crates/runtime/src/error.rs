//! Error types for the browser runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while launching or talking to a browser.
#[derive(Debug, Error)]
pub enum Error {
	/// No usable browser executable was found.
	#[error("Browser executable not found: {0}")]
	ExecutableNotFound(String),

	/// The browser process could not be started or never exposed its endpoint.
	#[error("Failed to launch browser: {0}")]
	Launch(String),

	/// HTTP probe of the DevTools endpoint failed.
	#[error("DevTools endpoint probe failed: {0}")]
	Http(String),

	/// WebSocket-level failure.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The browser answered a command with an error.
	#[error("Protocol error in {method}: {message} (code {code})")]
	Protocol {
		method: String,
		code: i64,
		message: String,
	},

	/// The browser reported that a navigation could not complete.
	#[error("Navigation to {url} failed: {reason}")]
	Navigation { url: String, reason: String },

	/// Malformed or unexpected protocol payload.
	#[error("Unexpected protocol payload: {0}")]
	UnexpectedPayload(String),

	/// Timeout waiting for an operation.
	#[error("Timeout after {ms}ms: {operation}")]
	Timeout { operation: String, ms: u64 },

	/// The browser or page went away while an operation was pending.
	#[error("Target closed: {0}")]
	TargetClosed(String),

	/// Response channel dropped before an answer arrived.
	#[error("Channel closed unexpectedly")]
	ChannelClosed,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout { .. })
	}

	/// Returns true when the peer is gone; expected while closing.
	pub fn is_closed(&self) -> bool {
		matches!(self, Error::TargetClosed(_) | Error::ChannelClosed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn protocol_error_names_method_and_code() {
		let err = Error::Protocol {
			method: "Page.navigate".to_string(),
			code: -32000,
			message: "Cannot navigate to invalid URL".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Protocol error in Page.navigate: Cannot navigate to invalid URL (code -32000)"
		);
	}

	#[test]
	fn navigation_error_names_url_and_reason() {
		let err = Error::Navigation {
			url: "file:///missing.html".to_string(),
			reason: "net::ERR_FILE_NOT_FOUND".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Navigation to file:///missing.html failed: net::ERR_FILE_NOT_FOUND"
		);
	}

	#[test]
	fn classifies_timeouts_and_closures() {
		let timeout = Error::Timeout {
			operation: "navigation".to_string(),
			ms: 10,
		};
		assert!(timeout.is_timeout());
		assert!(!timeout.is_closed());
		assert!(Error::ChannelClosed.is_closed());
		assert!(Error::TargetClosed("browser".into()).is_closed());
	}
}
