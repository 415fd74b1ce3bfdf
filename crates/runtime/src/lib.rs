//! Browser process lifecycle and DevTools connection plumbing.
//!
//! - [`launch`]: find, start and probe a Chromium-family browser.
//! - [`transport`]: WebSocket message transport, split into halves.
//! - [`connection`]: request/response correlation and event fan-out.
//! - [`fake_transport`]: in-memory transport for tests.

pub mod connection;
pub mod error;
pub mod fake_transport;
pub mod launch;
mod process;
pub mod transport;

pub use connection::Connection;
pub use error::{Error, Result};
pub use launch::{
	BrowserProcess, CdpVersionInfo, LaunchOptions, fetch_cdp_endpoint, find_browser_executable, launch_browser,
};
pub use transport::{Transport, TransportParts, TransportReceiver, WebSocketTransport};
