//! Local port allocation for the debugging endpoint.

use std::net::TcpListener;

use crate::error::{Error, Result};

/// Asks the OS for a localhost port that is currently free.
///
/// The port is released before returning, so another process may still win
/// it; the launcher notices because the browser then exits early.
pub fn free_port() -> Result<u16> {
	let listener = TcpListener::bind(("127.0.0.1", 0))
		.map_err(|e| Error::Launch(format!("no free localhost port: {e}")))?;
	Ok(listener.local_addr()?.port())
}
