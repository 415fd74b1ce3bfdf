//! DevTools endpoint probing.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// `/json/version` response subset.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpVersionInfo {
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: String,
	#[serde(rename = "Browser")]
	pub browser: Option<String>,
	#[serde(rename = "Protocol-Version")]
	pub protocol_version: Option<String>,
}

/// Resolves DevTools version metadata from `/json/version` on `port`.
pub async fn fetch_cdp_endpoint(port: u16) -> Result<CdpVersionInfo> {
	let client = reqwest::Client::builder()
		.timeout(Duration::from_millis(400))
		.no_proxy()
		.build()
		.map_err(|e| Error::Http(format!("failed to create HTTP client: {e}")))?;
	let mut last_error = "no response".to_string();

	for url in [
		format!("http://127.0.0.1:{port}/json/version"),
		format!("http://localhost:{port}/json/version"),
		format!("http://[::1]:{port}/json/version"),
	] {
		let response = match client.get(&url).send().await {
			Ok(r) => r,
			Err(e) => {
				last_error = e.to_string();
				continue;
			}
		};

		if !response.status().is_success() {
			last_error = format!("unexpected status {}", response.status());
			continue;
		}

		return response
			.json::<CdpVersionInfo>()
			.await
			.map_err(|e| Error::Http(format!("failed to parse /json/version: {e}")));
	}

	Err(Error::Http(format!("port {port}: {last_error}")))
}
