//! A launched browser process and its DevTools connection.

use std::sync::Arc;
use std::time::Duration;

use resume_pdf_runtime::{BrowserProcess, Connection, LaunchOptions, Result, WebSocketTransport, launch_browser};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::page::Page;

/// How long [`Browser::close`] waits for the process to exit before killing it.
pub const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// A private headless browser instance.
pub struct Browser {
    process: BrowserProcess,
    connection: Arc<Connection>,
}

impl Browser {
    /// Starts a browser and connects to it.
    ///
    /// The process gets its own throwaway profile. On failure nothing is
    /// left running.
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        let process = launch_browser(&options).await?;

        let connected = WebSocketTransport::connect(process.ws_endpoint()).await;
        let (transport, message_rx) = match connected {
            Ok(pair) => pair,
            Err(e) => {
                if let Err(kill_err) = process.shutdown(Duration::ZERO).await {
                    warn!(target: "resume_pdf.browser", error = %kill_err, "failed to stop browser");
                }
                return Err(e);
            }
        };
        let connection = Connection::start_with_timeout(transport.into_transport_parts(message_rx), options.timeout);

        Ok(Self { process, connection })
    }

    /// Opens a new blank tab.
    pub async fn new_page(&self) -> Result<Page> {
        Page::open(Arc::clone(&self.connection)).await
    }

    /// Product string reported by the browser, e.g. `HeadlessChrome/126.0.6478.126`.
    pub fn version(&self) -> Option<&str> {
        self.process.version()
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.pid()
    }

    /// Asks the browser to exit, then waits up to [`CLOSE_GRACE`] before
    /// killing it. The process is gone when this returns, even on error.
    pub async fn close(self) -> Result<()> {
        let pid = self.process.pid();
        let requested = match self
            .connection
            .send_with_timeout(None, "Browser.close", json!({}), CLOSE_GRACE)
            .await
        {
            Ok(_) => Ok(()),
            // The browser may drop the socket before answering.
            Err(e) if e.is_closed() => Ok(()),
            Err(e) => Err(e),
        };
        let grace = match &requested {
            Ok(()) => CLOSE_GRACE,
            Err(e) => {
                debug!(target: "resume_pdf.browser", error = %e, "Browser.close failed; killing");
                Duration::ZERO
            }
        };

        self.connection.shutdown();
        let status = self.process.shutdown(grace).await?;
        info!(target: "resume_pdf.browser", ?pid, %status, "browser closed");
        requested
    }
}
