//! A single browser tab attached over a flattened DevTools session.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use resume_pdf_protocol::{DEFAULT_TIMEOUT_MS, Event, GotoOptions, PdfOptions, PrintToPdfResult};
use resume_pdf_runtime::{Connection, Error, Result};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A browser tab.
pub struct Page {
    connection: Arc<Connection>,
    target_id: String,
    session_id: String,
}

impl Page {
    /// Creates a target, attaches to it and enables the page domain.
    pub(crate) async fn open(connection: Arc<Connection>) -> Result<Self> {
        let created = connection
            .send(None, "Target.createTarget", json!({ "url": "about:blank" }))
            .await?;
        let target_id = string_field(&created, "targetId", "Target.createTarget")?;

        let page = match attach(&connection, &target_id).await {
            Ok(session_id) => Self {
                connection,
                target_id,
                session_id,
            },
            Err(e) => {
                if let Err(close_err) = connection
                    .send(None, "Target.closeTarget", json!({ "targetId": target_id }))
                    .await
                {
                    warn!(target: "resume_pdf.page", %target_id, error = %close_err, "failed to close target");
                }
                return Err(e);
            }
        };

        if let Err(e) = page.enable().await {
            let target_id = page.target_id.clone();
            if let Err(close_err) = page.close().await {
                warn!(target: "resume_pdf.page", %target_id, error = %close_err, "failed to close target");
            }
            return Err(e);
        }

        debug!(target: "resume_pdf.page", target_id = %page.target_id, "page opened");
        Ok(page)
    }

    async fn enable(&self) -> Result<()> {
        self.send("Page.enable", json!({})).await?;
        self.send("Page.setLifecycleEventsEnabled", json!({ "enabled": true }))
            .await?;
        Ok(())
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Navigates to `url` and waits for the requested lifecycle milestone.
    ///
    /// Defaults to network idle: no requests in flight for 500 ms. The
    /// timeout covers both the navigation command and the wait.
    pub async fn goto(&self, url: &str, options: GotoOptions) -> Result<()> {
        let timeout = Duration::from_millis(options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS));
        let milestone = options.wait_until.unwrap_or_default();
        info!(target: "resume_pdf.page", %url, wait_until = %milestone, "navigating");

        // Subscribe before navigating so no lifecycle event is missed.
        let mut events = self.connection.subscribe();

        let navigation = async {
            let result = self.send("Page.navigate", json!({ "url": url })).await?;
            if let Some(reason) = result
                .get("errorText")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
            {
                return Err(Error::Navigation {
                    url: url.to_string(),
                    reason: reason.to_string(),
                });
            }

            // Same-document navigations have no loader to wait on.
            let Some(loader_id) = result.get("loaderId").and_then(Value::as_str) else {
                return Ok(());
            };
            self.wait_for_lifecycle(&mut events, loader_id, milestone.lifecycle_event())
                .await
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation: format!("navigation to {url} ({milestone})"),
                ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn wait_for_lifecycle(
        &self,
        events: &mut broadcast::Receiver<Event>,
        loader_id: &str,
        name: &str,
    ) -> Result<()> {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(target: "resume_pdf.page", skipped, "lifecycle events lagged");
                    continue;
                }
                Err(RecvError::Closed) => {
                    return Err(Error::TargetClosed(format!(
                        "connection closed while waiting for {name}"
                    )));
                }
            };

            let ours = event.is_for(Some(&self.session_id));
            match event.method.as_str() {
                "Page.lifecycleEvent"
                    if ours && event.params["name"] == name && event.params["loaderId"] == loader_id =>
                {
                    debug!(target: "resume_pdf.page", event = name, "lifecycle reached");
                    return Ok(());
                }
                // Reported on the browser session with ours in the params.
                "Target.detachedFromTarget" if event.params["sessionId"] == self.session_id.as_str() => {
                    return Err(Error::TargetClosed(format!("page detached while waiting for {name}")));
                }
                "Inspector.detached" if ours => {
                    return Err(Error::TargetClosed(format!("page detached while waiting for {name}")));
                }
                _ => {}
            }
        }
    }

    /// Prints the current document and returns the PDF bytes.
    pub async fn pdf(&self, options: &PdfOptions) -> Result<Vec<u8>> {
        let params = serde_json::to_value(options.to_print_params())?;
        let result = self.send("Page.printToPDF", params).await?;
        let result: PrintToPdfResult = serde_json::from_value(result)?;

        let bytes = STANDARD
            .decode(result.data.as_bytes())
            .map_err(|e| Error::UnexpectedPayload(format!("printToPDF data is not base64: {e}")))?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(Error::UnexpectedPayload(
                "printToPDF did not return a PDF document".to_string(),
            ));
        }
        Ok(bytes)
    }

    /// Prints to `path`, replacing any existing file.
    ///
    /// The document is written beside `path` first and renamed into place, so
    /// a failed print never leaves a truncated file behind.
    pub async fn pdf_to_file(&self, path: &Path, options: &PdfOptions) -> Result<u64> {
        let bytes = self.pdf(options).await?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::Builder::new()
            .prefix(".resume-pdf-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(target: "resume_pdf.page", path = %path.display(), bytes = bytes.len(), "pdf written");
        Ok(bytes.len() as u64)
    }

    /// Closes the tab.
    pub async fn close(self) -> Result<()> {
        self.connection
            .send(None, "Target.closeTarget", json!({ "targetId": self.target_id }))
            .await?;
        debug!(target: "resume_pdf.page", target_id = %self.target_id, "page closed");
        Ok(())
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        self.connection.send(Some(&self.session_id), method, params).await
    }

    #[cfg(test)]
    pub(crate) fn attached(connection: Arc<Connection>, target_id: &str, session_id: &str) -> Self {
        Self {
            connection,
            target_id: target_id.to_string(),
            session_id: session_id.to_string(),
        }
    }
}

async fn attach(connection: &Connection, target_id: &str) -> Result<String> {
    let attached = connection
        .send(
            None,
            "Target.attachToTarget",
            json!({ "targetId": target_id, "flatten": true }),
        )
        .await?;
    string_field(&attached, "sessionId", "Target.attachToTarget")
}

fn string_field(value: &Value, field: &str, method: &str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::UnexpectedPayload(format!("{method} result has no {field}")))
}
