//! The export run: launch, open, navigate, print, release.

use std::path::{Path, PathBuf};

use chromium::PdfOptions;
use tracing::{debug, info, warn};

use crate::config::{ExportConfig, file_url};
use crate::engine::{Document, Engine, Session};
use crate::error::{ExportError, Result};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
	pub output: PathBuf,
	pub bytes: u64,
}

/// Renders `<site_dir>/resume.html` to `<site_dir>/resume.pdf`.
///
/// Every page and session acquired here is released exactly once, page
/// first, whether or not the run succeeded. A failed release is logged and
/// does not change the result.
pub async fn export(engine: &dyn Engine, config: &ExportConfig) -> Result<ExportReport> {
	let source = config.source_path();
	let output = config.output_path();
	let url = file_url(&source)?;

	// Checked up front so a missing source never starts a browser.
	if !source.is_file() {
		return Err(ExportError::Navigation {
			url,
			source: anyhow::anyhow!("{} does not exist", source.display()),
		});
	}

	info!(target: "resume_pdf", source = %source.display(), no_sandbox = config.no_sandbox, "exporting");
	let session = engine.launch(config.launch_args()).await.map_err(ExportError::Launch)?;

	let document = match session.open_document().await {
		Ok(document) => document,
		Err(e) => {
			release_session(session).await;
			return Err(ExportError::Page(e));
		}
	};

	let outcome = print(document, &url, &output).await;
	release_session(session).await;

	let bytes = outcome?;
	Ok(ExportReport { output, bytes })
}

/// Navigates and prints, then releases the document on every path.
async fn print(mut document: Box<dyn Document>, url: &str, output: &Path) -> Result<u64> {
	let rendered = async {
		document.navigate(url).await.map_err(|source| ExportError::Navigation {
			url: url.to_string(),
			source,
		})?;
		document
			.render(output, &PdfOptions::resume())
			.await
			.map_err(|source| ExportError::Render {
				path: output.to_path_buf(),
				source,
			})
	}
	.await;

	if let Err(e) = document.close().await {
		warn!(target: "resume_pdf", error = %format!("{e:#}"), "failed to close page");
	} else {
		debug!(target: "resume_pdf", "page released");
	}
	rendered
}

async fn release_session(session: Box<dyn Session>) {
	match session.close().await {
		Ok(()) => debug!(target: "resume_pdf", "browser released"),
		Err(e) => warn!(target: "resume_pdf", error = %format!("{e:#}"), "failed to close browser"),
	}
}
