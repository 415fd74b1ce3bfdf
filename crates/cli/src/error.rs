use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

/// Terminal failures of an export run.
///
/// Releasing the page or the browser is never one of these: release failures
/// are logged and the run's outcome is decided by the steps before them.
#[derive(Debug, Error)]
pub enum ExportError {
	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("browser launch failed: {0:#}")]
	Launch(#[source] anyhow::Error),

	#[error("could not open a page: {0:#}")]
	Page(#[source] anyhow::Error),

	#[error("navigation to {url} failed: {source:#}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	#[error("rendering {} failed: {source:#}", path.display())]
	Render {
		path: PathBuf,
		#[source]
		source: anyhow::Error,
	},
}

impl ExportError {
	/// Stable machine-readable code.
	pub fn code(&self) -> &'static str {
		match self {
			ExportError::Config(_) => "INVALID_CONFIG",
			ExportError::Launch(_) => "BROWSER_LAUNCH_FAILED",
			ExportError::Page(_) => "PAGE_OPEN_FAILED",
			ExportError::Navigation { .. } => "NAVIGATION_FAILED",
			ExportError::Render { .. } => "RENDER_FAILED",
		}
	}
}
