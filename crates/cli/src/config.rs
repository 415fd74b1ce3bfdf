//! Run configuration read from the environment.

use std::path::{Path, PathBuf};

use chromium::runtime::launch::SANDBOX_DISABLE_ARGS;

use crate::error::{ExportError, Result};

pub const SOURCE_FILE: &str = "resume.html";
pub const OUTPUT_FILE: &str = "resume.pdf";

pub const ENV_NO_SANDBOX: &str = "RESUME_PDF_NO_SANDBOX";
pub const ENV_CI: &str = "CI";
pub const ENV_SITE_DIR: &str = "RESUME_PDF_DIR";
pub const ENV_CHROME: &str = "RESUME_PDF_CHROME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
	/// Absolute directory holding the source and the output.
	pub site_dir: PathBuf,
	/// Launch the browser without the OS sandbox.
	pub no_sandbox: bool,
	/// Browser executable override; discovered when `None`.
	pub executable: Option<PathBuf>,
}

impl ExportConfig {
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let site_dir = match lookup(ENV_SITE_DIR).filter(|dir| !dir.is_empty()) {
			Some(dir) => std::path::absolute(&dir)
				.map_err(|e| ExportError::Config(format!("cannot resolve {ENV_SITE_DIR}={dir}: {e}")))?,
			None => std::env::current_dir()
				.map_err(|e| ExportError::Config(format!("cannot resolve current directory: {e}")))?,
		};

		let opt_in = matches!(lookup(ENV_NO_SANDBOX).as_deref(), Some("1" | "true"));
		let ci = lookup(ENV_CI).as_deref() == Some("true");

		let executable = lookup(ENV_CHROME).filter(|exe| !exe.is_empty()).map(PathBuf::from);

		Ok(Self {
			site_dir,
			no_sandbox: opt_in || ci,
			executable,
		})
	}

	/// Configuration for an explicit directory with everything else default.
	pub fn for_dir(site_dir: impl Into<PathBuf>) -> Self {
		Self {
			site_dir: site_dir.into(),
			no_sandbox: false,
			executable: None,
		}
	}

	pub fn source_path(&self) -> PathBuf {
		self.site_dir.join(SOURCE_FILE)
	}

	pub fn output_path(&self) -> PathBuf {
		self.site_dir.join(OUTPUT_FILE)
	}

	/// Extra browser arguments; the sandbox flags when sandboxing is off.
	pub fn launch_args(&self) -> Vec<String> {
		if self.no_sandbox {
			SANDBOX_DISABLE_ARGS.iter().map(|arg| arg.to_string()).collect()
		} else {
			Vec::new()
		}
	}
}

/// `file://` URL for an absolute path.
pub fn file_url(path: &Path) -> Result<String> {
	url::Url::from_file_path(path)
		.map(String::from)
		.map_err(|()| ExportError::Config(format!("{} is not an absolute path", path.display())))
}
