//! Browser process launch.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use resume_pdf_protocol::DEFAULT_TIMEOUT_MS;
use tempfile::TempDir;
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::finder::find_browser_executable;
use super::probe::{CdpVersionInfo, fetch_cdp_endpoint};
use crate::error::{Error, Result};
use crate::process::free_port;

/// Flags passed to every launched browser.
const DEFAULT_ARGS: &[&str] = &[
	"--no-first-run",
	"--no-default-browser-check",
	"--disable-background-networking",
	"--disable-component-update",
	"--disable-default-apps",
	"--disable-extensions",
	"--disable-sync",
	"--disable-gpu",
	"--hide-scrollbars",
	"--mute-audio",
];

/// Flags that turn off the OS-level process sandbox.
pub const SANDBOX_DISABLE_ARGS: &[&str] = &["--no-sandbox", "--disable-setuid-sandbox"];

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Explicit executable; discovered when `None`.
	pub executable: Option<PathBuf>,
	/// Extra arguments appended after the defaults.
	pub args: Vec<String>,
	/// How long to wait for the DevTools endpoint.
	pub timeout: Duration,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self {
			executable: None,
			args: Vec::new(),
			timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
		}
	}
}

impl LaunchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
		self.executable = Some(path.into());
		self
	}

	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Full headless argument vector for a browser listening on `port`.
	pub fn command_args(&self, port: u16, user_data_dir: &Path) -> Vec<String> {
		let mut args = vec![
			format!("--remote-debugging-port={port}"),
			format!("--user-data-dir={}", user_data_dir.display()),
			"--headless=new".to_string(),
		];
		args.extend(DEFAULT_ARGS.iter().map(|s| s.to_string()));
		args.extend(self.args.iter().cloned());
		args.push("about:blank".to_string());
		args
	}
}

/// A running browser process with a reachable DevTools endpoint.
///
/// The child is killed if this value is dropped without [`BrowserProcess::shutdown`].
pub struct BrowserProcess {
	child: Child,
	info: CdpVersionInfo,
	// Dropped after the child so the profile is removed once the browser is gone.
	_profile: TempDir,
}

impl BrowserProcess {
	pub fn pid(&self) -> Option<u32> {
		self.child.id()
	}

	pub fn ws_endpoint(&self) -> &str {
		&self.info.web_socket_debugger_url
	}

	pub fn version(&self) -> Option<&str> {
		self.info.browser.as_deref()
	}

	/// Waits up to `grace` for the process to exit on its own, then kills it.
	pub async fn shutdown(mut self, grace: Duration) -> Result<ExitStatus> {
		match tokio::time::timeout(grace, self.child.wait()).await {
			Ok(status) => Ok(status?),
			Err(_) => {
				warn!(target: "resume_pdf.browser", pid = ?self.child.id(), "browser did not exit in time; killing");
				self.child.kill().await?;
				Ok(self.child.wait().await?)
			}
		}
	}
}

/// Launches a browser and waits until its DevTools endpoint answers.
pub async fn launch_browser(options: &LaunchOptions) -> Result<BrowserProcess> {
	let executable = find_browser_executable(options.executable.as_deref())?;

	let profile = tempfile::Builder::new().prefix("resume-pdf-profile-").tempdir()?;
	let port = free_port()?;
	let args = options.command_args(port, profile.path());
	debug!(target: "resume_pdf.browser", executable = %executable.display(), ?args, "spawning browser");

	let mut child = Command::new(&executable)
		.args(&args)
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.kill_on_drop(true)
		.spawn()
		.map_err(|e| Error::Launch(format!("failed to start {}: {e}", executable.display())))?;

	let deadline = Instant::now() + options.timeout;
	let mut last_error = "endpoint not reachable".to_string();
	loop {
		if let Some(status) = child.try_wait()? {
			return Err(Error::Launch(format!(
				"{} exited before the DevTools endpoint became available ({status}). \
				 In containers or CI without user namespaces the sandbox cannot start; \
				 set RESUME_PDF_NO_SANDBOX=1 to disable it",
				executable.display()
			)));
		}

		match fetch_cdp_endpoint(port).await {
			Ok(info) => {
				info!(
					target: "resume_pdf.browser",
					pid = ?child.id(),
					port,
					browser = info.browser.as_deref().unwrap_or("unknown"),
					"browser launched"
				);
				return Ok(BrowserProcess {
					child,
					info,
					_profile: profile,
				});
			}
			Err(e) => last_error = e.to_string(),
		}

		if Instant::now() >= deadline {
			// kill_on_drop reaps the child.
			return Err(Error::Launch(format!(
				"DevTools endpoint on port {port} not available after {}ms: {last_error}",
				options.timeout.as_millis()
			)));
		}
		tokio::time::sleep(POLL_INTERVAL).await;
	}
}
