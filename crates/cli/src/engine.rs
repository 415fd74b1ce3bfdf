//! Browser engine seam used by the exporter.
//!
//! The exporter only needs four capabilities: launch a session, open a
//! document in it, navigate that document and print it. [`ChromiumEngine`]
//! provides them with a real headless browser; tests substitute a fake.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chromium::{Browser, GotoOptions, LaunchOptions, Page, PdfOptions};

/// Starts browser sessions.
#[async_trait]
pub trait Engine: Send + Sync {
	/// Launches a session with `args` appended to the browser command line.
	async fn launch(&self, args: Vec<String>) -> anyhow::Result<Box<dyn Session>>;
}

/// A running browser. Released once with [`Session::close`].
#[async_trait]
pub trait Session: Send + Sync {
	async fn open_document(&self) -> anyhow::Result<Box<dyn Document>>;

	async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

/// A page within a session. Released once with [`Document::close`].
#[async_trait]
pub trait Document: Send {
	/// Loads `url` and returns once the network has gone idle.
	async fn navigate(&mut self, url: &str) -> anyhow::Result<()>;

	/// Prints the loaded document to `output`, returning the bytes written.
	async fn render(&mut self, output: &Path, options: &PdfOptions) -> anyhow::Result<u64>;

	async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

/// Headless Chromium-family browser.
#[derive(Debug, Clone, Default)]
pub struct ChromiumEngine {
	executable: Option<PathBuf>,
}

impl ChromiumEngine {
	pub fn new(executable: Option<PathBuf>) -> Self {
		Self { executable }
	}

	fn launch_options(&self, args: Vec<String>) -> LaunchOptions {
		let options = LaunchOptions::new().args(args);
		match &self.executable {
			Some(executable) => options.executable(executable.clone()),
			None => options,
		}
	}
}

#[async_trait]
impl Engine for ChromiumEngine {
	async fn launch(&self, args: Vec<String>) -> anyhow::Result<Box<dyn Session>> {
		let browser = Browser::launch(self.launch_options(args)).await?;
		Ok(Box::new(ChromiumSession { browser }))
	}
}

struct ChromiumSession {
	browser: Browser,
}

#[async_trait]
impl Session for ChromiumSession {
	async fn open_document(&self) -> anyhow::Result<Box<dyn Document>> {
		let page = self.browser.new_page().await?;
		Ok(Box::new(ChromiumDocument { page }))
	}

	async fn close(self: Box<Self>) -> anyhow::Result<()> {
		Ok(self.browser.close().await?)
	}
}

struct ChromiumDocument {
	page: Page,
}

#[async_trait]
impl Document for ChromiumDocument {
	async fn navigate(&mut self, url: &str) -> anyhow::Result<()> {
		Ok(self.page.goto(url, GotoOptions::new()).await?)
	}

	async fn render(&mut self, output: &Path, options: &PdfOptions) -> anyhow::Result<u64> {
		Ok(self.page.pdf_to_file(output, options).await?)
	}

	async fn close(self: Box<Self>) -> anyhow::Result<()> {
		Ok(self.page.close().await?)
	}
}
