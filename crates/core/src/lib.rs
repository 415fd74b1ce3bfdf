//! Headless Chromium handles for printing pages to PDF.
//!
//! [`Browser::launch`] starts a private browser process and connects to its
//! DevTools endpoint; [`Browser::new_page`] opens a tab that can navigate and
//! print itself with [`Page::pdf`].
//!
//! Both handles are released with a consuming `close`, so a handle cannot be
//! closed twice. Dropping a [`Browser`] without closing it still kills the
//! process and removes its temporary profile.
//!
//! # Example
//!
//! ```ignore
//! use chromium::{Browser, GotoOptions, LaunchOptions, PdfOptions};
//!
//! let browser = Browser::launch(LaunchOptions::default()).await?;
//! let page = browser.new_page().await?;
//! page.goto("file:///tmp/resume.html", GotoOptions::default()).await?;
//! let pdf = page.pdf(&PdfOptions::resume()).await?;
//! page.close().await?;
//! browser.close().await?;
//! ```

mod browser;
mod page;

pub use browser::{Browser, CLOSE_GRACE};
pub use page::Page;
pub use resume_pdf_protocol::{GotoOptions, PdfOptions, WaitUntil};
pub use resume_pdf_runtime::{Error, LaunchOptions, Result};

/// Lower-level protocol and runtime crates.
pub mod protocol {
    pub use resume_pdf_protocol::*;
}

pub mod runtime {
    pub use resume_pdf_runtime::*;
}
