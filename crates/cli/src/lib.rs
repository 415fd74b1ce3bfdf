//! Renders a static HTML résumé to PDF with a headless Chromium-family browser.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;

pub use config::ExportConfig;
pub use engine::{ChromiumEngine, Document, Engine, Session};
pub use error::{ExportError, Result};
pub use export::{ExportReport, export};
