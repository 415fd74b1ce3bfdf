//! Wire types for the DevTools protocol subset driven by resume-pdf.
//!
//! This crate contains the serde-serializable shapes exchanged with a
//! Chromium-family browser over its remote debugging WebSocket, plus the
//! print options that end up in `Page.printToPDF`.
//!
//! Types in this crate are pure data: no I/O, no async. The connection
//! machinery lives in `resume-pdf-runtime`, the typed handles in
//! `resume-pdf-core`.

pub mod message;
pub mod options;
pub mod types;

pub use message::*;
pub use options::*;
pub use types::*;
