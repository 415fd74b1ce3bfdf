use clap::Parser;

/// Render resume.html to resume.pdf (Letter, 0.5in margins) with headless Chromium.
///
/// Environment:
///   RESUME_PDF_DIR         directory holding resume.html and resume.pdf (default: current directory)
///   RESUME_PDF_CHROME      browser executable to use instead of discovery
///   RESUME_PDF_NO_SANDBOX  "1" or "true" disables the browser sandbox (also when CI=true)
///   RUST_LOG               log filter, e.g. resume_pdf=debug
#[derive(Parser, Debug)]
#[command(name = "resume-pdf", version, verbatim_doc_comment)]
pub struct Cli {}
