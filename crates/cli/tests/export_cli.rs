use std::path::{Path, PathBuf};
use std::process::Command;

use chromium::runtime::find_browser_executable;
use tempfile::TempDir;

const HELLO: &str = "<html><body>Hello</body></html>";

fn resume_pdf_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_resume-pdf"))
}

/// Runs the exporter against `site_dir`, returning (success, stdout, stderr).
fn run_export(site_dir: &Path, extra_env: &[(&str, &str)]) -> (bool, String, String) {
	let mut command = Command::new(resume_pdf_binary());
	command
		.current_dir(site_dir)
		.env_remove("RESUME_PDF_DIR")
		.env_remove("RESUME_PDF_NO_SANDBOX")
		.env("RUST_LOG", "warn");
	for (key, value) in extra_env {
		command.env(key, value);
	}
	let output = command.output().expect("failed to execute resume-pdf");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

/// Browser executable for end-to-end runs, or `None` to skip.
fn browser() -> Option<String> {
	let explicit = std::env::var_os("RESUME_PDF_CHROME").map(PathBuf::from);
	match find_browser_executable(explicit.as_deref()) {
		Ok(path) => Some(path.to_string_lossy().into_owned()),
		Err(e) => {
			eprintln!("skipping: {e}");
			None
		}
	}
}

#[test]
fn missing_source_fails_without_creating_output() {
	let dir = TempDir::new().unwrap();

	let (success, stdout, stderr) = run_export(dir.path(), &[]);

	assert!(!success);
	assert!(stdout.is_empty(), "stdout: {stdout}");
	assert!(stderr.contains("Error generating PDF:"), "stderr: {stderr}");
	assert!(!dir.path().join("resume.pdf").exists());
}

#[test]
fn missing_source_leaves_previous_output_untouched() {
	let dir = TempDir::new().unwrap();
	let output = dir.path().join("resume.pdf");
	std::fs::write(&output, b"%PDF-previous").unwrap();

	let (success, _, _) = run_export(dir.path(), &[]);

	assert!(!success);
	assert_eq!(std::fs::read(&output).unwrap(), b"%PDF-previous");
}

#[test]
fn site_dir_comes_from_environment() {
	let cwd = TempDir::new().unwrap();
	let site = TempDir::new().unwrap();
	let site_dir = site.path().to_string_lossy().into_owned();

	let (success, _, stderr) = run_export(cwd.path(), &[("RESUME_PDF_DIR", &site_dir)]);

	assert!(!success);
	assert!(stderr.contains(&site_dir), "stderr: {stderr}");
}

#[test]
fn unknown_argument_is_a_usage_error() {
	let dir = TempDir::new().unwrap();
	let output = Command::new(resume_pdf_binary())
		.current_dir(dir.path())
		.arg("--format")
		.output()
		.expect("failed to execute resume-pdf");
	assert_eq!(output.status.code(), Some(2));
}

#[test]
fn hello_renders_letter_pdf() {
	let Some(chrome) = browser() else {
		return;
	};
	let dir = TempDir::new().unwrap();
	std::fs::write(dir.path().join("resume.html"), HELLO).unwrap();
	let env = [("RESUME_PDF_CHROME", chrome.as_str()), ("RESUME_PDF_NO_SANDBOX", "1")];

	let (success, stdout, stderr) = run_export(dir.path(), &env);
	assert!(success, "stderr: {stderr}");
	assert_eq!(stdout.trim(), "Generated resume.pdf");

	let first = std::fs::read(dir.path().join("resume.pdf")).unwrap();
	assert!(first.starts_with(b"%PDF-"));
	// Letter is 612 x 792 points.
	let text = String::from_utf8_lossy(&first);
	assert!(text.contains("612 792"), "no Letter MediaBox");

	// A second run replaces the file rather than appending to it.
	std::fs::write(dir.path().join("resume.html"), "<html><body>Hello again</body></html>").unwrap();
	let (success, _, stderr) = run_export(dir.path(), &env);
	assert!(success, "stderr: {stderr}");
	let second = std::fs::read(dir.path().join("resume.pdf")).unwrap();
	assert!(second.starts_with(b"%PDF-"));
	assert_eq!(second.windows(5).filter(|w| *w == b"%%EOF").count(), 1);
}
