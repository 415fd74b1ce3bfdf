//! Browser executable discovery.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves the browser executable: `explicit` when given, otherwise the
/// first installed candidate for this platform.
pub fn find_browser_executable(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return resolve_candidate(&path.to_string_lossy()).ok_or_else(|| {
			Error::ExecutableNotFound(format!("{} does not exist or is not on PATH", path.display()))
		});
	}

	default_candidates()
		.iter()
		.find_map(|candidate| resolve_candidate(candidate))
		.ok_or_else(|| {
			Error::ExecutableNotFound(
				"could not find Chrome/Chromium. Install one or point RESUME_PDF_CHROME at it".into(),
			)
		})
}

/// Absolute or relative paths must exist; bare names are looked up on PATH.
fn resolve_candidate(candidate: &str) -> Option<PathBuf> {
	if candidate.contains('/') || candidate.contains('\\') || candidate.contains(':') {
		let path = PathBuf::from(candidate);
		path.is_file().then_some(path)
	} else {
		which::which(candidate).ok()
	}
}

pub(crate) fn default_candidates() -> Vec<String> {
	if cfg!(target_os = "macos") {
		[
			"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
			"/Applications/Chromium.app/Contents/MacOS/Chromium",
			"/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
			"/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
			"/Applications/Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	} else if cfg!(target_os = "windows") {
		windows_browser_candidates()
	} else {
		[
			"chromium",
			"chromium-browser",
			"google-chrome-stable",
			"google-chrome",
			"chrome",
			"chrome-headless-shell",
			"brave-browser",
			"microsoft-edge",
			"/usr/bin/chromium",
			"/usr/bin/chromium-browser",
			"/usr/bin/google-chrome-stable",
			"/usr/bin/google-chrome",
			"/snap/bin/chromium",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	}
}

pub(crate) fn windows_browser_candidates() -> Vec<String> {
	let mut candidates = Vec::new();

	let mut roots = Vec::new();
	for key in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
		if let Ok(value) = std::env::var(key) {
			roots.push(PathBuf::from(value));
		}
	}
	if roots.is_empty() {
		roots.push(PathBuf::from(r"C:\Program Files"));
		roots.push(PathBuf::from(r"C:\Program Files (x86)"));
	}

	let suffixes: &[&[&str]] = &[
		&["Google", "Chrome", "Application", "chrome.exe"],
		&["Chromium", "Application", "chrome.exe"],
		&["Microsoft", "Edge", "Application", "msedge.exe"],
		&["BraveSoftware", "Brave-Browser", "Application", "brave.exe"],
	];

	for root in roots {
		for suffix in suffixes {
			let mut path = root.clone();
			for component in *suffix {
				path.push(component);
			}
			candidates.push(path.to_string_lossy().to_string());
		}
	}

	candidates.extend(["chrome.exe", "msedge.exe", "brave.exe", "chromium.exe"].map(str::to_string));

	candidates
}
