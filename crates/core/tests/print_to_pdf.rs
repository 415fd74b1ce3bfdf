// Integration tests against a real Chromium-family browser.
//
// Skipped when no browser can be found on this machine. Set
// RESUME_PDF_CHROME to point at a specific executable.

use std::path::PathBuf;

use chromium::runtime::find_browser_executable;
use chromium::runtime::launch::SANDBOX_DISABLE_ARGS;
use chromium::{Browser, GotoOptions, LaunchOptions, PdfOptions};

fn browser_options() -> Option<LaunchOptions> {
    let explicit = std::env::var_os("RESUME_PDF_CHROME").map(PathBuf::from);
    let executable = match find_browser_executable(explicit.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("skipping: {e}");
            return None;
        }
    };
    let no_sandbox = std::env::var_os("CI").is_some() || std::env::var_os("RESUME_PDF_NO_SANDBOX").is_some();
    let options = LaunchOptions::new().executable(executable);
    Some(if no_sandbox {
        options.args(SANDBOX_DISABLE_ARGS.iter().copied())
    } else {
        options
    })
}

/// Whether `pid` still has a process table entry. Reaped children do not.
#[cfg(target_os = "linux")]
fn process_exists(pid: u32) -> bool {
    std::path::Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_exists(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn prints_local_file_and_releases_process() {
    let Some(options) = browser_options() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("resume.html");
    std::fs::write(
        &html,
        "<!doctype html><html><body style=\"background:#eef\"><h1>Hello</h1></body></html>",
    )
    .unwrap();
    let url = url::Url::from_file_path(&html).unwrap();

    let browser = Browser::launch(options).await.expect("launch");
    let pid = browser.pid().expect("pid");
    assert!(browser.version().is_some());

    let page = browser.new_page().await.expect("new page");
    page.goto(url.as_str(), GotoOptions::new()).await.expect("goto");
    let out = dir.path().join("resume.pdf");
    let written = page.pdf_to_file(&out, &PdfOptions::resume()).await.expect("pdf");
    page.close().await.expect("close page");
    browser.close().await.expect("close browser");

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(bytes.len() as u64, written);
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!process_exists(pid), "browser process {pid} still running");
}

#[tokio::test]
async fn missing_file_is_a_navigation_error() {
    let Some(options) = browser_options() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let url = url::Url::from_file_path(dir.path().join("absent.html")).unwrap();

    let browser = Browser::launch(options).await.expect("launch");
    let page = browser.new_page().await.expect("new page");
    let err = page.goto(url.as_str(), GotoOptions::new()).await.unwrap_err();
    assert!(matches!(err, chromium::Error::Navigation { .. }), "got {err:?}");

    page.close().await.expect("close page");
    browser.close().await.expect("close browser");
}
