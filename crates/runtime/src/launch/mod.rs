//! Browser discovery, launch and DevTools endpoint probing.

mod finder;
mod launcher;
mod probe;

pub use finder::find_browser_executable;
pub use launcher::{BrowserProcess, LaunchOptions, SANDBOX_DISABLE_ARGS, launch_browser};
pub use probe::{CdpVersionInfo, fetch_cdp_endpoint};
