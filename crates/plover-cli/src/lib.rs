use clap::Args;
use std::path::PathBuf;

pub mod commands;

/// Browser options shared by every command that drives Chrome
#[derive(Args, Debug, Clone, Default)]
pub struct BrowserArgs {
    /// Path to the Chrome binary
    #[arg(long, env = "PLOVER_CHROME_PATH", value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headful: bool,

    /// Disable Chrome's sandbox (needed in most containers)
    #[arg(long, env = "PLOVER_NO_SANDBOX")]
    pub no_sandbox: bool,

    /// Keep browser state in a named profile under ~/.plover/profiles
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Attach to a running Chrome instead of launching one
    #[arg(
        long,
        env = "PLOVER_REMOTE_DEBUGGING_URL",
        value_name = "URL",
        conflicts_with_all = ["chrome_path", "profile", "headful"]
    )]
    pub remote_debugging_url: Option<String>,

    /// JSON file overriding the CSS selectors for the site's markup
    #[arg(long, value_name = "FILE")]
    pub selectors: Option<PathBuf>,
}

/// Parse a count that must be at least 1
pub fn positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
