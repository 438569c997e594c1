use crate::BrowserArgs;
use anyhow::{Context, Result};
use plover_browser::{BrowserSession, ChromeFinder, LaunchOptions, ProfileManager};
use plover_crawler::Selectors;
use std::path::Path;

/// Start (or attach to) the browser session a command runs in
pub async fn open_session(args: &BrowserArgs) -> Result<BrowserSession> {
    if let Some(ref url) = args.remote_debugging_url {
        println!("🔌 Attaching to Chrome at {}", url);
        return Ok(BrowserSession::connect(url).await?);
    }

    let chrome_path = ChromeFinder::new(args.chrome_path.clone()).find()?;
    if let Some(ref path) = chrome_path {
        println!("✅ Found Chrome at: {}", path.display());
    }

    let profile = match args.profile {
        Some(ref name) => {
            let profile = ProfileManager::named(name)?;
            println!("📁 Using profile: {}", profile.path().display());
            profile
        }
        None => ProfileManager::temporary()?,
    };

    let options = LaunchOptions {
        chrome_path,
        headless: !args.headful,
        no_sandbox: args.no_sandbox,
        ..Default::default()
    };

    println!("🚀 Launching Chrome...");
    Ok(BrowserSession::launch(&options, profile).await?)
}

/// Close the session, logging rather than failing if Chrome misbehaves
pub async fn close_session(session: BrowserSession) {
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser cleanly: {}", e);
    }
}

/// Default selectors, or the overrides in `path`
pub fn load_selectors(path: Option<&Path>) -> Result<Selectors> {
    match path {
        Some(path) => Selectors::from_file(path)
            .with_context(|| format!("Failed to load selectors from {}", path.display())),
        None => Ok(Selectors::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_without_file() {
        assert_eq!(load_selectors(None).unwrap(), Selectors::default());
    }

    #[test]
    fn test_missing_selectors_file_names_path() {
        let err = load_selectors(Some(Path::new("/nonexistent/selectors.json"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/selectors.json"));
    }
}
