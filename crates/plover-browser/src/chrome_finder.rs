use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Executable names looked up on `PATH` when no install path matches
const PATH_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Resolves the Chrome binary used for a crawl
pub struct ChromeFinder {
    custom_path: Option<PathBuf>,
}

impl ChromeFinder {
    pub fn new(custom_path: Option<PathBuf>) -> Self {
        Self { custom_path }
    }

    /// Resolve a Chrome binary.
    ///
    /// An explicit path must be valid or this fails. Otherwise the platform
    /// install locations are tried, then `PATH`. `Ok(None)` leaves detection
    /// to chromiumoxide.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        if let Some(ref path) = self.custom_path {
            return validate_chrome_path(path).map(Some);
        }

        if let Some(path) = Self::install_paths()
            .into_iter()
            .find(|p| validate_chrome_path(p).is_ok())
        {
            tracing::debug!("Using Chrome at {}", path.display());
            return Ok(Some(path));
        }

        let on_path = PATH_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok());
        match &on_path {
            Some(path) => tracing::debug!("Using Chrome from PATH: {}", path.display()),
            None => tracing::debug!("No Chrome binary found, deferring to chromiumoxide"),
        }
        Ok(on_path)
    }

    fn install_paths() -> Vec<PathBuf> {
        #[cfg(target_os = "macos")]
        return vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ];

        #[cfg(target_os = "linux")]
        return vec![
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/usr/bin/chromium"),
            PathBuf::from("/usr/bin/chromium-browser"),
            PathBuf::from("/snap/bin/chromium"),
        ];

        #[cfg(target_os = "windows")]
        return vec![
            PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        return vec![];
    }
}

fn validate_chrome_path(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        if mode & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}
