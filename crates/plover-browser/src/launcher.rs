use crate::{Error, Result};
use chromiumoxide::BrowserConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How Chrome is started for a crawl
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    pub no_sandbox: bool,
    pub window_size: (u32, u32),
    pub request_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            no_sandbox: false,
            window_size: (1920, 1080),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl LaunchOptions {
    /// Extra Chrome flags beyond what chromiumoxide sets itself
    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-gpu".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
        ];

        if self.no_sandbox {
            args.push("--disable-dev-shm-usage".to_string());
        }

        args
    }

    /// Build the chromiumoxide config for a session using `profile_dir`
    pub fn to_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let (width, height) = self.window_size;
        let mut builder = BrowserConfig::builder()
            .window_size(width, height)
            .user_data_dir(profile_dir)
            .request_timeout(self.request_timeout)
            .args(self.build_args());

        if !self.headless {
            builder = builder.with_head();
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| Error::Browser(format!("Invalid browser configuration: {}", e)))
    }
}
