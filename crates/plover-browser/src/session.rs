use crate::{CdpPage, LaunchOptions, ProfileManager, Result};
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// One browser and the single tab a crawl runs in
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: CdpPage,
    // Launched sessions own their profile; attached ones leave Chrome running
    profile: Option<ProfileManager>,
}

impl BrowserSession {
    /// Launch a new Chrome using `profile` as its user-data directory
    pub async fn launch(options: &LaunchOptions, profile: ProfileManager) -> Result<Self> {
        let config = options.to_config(profile.path())?;

        tracing::info!(
            "Launching Chrome ({})",
            if options.headless { "headless" } else { "headful" }
        );
        let (browser, handler) = Browser::launch(config).await?;

        Self::start(browser, handler, Some(profile)).await
    }

    /// Attach to an already running Chrome's DevTools endpoint
    pub async fn connect(debugging_url: &str) -> Result<Self> {
        tracing::info!("Connecting to Chrome at {}", debugging_url);
        let (browser, handler) = Browser::connect(debugging_url).await?;

        Self::start(browser, handler, None).await
    }

    async fn start(
        browser: Browser,
        mut handler: chromiumoxide::Handler,
        profile: Option<ProfileManager>,
    ) -> Result<Self> {
        // The handler drives every CDP command and must run before the first one
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        tracing::debug!("Browser session ready");

        Ok(Self {
            browser,
            handler_task,
            page: CdpPage::new(page),
            profile,
        })
    }

    pub fn page(&self) -> &CdpPage {
        &self.page
    }

    /// Release the session: quit a launched Chrome, or just close our tab
    /// when attached to someone else's
    pub async fn close(self) -> Result<()> {
        let Self {
            mut browser,
            handler_task,
            page,
            profile,
        } = self;

        if profile.is_some() {
            browser.close().await?;
            if let Err(e) = browser.wait().await {
                tracing::debug!("Waiting for Chrome to exit failed: {}", e);
            }
        } else {
            page.into_inner().close().await?;
        }

        handler_task.abort();
        tracing::debug!("Browser session closed");

        // Temporary profile directories go away here
        drop(profile);
        Ok(())
    }
}
