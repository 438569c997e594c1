use crate::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// A bounded wait: poll a condition until it yields a value or time runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Poll `probe` until it returns `Some`, giving `None` once the timeout
    /// elapses. The probe always runs at least once. Errors from the probe end
    /// the wait immediately.
    pub async fn until<T, F, Fut>(&self, mut probe: F) -> Result<Option<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(value) = probe().await? {
                return Ok(Some(value));
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!("Wait timed out after {:?}", self.timeout);
                return Ok(None);
            }
            sleep(self.interval.min(deadline - now)).await;
        }
    }
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_millis(250))
    }
}
