//! Retry policy for remote calls
//!
//! The production default retries forever with a fixed delay, matching the
//! "keep asking until the outage ends" behavior expected of the sorter;
//! tests inject a bounded policy so failures surface deterministically.

use std::time::Duration;

use crate::config::DEFAULT_RETRY_DELAY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts allowed, `None` for unbounded.
    pub max_attempts: Option<u32>,
    /// Fixed pause between attempts after a transient failure.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
        }
    }

    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }

    /// May another attempt be made after `attempts` have already run?
    pub fn allows(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }

    pub async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_millis(DEFAULT_RETRY_DELAY_MS))
    }
}
