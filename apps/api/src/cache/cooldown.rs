use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Minimum spacing between upstream refreshes.
///
/// A refresh counts from the moment it starts, whether or not the upstream
/// call then succeeds.
pub struct RefreshCooldown {
    window: Duration,
    last_started: Mutex<Option<DateTime<Utc>>>,
}

impl RefreshCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_started: Mutex::new(None),
        }
    }

    /// Claims the refresh slot at `now`, or returns how long until it frees up.
    pub fn try_begin(&self, now: DateTime<Utc>) -> Result<(), Duration> {
        let mut last = self
            .last_started
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(started) = *last {
            let elapsed = now - started;
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }

        *last = Some(now);
        Ok(())
    }
}

/// Whole seconds to advertise in `Retry-After`, never zero.
pub fn retry_after_secs(remaining: Duration) -> u64 {
    let millis = remaining.num_milliseconds().max(0) as u64;
    millis.div_ceil(1000).max(1)
}
