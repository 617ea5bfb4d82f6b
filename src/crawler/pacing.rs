//! Randomized inter-request pacing
//!
//! A uniformly random delay between successive fetches keeps the run under
//! remote rate-limiting and anti-bot thresholds. The first request of a run
//! is never delayed, and the same distribution applies for the whole run.

use crate::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Inter-request delay generator for one run
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    wait_min: f64,
    wait_max: f64,
}

impl Pacer {
    /// Creates a pacer with bounds in seconds
    ///
    /// `wait_min == wait_max` is valid and yields that exact delay.
    pub fn new(wait_min: f64, wait_max: f64) -> Result<Self, ConfigError> {
        if !wait_min.is_finite() || !wait_max.is_finite() || wait_min < 0.0 {
            return Err(ConfigError::Validation(format!(
                "wait bounds must be finite and non-negative, got {}..{}",
                wait_min, wait_max
            )));
        }
        if wait_max < wait_min {
            return Err(ConfigError::Validation(format!(
                "wait-max ({}) must be >= wait-min ({})",
                wait_max, wait_min
            )));
        }
        Ok(Self { wait_min, wait_max })
    }

    /// Samples one delay from the configured uniform distribution
    pub fn sample_delay(&self) -> Duration {
        let seconds = if self.wait_min == self.wait_max {
            self.wait_min
        } else {
            rand::thread_rng().gen_range(self.wait_min..=self.wait_max)
        };
        Duration::from_secs_f64(seconds)
    }

    /// Suspends the calling task before a request
    ///
    /// No delay precedes the first request of a run; every later request
    /// waits a sampled duration first.
    pub async fn pause_before(&self, is_first: bool) {
        if is_first {
            return;
        }
        let delay = self.sample_delay();
        tracing::info!("Waiting {:.2}s before the next page", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
    }
}
