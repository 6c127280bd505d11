//! Bounded polling used after every navigation step.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::{Result, ScrapeError};

/// Default time allowed for the portal to settle after a transition.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between readiness probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
	pub timeout: Duration,
	pub poll_interval: Duration,
}

impl Default for WaitPolicy {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_TIMEOUT,
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}
}

impl WaitPolicy {
	pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
		Self { timeout, poll_interval }
	}

	/// Polls `probe` until it reports ready or the timeout elapses.
	///
	/// The probe runs at least once, so a zero timeout still checks the
	/// condition. Probe errors abort the wait immediately.
	pub async fn until<F, Fut>(&self, condition: &str, mut probe: F) -> Result<()>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<bool>>,
	{
		let start = Instant::now();
		let mut attempts = 0u32;

		loop {
			attempts += 1;
			if probe().await? {
				trace!(target = "seace.wait", %condition, attempts, "ready");
				return Ok(());
			}

			if start.elapsed() >= self.timeout {
				return Err(ScrapeError::Timeout {
					condition: condition.to_string(),
					waited: start.elapsed(),
				});
			}

			tokio::time::sleep(self.poll_interval).await;
		}
	}
}
