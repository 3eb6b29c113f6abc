//! Quiet-interval debouncing of rapidly changing input

use std::time::Duration;
use tokio::time::Instant;

/// Holds the latest value until no newer value has arrived for `quiet`
///
/// Every [`push`](Self::push) restarts the interval, so a burst of updates
/// yields only its last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet interval
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a new value and restart the interval
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.quiet));
    }

    /// Whether a value is waiting to be released
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Release the pending value if its interval has elapsed
    pub fn take_due(&mut self) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= Instant::now() => self.flush(),
            _ => None,
        }
    }

    /// Release the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Wait until the pending value is due and release it
    ///
    /// Returns `None` straight away when nothing is pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const QUIET: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_value_is_held_until_quiet_interval_passes() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("ph");

        tokio::time::advance(Duration::from_millis(499)).await;
        assert_eq!(debouncer.take_due(), None);
        assert!(debouncer.is_pending());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_due(), Some("ph"));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesces_to_last_value() {
        let mut debouncer = Debouncer::new(QUIET);

        for term in ["p", "ph", "pho", "phon", "phone"] {
            debouncer.push(term);
            tokio::time::advance(Duration::from_millis(200)).await;
            assert_eq!(debouncer.take_due(), None);
        }

        assert_eq!(debouncer.settle().await, Some("phone"));
        assert_eq!(debouncer.settle().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_deadline() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();
        debouncer.push(1_u32);

        assert_eq!(debouncer.settle().await, Some(1));
        assert!(start.elapsed() >= QUIET);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_skips_the_wait() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("laptop");

        assert_eq!(debouncer.flush(), Some("laptop"));
        assert!(debouncer.deadline().is_none());
    }
}
