use std::time::{Duration, Instant};

/// Quiet period before keyword input is applied
pub const KEYWORD_QUIET_PERIOD: Duration = Duration::from_millis(600);

/// Holds back a value until input has been quiet for a fixed period
///
/// The clock is passed in by the caller, so nothing here sleeps or spawns.
/// Each `push` replaces the pending value and restarts the period; only the
/// last value pushed within a burst is ever released.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now, value));
    }

    /// Release the pending value if the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if now.saturating_duration_since(*at) >= self.quiet => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    /// When the pending value becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at + self.quiet)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(KEYWORD_QUIET_PERIOD)
    }
}
