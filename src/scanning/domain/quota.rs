use std::time::Duration;

/// The most recent observation of the forge's rate-limit window.
///
/// Refreshed by polling or from response headers; never persisted.
/// May be stale between polls, which callers must tolerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaState {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset_epoch: Option<u64>,
    pub authenticated: bool,
}

impl QuotaState {
    pub fn new(limit: u32, remaining: u32, reset_epoch: u64, authenticated: bool) -> Self {
        Self {
            limit: Some(limit),
            remaining: Some(remaining),
            reset_epoch: Some(reset_epoch),
            authenticated,
        }
    }

    /// Sentinel returned when the quota endpoint could not be reached.
    /// Polling the quota is best-effort and must never fail the caller.
    pub fn unknown() -> Self {
        Self {
            limit: None,
            remaining: None,
            reset_epoch: None,
            authenticated: false,
        }
    }

    pub fn is_known(&self) -> bool {
        self.remaining.is_some()
    }
}

/// What the pacing policy recommends between consecutive fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Minimal delay between consecutive fetches.
    Minimal,
    /// Normal delay applied every 5th processed item.
    Short,
    /// Longer delay applied every 5th item when the quota runs low.
    Long,
    /// Quota exhausted with a known reset: block until then, plus buffer.
    BlockUntilReset(Duration),
}

impl ThrottleDecision {
    pub fn delay(&self) -> Duration {
        match self {
            ThrottleDecision::Minimal => QuotaTracker::MINIMAL_DELAY,
            ThrottleDecision::Short => QuotaTracker::SHORT_DELAY,
            ThrottleDecision::Long => QuotaTracker::LONG_DELAY,
            ThrottleDecision::BlockUntilReset(wait) => *wait,
        }
    }
}

/// Pure pacing and retry policy for the forge's shared request quota.
///
/// Decisions are derived from the freshest `QuotaState` observation,
/// so a stale observation yields a stale (but safe) decision.
pub struct QuotaTracker;

impl QuotaTracker {
    /// Delay between consecutive fetches when quota is healthy.
    pub const MINIMAL_DELAY: Duration = Duration::from_millis(100);
    /// Delay applied every 5th repository.
    pub const SHORT_DELAY: Duration = Duration::from_millis(500);
    /// Delay applied every 5th repository when the quota runs low.
    pub const LONG_DELAY: Duration = Duration::from_secs(2);
    /// Safety buffer added when blocking until the window resets.
    pub const RESET_BUFFER: Duration = Duration::from_secs(2);

    /// Remaining threshold below which a non-blocking warning is emitted.
    pub const WARN_THRESHOLD: u32 = 5;
    /// Remaining threshold that makes periodic checks warn about the window.
    pub const PERIODIC_WARN_THRESHOLD: u32 = 10;
    /// Remaining threshold that switches pacing to the long delay.
    pub const LOW_QUOTA_THRESHOLD: u32 = 20;

    /// How often (in processed repositories) the pacing delay is applied.
    pub const PACING_INTERVAL: usize = 5;
    /// How often (in processed repositories) the quota is re-polled for
    /// monitoring purposes.
    pub const MONITOR_INTERVAL: usize = 20;

    /// Pacing decision after `processed` repositories have been handled.
    ///
    /// Every 5th repository gets a deliberate pause whose length depends
    /// on the remaining quota; all other repositories get a minimal delay.
    /// An unknown quota state paces as if the quota were healthy.
    pub fn pacing(state: &QuotaState, processed: usize) -> ThrottleDecision {
        if processed == 0 || processed % Self::PACING_INTERVAL != 0 {
            return ThrottleDecision::Minimal;
        }
        match state.remaining {
            Some(remaining) if remaining <= Self::LOW_QUOTA_THRESHOLD => ThrottleDecision::Long,
            _ => ThrottleDecision::Short,
        }
    }

    /// Whether the remaining quota is low enough to warn about, without
    /// blocking anything.
    pub fn should_warn(state: &QuotaState) -> bool {
        matches!(state.remaining, Some(r) if r <= Self::WARN_THRESHOLD)
    }

    /// Whether a periodic monitoring check should flag the window.
    pub fn should_warn_periodic(state: &QuotaState) -> bool {
        matches!(state.remaining, Some(r) if r <= Self::PERIODIC_WARN_THRESHOLD)
    }

    /// How long to block before retrying a quota-exhausted request.
    ///
    /// Returns the wait until `reset_epoch` plus a small buffer, or `None`
    /// when no usable reset time is known (the attempt is then treated as
    /// a failure rather than a wait).
    pub fn reset_wait(reset_epoch: Option<u64>, now_epoch: u64) -> Option<Duration> {
        let reset = reset_epoch?;
        if reset <= now_epoch {
            return None;
        }
        Some(Duration::from_secs(reset - now_epoch) + Self::RESET_BUFFER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_is_not_known() {
        let state = QuotaState::unknown();
        assert!(!state.is_known());
        assert!(state.limit.is_none());
        assert!(state.reset_epoch.is_none());
    }

    #[test]
    fn test_pacing_minimal_between_fetches() {
        let state = QuotaState::new(5000, 4000, 0, true);
        assert_eq!(QuotaTracker::pacing(&state, 1), ThrottleDecision::Minimal);
        assert_eq!(QuotaTracker::pacing(&state, 7), ThrottleDecision::Minimal);
        assert_eq!(QuotaTracker::pacing(&state, 0), ThrottleDecision::Minimal);
    }

    #[test]
    fn test_pacing_short_every_fifth() {
        let state = QuotaState::new(5000, 4000, 0, true);
        assert_eq!(QuotaTracker::pacing(&state, 5), ThrottleDecision::Short);
        assert_eq!(QuotaTracker::pacing(&state, 10), ThrottleDecision::Short);
    }

    #[test]
    fn test_pacing_long_when_quota_low() {
        let state = QuotaState::new(60, 20, 0, false);
        assert_eq!(QuotaTracker::pacing(&state, 5), ThrottleDecision::Long);
        // Off-interval repositories keep the minimal delay even when low
        assert_eq!(QuotaTracker::pacing(&state, 6), ThrottleDecision::Minimal);
    }

    #[test]
    fn test_pacing_unknown_state_stays_short() {
        let state = QuotaState::unknown();
        assert_eq!(QuotaTracker::pacing(&state, 5), ThrottleDecision::Short);
    }

    #[test]
    fn test_warning_thresholds() {
        assert!(QuotaTracker::should_warn(&QuotaState::new(60, 5, 0, false)));
        assert!(!QuotaTracker::should_warn(&QuotaState::new(60, 6, 0, false)));
        assert!(QuotaTracker::should_warn_periodic(&QuotaState::new(
            60, 10, 0, false
        )));
        assert!(!QuotaTracker::should_warn_periodic(&QuotaState::new(
            60, 11, 0, false
        )));
        assert!(!QuotaTracker::should_warn(&QuotaState::unknown()));
    }

    #[test]
    fn test_reset_wait_includes_buffer() {
        let wait = QuotaTracker::reset_wait(Some(1005), 1000).unwrap();
        assert_eq!(wait, Duration::from_secs(5) + QuotaTracker::RESET_BUFFER);
    }

    #[test]
    fn test_reset_wait_none_when_past_or_missing() {
        assert!(QuotaTracker::reset_wait(Some(999), 1000).is_none());
        assert!(QuotaTracker::reset_wait(Some(1000), 1000).is_none());
        assert!(QuotaTracker::reset_wait(None, 1000).is_none());
    }

    #[test]
    fn test_throttle_delays_ordered() {
        assert!(ThrottleDecision::Minimal.delay() < ThrottleDecision::Short.delay());
        assert!(ThrottleDecision::Short.delay() < ThrottleDecision::Long.delay());
    }
}
