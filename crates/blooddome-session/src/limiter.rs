//! Per-session command rate limiting.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A sliding-window rate limiter.
///
/// Tracks the timestamps of recently allowed actions; an action is
/// allowed while fewer than `max_actions` happened within the trailing
/// `window`. Each session owns one, so one player hammering a command
/// cannot consume another player's budget.
#[derive(Debug)]
pub struct RateLimiter {
    max_actions: usize,
    window: Duration,
    /// Timestamps of allowed actions, oldest first.
    recent: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_actions: usize, window: Duration) -> Self {
        Self {
            max_actions,
            window,
            recent: VecDeque::with_capacity(max_actions),
        }
    }

    /// Records an attempt at `now`. Returns `true` if it is allowed,
    /// `false` if the window is already full. Denied attempts are not
    /// recorded, so a flood does not extend its own lockout.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        while let Some(oldest) = self.recent.front() {
            if now.duration_since(*oldest) >= self.window {
                self.recent.pop_front();
            } else {
                break;
            }
        }

        if self.recent.len() >= self.max_actions {
            return false;
        }
        self.recent.push_back(now);
        true
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Time-dependent behavior is tested by passing explicit `Instant`s
    //! into `try_acquire` rather than sleeping, which keeps the tests
    //! fast and deterministic.

    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(5, Duration::from_secs(1))
    }

    #[test]
    fn test_try_acquire_under_limit_allows() {
        let mut lim = limiter();
        let now = Instant::now();

        for _ in 0..5 {
            assert!(lim.try_acquire(now));
        }
    }

    #[test]
    fn test_try_acquire_over_limit_denies() {
        let mut lim = limiter();
        let now = Instant::now();

        for _ in 0..5 {
            assert!(lim.try_acquire(now));
        }
        assert!(!lim.try_acquire(now), "sixth action in the window must be denied");
    }

    #[test]
    fn test_try_acquire_window_slides_and_recovers() {
        let mut lim = limiter();
        let start = Instant::now();

        for _ in 0..5 {
            assert!(lim.try_acquire(start));
        }
        assert!(!lim.try_acquire(start));

        // One window later the old entries have aged out.
        let later = start + Duration::from_secs(1);
        assert!(lim.try_acquire(later));
    }

    #[test]
    fn test_try_acquire_denied_attempts_not_counted() {
        let mut lim = limiter();
        let start = Instant::now();

        for _ in 0..5 {
            lim.try_acquire(start);
        }
        // Flood of denied attempts half a window in.
        let mid = start + Duration::from_millis(500);
        for _ in 0..50 {
            assert!(!lim.try_acquire(mid));
        }

        // Recovery still happens one window after the ALLOWED actions,
        // not after the denied flood.
        let later = start + Duration::from_secs(1);
        assert!(lim.try_acquire(later));
    }
}
