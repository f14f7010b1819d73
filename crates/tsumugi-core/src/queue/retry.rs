//! Retry policy: decides backoff delays between dispatch attempts.

use std::time::Duration;

/// Backoff policy for a failed head-of-queue dispatch.
///
/// Attempts are unbounded: capping them would mean dropping or skipping the
/// head, and the queue's FIFO guarantee does not allow either. The ceiling
/// keeps a long outage from growing into multi-minute silent stalls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay after the first failure.
    pub base_delay: Duration,

    /// Multiplier for exponential backoff.
    pub multiplier: f64,

    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(5),
            multiplier: 2.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay before the next retry, given the attempts already made
    /// (1-indexed).
    ///
    /// `delay = base_delay * multiplier^(attempts - 1)`, clamped to
    /// `max_delay`. With the defaults: 5s, 10s, 20s, 40s, 60s, 60s, ...
    pub fn next_delay(&self, attempts: u32) -> Duration {
        let base_secs = self.base_delay.as_secs_f64();
        let delay_secs = base_secs * self.multiplier.powi(attempts.saturating_sub(1) as i32);
        Duration::from_secs_f64(delay_secs).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first(1, 5)]
    #[case::second(2, 10)]
    #[case::third(3, 20)]
    #[case::fourth(4, 40)]
    #[case::at_ceiling(5, 60)]
    #[case::stays_at_ceiling(12, 60)]
    fn backoff_doubles_up_to_the_ceiling(#[case] attempts: u32, #[case] expected_secs: u64) {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(attempts), Duration::from_secs(expected_secs));
    }

    #[test]
    fn zero_attempts_falls_back_to_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(0), policy.base_delay);
    }
}
