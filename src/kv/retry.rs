use crate::kv::clock::Clock;
use backoff::exponential::ExponentialBackoff;
use tokio::time::Duration;

/// RetryPolicy paces read retries after transient failures. Build one from `RetryOptions`; the
/// default retries immediately and forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub(crate) initial_backoff: Duration,
    pub(crate) max_backoff: Duration,
    /// Fraction in `[0, 1]` by which each delay may be randomly moved up or down.
    pub(crate) jitter: f64,
    /// Give up and return the last transient error once this much time has passed.
    pub(crate) max_wait: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            initial_backoff: Duration::from_millis(0),
            max_backoff: Duration::from_millis(0),
            jitter: 0.0,
            max_wait: None,
        }
    }
}

impl RetryPolicy {
    /// Fresh backoff state for one dispatched operation. Elapsed time is read from `clock`.
    pub(crate) fn backoff<C: Clock>(&self, clock: C) -> ExponentialBackoff<BackoffClock<C>> {
        let clock = BackoffClock(clock);
        ExponentialBackoff {
            current_interval: self.initial_backoff,
            initial_interval: self.initial_backoff,
            randomization_factor: self.jitter,
            multiplier: 2.0,
            max_interval: self.max_backoff,
            start_time: backoff::Clock::now(&clock),
            max_elapsed_time: self.max_wait,
            clock,
        }
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }
}

/// Lets `ExponentialBackoff` measure elapsed time on the crate's `Clock`.
pub(crate) struct BackoffClock<C>(C);

impl<C: Clock> backoff::Clock for BackoffClock<C> {
    fn now(&self) -> std::time::Instant {
        self.0.now().into_std()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::clock::{mocked_clock, RealClock};
    use backoff::backoff::Backoff;

    fn policy(initial_ms: u64, max_ms: u64, jitter: f64) -> RetryPolicy {
        RetryPolicy {
            initial_backoff: Duration::from_millis(initial_ms),
            max_backoff: Duration::from_millis(max_ms),
            jitter,
            max_wait: None,
        }
    }

    #[test]
    fn default_is_immediate_and_unbounded() {
        let mut backoff = RetryPolicy::default().backoff(RealClock);
        for _ in 0..5 {
            assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(0)));
        }
    }

    #[test]
    fn doubles_up_to_max() {
        let mut backoff = policy(100, 1000, 0.0).backoff(RealClock);
        let delays: Vec<u64> = (0..6)
            .map(|_| backoff.next_backoff().unwrap().as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![100, 200, 400, 800, 1000, 1000]);
    }

    #[test]
    fn jitter_stays_within_factor() {
        let mut backoff = policy(1000, 1000, 0.5).backoff(RealClock);
        for _ in 0..100 {
            let delay = backoff.next_backoff().unwrap();
            assert!(delay <= Duration::from_millis(1500), "{:?}", delay);
            assert!(delay >= Duration::from_millis(500), "{:?}", delay);
        }
    }

    #[test]
    fn huge_max_backoff_does_not_overflow() {
        let mut backoff = policy(1000, u64::MAX / 2, 0.0).backoff(RealClock);
        for _ in 0..200 {
            assert!(backoff.next_backoff().is_some());
        }
    }

    #[test]
    fn stops_once_max_wait_has_passed_on_the_clock() {
        let (clock, mut controller) = mocked_clock();
        let mut retry = policy(10, 10, 0.0);
        retry.max_wait = Some(Duration::from_millis(100));
        let mut backoff = retry.backoff(clock);

        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(10)));
        controller.advance(Duration::from_millis(50));
        assert!(backoff.next_backoff().is_some());
        controller.advance(Duration::from_millis(51));
        assert_eq!(backoff.next_backoff(), None);
    }
}
