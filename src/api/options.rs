use crate::kv::RetryPolicy;
use crate::lease::DEFAULT_APPLY_TIMEOUT;
use std::convert::TryFrom;
use tokio::time::Duration;

#[derive(Clone, Default)]
pub struct LeaseServerOptions {
    /// How long a forwarded request may wait for the local node to catch up.
    pub apply_timeout: Option<Duration>,
}

pub(super) struct LeaseServerOptionsValidated {
    pub apply_timeout: Duration,
}

impl LeaseServerOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.apply_timeout == Duration::from_millis(0) {
            return Err("Apply timeout must be non-zero");
        }

        Ok(())
    }
}

impl TryFrom<LeaseServerOptions> for LeaseServerOptionsValidated {
    type Error = &'static str;

    fn try_from(options: LeaseServerOptions) -> Result<Self, Self::Error> {
        let values = LeaseServerOptionsValidated {
            apply_timeout: options.apply_timeout.unwrap_or(DEFAULT_APPLY_TIMEOUT),
        };

        values.validate()?;
        Ok(values)
    }
}

/// Pacing for read retries. Leaving everything unset retries immediately and without limit.
#[derive(Clone, Default)]
pub struct RetryOptions {
    pub initial_backoff: Option<Duration>,
    pub max_backoff: Option<Duration>,
    /// Fraction in `[0, 1]` by which each delay may be randomly moved up or down.
    pub jitter: Option<f64>,
    pub max_wait: Option<Duration>,
}

impl RetryOptions {
    fn validate(policy: &RetryPolicy) -> Result<(), &'static str> {
        if !(0.0..=1.0).contains(&policy.jitter) {
            return Err("Retry jitter must be within [0, 1]");
        }
        if policy.initial_backoff > policy.max_backoff {
            return Err("Initial retry backoff must not exceed the maximum backoff");
        }
        if policy.max_wait == Some(Duration::from_millis(0)) {
            return Err("Retry max wait must be non-zero when set");
        }

        Ok(())
    }
}

impl TryFrom<RetryOptions> for RetryPolicy {
    type Error = &'static str;

    fn try_from(options: RetryOptions) -> Result<Self, Self::Error> {
        let initial_backoff = options.initial_backoff.unwrap_or(Duration::from_millis(0));
        let policy = RetryPolicy {
            initial_backoff,
            max_backoff: options
                .max_backoff
                .unwrap_or_else(|| std::cmp::max(initial_backoff, Duration::from_secs(5))),
            jitter: options.jitter.unwrap_or(0.0),
            max_wait: options.max_wait,
        };

        RetryOptions::validate(&policy)?;
        Ok(policy)
    }
}

#[derive(Clone, Default)]
pub struct KvClientOptions {
    /// Deadline for calls that fail fast (writes). Reads wait for the remote instead.
    pub request_timeout: Option<Duration>,
    pub retry: RetryOptions,
}

pub(super) struct KvClientOptionsValidated {
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl TryFrom<KvClientOptions> for KvClientOptionsValidated {
    type Error = &'static str;

    fn try_from(options: KvClientOptions) -> Result<Self, Self::Error> {
        let request_timeout = options.request_timeout.unwrap_or(Duration::from_secs(5));
        if request_timeout == Duration::from_millis(0) {
            return Err("Request timeout must be non-zero");
        }

        Ok(KvClientOptionsValidated {
            request_timeout,
            retry: RetryPolicy::try_from(options.retry)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let lease = LeaseServerOptionsValidated::try_from(LeaseServerOptions::default()).unwrap();
        assert_eq!(lease.apply_timeout, DEFAULT_APPLY_TIMEOUT);

        let kv = KvClientOptionsValidated::try_from(KvClientOptions::default()).unwrap();
        assert_eq!(kv.request_timeout, Duration::from_secs(5));
        assert_eq!(kv.retry.initial_backoff, Duration::from_millis(0));
        assert_eq!(kv.retry.jitter, 0.0);
        assert_eq!(kv.retry.max_wait(), None);
    }

    #[test]
    fn rejects_bad_values() {
        let zero = Some(Duration::from_millis(0));

        assert!(LeaseServerOptionsValidated::try_from(LeaseServerOptions { apply_timeout: zero }).is_err());
        assert!(KvClientOptionsValidated::try_from(KvClientOptions {
            request_timeout: zero,
            ..KvClientOptions::default()
        })
        .is_err());

        let bad_retries = vec![
            RetryOptions {
                jitter: Some(1.5),
                ..RetryOptions::default()
            },
            RetryOptions {
                jitter: Some(-0.1),
                ..RetryOptions::default()
            },
            RetryOptions {
                initial_backoff: Some(Duration::from_secs(2)),
                max_backoff: Some(Duration::from_secs(1)),
                ..RetryOptions::default()
            },
            RetryOptions {
                max_wait: zero,
                ..RetryOptions::default()
            },
        ];
        for options in bad_retries {
            assert!(RetryPolicy::try_from(options).is_err());
        }
    }

    #[test]
    fn max_backoff_defaults_to_at_least_initial() {
        let policy = RetryPolicy::try_from(RetryOptions {
            initial_backoff: Some(Duration::from_secs(10)),
            ..RetryOptions::default()
        })
        .unwrap();

        assert_eq!(policy.max_backoff, Duration::from_secs(10));
    }
}
