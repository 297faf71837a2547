//! Backoff policies for the retry loop.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::error_handling::get_retry_strategy;

/// Schedule of delays between attempts of one logical call.
///
/// The schedule also bounds the retry count: a call makes at most
/// `1 + delays().count()` attempts.
pub trait BackoffPolicy: Send + Sync {
    fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send + '_>;
}

/// Exponential backoff driven by `RetryConfig`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoffPolicy {
    config: RetryConfig,
}

impl ExponentialBackoffPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

impl BackoffPolicy for ExponentialBackoffPolicy {
    fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send + '_> {
        Box::new(get_retry_strategy(&self.config))
    }
}

/// Same delay before every retry.
#[derive(Debug, Clone, Copy)]
pub struct FixedBackoff {
    pub delay: Duration,
    pub retries: usize,
}

impl BackoffPolicy for FixedBackoff {
    fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send + '_> {
        Box::new(std::iter::repeat(self.delay).take(self.retries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_policy_follows_retry_config() {
        let policy = ExponentialBackoffPolicy::new(RetryConfig {
            attempts: 3,
            initial_delay_ms: 10,
            factor: 3,
            max_delay_secs: 5,
        });
        let delays: Vec<Duration> = policy.delays().collect();
        assert_eq!(
            delays,
            vec![Duration::from_millis(10), Duration::from_millis(30)]
        );
    }

    #[test]
    fn test_schedule_restarts_for_each_call() {
        let policy = ExponentialBackoffPolicy::new(RetryConfig::default());
        assert_eq!(policy.delays().count(), policy.delays().count());
    }

    #[test]
    fn test_fixed_backoff() {
        let policy = FixedBackoff {
            delay: Duration::from_millis(5),
            retries: 2,
        };
        assert_eq!(
            policy.delays().collect::<Vec<_>>(),
            vec![Duration::from_millis(5); 2]
        );
    }
}
