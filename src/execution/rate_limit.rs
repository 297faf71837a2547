//! Rolling-window request quota.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::{RateLimitConfig, RATE_LIMIT_WINDOW};

/// Counts admitted requests over a rolling window.
///
/// A request is admitted while fewer than `max_requests` admissions happened
/// within the last `window`. Rejected requests are not recorded.
pub struct RateLimitWindow {
    admitted: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimitWindow {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            admitted: Mutex::new(VecDeque::with_capacity(max_requests)),
            max_requests,
            window,
        }
    }

    /// Per-minute quota from the configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests_per_minute, RATE_LIMIT_WINDOW)
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Admits one request if the quota allows it.
    ///
    /// The prune, check and record happen under one lock so concurrent callers
    /// cannot overshoot the quota.
    pub async fn try_admit(&self) -> bool {
        let mut admitted = self.admitted.lock().await;
        let now = Instant::now();
        prune(&mut admitted, now, self.window);

        if admitted.len() < self.max_requests {
            admitted.push_back(now);
            true
        } else {
            false
        }
    }

    /// Number of admissions still inside the window.
    pub async fn admitted_in_window(&self) -> usize {
        let mut admitted = self.admitted.lock().await;
        prune(&mut admitted, Instant::now(), self.window);
        admitted.len()
    }
}

fn prune(admitted: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(front) = admitted.front() {
        if now.duration_since(*front) >= window {
            admitted.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_admits_up_to_quota() {
        let window = RateLimitWindow::new(3, Duration::from_secs(60));
        assert!(window.try_admit().await);
        assert!(window.try_admit().await);
        assert!(window.try_admit().await);
        assert!(!window.try_admit().await);
        assert_eq!(window.admitted_in_window().await, 3);
    }

    #[tokio::test]
    async fn test_rejections_are_not_counted() {
        let window = RateLimitWindow::new(1, Duration::from_secs(60));
        assert!(window.try_admit().await);
        for _ in 0..5 {
            assert!(!window.try_admit().await);
        }
        assert_eq!(window.admitted_in_window().await, 1);
    }

    #[tokio::test]
    async fn test_window_rolls_over() {
        let window = RateLimitWindow::new(2, Duration::from_millis(30));
        assert!(window.try_admit().await);
        assert!(window.try_admit().await);
        assert!(!window.try_admit().await);

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(window.admitted_in_window().await, 0);
        assert!(window.try_admit().await);
    }

    #[tokio::test]
    async fn test_zero_quota_rejects_everything() {
        let window = RateLimitWindow::new(0, Duration::from_secs(60));
        assert!(!window.try_admit().await);
    }

    #[tokio::test]
    async fn test_concurrent_admissions_respect_quota() {
        let window = Arc::new(RateLimitWindow::new(10, Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..50 {
            let window = Arc::clone(&window);
            handles.push(tokio::spawn(async move { window.try_admit().await }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.expect("task should not panic") {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }

    #[test]
    fn test_from_config_uses_one_minute_window() {
        let window = RateLimitWindow::from_config(&RateLimitConfig {
            enabled: true,
            max_requests_per_minute: 42,
        });
        assert_eq!(window.max_requests(), 42);
        assert_eq!(window.window, Duration::from_secs(60));
    }
}
