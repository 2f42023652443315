//! Rate limiter for preventing login brute force

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::info;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Failed attempts tolerated inside the window
    pub max_failures: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Lockout duration in seconds
    pub lockout_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            window_seconds: 300,  // 5 minutes
            lockout_seconds: 900, // 15 minutes
        }
    }
}

/// Failure record for one key
#[derive(Debug)]
struct FailureRecord {
    /// Failed attempts inside the current window
    failures: u32,
    /// Start of the current window
    first_failure: Instant,
    /// Lockout expiration time
    locked_until: Option<Instant>,
}

/// Tracks failed login attempts per account key
///
/// Only failures count against the budget; a successful login clears the
/// record, so normal use never trips the lockout.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Rate limiter configuration
    config: RateLimiterConfig,
    /// Failure records keyed by account email
    records: Arc<Mutex<HashMap<String, FailureRecord>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether the key is currently allowed to attempt a login
    pub async fn check(&self, key: &str) -> bool {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let Some(record) = records.get(key) else {
            return true;
        };

        if let Some(locked_until) = record.locked_until {
            if now < locked_until {
                return false;
            }
            // Lockout expired, forget the streak
            records.remove(key);
            return true;
        }

        if now.duration_since(record.first_failure)
            >= Duration::from_secs(self.config.window_seconds)
        {
            // Window expired, forget the streak
            records.remove(key);
        }

        true
    }

    /// Record a failed attempt for the key
    pub async fn record_failure(&self, key: &str) {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let record = records.entry(key.to_string()).or_insert(FailureRecord {
            failures: 0,
            first_failure: now,
            locked_until: None,
        });

        if now.duration_since(record.first_failure)
            >= Duration::from_secs(self.config.window_seconds)
        {
            record.failures = 0;
            record.first_failure = now;
        }

        record.failures += 1;

        if record.failures >= self.config.max_failures {
            record.locked_until = Some(now + Duration::from_secs(self.config.lockout_seconds));
            info!(
                "Locked out key {} for {} seconds",
                key, self.config.lockout_seconds
            );
        }
    }

    /// Clear the failure record for the key after a successful login
    pub async fn record_success(&self, key: &str) {
        self.records.lock().await.remove(key);
    }

    /// Get the rate limiter configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }
}
