use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window limit on sign-in attempts, keyed by client address.
pub struct LoginThrottle {
    max_attempts: usize,
    window: Duration,
    attempts: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl LoginThrottle {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `key`. Returns false when the limit is exceeded.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = attempts.entry(key.to_string()).or_default();
        while entry
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= self.window)
        {
            entry.pop_front();
        }

        if entry.len() >= self.max_attempts {
            return false;
        }
        entry.push_back(now);

        // Drop idle keys so the map does not grow without bound.
        attempts.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for LoginThrottle {
    /// 5 attempts per 5 minutes.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(300))
    }
}
