//! Single-value cache with an expiry timestamp.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};

/// Holds one expensive value until `expires_at`.
///
/// There is no invalidation besides expiry; the last write wins.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    value: Option<T>,
    expires_at: DateTime<Utc>,
}

impl<T: Clone> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Cache<T> {
    /// Creates an empty, already expired cache.
    pub fn new() -> Self {
        Self {
            value: None,
            expires_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Creates a cache that never expires.
    pub fn pinned(value: T) -> Self {
        Self {
            value: Some(value),
            expires_at: DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.value.is_some() && now < self.expires_at
    }

    /// Returns the cached value if it has not expired.
    pub fn get(&self, now: DateTime<Utc>) -> Option<&T> {
        if self.is_valid(now) {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Stores `value` until `now + ttl`.
    pub fn set(&mut self, value: T, now: DateTime<Utc>, ttl: Duration) {
        self.value = Some(value);
        self.expires_at = now + ttl;
    }

    /// Returns the cached value, recomputing it first if it expired.
    ///
    /// A failed recompute leaves the previous entry untouched.
    pub async fn get_or_try_recompute<F, Fut, E>(
        &mut self,
        now: DateTime<Utc>,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get(now) {
            return Ok(value.clone());
        }

        let value = compute().await?;
        self.set(value.clone(), now, ttl);

        Ok(value)
    }
}
