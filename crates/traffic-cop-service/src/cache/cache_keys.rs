//! Cache key construction.

use traffic_cop_core::UserId;

/// Builds cache keys for user toggles.
///
/// Without a prefix the raw user id is the key, which is what existing
/// deployments have populated.
#[derive(Debug, Clone, Default)]
pub struct CacheKeys {
    prefix: Option<String>,
}

impl CacheKeys {
    /// Creates a key builder with an optional namespace.
    #[must_use]
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Key holding the toggle for `user_id`.
    #[must_use]
    pub fn toggle(&self, user_id: &UserId) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, user_id),
            None => user_id.as_str().to_string(),
        }
    }
}
