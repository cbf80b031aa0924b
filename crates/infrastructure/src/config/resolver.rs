//! Address resolution tuning.

use std::time::Duration;

use application::services::{
    DEFAULT_MIN_QUERY_CHARS, DEFAULT_RESOLVE_DELAY, DEFAULT_SUGGEST_DELAY,
    DEFAULT_SUGGESTION_LIMIT, ResolverConfig,
};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Debounce and lookup settings shared by the pickup and dropoff fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverAppConfig {
    /// Quiet period before fetching suggestions, in milliseconds
    #[serde(default = "default_suggest_delay_ms")]
    pub suggest_delay_ms: u64,

    /// Quiet period before resolving typed text, in milliseconds
    #[serde(default = "default_resolve_delay_ms")]
    pub resolve_delay_ms: u64,

    /// Minimum trimmed length before any lookup is made
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Maximum number of suggestions shown
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,

    /// Resolve typed text without waiting for a selection
    #[serde(default = "default_true")]
    pub auto_resolve: bool,
}

const fn default_suggest_delay_ms() -> u64 {
    DEFAULT_SUGGEST_DELAY.as_millis() as u64
}

const fn default_resolve_delay_ms() -> u64 {
    DEFAULT_RESOLVE_DELAY.as_millis() as u64
}

const fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

const fn default_suggestion_limit() -> u8 {
    DEFAULT_SUGGESTION_LIMIT
}

impl Default for ResolverAppConfig {
    fn default() -> Self {
        Self {
            suggest_delay_ms: default_suggest_delay_ms(),
            resolve_delay_ms: default_resolve_delay_ms(),
            min_query_chars: default_min_query_chars(),
            suggestion_limit: default_suggestion_limit(),
            auto_resolve: true,
        }
    }
}

impl ResolverAppConfig {
    /// Convert to the application-layer settings
    #[must_use]
    pub const fn to_resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            suggest_delay: Duration::from_millis(self.suggest_delay_ms),
            resolve_delay: Duration::from_millis(self.resolve_delay_ms),
            min_query_chars: self.min_query_chars,
            suggestion_limit: self.suggestion_limit,
            auto_resolve: self.auto_resolve,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.min_query_chars == 0 {
            return Err("resolver.min_query_chars must be at least 1".to_string());
        }
        if self.suggestion_limit == 0 {
            return Err("resolver.suggestion_limit must be at least 1".to_string());
        }
        Ok(())
    }
}
