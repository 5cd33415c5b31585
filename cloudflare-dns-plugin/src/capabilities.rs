//! Declarative capabilities reported to the host

use std::collections::BTreeMap;

use serde::Serialize;

/// Resource type managed by this plugin.
pub const RESOURCE_TYPE: &str = "CLOUDFLARE::DNS::Record";

/// Cloudflare allows 1200 requests per 5 minutes per token.
pub const MAX_REQUESTS_PER_SECOND: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitScope {
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitConfig {
    pub scope: RateLimitScope,
    pub max_requests_per_second: u32,
}

/// Excludes discovered resources matching every condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchFilter {
    pub resource_types: Vec<String>,
    pub conditions: Vec<FilterCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCondition {
    pub property_path: String,
    pub property_value: String,
}

/// How the host labels discovered resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelConfig {
    pub default_query: String,
    pub resource_overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub rate_limit: RateLimitConfig,
    pub discovery_filters: Vec<MatchFilter>,
    pub label_config: LabelConfig,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig {
                scope: RateLimitScope::Namespace,
                max_requests_per_second: MAX_REQUESTS_PER_SECOND,
            },
            discovery_filters: Vec::new(),
            label_config: LabelConfig {
                default_query: "$.name".to_string(),
                resource_overrides: BTreeMap::new(),
            },
        }
    }
}
