//! Target config and process settings

use std::fmt;

use cloudflare_dns_provider::{CF_API_BASE, ProviderCredentials};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{PluginError, PluginResult};

/// Environment variable holding the fallback API token.
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Environment variable overriding the API root.
pub const ENV_API_BASE_URL: &str = "CLOUDFLARE_API_BASE_URL";

/// Per-request scope: which zone, and optionally which token.
#[derive(Clone, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("zone_id", &self.zone_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TargetConfig {
    /// Decode and check a target config blob.
    pub fn parse(raw: &Value) -> PluginResult<Self> {
        let config = Self::deserialize(raw).map_err(|e| {
            PluginError::InvalidConfig(format!("failed to parse target config: {e}"))
        })?;
        if config.zone_id.trim().is_empty() {
            return Err(PluginError::InvalidConfig(
                "zone_id is required in target config".to_string(),
            ));
        }
        Ok(config)
    }

    /// Credentials for this target: the config's own token, else `fallback`.
    pub fn credentials(&self, fallback: Option<&str>) -> PluginResult<ProviderCredentials> {
        self.api_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| fallback.filter(|t| !t.trim().is_empty()))
            .map(|t| ProviderCredentials {
                api_token: t.to_string(),
            })
            .ok_or_else(|| {
                PluginError::InvalidConfig(format!(
                    "api_token is required in target config or {ENV_API_TOKEN}"
                ))
            })
    }
}

/// Settings read once at start-up.
#[derive(Clone)]
pub struct PluginSettings {
    /// Cloudflare API root.
    pub api_base_url: String,
    /// Token used when a target config carries none.
    pub default_api_token: Option<String>,
}

impl fmt::Debug for PluginSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSettings")
            .field("api_base_url", &self.api_base_url)
            .field(
                "default_api_token",
                &self.default_api_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            api_base_url: CF_API_BASE.to_string(),
            default_api_token: None,
        }
    }
}

impl PluginSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: non_empty(ENV_API_BASE_URL).unwrap_or_else(|| CF_API_BASE.to_string()),
            default_api_token: non_empty(ENV_API_TOKEN),
        }
    }
}
