//! Plugin error type

use thiserror::Error;

pub use cloudflare_dns_provider::ProviderError;

/// Errors raised while serving one request.
///
/// These never reach the host as-is: the adapter turns each one into a
/// failure result via
/// [`classify_plugin_error`](crate::classifier::classify_plugin_error).
#[derive(Debug, Error)]
pub enum PluginError {
    /// Target config is malformed or incomplete.
    #[error("Invalid target config: {0}")]
    InvalidConfig(String),

    /// Property blob is malformed or breaks a record constraint.
    #[error("Invalid properties: {0}")]
    InvalidProperties(String),

    /// Properties could not be turned into a provider request.
    #[error("Cannot build provider request: {0}")]
    Mapping(String),

    /// The provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A result could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PluginError {
    /// Whether the failure is an expected outcome; `true` logs at `warn`,
    /// `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidConfig(_) | Self::InvalidProperties(_) | Self::Mapping(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type PluginResult<T> = std::result::Result<T, PluginError>;
