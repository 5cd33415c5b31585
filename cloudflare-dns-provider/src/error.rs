use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for Cloudflare DNS API calls.
///
/// Every variant names the provider that produced it. Variants are derived
/// from the HTTP status of the response first and refined by the Cloudflare
/// error code where the status alone is ambiguous.
///
/// This crate never retries. Callers decide whether a failure is worth
/// another attempt; [`is_transient`](Self::is_transient) is a hint only.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    /// The HTTP request timed out or was cut off.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// The API token is invalid or expired (HTTP 401).
    #[error("[{provider}] Invalid credentials{}", fmt_raw(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The token is valid but lacks permission for the zone or action (HTTP 403).
    #[error("[{provider}] Permission denied{}", fmt_raw(.raw_message))]
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// The DNS record does not exist (HTTP 404, Cloudflare code 81044).
    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// The zone does not exist or the identifier cannot be routed (codes 7000/7003).
    #[error("[{provider}] Zone '{zone_id}' not found{}", fmt_raw(.raw_message))]
    ZoneNotFound {
        provider: String,
        zone_id: String,
        raw_message: Option<String>,
    },

    /// The request was rejected as malformed (HTTP 400).
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("[{provider}] Rate limited{}", fmt_retry_after(.retry_after))]
    RateLimited {
        provider: String,
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The provider failed on its side (HTTP 5xx).
    #[error("[{provider}] Server error (HTTP {status}): {detail}")]
    ServerError {
        provider: String,
        status: u16,
        detail: String,
    },

    /// The response body could not be decoded.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// A request body could not be encoded.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError { provider: String, detail: String },

    /// Anything the mapper does not recognise.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        status: Option<u16>,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn fmt_raw(raw: &Option<String>) -> String {
    raw.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
}

fn fmt_retry_after(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// Whether the failure is an expected outcome (bad input, missing
    /// resource, auth), used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::ZoneNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Whether a later attempt could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ServerError { .. }
        )
    }

    /// HTTP status the error was derived from, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::RecordNotFound { .. } | Self::ZoneNotFound { .. } => Some(404),
            Self::InvalidParameter { .. } => Some(400),
            Self::RateLimited { .. } => Some(429),
            Self::ServerError { status, .. } => Some(*status),
            Self::Unknown { status, .. } => *status,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => None,
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: Some("Invalid API Token".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Invalid credentials: Invalid API Token"
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Invalid credentials");
    }

    #[test]
    fn display_record_not_found() {
        let e = ProviderError::RecordNotFound {
            provider: "cloudflare".to_string(),
            record_id: "372e6795".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Record '372e6795' not found");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Rate limited");
    }

    #[test]
    fn display_server_error() {
        let e = ProviderError::ServerError {
            provider: "cloudflare".to_string(),
            status: 503,
            detail: "upstream unavailable".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Server error (HTTP 503): upstream unavailable"
        );
    }

    #[test]
    fn status_follows_variant() {
        let e = ProviderError::PermissionDenied {
            provider: "cloudflare".into(),
            raw_message: None,
        };
        assert_eq!(e.status(), Some(403));

        let e = ProviderError::Timeout {
            provider: "cloudflare".into(),
            detail: "deadline".into(),
        };
        assert_eq!(e.status(), None);
    }

    #[test]
    fn transient_variants() {
        assert!(
            ProviderError::ServerError {
                provider: "t".into(),
                status: 502,
                detail: String::new(),
            }
            .is_transient()
        );
        assert!(
            !ProviderError::RecordNotFound {
                provider: "t".into(),
                record_id: "1".into(),
                raw_message: None,
            }
            .is_transient()
        );
    }

    #[test]
    fn serialize_is_tagged_by_code() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }
}
