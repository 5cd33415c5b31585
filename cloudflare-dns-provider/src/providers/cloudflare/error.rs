//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// Record does not exist.
const CODE_RECORD_NOT_FOUND: &str = "81044";
/// No route for that URI / object identifier is invalid.
const CODES_ZONE_NOT_FOUND: [&str; 2] = ["7000", "7003"];

/// Status first, then the Cloudflare error code for ambiguous statuses.
/// Reference: <https://developers.cloudflare.com/fundamentals/api/reference/>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let raw_code = raw.code.clone();
        let code = raw_code.as_deref();

        match raw.status {
            401 => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            403 => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            429 => ProviderError::RateLimited {
                provider,
                retry_after: raw.retry_after,
                raw_message: Some(raw.message),
            },
            500..=599 => ProviderError::ServerError {
                provider,
                status: raw.status,
                detail: raw.message,
            },
            404 if code.is_some_and(|c| CODES_ZONE_NOT_FOUND.contains(&c)) => {
                zone_not_found(provider, raw, context)
            }
            404 => record_not_found(provider, raw, context),
            _ => match code {
                Some(CODE_RECORD_NOT_FOUND) => record_not_found(provider, raw, context),
                Some(c) if CODES_ZONE_NOT_FOUND.contains(&c) => {
                    zone_not_found(provider, raw, context)
                }
                // Token problems reported inside a 400 envelope
                // 6003: Invalid request headers
                // 6111: Invalid format for Authorization header
                // 9109: Invalid access token
                // 10000: Authentication error
                Some("6003" | "6111" | "9109" | "10000") => ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                },
                // 1004: DNS Validation Error
                // 9000: Invalid or missing name
                // 9005/9006: Content is not a valid IPv4/IPv6 address
                // 9009: MX content must be a hostname
                // 9021: Invalid TTL
                // 9041: This DNS record cannot be proxied
                Some(c @ ("1004" | "9000" | "9005" | "9006" | "9009" | "9021" | "9041")) => {
                    let param = match c {
                        "9000" => "name",
                        "9005" | "9006" | "9009" => "content",
                        "9021" => "ttl",
                        "9041" => "proxied",
                        _ => "general",
                    };
                    ProviderError::InvalidParameter {
                        provider,
                        param: param.to_string(),
                        detail: raw.message,
                    }
                }
                _ if raw.status == 400 => ProviderError::InvalidParameter {
                    provider,
                    param: "general".to_string(),
                    detail: raw.message,
                },
                _ => self.unknown_error(raw),
            },
        }
    }
}

fn record_not_found(provider: String, raw: RawApiError, context: ErrorContext) -> ProviderError {
    ProviderError::RecordNotFound {
        provider,
        record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
        raw_message: Some(raw.message),
    }
}

fn zone_not_found(provider: String, raw: RawApiError, context: ErrorContext) -> ProviderError {
    ProviderError::ZoneNotFound {
        provider,
        zone_id: context.zone_id.unwrap_or_else(|| "<unknown>".to_string()),
        raw_message: Some(raw.message),
    }
}
