//! Provider failures -> host error codes

use cloudflare_dns_provider::ProviderError;

use crate::error::PluginError;
use crate::types::OperationErrorCode;

/// Error code for a provider failure.
///
/// Driven by the HTTP status the failure came from; transport, parse and
/// unrecognised failures are `InternalFailure`.
pub fn classify(error: &ProviderError) -> OperationErrorCode {
    error.status().map_or(
        OperationErrorCode::InternalFailure,
        OperationErrorCode::from_http_status,
    )
}

/// Error code for any failure raised while serving a request.
pub fn classify_plugin_error(error: &PluginError) -> OperationErrorCode {
    match error {
        PluginError::InvalidConfig(_)
        | PluginError::InvalidProperties(_)
        | PluginError::Mapping(_) => OperationErrorCode::InvalidRequest,
        PluginError::Provider(e) => classify(e),
        PluginError::Serialization(_) => OperationErrorCode::InternalFailure,
    }
}

/// The provider answered 404 for the record path, whichever code it used.
pub fn is_not_found(error: &PluginError) -> bool {
    matches!(error, PluginError::Provider(e) if e.status() == Some(404))
}

pub fn is_rate_limited(error: &PluginError) -> bool {
    matches!(error, PluginError::Provider(ProviderError::RateLimited { .. }))
}
