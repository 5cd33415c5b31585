use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CloudflareDnsRecord, PaginationParams, RecordBody, RecordPage};

/// Raw API failure before classification (internal use).
#[derive(Debug, Clone, Default)]
pub(crate) struct RawApiError {
    /// HTTP status of the response.
    pub status: u16,
    /// Provider error code from the response envelope, if any.
    pub code: Option<String>,
    /// Provider error message.
    pub message: String,
    /// `Retry-After` header value in seconds.
    pub retry_after: Option<u64>,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
            retry_after: None,
        }
    }

    #[must_use]
    pub fn retry_after(mut self, secs: Option<u64>) -> Self {
        self.retry_after = secs;
        self
    }
}

/// Identifiers of the call being made, used to fill in error variants.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub zone_id: Option<String>,
    pub record_id: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            record_id: None,
        }
    }

    pub fn record(zone_id: &str, record_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            record_id: Some(record_id.to_string()),
        }
    }
}

/// Maps raw API failures onto [`ProviderError`] (internal use).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier.
    fn provider_name(&self) -> &'static str;

    /// Classify a raw API failure.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            status: Some(raw.status),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS record API of a single provider account.
///
/// Every method is one outbound request. Implementations hold no state
/// besides the credentials and a shared connection pool, so one instance can
/// serve concurrent calls.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Apex domain of the zone (e.g. `"example.com"`).
    async fn zone_name(&self, zone_id: &str) -> Result<String>;

    /// Fetch one record by its identifier.
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<CloudflareDnsRecord>;

    /// Create a record; the provider assigns its identifier.
    async fn create_record(&self, zone_id: &str, body: &RecordBody)
    -> Result<CloudflareDnsRecord>;

    /// Overwrite an existing record.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        body: &RecordBody,
    ) -> Result<CloudflareDnsRecord>;

    /// Delete a record.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// One page of the zone's records.
    async fn list_records(&self, zone_id: &str, params: &PaginationParams) -> Result<RecordPage>;
}
