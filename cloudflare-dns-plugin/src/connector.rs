//! Builds provider clients per request

use std::sync::Arc;

use cloudflare_dns_provider::{DnsApi, ProviderCredentials, ProviderError, create_provider};
use reqwest::Client;

/// Source of [`DnsApi`] handles, one per request's credentials.
///
/// Injected into the adapter so tests can hand out an in-memory stub.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: ProviderCredentials) -> Result<Arc<dyn DnsApi>, ProviderError>;
}

/// Connects to the Cloudflare API over one shared connection pool.
pub struct CloudflareConnector {
    client: Client,
    base_url: String,
}

impl CloudflareConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Connector for CloudflareConnector {
    fn connect(&self, credentials: ProviderCredentials) -> Result<Arc<dyn DnsApi>, ProviderError> {
        create_provider(credentials, &self.client, Some(&self.base_url))
    }
}
