//! Provider factory.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::{CF_API_BASE, CloudflareProvider};
use crate::traits::DnsApi;
use crate::types::ProviderCredentials;

/// Creates a [`DnsApi`] for one account on top of a shared connection pool.
///
/// `base_url` defaults to the public Cloudflare API.
///
/// # Examples
///
/// ```rust,no_run
/// use cloudflare_dns_provider::{create_http_client, create_provider, ProviderCredentials};
///
/// let client = create_http_client().unwrap();
/// let api = create_provider(
///     ProviderCredentials { api_token: "your-token".to_string() },
///     &client,
///     None,
/// )
/// .unwrap();
/// ```
pub fn create_provider(
    credentials: ProviderCredentials,
    client: &Client,
    base_url: Option<&str>,
) -> Result<Arc<dyn DnsApi>> {
    if credentials.api_token.trim().is_empty() {
        return Err(ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: Some("API token is empty".to_string()),
        });
    }

    Ok(Arc::new(CloudflareProvider::with_base_url(
        client.clone(),
        credentials.api_token,
        base_url.unwrap_or(CF_API_BASE),
    )))
}
