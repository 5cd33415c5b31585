//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

pub(crate) use types::{CloudflareResponse, CloudflareZone};

/// Production API endpoint.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Largest page the DNS records endpoint accepts.
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 5_000;

/// Cloudflare DNS Provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    /// Wrap a shared connection pool with one account's token.
    pub fn new(client: Client, api_token: String) -> Self {
        Self::with_base_url(client, api_token, CF_API_BASE)
    }

    /// Same as [`new`](Self::new) against a different API root, e.g. a mock server.
    pub fn with_base_url(client: Client, api_token: String, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}
