//! # cloudflare-dns-provider
//!
//! A small client for the Cloudflare DNS records API, shaped for a resource
//! plugin: every call is a single request, nothing is cached, nothing is
//! retried.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)* : Use rustls.
//! - **`native-tls`** : Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudflare_dns_provider::{
//!     create_http_client, create_provider, DnsApi, PaginationParams, ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_http_client()?;
//!     let api = create_provider(
//!         ProviderCredentials { api_token: "your-token".to_string() },
//!         &client,
//!         None,
//!     )?;
//!
//!     let apex = api.zone_name("023e105f4ecef8ad9ca31a8372d0c353").await?;
//!     let page = api
//!         .list_records("023e105f4ecef8ad9ca31a8372d0c353", &PaginationParams::default())
//!         .await?;
//!     for record in &page.records {
//!         println!("{apex}: {} {} -> {}", record.record_type, record.name, record.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All calls return [`Result<T, ProviderError>`](ProviderError). Variants
//! follow the HTTP status of the response:
//!
//! - [`ProviderError::InvalidParameter`] : 400
//! - [`ProviderError::InvalidCredentials`] : 401
//! - [`ProviderError::PermissionDenied`] : 403
//! - [`ProviderError::RecordNotFound`] / [`ProviderError::ZoneNotFound`] : 404
//! - [`ProviderError::RateLimited`] : 429
//! - [`ProviderError::ServerError`] : 5xx

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

pub use http_client::create_http_client;

pub use traits::DnsApi;

pub use types::{
    CaaData, CaaRecordBody, CloudflareDnsRecord, MxRecordBody, PaginationParams, PlainRecordBody,
    ProviderCredentials, ProxiableRecordBody, RecordBody, RecordPage, SrvData, SrvRecordBody,
};

pub use providers::{CF_API_BASE, CloudflareProvider};
