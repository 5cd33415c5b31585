//! DNS provider implementations

mod cloudflare;

pub use cloudflare::{CF_API_BASE, CloudflareProvider};
