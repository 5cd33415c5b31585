//! Shared helpers for live tests.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use cloudflare_dns_provider::{
    DnsApi, ProviderCredentials, create_http_client, create_provider,
};

/// Return early when any of the variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Unique, recognisable name for a throwaway record.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Provider and zone for a live test run.
pub struct TestContext {
    pub api: Arc<dyn DnsApi>,
    pub zone_id: String,
}

impl TestContext {
    /// Reads `CLOUDFLARE_API_TOKEN` and `TEST_ZONE_ID`.
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone_id = env::var("TEST_ZONE_ID").ok()?;

        let client = create_http_client().ok()?;
        let api = create_provider(ProviderCredentials { api_token }, &client, None).ok()?;

        Some(Self { api, zone_id })
    }
}
