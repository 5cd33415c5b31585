//! Cloudflare API envelope types

use serde::Deserialize;

/// Common Cloudflare response envelope.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
    pub result_info: Option<CloudflareResultInfo>,
}

impl<T> CloudflareResponse<T> {
    /// Code and message of the first reported error.
    pub fn first_error(&self) -> (Option<String>, String) {
        self.errors.first().map_or_else(
            || (None, "Unknown error".to_string()),
            |e| (Some(e.code.to_string()), e.message.clone()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_count: Option<u32>,
}

/// The part of a zone this crate needs.
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}
