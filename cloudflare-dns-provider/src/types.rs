use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Pagination ============

/// Page-based pagination for record listing. Pages are 1-indexed.
///
/// The default is `page = 1, per_page = 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of records per page.
    pub per_page: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
        }
    }
}

impl PaginationParams {
    /// Clamp to valid ranges: `page >= 1`, `per_page` in `1..=max_per_page`.
    #[must_use]
    pub fn validated(&self, max_per_page: u32) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_per_page),
        }
    }
}

/// One page of records as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    /// Records in this page.
    pub records: Vec<CloudflareDnsRecord>,
    /// Page number that was served.
    pub page: u32,
    /// Page size that was applied.
    pub per_page: u32,
    /// Total number of records in the zone, when the provider reports it.
    pub total_count: Option<u32>,
}

impl RecordPage {
    /// Whether another page may follow this one.
    ///
    /// Uses the provider's total count when present. Without it, a full page
    /// is taken to mean there may be more.
    pub fn has_more(&self) -> bool {
        match self.total_count {
            Some(total) => u64::from(self.page) * u64::from(self.per_page) < u64::from(total),
            None => self.records.len() == self.per_page as usize,
        }
    }
}

// ============ Records ============

/// A DNS record as stored by Cloudflare.
///
/// `name` is always fully qualified. `priority` and `comment` are omitted by
/// the API for record types they do not apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Structured data of SRV/CAA records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request body for creating or overwriting a record.
///
/// One variant per supported record type; the `type` field on the wire is
/// the variant name in upper case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum RecordBody {
    A(ProxiableRecordBody),
    Aaaa(ProxiableRecordBody),
    Cname(ProxiableRecordBody),
    Mx(MxRecordBody),
    Txt(PlainRecordBody),
    Ns(PlainRecordBody),
    Srv(SrvRecordBody),
    Caa(CaaRecordBody),
}

impl RecordBody {
    /// Fully qualified record name carried by the body.
    pub fn name(&self) -> &str {
        match self {
            Self::A(b) | Self::Aaaa(b) | Self::Cname(b) => &b.name,
            Self::Mx(b) => &b.name,
            Self::Txt(b) | Self::Ns(b) => &b.name,
            Self::Srv(b) => &b.name,
            Self::Caa(b) => &b.name,
        }
    }

    /// Wire name of the record type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::A(_) => "A",
            Self::Aaaa(_) => "AAAA",
            Self::Cname(_) => "CNAME",
            Self::Mx(_) => "MX",
            Self::Txt(_) => "TXT",
            Self::Ns(_) => "NS",
            Self::Srv(_) => "SRV",
            Self::Caa(_) => "CAA",
        }
    }
}

/// A, AAAA and CNAME records; the only ones Cloudflare can proxy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxiableRecordBody {
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// TXT and NS records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainRecordBody {
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MxRecordBody {
    pub name: String,
    /// Mail server hostname.
    pub content: String,
    pub ttl: u32,
    pub priority: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrvRecordBody {
    pub name: String,
    pub ttl: u32,
    pub data: SrvData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaaRecordBody {
    pub name: String,
    pub ttl: u32,
    pub data: CaaData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The `data` field of an SRV record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// The `data` field of a CAA record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaData {
    /// Issuer critical flag (0 or 128).
    pub flags: u8,
    /// Property tag (`issue`, `issuewild` or `iodef`).
    pub tag: String,
    pub value: String,
}

// ============ Credentials ============

/// Credentials for one Cloudflare account.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    /// Bearer API token with `Zone.DNS` permissions.
    pub api_token: String,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_token", &"<redacted>")
            .finish()
    }
}
