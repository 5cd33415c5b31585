//! Record property codec
//!
//! [`DnsRecordProperties`] is the declarative state the orchestrator diffs
//! against. `record_type` and `name` are create-only; everything else can be
//! changed in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PluginError, PluginResult};

/// TTL value meaning "automatic" on Cloudflare.
pub const AUTOMATIC_TTL: u32 = 1;
/// Accepted range for explicit TTLs, in seconds.
pub const TTL_RANGE: std::ops::RangeInclusive<u32> = 60..=86_400;

/// Supported record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Caa,
    Srv,
}

impl RecordType {
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Caa,
        Self::Srv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Caa => "CAA",
            Self::Srv => "SRV",
        }
    }

    /// Only these can sit behind the Cloudflare proxy.
    pub fn is_proxiable(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }

    pub fn requires_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = PluginError;

    /// Exact, upper-case match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PluginError::InvalidProperties(format!("unsupported record type: {s}")))
    }
}

/// Declarative state of one DNS record.
///
/// `priority` and `comment` stay `None` when unset; they are never folded
/// into `0` or `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordProperties {
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Wire form with every field optional, so missing fields get a clear message.
#[derive(Deserialize)]
struct RawProperties {
    record_type: Option<String>,
    name: Option<String>,
    content: Option<String>,
    ttl: Option<u32>,
    proxied: Option<bool>,
    priority: Option<u16>,
    comment: Option<String>,
}

fn required(value: Option<String>, field: &str) -> PluginResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PluginError::InvalidProperties(format!("{field} is required"))),
    }
}

impl DnsRecordProperties {
    /// Decode a property blob, filling `ttl = 1` and `proxied = false` when
    /// absent.
    pub fn parse(raw: &Value) -> PluginResult<Self> {
        let raw = RawProperties::deserialize(raw).map_err(|e| {
            PluginError::InvalidProperties(format!("failed to parse properties: {e}"))
        })?;

        Ok(Self {
            record_type: required(raw.record_type, "record_type")?,
            name: required(raw.name, "name")?,
            content: required(raw.content, "content")?,
            ttl: raw.ttl.unwrap_or(AUTOMATIC_TTL),
            proxied: raw.proxied.unwrap_or(false),
            priority: raw.priority,
            comment: raw.comment,
        })
    }

    /// Check record-type constraints and return the parsed type.
    pub fn validate(&self) -> PluginResult<RecordType> {
        let kind: RecordType = self.record_type.parse()?;

        if kind.requires_priority() && self.priority.is_none() {
            return Err(PluginError::InvalidProperties(format!(
                "priority is required for {kind} records"
            )));
        }

        if self.proxied && !kind.is_proxiable() {
            return Err(PluginError::InvalidProperties(
                "proxied can only be set for A, AAAA, and CNAME records".to_string(),
            ));
        }

        if self.ttl != AUTOMATIC_TTL && !TTL_RANGE.contains(&self.ttl) {
            return Err(PluginError::InvalidProperties(format!(
                "ttl must be {AUTOMATIC_TTL} (automatic) or between {} and {}, got {}",
                TTL_RANGE.start(),
                TTL_RANGE.end(),
                self.ttl
            )));
        }

        if !kind.requires_priority() && self.priority.is_some() {
            log::warn!("priority is ignored for {kind} record '{}'", self.name);
        }

        Ok(kind)
    }

    /// Canonical property blob reported back to the host.
    pub fn to_value(&self) -> PluginResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
