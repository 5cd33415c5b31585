//! Properties <-> Cloudflare wire representation
//!
//! One body builder per [`RecordType`] variant; the match is exhaustive so a
//! new record type cannot compile without a mapping.

use cloudflare_dns_provider::{
    CaaData, CaaRecordBody, CloudflareDnsRecord, MxRecordBody, PlainRecordBody,
    ProxiableRecordBody, RecordBody, SrvData, SrvRecordBody,
};

use crate::error::{PluginError, PluginResult};
use crate::names::{denormalize, normalize};
use crate::properties::{DnsRecordProperties, RecordType};

/// Used only if an MX record reaches the mapper without a priority, which
/// validation normally prevents.
pub const DEFAULT_MX_PRIORITY: u16 = 10;

/// Overwrite of an existing record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderUpdate {
    pub record_id: String,
    pub body: RecordBody,
}

/// Request body for creating the record in the zone whose apex is `zone_apex`.
pub fn to_provider_create(
    props: &DnsRecordProperties,
    zone_apex: &str,
) -> PluginResult<RecordBody> {
    let kind: RecordType = props.record_type.parse()?;
    build_body(kind, props, denormalize(&props.name, zone_apex))
}

/// Request body for overwriting record `record_id`.
pub fn to_provider_update(
    props: &DnsRecordProperties,
    record_id: &str,
    zone_apex: &str,
) -> PluginResult<ProviderUpdate> {
    if record_id.trim().is_empty() {
        return Err(PluginError::Mapping("native_id is required".to_string()));
    }
    Ok(ProviderUpdate {
        record_id: record_id.to_string(),
        body: to_provider_create(props, zone_apex)?,
    })
}

fn build_body(
    kind: RecordType,
    props: &DnsRecordProperties,
    name: String,
) -> PluginResult<RecordBody> {
    let ttl = props.ttl;
    let comment = props.comment.clone();

    let body = match kind {
        RecordType::A => RecordBody::A(proxiable(props, name)),
        RecordType::Aaaa => RecordBody::Aaaa(proxiable(props, name)),
        RecordType::Cname => RecordBody::Cname(proxiable(props, name)),
        RecordType::Mx => RecordBody::Mx(MxRecordBody {
            name,
            content: props.content.clone(),
            ttl,
            priority: props.priority.unwrap_or_else(|| {
                log::warn!(
                    "MX record '{}' has no priority, using {DEFAULT_MX_PRIORITY}",
                    props.name
                );
                DEFAULT_MX_PRIORITY
            }),
            comment,
        }),
        RecordType::Txt => RecordBody::Txt(plain(props, name)),
        RecordType::Ns => RecordBody::Ns(plain(props, name)),
        RecordType::Srv => RecordBody::Srv(SrvRecordBody {
            name,
            ttl,
            data: parse_srv(&props.content, props.priority)?,
            comment,
        }),
        RecordType::Caa => RecordBody::Caa(CaaRecordBody {
            name,
            ttl,
            data: parse_caa(&props.content)?,
            comment,
        }),
    };
    Ok(body)
}

fn proxiable(props: &DnsRecordProperties, name: String) -> ProxiableRecordBody {
    ProxiableRecordBody {
        name,
        content: props.content.clone(),
        ttl: props.ttl,
        proxied: props.proxied,
        comment: props.comment.clone(),
    }
}

fn plain(props: &DnsRecordProperties, name: String) -> PlainRecordBody {
    PlainRecordBody {
        name,
        content: props.content.clone(),
        ttl: props.ttl,
        comment: props.comment.clone(),
    }
}

/// `"<weight> <port> <target>"`, single-spaced; the priority travels separately.
fn parse_srv(content: &str, priority: Option<u16>) -> PluginResult<SrvData> {
    let malformed = || {
        PluginError::Mapping(format!(
            "SRV content must be '<weight> <port> <target>', got '{content}'"
        ))
    };

    let priority =
        priority.ok_or_else(|| PluginError::Mapping("SRV record has no priority".to_string()))?;

    let fields: Vec<&str> = content.split_whitespace().collect();
    let [weight, port, target] = fields.as_slice() else {
        return Err(malformed());
    };

    let data = SrvData {
        priority,
        weight: weight.parse().map_err(|_| malformed())?,
        port: port.parse().map_err(|_| malformed())?,
        target: (*target).to_string(),
    };

    // Read rebuilds content from `data`; anything else would show as drift.
    if render_srv(&data) != content {
        return Err(malformed());
    }
    Ok(data)
}

/// `"<flags> <tag> \"<value>\""`, single-spaced, the form Cloudflare displays.
fn parse_caa(content: &str) -> PluginResult<CaaData> {
    let malformed = || {
        PluginError::Mapping(format!(
            "CAA content must be '<flags> <tag> \"<value>\"', got '{content}'"
        ))
    };

    let (flags, rest) = content.split_once(' ').ok_or_else(malformed)?;
    let (tag, value) = rest.split_once(' ').ok_or_else(malformed)?;
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(malformed)?;

    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(malformed());
    }

    let data = CaaData {
        flags: flags.parse().map_err(|_| malformed())?,
        tag: tag.to_string(),
        value: value.to_string(),
    };
    if render_caa(&data) != content {
        return Err(malformed());
    }
    Ok(data)
}

fn render_srv(srv: &SrvData) -> String {
    format!("{} {} {}", srv.weight, srv.port, srv.target)
}

fn render_caa(caa: &CaaData) -> String {
    format!("{} {} \"{}\"", caa.flags, caa.tag, caa.value)
}

/// Properties of a record returned by the provider.
///
/// The FQDN is shortened against `zone_apex`; missing `priority` and empty
/// `comment` come back as `None`. SRV and CAA content is rebuilt from the
/// structured `data` when the provider sends it.
pub fn from_provider_record(
    record: &CloudflareDnsRecord,
    zone_apex: &str,
) -> DnsRecordProperties {
    let mut content = record.content.clone();
    let mut priority = record.priority;

    match (record.record_type.as_str(), &record.data) {
        ("SRV", Some(data)) => {
            if let Ok(srv) = serde_json::from_value::<SrvData>(data.clone()) {
                content = render_srv(&srv);
                priority = Some(srv.priority);
            }
        }
        ("CAA", Some(data)) => {
            if let Ok(caa) = serde_json::from_value::<CaaData>(data.clone()) {
                content = render_caa(&caa);
            }
        }
        _ => {}
    }

    DnsRecordProperties {
        record_type: record.record_type.clone(),
        name: normalize(&record.name, zone_apex),
        content,
        ttl: record.ttl,
        proxied: record.proxied.unwrap_or(false),
        priority,
        comment: record.comment.clone().filter(|c| !c.is_empty()),
    }
}
