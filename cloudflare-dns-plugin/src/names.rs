//! Record name conversion
//!
//! Cloudflare stores fully qualified names; the orchestrator stores names
//! relative to the zone, with `@` for the apex.

/// Short name of the zone apex.
pub const APEX: &str = "@";

/// Fully qualified name for a short name in the zone.
///
/// ```
/// use cloudflare_dns_plugin::names::denormalize;
///
/// assert_eq!(denormalize("www", "example.com"), "www.example.com");
/// assert_eq!(denormalize("@", "example.com"), "example.com");
/// ```
pub fn denormalize(short_name: &str, zone_apex: &str) -> String {
    let apex = zone_apex.trim_end_matches('.');
    if apex.is_empty() {
        return short_name.to_string();
    }
    if short_name == APEX {
        apex.to_string()
    } else {
        format!("{short_name}.{apex}")
    }
}

/// Short name for a fully qualified name returned by the provider.
///
/// Names outside the zone are returned unchanged.
///
/// ```
/// use cloudflare_dns_plugin::names::normalize;
///
/// assert_eq!(normalize("www.example.com", "example.com"), "www");
/// assert_eq!(normalize("example.com", "example.com"), "@");
/// assert_eq!(normalize("www.example.org", "example.com"), "www.example.org");
/// ```
pub fn normalize(fqdn: &str, zone_apex: &str) -> String {
    let apex = zone_apex.trim_end_matches('.');
    let name = fqdn.trim_end_matches('.');
    if apex.is_empty() {
        return fqdn.to_string();
    }
    if name == apex {
        return APEX.to_string();
    }
    match name.strip_suffix(apex).and_then(|rest| rest.strip_suffix('.')) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => fqdn.to_string(),
    }
}
