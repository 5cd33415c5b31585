//! Log sanitization
//!
//! TXT payloads (DKIM keys, SPF policies) and full API responses can be
//! long or sensitive; only a prefix is ever written to the log.

/// Maximum number of bytes kept from a logged string.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for logging, never splitting a UTF-8 character.
///
/// Strings within the limit are returned unchanged; longer ones keep a
/// prefix and note the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
