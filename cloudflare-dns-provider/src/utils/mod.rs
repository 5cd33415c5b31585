//! Utility modules.

/// Keeps record payloads and response bodies short in logs.
pub mod log_sanitizer;
