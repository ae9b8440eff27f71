//! Canonical structured field keys and value-format helpers.

use std::collections::HashMap;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const URL: &str = "url";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_ALREADY_STARTED: &str = "already_started";
pub const REASON_NOT_STARTED: &str = "not_started";
pub const REASON_NO_CALLBACK: &str = "no_callback";
pub const REASON_STREAM_CLOSED: &str = "stream_closed";

/// Renders header names for log output. Header values carry credentials and
/// are never logged.
pub fn format_header_names(headers: &HashMap<String, String>) -> String {
    if headers.is_empty() {
        return NONE.to_string();
    }

    let mut names: Vec<&str> = headers.keys().map(String::as_str).collect();
    names.sort_unstable();
    names.join(",")
}
