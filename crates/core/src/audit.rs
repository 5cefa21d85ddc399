//! Audit record construction: which requests are audited and what the
//! free-text detail of a record says.
//!
//! Lives in `core` so the interceptor and any offline tooling agree on the
//! exact wording.

use serde_json::Value;

/// HTTP verbs that mutate state and therefore produce an audit record.
pub const MUTATING_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

/// Longest detail string stored; longer payloads are cut on a char boundary.
pub const MAX_DETAIL_CHARS: usize = 2000;

/// Keys whose values never reach the audit log.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "authorization",
    "credential",
    "cookie",
];

const REDACTED: &str = "[REDACTED]";

/// Returns `true` when a request with this method must be audited.
pub fn is_mutating(method: &str) -> bool {
    MUTATING_METHODS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
}

/// What the interceptor could recover from a request body.
#[derive(Debug, Clone, Copy)]
pub enum AuditPayload<'a> {
    /// No body (typical for DELETE).
    Empty,
    /// A JSON document.
    Json(&'a Value),
    /// A body that is not recorded verbatim, e.g. `"multipart"`.
    Opaque(&'a str),
}

/// Build the detail text of an audit record.
///
/// ```text
/// PUT /api/student/4 payload={"name":"Ana Cruz",...}
/// POST /api/profile-picture payload=<multipart>
/// DELETE /api/student/4
/// ```
pub fn synthesize_details(method: &str, path: &str, payload: AuditPayload<'_>) -> String {
    let mut details = format!("{} {path}", method.to_ascii_uppercase());
    match payload {
        AuditPayload::Empty => {}
        AuditPayload::Json(value) => {
            let redacted = redact_sensitive_fields(value);
            details.push_str(" payload=");
            details.push_str(&redacted.to_string());
        }
        AuditPayload::Opaque(kind) => {
            details.push_str(&format!(" payload=<{kind}>"));
        }
    }
    truncate_chars(details, MAX_DETAIL_CHARS)
}

/// Replace the value of every key containing a [`SENSITIVE_FIELDS`] entry
/// (case-insensitive, at any depth) with `"[REDACTED]"`.
pub fn redact_sensitive_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| {
                    let lower = key.to_lowercase();
                    if SENSITIVE_FIELDS.iter().any(|f| lower.contains(f)) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact_sensitive_fields(val))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive_fields).collect()),
        other => other.clone(),
    }
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
    text
}
