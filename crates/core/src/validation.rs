//! Field validators shared by every resource input, plus the conversion of
//! `validator` failures into the single itemized message returned to callers.
//!
//! Inputs derive [`validator::Validate`]; the functions here are referenced
//! from `#[validate(custom(function = "..."))]` attributes.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

/// A contact number: optional leading `+`, then 10 to 15 digits.
static CONTACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("valid regex"));

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects empty or whitespace-only text.
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("required", "is required"));
    }
    Ok(())
}

/// Text that must parse as a positive whole number (e.g. a year level of `"2"`).
pub fn positive_integer_text(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(failure("required", "is required"));
    }
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(failure("positive_integer", "must be a positive whole number")),
    }
}

/// A contact or phone number with at least 10 digits.
pub fn contact_number(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(failure("required", "is required"));
    }
    if !CONTACT_RE.is_match(trimmed) {
        return Err(failure("contact", "must contain at least 10 digits"));
    }
    Ok(())
}

/// An account role known to the system.
pub fn known_role(value: &str) -> Result<(), ValidationError> {
    if crate::roles::is_known_role(value) {
        Ok(())
    } else {
        Err(failure("role", "must be one of admin, staff, student"))
    }
}

/// Render validation failures as `"Invalid input: a reason; b reason"`,
/// sorted by field name so the message is stable.
pub fn itemize(errors: &ValidationErrors) -> String {
    let mut items: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reason = errs
                .first()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field} {reason}")
        })
        .collect();
    items.sort();
    format!("Invalid input: {}", items.join("; "))
}

/// Deserialize an optional amount sent either as a JSON number or as numeric
/// text (HTML inputs post strings). Empty text and `null` become `None`.
pub fn number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let n = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number")))?,
    };
    // `inf`, `NaN` and overflowing literals would be stored but read back as null.
    if !n.is_finite() {
        return Err(serde::de::Error::custom("amount must be a finite number"));
    }
    Ok(Some(n))
}

/// Deserialize an optional calendar date posted as `YYYY-MM-DD` text.
/// Empty text and `null` become `None`.
pub fn date_or_blank<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a date (YYYY-MM-DD)"))),
    }
}
