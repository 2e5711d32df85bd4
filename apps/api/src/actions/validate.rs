//! Field validators shared by every form. Each records its messages into a
//! `FieldErrors` and returns the cleaned value.

use chrono::NaiveDate;
use url::Url;
use uuid::Uuid;

use crate::actions::FieldErrors;
use crate::media::ImagePayload;
use crate::richtext::parse;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_URL: &str = "Enter a valid http(s) URL.";
pub const INVALID_DATE: &str = "Use YYYY-MM or YYYY-MM-DD.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn optional(value: Option<String>) -> Option<String> {
    clean(value)
}

pub fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    clean(value).unwrap_or_else(|| {
        errors.add(field, REQUIRED);
        String::new()
    })
}

/// Absolute URL with an http or https scheme and a host.
pub fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

pub fn required_url(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    let value = required(errors, field, value);
    if !value.is_empty() && !is_web_url(&value) {
        errors.add(field, INVALID_URL);
    }
    value
}

pub fn optional_url(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let value = clean(value)?;
    if !is_web_url(&value) {
        errors.add(field, INVALID_URL);
    }
    Some(value)
}

pub fn optional_email(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let value = clean(value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        errors.add(field, INVALID_EMAIL);
    }
    Some(value)
}

/// Rich-text fields count as filled only when they contain visible text,
/// so an editor's empty paragraph is still "required".
pub fn required_rich_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    match clean(value) {
        Some(raw) if parse(Some(&raw)).has_visible_text() => raw,
        _ => {
            errors.add(field, REQUIRED);
            String::new()
        }
    }
}

pub fn optional_rich_text(value: Option<String>) -> Option<String> {
    clean(value).filter(|raw| parse(Some(raw)).has_visible_text())
}

/// Accepts `YYYY-MM-DD`, or `YYYY-MM` read as the first of the month.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .ok()
}

pub fn required_date(errors: &mut FieldErrors, field: &str, value: Option<String>) -> String {
    let value = required(errors, field, value);
    if !value.is_empty() && parse_date(&value).is_none() {
        errors.add(field, INVALID_DATE);
    }
    value
}

pub fn optional_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let value = clean(value)?;
    if parse_date(&value).is_none() {
        errors.add(field, INVALID_DATE);
    }
    Some(value)
}

/// Flags `end_field` when both dates parse and the end precedes the start.
pub fn date_order(errors: &mut FieldErrors, end_field: &str, start: &str, end: Option<&str>) {
    if let (Some(start), Some(end)) = (parse_date(start), end.and_then(parse_date)) {
        if end < start {
            errors.add(end_field, "End date cannot be before the start date.");
        }
    }
}

/// Comma-separated input, trimmed, blanks and repeats dropped, order kept.
pub fn list(value: Option<String>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.unwrap_or_default().split(',') {
        let item = item.trim();
        if !item.is_empty() && !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

pub fn optional_image(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<ImagePayload> {
    let value = clean(value)?;
    match ImagePayload::decode(&value) {
        Ok(image) => Some(image),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

pub fn parse_id(errors: &mut FieldErrors, value: &str) -> Option<Uuid> {
    match Uuid::parse_str(value.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add("id", "Invalid identifier.");
            None
        }
    }
}
