//! Field validation shared by the create/update payloads of every resource.
//!
//! All checks return `AppError::Validation` naming the offending field so the
//! client can attach the message to the right form input.

use reqwest::Url;

use crate::errors::AppError;

pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Digits, `-`, `+`, `(`, `)` and spaces only, with at least 10 digits.
pub fn validate_phone_number(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')' | ' '));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    !phone.is_empty() && allowed && digits >= 10
}

pub fn validate_url(url: &str) -> bool {
    Url::parse(url.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Strips angle brackets and `javascript:` URIs from free text.
pub fn sanitize_input(input: &str) -> String {
    let without_tags: String = input.chars().filter(|c| *c != '<' && *c != '>').collect();
    strip_case_insensitive(&without_tags, "javascript:")
        .trim()
        .to_string()
}

fn strip_case_insensitive(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(pos) = lower[cursor..].find(needle) {
        out.push_str(&haystack[cursor..cursor + pos]);
        cursor += pos + needle.len();
    }
    out.push_str(&haystack[cursor..]);
    out
}

/// Trimmed length must fall within `1..=max` characters.
pub fn require_text(field: &str, value: &str, max: Option<usize>) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if let Some(max) = max {
        if len > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
    if validate_email(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a valid email address"
        )))
    }
}

pub fn optional_phone(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(phone) if !phone.trim().is_empty() && !validate_phone_number(phone) => Err(
            AppError::Validation(format!("{field} must be a valid phone number")),
        ),
        _ => Ok(()),
    }
}

pub fn optional_url(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(url) if !validate_url(url) => Err(AppError::Validation(format!(
            "{field} must be a valid URL"
        ))),
        _ => Ok(()),
    }
}

/// Trims every entry and drops blanks and duplicates, keeping first occurrence order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
