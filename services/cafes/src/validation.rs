//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate that a trimmed value is present
pub fn validate_required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("This field is required.".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    validate_required(email)?;

    if email.len() > 250 {
        return Err("Email must be at most 250 characters long.".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email.trim()) {
        return Err("Invalid email address.".to_string());
    }

    Ok(())
}

/// Validate that a value fits a `VARCHAR(max)` column
pub fn validate_max_len(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("Must be at most {} characters long.", max));
    }

    Ok(())
}

/// Validate that a link is an absolute `http` or `https` URL
pub fn validate_http_url(value: &str) -> Result<(), String> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !value.contains(char::is_whitespace) => Ok(()),
        _ => Err("Must be an http:// or https:// URL.".to_string()),
    }
}

/// Normalise a free-text yes/no answer
///
/// Only a case-insensitive exact "yes" is true; anything else, blank and
/// padded values included, is false.
pub fn parse_yes_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

/// Render a flag back into the text a form expects
pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
