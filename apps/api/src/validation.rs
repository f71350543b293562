//! Superficial request checks. The store's schema is the real authority.

use reqwest::Url;

use crate::errors::AppError;

/// Trims `value` and fails if nothing is left.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Accepts only absolute `http`/`https` URLs.
pub fn require_http_url(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = require_non_empty(field, value)?;
    let url = Url::parse(&trimmed)
        .map_err(|e| AppError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::Validation(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(trimmed)
}

/// `None` stays `None`; blank strings become `None`; anything else is trimmed.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
