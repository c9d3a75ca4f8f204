use chrono::DateTime;

use crate::errors::AppError;

pub fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Accepts `local@domain.tld` shaped addresses; anything finer is left to the provider.
pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation(format!("{field} is not a valid email address: {value:?}"));

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !host.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// ISO-8601 instant with an explicit offset, e.g. `2025-01-01T10:00:00Z`.
pub fn timestamp(field: &str, value: &str) -> Result<(), AppError> {
    DateTime::parse_from_rfc3339(value).map(|_| ()).map_err(|e| {
        AppError::Validation(format!("{field} must be an ISO-8601 timestamp ({e}): {value:?}"))
    })
}
