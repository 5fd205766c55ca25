use crate::utils::error::{BlobMonError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_BLOB_NAME_LEN: usize = 1024;

static DISALLOWED_BLOB_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_\-/. ]").expect("blob name pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks a blob name against the storage naming rules.
///
/// The name must be at most 1024 characters, contain no `//`, and must not
/// start or end with a period or a space.
pub fn is_valid_blob_name(name: &str) -> bool {
    if name.chars().count() > MAX_BLOB_NAME_LEN {
        return false;
    }
    if name.contains("//") {
        return false;
    }
    if name.starts_with('.') || name.ends_with('.') {
        return false;
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return false;
    }
    true
}

/// Replaces characters outside `[A-Za-z0-9_-/. ]` with `_` and trims
/// surrounding slashes. Runs before [`is_valid_blob_name`].
pub fn sanitize_blob_name(name: &str) -> String {
    DISALLOWED_BLOB_CHARS
        .replace_all(name, "_")
        .trim_matches('/')
        .to_string()
}

pub fn validate_blob_name(name: &str) -> Result<()> {
    if is_valid_blob_name(name) {
        Ok(())
    } else {
        Err(BlobMonError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Parses user input for the refresh interval. Only positive integers pass.
pub fn parse_refresh_interval(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| BlobMonError::InvalidInterval {
        value: raw.to_string(),
        reason: "not a valid integer".to_string(),
    })?;

    validate_refresh_interval(value)
}

pub fn validate_refresh_interval(value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(BlobMonError::InvalidInterval {
            value: value.to_string(),
            reason: "must be a positive number of seconds".to_string(),
        });
    }
    Ok(value as u64)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BlobMonError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}
