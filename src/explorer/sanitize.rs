//! File and folder name rules.

use crate::{FiledeckError, Result};

/// Characters that may not appear in an item name.
pub const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum length for an item name (in bytes).
pub const MAX_NAME_LENGTH: usize = 255;

/// Keep only the final path segment of a client-supplied file name.
///
/// Browsers on some platforms send the full local path as the file name.
pub fn clean_file_name(original: &str) -> &str {
    original.rsplit(['/', '\\']).next().unwrap_or(original)
}

/// Derive the stored name for an upload.
///
/// Path components are stripped from `original`. When `timestamp_millis` is
/// given, `_<millis>` is inserted before the last extension dot (or appended
/// when the name has no extension).
pub fn safe_file_name(original: &str, timestamp_millis: Option<i64>) -> Result<String> {
    let clean = clean_file_name(original.trim()).trim();

    if clean.is_empty() || clean == "." || clean == ".." {
        return Err(FiledeckError::InvalidInput(
            "file name is required".to_string(),
        ));
    }
    if clean.chars().any(char::is_control) {
        return Err(FiledeckError::InvalidInput(
            "file name contains control characters".to_string(),
        ));
    }

    let name = match timestamp_millis {
        Some(millis) => with_suffix(clean, millis),
        None => clean.to_string(),
    };

    if name.len() > MAX_NAME_LENGTH {
        return Err(FiledeckError::InvalidInput("file name is too long".to_string()));
    }

    Ok(name)
}

fn with_suffix(name: &str, millis: i64) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{}{}", &name[..dot], millis, &name[dot..]),
        _ => format!("{name}_{millis}"),
    }
}

/// Validate a folder or rename target name, returning it trimmed.
pub fn validate_item_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(FiledeckError::InvalidInput("name cannot be empty".to_string()));
    }
    if trimmed.contains(RESERVED_CHARS) || trimmed.chars().any(char::is_control) {
        return Err(FiledeckError::InvalidInput(
            "name contains invalid characters".to_string(),
        ));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(FiledeckError::InvalidInput(format!(
            "'{trimmed}' is not a valid name"
        )));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(FiledeckError::InvalidInput("name is too long".to_string()));
    }

    Ok(trimmed)
}
