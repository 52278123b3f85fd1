//! Environment value parsing
//!
//! Helpers shared by the binaries that build their configuration from
//! environment variables.

use thiserror::Error;

/// Error for a variable that is present but cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {key}: {value:?} ({reason})")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: &'static str,
}

impl ConfigError {
    pub fn new(key: &str, value: &str, reason: &'static str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

/// Parse a boolean flag.
///
/// Accepts `true/1/yes/on` and `false/0/no/off`, case-insensitively.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::new(key, value, "expected a boolean")),
    }
}

/// Parse a list given either as a JSON array of strings or as a
/// comma-separated string. Blank entries are dropped.
///
/// ```
/// use platform::config::parse_list;
/// assert_eq!(parse_list("a, b,,c"), vec!["a", "b", "c"]);
/// assert_eq!(parse_list(r#"["a","b"]"#), vec!["a", "b"]);
/// ```
pub fn parse_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect();
        }
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a URL path prefix: leading `/`, no trailing `/`.
/// A blank or root prefix becomes the empty string.
pub fn normalize_path_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
