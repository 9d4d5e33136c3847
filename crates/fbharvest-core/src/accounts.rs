use std::path::Path;

use crate::ConfigError;

/// Reads the account list: one URL per line, surrounding whitespace trimmed,
/// blank lines skipped, order preserved.
///
/// # Errors
///
/// Returns [`ConfigError::AccountListIo`] if the file cannot be read. A
/// missing list aborts the run before any page session is opened.
pub fn load_account_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AccountListIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(parse_account_list(&content))
}

#[must_use]
pub fn parse_account_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
