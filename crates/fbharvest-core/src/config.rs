use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is malformed or the settings are inconsistent.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is malformed or the settings are inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default; the lookup only overrides them. Tests drive
/// this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let webdriver_url = or_default("FBHARVEST_WEBDRIVER_URL", "http://localhost:4444");
    let urls_path = PathBuf::from(or_default("FBHARVEST_URLS_PATH", "urls.lst"));
    let output_dir = PathBuf::from(or_default("FBHARVEST_OUTPUT_DIR", "."));
    let log_level = or_default("FBHARVEST_LOG_LEVEL", "info");

    let scroll_pause_min_ms = parse_u64("FBHARVEST_SCROLL_PAUSE_MIN_MS", "3000")?;
    let scroll_pause_max_ms = parse_u64("FBHARVEST_SCROLL_PAUSE_MAX_MS", "7000")?;
    if scroll_pause_min_ms > scroll_pause_max_ms {
        return Err(ConfigError::Validation(format!(
            "FBHARVEST_SCROLL_PAUSE_MIN_MS ({scroll_pause_min_ms}) exceeds \
             FBHARVEST_SCROLL_PAUSE_MAX_MS ({scroll_pause_max_ms})"
        )));
    }

    let loading_timeout_secs = parse_u64("FBHARVEST_LOADING_TIMEOUT_SECS", "30")?;
    let max_scroll_steps = parse_usize("FBHARVEST_MAX_SCROLL_STEPS", "500")?;
    if max_scroll_steps == 0 {
        return Err(ConfigError::Validation(
            "FBHARVEST_MAX_SCROLL_STEPS must be at least 1".to_string(),
        ));
    }
    let max_concurrent_accounts = parse_usize("FBHARVEST_MAX_CONCURRENT_ACCOUNTS", "1")?;

    let tesseract_bin = or_default("FBHARVEST_TESSERACT_BIN", "tesseract");
    let ocr_lang = or_default("FBHARVEST_OCR_LANG", "tur");

    let login_email = lookup("EMAIL").ok();
    let login_password = lookup("PASSWORD").ok();

    Ok(AppConfig {
        webdriver_url,
        urls_path,
        output_dir,
        log_level,
        scroll_pause_min_ms,
        scroll_pause_max_ms,
        loading_timeout_secs,
        max_scroll_steps,
        max_concurrent_accounts,
        tesseract_bin,
        ocr_lang,
        login_email,
        login_password,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
