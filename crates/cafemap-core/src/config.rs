use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive number, got {raw}"),
            });
        }
        Ok(value)
    };

    let google_api_key = require("GOOGLE_MAP_API_KEY")?;
    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.is_empty());

    let log_level = or_default("CAFEMAP_LOG_LEVEL", "info");
    let regions_path = PathBuf::from(or_default(
        "CAFEMAP_REGIONS_PATH",
        "./config/regions.yaml",
    ));
    let language = or_default("CAFEMAP_LANGUAGE", "zh-TW");
    let search_keyword = or_default("CAFEMAP_SEARCH_KEYWORD", "咖啡");
    let search_radius_m = parse_u32("CAFEMAP_SEARCH_RADIUS_M", "1000")?;
    let grid_step_m = parse_positive_f64("CAFEMAP_GRID_STEP_M", "1000")?;

    let request_timeout_secs = parse_u64("CAFEMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("CAFEMAP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("CAFEMAP_RETRY_BACKOFF_BASE_MS", "1000")?;

    let db_max_connections = parse_u32("CAFEMAP_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("CAFEMAP_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("CAFEMAP_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        google_api_key,
        database_url,
        log_level,
        regions_path,
        language,
        search_keyword,
        search_radius_m,
        grid_step_m,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
