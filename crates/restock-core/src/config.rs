use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BUCKET: &str = "appliances";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank values count as unset: a `.env` line like `BUCKET=` should not
    // produce an empty bucket name.
    let get = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let require = |var: &str| -> Result<String, ConfigError> {
        get(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { get(var).unwrap_or_else(|| default.to_string()) };

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

    let supabase_url = require("SUPABASE_URL")?;
    let service_role_key = require("SUPABASE_SERVICE_ROLE_KEY")?;

    let bucket = or_default("BUCKET", DEFAULT_BUCKET);
    let log_level = or_default("RESTOCK_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("RESTOCK_REQUEST_TIMEOUT_SECS", "30")?;
    let upload_delay_ms = parse_u64("RESTOCK_UPLOAD_DELAY_MS", "40")?;
    let user_agent = or_default("RESTOCK_USER_AGENT", "restock/0.1 (inventory-import)");
    let warm_concurrency = parse_usize("RESTOCK_WARM_CONCURRENCY", "8")?;

    Ok(AppConfig {
        supabase_url,
        service_role_key,
        bucket,
        log_level,
        request_timeout_secs,
        upload_delay_ms,
        user_agent,
        warm_concurrency,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
