use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
/// Searches allowed per client-agnostic one-minute window.
pub const DEFAULT_SEARCH_RATE_LIMIT: usize = 30;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var) {
            None => Ok(default),
            Some(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(invalid(var, format!("expected a boolean, got '{raw}'"))),
            },
        }
    };

    let gemini_api_key = optional("GEMINI_API_KEY");
    let env = parse_environment(&or_default("GROCYWISE_ENV", "development"))?;

    let gemini_model = or_default("GROCYWISE_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("GROCYWISE_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let web_search_enabled = parse_bool("GROCYWISE_WEB_SEARCH", true)?;
    let schema_constraint_enabled = parse_bool("GROCYWISE_SCHEMA_CONSTRAINT", true)?;

    let request_timeout_secs = optional("GROCYWISE_REQUEST_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("GROCYWISE_REQUEST_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?;

    let search_rate_limit = match optional("GROCYWISE_SEARCH_RATE_LIMIT") {
        None => DEFAULT_SEARCH_RATE_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) => {
                return Err(invalid(
                    "GROCYWISE_SEARCH_RATE_LIMIT",
                    "must be at least 1".to_string(),
                ))
            }
            Ok(n) => n,
            Err(e) => return Err(invalid("GROCYWISE_SEARCH_RATE_LIMIT", e.to_string())),
        },
    };

    let bind_addr = or_default("GROCYWISE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GROCYWISE_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("GROCYWISE_LOG_LEVEL", "info");
    let locations_path = optional("GROCYWISE_LOCATIONS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        web_search_enabled,
        schema_constraint_enabled,
        request_timeout_secs,
        search_rate_limit,
        bind_addr,
        log_level,
        locations_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GROCYWISE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
