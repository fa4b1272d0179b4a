use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let commerce_api_url = require("CORIUM_COMMERCE_API_URL")?;
    let commerce_api_token = require("CORIUM_COMMERCE_API_TOKEN")?;

    let env = parse_environment(&or_default("CORIUM_ENV", "development"));

    let bind_addr = parse_addr("CORIUM_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("CORIUM_LOG_LEVEL", "info");
    let categories_path = PathBuf::from(or_default(
        "CORIUM_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));

    let client_timeout_secs = parse_u64("CORIUM_CLIENT_TIMEOUT_SECS", "30")?;
    let client_max_retries = parse_u32("CORIUM_CLIENT_MAX_RETRIES", "3")?;
    let client_retry_backoff_base_ms = parse_u64("CORIUM_CLIENT_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        commerce_api_url,
        commerce_api_token,
        env,
        bind_addr,
        log_level,
        categories_path,
        client_timeout_secs,
        client_max_retries,
        client_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("CORIUM_COMMERCE_API_URL", "https://api.tienda.example.com");
        m.insert("CORIUM_COMMERCE_API_TOKEN", "test-token");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CORIUM_COMMERCE_API_URL"),
            "expected MissingEnvVar(CORIUM_COMMERCE_API_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_api_token() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CORIUM_COMMERCE_API_URL", "https://api.tienda.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CORIUM_COMMERCE_API_TOKEN"),
            "expected MissingEnvVar(CORIUM_COMMERCE_API_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("CORIUM_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CORIUM_BIND_ADDR"),
            "expected InvalidEnvVar(CORIUM_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:4000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.client_timeout_secs, 30);
        assert_eq!(cfg.client_max_retries, 3);
        assert_eq!(cfg.client_retry_backoff_base_ms, 1000);
        assert_eq!(
            cfg.categories_path.to_string_lossy(),
            "./config/categories.yaml"
        );
    }

    #[test]
    fn client_timeout_override() {
        let mut map = full_env();
        map.insert("CORIUM_CLIENT_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.client_timeout_secs, 60);
    }

    #[test]
    fn client_timeout_invalid() {
        let mut map = full_env();
        map.insert("CORIUM_CLIENT_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CORIUM_CLIENT_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CORIUM_CLIENT_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn client_max_retries_override() {
        let mut map = full_env();
        map.insert("CORIUM_CLIENT_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.client_max_retries, 5);
    }

    #[test]
    fn client_retry_backoff_invalid() {
        let mut map = full_env();
        map.insert("CORIUM_CLIENT_RETRY_BACKOFF_BASE_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CORIUM_CLIENT_RETRY_BACKOFF_BASE_MS"),
            "expected InvalidEnvVar(CORIUM_CLIENT_RETRY_BACKOFF_BASE_MS), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_the_api_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("test-token"));
    }
}
