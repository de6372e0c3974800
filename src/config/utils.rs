/// Configuration loading, validation and persistence
///
/// The loaded `Config` is returned to the caller and passed down explicitly;
/// there is no process-wide config instance.
use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

pub const ENV_API_KEY: &str = "MATCHDAY_API_KEY";
pub const ENV_API_SECRET: &str = "MATCHDAY_API_SECRET";
pub const ENV_BASE_URL: &str = "MATCHDAY_BASE_URL";

/// Longest accepted TTL override: one year
pub const MAX_TTL_OVERRIDE_MS: u64 = 365 * 24 * 60 * 60 * 1000;

/// Load configuration from a TOML file
///
/// A missing file yields the defaults. Environment overrides are applied on
/// top, then the result is validated.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config_from_path`] with an explicit variable lookup
pub fn load_config_with_env<F>(path: impl AsRef<Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;
        parse_config(&contents, &path_str)?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path_str),
        );
        Config::default()
    };

    apply_env_overrides(&mut config, lookup);
    validate_config(&config)?;

    logger::debug(
        LogTag::Config,
        &format!(
            "Configuration loaded: base_url={}, timeout={}ms, cache_max_entries={}",
            config.api.base_url, config.api.timeout_ms, config.cache.max_entries
        ),
    );

    Ok(config)
}

pub fn parse_config(contents: &str, origin: &str) -> Result<Config, ConfigError> {
    toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })
}

/// Overlay credentials and base URL from the environment
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// the file setting.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty(ENV_API_KEY) {
        config.api.api_key = key;
    }
    if let Some(secret) = non_empty(ENV_API_SECRET) {
        config.api.api_secret = secret;
    }
    if let Some(base_url) = non_empty(ENV_BASE_URL) {
        config.api.base_url = base_url;
    }
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
    }
    if url::Url::parse(&config.api.base_url).is_err() {
        return Err(ConfigError::Invalid(format!(
            "api.base_url is not a valid URL: {}",
            config.api.base_url
        )));
    }
    if config.api.timeout_ms == 0 {
        return Err(ConfigError::Invalid("api.timeout_ms must be greater than zero".to_string()));
    }
    if config.cache.max_entries == 0 {
        return Err(ConfigError::Invalid("cache.max_entries must be greater than zero".to_string()));
    }
    if config.cache.sweep_interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "cache.sweep_interval_secs must be greater than zero".to_string(),
        ));
    }
    if config.cache.performance_samples == 0 {
        return Err(ConfigError::Invalid(
            "cache.performance_samples must be greater than zero".to_string(),
        ));
    }
    for (category, ttl_ms) in &config.cache.ttl_overrides {
        if *ttl_ms == 0 || *ttl_ms > MAX_TTL_OVERRIDE_MS {
            return Err(ConfigError::Invalid(format!(
                "cache.ttl_overrides.{} must be between 1 and {} ms, got {}",
                category, MAX_TTL_OVERRIDE_MS, ttl_ms
            )));
        }
    }
    Ok(())
}

/// Write the configuration as pretty TOML
pub fn save_config(config: &Config, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [api]
            api_key = "abc"
            timeout_ms = 2500

            [cache.ttl_overrides]
            live = 15000
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.api.api_key, "abc");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.api.base_url, "https://livescore-api.com/api-client");
        assert_eq!(config.cache.max_entries, 500);
        assert_eq!(config.cache.ttl_overrides.get("live"), Some(&15000));
        assert_eq!(config.aggregation.top_n_competitions, 5);
    }

    #[test]
    fn test_env_overrides_skip_blank_values() {
        let mut config = Config::default();
        config.api.api_secret = "from-file".to_string();

        let env: HashMap<&str, &str> = [(ENV_API_KEY, "env-key"), (ENV_API_SECRET, "  ")]
            .into_iter()
            .collect();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.api_key, "env-key");
        assert_eq!(config.api.api_secret, "from-file");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_ms = 0;
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_bounds_ttl_overrides() {
        let mut config = Config::default();
        config.cache.ttl_overrides.insert("live".to_string(), 15_000);
        assert!(validate_config(&config).is_ok());

        config.cache.ttl_overrides.insert("teams".to_string(), 0);
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));

        config.cache.ttl_overrides.insert("teams".to_string(), u64::MAX);
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_with_env(dir.path().join("absent.toml"), |_| None).unwrap();
        assert_eq!(config.cache.sweep_interval_secs, 60);
        assert_eq!(config.api.base_url, Config::default().api.base_url);
    }

    #[test]
    fn test_load_applies_injected_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_with_env(dir.path().join("absent.toml"), |name| {
            (name == ENV_BASE_URL).then(|| "https://example.test/api".to_string())
        })
        .unwrap();
        assert_eq!(config.api.base_url, "https://example.test/api");
    }

    #[test]
    fn test_invalid_env_base_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_with_env(dir.path().join("absent.toml"), |name| {
            (name == ENV_BASE_URL).then(|| "not a url".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.cache.max_entries = 42;
        config.aggregation.priority_default = vec!["152".to_string()];
        save_config(&config, &path).unwrap();

        let loaded = load_config_with_env(&path, |_| None).unwrap();
        assert_eq!(loaded.cache.max_entries, 42);
        assert_eq!(loaded.aggregation.priority_default, vec!["152".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            load_config_with_env(&path, |_| None),
            Err(ConfigError::Parse { .. })
        ));
    }
}
