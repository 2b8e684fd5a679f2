use anyhow::Result;
use directories::ProjectDirs;
use serde_json::Value;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::AppConfig;

const APP_NAME: &str = "ProDirectory";
const CONFIG_FILE: &str = "config.json";

pub const ENV_API_URL: &str = "PRO_DIRECTORY_API_URL";
pub const ENV_PROFESSION: &str = "PRO_DIRECTORY_PROFESSION";
pub const ENV_DEBOUNCE_MS: &str = "PRO_DIRECTORY_DEBOUNCE_MS";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "prodirectory", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

fn resolve_config_directory(config_dir: Option<&Path>) -> Result<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => get_config_directory()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the configuration from `config_dir` (or the platform directory).
///
/// A missing file is created with defaults. A file that no longer parses is
/// migrated from the legacy layout if possible, otherwise defaults are used.
pub fn load_config(config_dir: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_config_directory(config_dir)?.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, config_dir)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            migrate_legacy_config(&config_content).or_else(|_| Ok(AppConfig::default()))
        }
    }
}

/// Upgrades configs written by earlier versions.
///
/// Older files used `api_url` instead of `api_base_url` and predate the
/// pagination and timeout settings.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let mut value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let defaults = AppConfig::default();

    if let Some(old_url) = obj.remove("api_url") {
        obj.entry("api_base_url").or_insert(old_url);
    }

    let ensure_field = |obj: &mut serde_json::Map<String, Value>, key: &str, default_val: Value| {
        if !obj.contains_key(key) || obj.get(key) == Some(&Value::Null) {
            obj.insert(key.to_string(), default_val);
        }
    };

    ensure_field(obj, "api_base_url", Value::String(defaults.api_base_url));
    ensure_field(obj, "api_domain", Value::String(defaults.api_domain));
    ensure_field(obj, "profession", serde_json::to_value(defaults.profession)?);
    ensure_field(obj, "debounce_ms", serde_json::to_value(defaults.debounce_ms)?);
    ensure_field(obj, "preview_limit", serde_json::to_value(defaults.preview_limit)?);
    ensure_field(obj, "page_limit", serde_json::to_value(defaults.page_limit)?);
    ensure_field(
        obj,
        "request_timeout_secs",
        serde_json::to_value(defaults.request_timeout_secs)?,
    );

    let migrated_config: AppConfig = serde_json::from_value(Value::Object(obj.clone()))?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the provided configuration to `config_dir` (or the platform directory).
pub fn save_config(config: &AppConfig, config_dir: Option<&Path>) -> Result<()> {
    let config_dir = resolve_config_directory(config_dir)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        tracing::info!("Created config directory: {:?}", config_dir);
    }

    let config_path = config_dir.join(CONFIG_FILE);
    let config_json = serde_json::to_string_pretty(config)?;

    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

/// Environment variables win over the file. Invalid values are logged and ignored.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(url) = try_load::<String>(ENV_API_URL) {
        config.api_base_url = url;
    }
    if let Some(profession) = try_load(ENV_PROFESSION) {
        config.profession = profession;
    }
    if let Some(debounce_ms) = try_load(ENV_DEBOUNCE_MS) {
        config.debounce_ms = debounce_ms;
    }
}

fn try_load<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => {
            tracing::info!("{key} set, overriding config");
            Some(value)
        }
        Err(e) => {
            tracing::warn!("Invalid {key} value '{raw}': {e}");
            None
        }
    }
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.prodirectory.ProDirectory/
// Linux:   ~/.config/prodirectory/
// Windows: %APPDATA%/prodirectory/ProDirectory/config/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProfessionType;
    use serial_test::serial;

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path())).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            profession: ProfessionType::Photographie,
            debounce_ms: 250,
            ..Default::default()
        };
        save_config(&config, Some(dir.path())).unwrap();
        assert_eq!(load_config(Some(dir.path())).unwrap(), config);
    }

    #[test]
    fn test_legacy_config_is_migrated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"api_url": "https://example.org/api", "profession": "peinture", "debounce_ms": null}"#,
        )
        .unwrap();
        let config = load_config(Some(dir.path())).unwrap();
        assert_eq!(config.api_base_url, "https://example.org/api");
        assert_eq!(config.profession, ProfessionType::Peinture);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.page_limit, 50);
    }

    #[test]
    fn test_corrupted_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(load_config(Some(dir.path())).unwrap(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var(ENV_PROFESSION, "sculpture");
        env::set_var(ENV_DEBOUNCE_MS, "not-a-number");
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config);
        env::remove_var(ENV_PROFESSION);
        env::remove_var(ENV_DEBOUNCE_MS);

        assert_eq!(config.profession, ProfessionType::Sculpture);
        assert_eq!(config.debounce_ms, 500);
    }
}
