use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::config::Config;
use crate::error::ConfigError;

/// Application directory (~/.config/moviescope)
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moviescope")
}

/// Get the config file path (~/.config/moviescope/config.toml)
pub fn config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Load config from the default path
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit path, requiring an API key
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config_from(path)?;

    if !config.has_api_key() {
        return Err(ConfigError::MissingApiKey);
    }

    Ok(config)
}

/// Parse the default config file without validating it
pub fn read_config() -> Result<Config, ConfigError> {
    read_config_from(&config_path())
}

/// Parse a config file without validating it
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
}

/// Save config to the default path with secure permissions
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

/// Save config to an explicit path with secure permissions
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

    fs::write(path, content)?;

    // The file holds an API key
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.ends_with("moviescope/config.toml"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::new("abc123".to_string());
        config.player.command = "vlc".to_string();
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.tmdb.api_key, "abc123");
        assert_eq!(loaded.player.command, "vlc");

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::NotFound)));

        fs::write(&path, "[tmdb\napi_key = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Invalid(_))));

        fs::write(&path, "[tmdb]\napi_key = \"\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::MissingApiKey)));

        // Still readable for editing
        let unchecked = read_config_from(&path).unwrap();
        assert_eq!(unchecked.tmdb.language, "en-US");
    }
}
