use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Create a new config with just the API key, using defaults for everything else
    pub fn new(tmdb_api_key: String) -> Self {
        Self {
            tmdb: TmdbConfig {
                api_key: tmdb_api_key,
                ..TmdbConfig::default()
            },
            player: PlayerConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Check if the config has a valid API key
    pub fn has_api_key(&self) -> bool {
        !self.tmdb.api_key.trim().is_empty()
    }
}

/// TMDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,

    /// Language sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Command to launch player
    #[serde(default = "default_player_command")]
    pub command: String,

    /// Additional arguments passed to player
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player_command(),
            args: Vec::new(),
        }
    }
}

fn default_player_command() -> String {
    "mpv".to_string()
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme: "default" | "catppuccin" | "minimal"
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new("tmdb_key".to_string());
        assert_eq!(config.tmdb.api_key, "tmdb_key");
        assert_eq!(config.tmdb.language, "en-US");
        assert!(config.has_api_key());
    }

    #[test]
    fn test_config_empty_key() {
        let config = Config::new("  ".to_string());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::new("my_tmdb_key".to_string());
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("my_tmdb_key"));
        assert!(toml_str.contains("[player]"));
    }

    #[test]
    fn test_config_deserialization_minimal() {
        let toml_str = r#"
[tmdb]
api_key = "test_key"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tmdb.api_key, "test_key");
        assert_eq!(config.tmdb.timeout_secs, 15);
        assert_eq!(config.player.command, "mpv");
        assert_eq!(config.ui.theme, "default");
    }

    #[test]
    fn test_config_deserialization_full() {
        let toml_str = r#"
[tmdb]
api_key = "test_key"
language = "de-DE"
timeout_secs = 5

[player]
command = "vlc"
args = ["--fullscreen"]

[ui]
theme = "minimal"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tmdb.language, "de-DE");
        assert_eq!(config.tmdb.timeout_secs, 5);
        assert_eq!(config.player.command, "vlc");
        assert_eq!(config.player.args, vec!["--fullscreen"]);
        assert_eq!(config.ui.theme, "minimal");
    }
}
