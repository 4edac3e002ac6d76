use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_MAX_CLIP_MINUTES: u32 = 2;
pub const DEFAULT_NUM_CLIPS: u32 = 5;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_lang: Option<String>,
    pub default_format: Option<String>,
    pub max_clip_minutes: Option<u32>,
    pub num_clips: Option<u32>,
}

impl Config {
    /// Load config from ~/.config/ytclip/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn lang(&self) -> &str {
        self.default_lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    pub fn max_clip_minutes(&self) -> u32 {
        self.max_clip_minutes.unwrap_or(DEFAULT_MAX_CLIP_MINUTES)
    }

    pub fn num_clips(&self) -> u32 {
        self.num_clips.unwrap_or(DEFAULT_NUM_CLIPS)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytclip")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
default_lang = "es"
default_format = "json"
max_clip_minutes = 3
num_clips = 8
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.lang(), "es");
        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert_eq!(config.max_clip_minutes(), 3);
        assert_eq!(config.num_clips(), 8);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_format.is_none());
        assert_eq!(config.lang(), DEFAULT_LANG);
        assert_eq!(config.max_clip_minutes(), DEFAULT_MAX_CLIP_MINUTES);
        assert_eq!(config.num_clips(), DEFAULT_NUM_CLIPS);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert_eq!(config.lang(), "fr");
        assert!(config.num_clips.is_none());
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        assert!(config_path().ends_with("ytclip/config.toml"));
    }
}
