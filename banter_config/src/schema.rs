use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdviceConfig {
    /// Base URL of the advice service.
    #[serde(default = "AdviceConfig::default_base_url")]
    pub base_url: String,
    /// Upper bound on one lookup, in seconds.
    #[serde(default = "AdviceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl AdviceConfig {
    fn default_base_url() -> String {
        "https://api.adviceslip.com".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        5
    }
}

/// Typing-delay constants.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "ChatConfig::default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "ChatConfig::default_per_char_delay_ms")]
    pub per_char_delay_ms: u64,
    #[serde(default = "ChatConfig::default_delay_cap_ms")]
    pub delay_cap_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: Self::default_base_delay_ms(),
            per_char_delay_ms: Self::default_per_char_delay_ms(),
            delay_cap_ms: Self::default_delay_cap_ms(),
        }
    }
}

impl ChatConfig {
    const fn default_base_delay_ms() -> u64 {
        400
    }

    const fn default_per_char_delay_ms() -> u64 {
        15
    }

    const fn default_delay_cap_ms() -> u64 {
        1600
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Transcript file location; `~/.banter/transcript.json` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `~/.banter/config.json`.
    ///
    /// A missing file yields the defaults; a malformed file is an error the
    /// caller should surface rather than silently ignore.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!(
                "no config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("malformed config at {}: {e}", config_path.display())
        })?;

        Ok(config)
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".banter"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write a template config file for the user to edit.
    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "advice": {
    "base_url": "https://api.adviceslip.com",
    "timeout_secs": 5
  },
  "chat": {
    "base_delay_ms": 400,
    "per_char_delay_ms": 15,
    "delay_cap_ms": 1600
  },
  "storage": {}
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("Created config file at: {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_contract() {
        let config = Config::default();
        assert_eq!(config.advice.base_url, "https://api.adviceslip.com");
        assert_eq!(config.advice.timeout_secs, 5);
        assert_eq!(config.chat.base_delay_ms, 400);
        assert_eq!(config.chat.per_char_delay_ms, 15);
        assert_eq!(config.chat.delay_cap_ms, 1600);
        assert_eq!(config.storage.transcript_path, None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_file_fills_in_defaults() {
        let parsed: Config =
            serde_json::from_str(r#"{"chat":{"base_delay_ms":100}}"#).expect("parse config");
        assert_eq!(parsed.chat.base_delay_ms, 100);
        assert_eq!(parsed.chat.per_char_delay_ms, 15);
        assert_eq!(parsed.advice.timeout_secs, 5);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn overrides_are_honored() {
        let parsed: Config = serde_json::from_str(
            r#"{
                "advice": {"base_url": "http://localhost:9999", "timeout_secs": 1},
                "storage": {"transcript_path": "/tmp/t.json"}
            }"#,
        )
        .expect("parse config");
        assert_eq!(parsed.advice.base_url, "http://localhost:9999");
        assert_eq!(parsed.advice.timeout_secs, 1);
        assert_eq!(
            parsed.storage.transcript_path,
            Some(PathBuf::from("/tmp/t.json"))
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let parsed = serde_json::from_str::<Config>("{ nope");
        assert!(parsed.is_err());
    }
}
