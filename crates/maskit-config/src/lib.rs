use maskit_core::{ImageKind, RenderStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent configuration for maskit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub image_type: ImageKind,

    #[serde(default)]
    pub style: RenderStyle,

    /// Keywords that are selected but never painted
    #[serde(default)]
    pub exclude_words: Vec<String>,

    #[serde(default)]
    pub pii: PiiConfig,

    #[serde(default)]
    pub rules: RulesFileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_type: ImageKind::default(),
            style: RenderStyle::default(),
            exclude_words: Vec::new(),
            pii: PiiConfig::default(),
            rules: RulesFileConfig::default(),
        }
    }
}

impl Default for PiiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.8
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load and validate config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let threshold = self.pii.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!(
                "PII confidence threshold should be between 0 and 1, got {}",
                threshold
            );
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "maskit", "maskit") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.maskit/config.toml")
        }
    }
}
