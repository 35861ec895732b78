use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ScribeError};
use crate::types::FontSize;

/// Top-level configuration for the Scribe application.
///
/// Loaded from `~/.scribe/config.toml` by default. Each section corresponds
/// to one part of the editor or a cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub dictation: DictationConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            editor: EditorConfig::default(),
            dictation: DictationConfig::default(),
            rewrite: RewriteConfig::default(),
        }
    }
}

impl ScribeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScribeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScribeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the notes database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.scribe/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in points (10 to 32).
    pub font_size: u16,
    /// Whether `edit` sessions write the notebook back on quit without
    /// an explicit `:save`.
    pub autosave: bool,
}

impl EditorConfig {
    /// The configured font size, clamped into the supported range.
    pub fn font_size(&self) -> FontSize {
        FontSize::new(self.font_size)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 16,
            autosave: true,
        }
    }
}

/// Dictation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// BCP 47 recognition language tag.
    pub language: String,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            language: "ru-RU".to_string(),
        }
    }
}

/// Writing-improvement service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Whether the improve action is offered at all.
    pub enabled: bool,
    /// Model identifier passed through to the configured provider.
    pub model: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "googleai/gemini-2.0-flash".to_string(),
        }
    }
}
