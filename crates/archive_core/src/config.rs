//! Archive configuration

use archive_fs::LineEnding;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub archive: VolumeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Host directory backing the volume; created on first write
    pub root: PathBuf,
    /// Prefer the newer of script/bytecode when both exist
    pub timestamp_priority: bool,
    /// Line endings written for text files
    pub line_ending: LineEndingSetting,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            timestamp_priority: false,
            line_ending: LineEndingSetting::Native,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub keep_days: u32,
    /// Overrides the platform log directory
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            keep_days: 7,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEndingSetting {
    #[serde(rename = "native")]
    Native,
    #[serde(rename = "lf")]
    Lf,
    #[serde(rename = "crlf")]
    CrLf,
}

impl LineEndingSetting {
    pub fn resolve(self) -> LineEnding {
        match self {
            LineEndingSetting::Native => LineEnding::native(),
            LineEndingSetting::Lf => LineEnding::Lf,
            LineEndingSetting::CrLf => LineEnding::CrLf,
        }
    }
}

impl ArchiveConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ScriptArchive", "ScriptArchive")
}

fn default_root() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("Archive"))
        .unwrap_or_else(|| PathBuf::from("./Archive"))
}
