use anyhow::Context;
use encarte_core::{DEFAULT_MARKER, LabelRule};
use encarte_security::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for encarte
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub workbook: WorkbookConfig,

    #[serde(default)]
    pub dedupe: DedupeConfig,

    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub inspect: InspectConfig,
}

/// Product list spreadsheet that `dedupe` rewrites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    #[serde(default = "default_workbook_path")]
    pub path: PathBuf,

    /// Sheet to load; first sheet when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    #[serde(default = "default_name_column")]
    pub name_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupeConfig {
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default = "LabelRule::defaults")]
    pub rules: Vec<LabelRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    #[serde(default = "default_inspect_files")]
    pub files: Vec<PathBuf>,

    #[serde(default = "default_inspect_rows")]
    pub rows: usize,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            path: default_workbook_path(),
            sheet: None,
            name_column: default_name_column(),
        }
    }
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            rules: LabelRule::defaults(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            files: default_inspect_files(),
            rows: default_inspect_rows(),
        }
    }
}

fn default_workbook_path() -> PathBuf {
    PathBuf::from("produtos.xlsx")
}

fn default_name_column() -> String {
    "nome".to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_inspect_files() -> Vec<PathBuf> {
    vec![PathBuf::from("exemplo.xlsx"), PathBuf::from("produtos.xlsx")]
}

fn default_inspect_rows() -> usize {
    5
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load config from an explicit path, which must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
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

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "encarte", "encarte") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.encarte/config.toml")
        }
    }
}
