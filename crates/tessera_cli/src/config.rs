//! Tessera configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tessera_theme::{AliasConfig, CssOptions, Slot, ThemeAliases};

/// Config file name looked up in the project root
pub const CONFIG_FILE: &str = "tessera.toml";

/// Top-level Tessera configuration (tessera.toml)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TesseraConfig {
    pub project: ProjectConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub aliases: AliasesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where the schema snapshot lives
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Schema JSON, relative to the project root
    #[serde(default = "default_schema_path")]
    pub path: String,
}

fn default_schema_path() -> String {
    "theme.json".to_string()
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

/// Slot bindings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AliasesConfig {
    #[serde(default = "default_light")]
    pub light: String,
    #[serde(default = "default_dark")]
    pub dark: String,
    /// Slot active on first paint (`light` or `dark`)
    #[serde(default = "default_light")]
    pub initial_slot: String,
}

fn default_light() -> String {
    "light".to_string()
}

fn default_dark() -> String {
    "dark".to_string()
}

impl Default for AliasesConfig {
    fn default() -> Self {
        Self {
            light: default_light(),
            dark: default_dark(),
            initial_slot: default_light(),
        }
    }
}

/// Generated artifacts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Stylesheet path
    #[serde(default = "default_css")]
    pub css: String,
    /// Export JSON path
    #[serde(default = "default_export")]
    pub export: String,
    /// Class prefix for wrapper rules
    #[serde(default)]
    pub selector_prefix: String,
    #[serde(default = "default_true")]
    pub wrappers: bool,
    #[serde(default = "default_true")]
    pub body: bool,
}

fn default_css() -> String {
    "dist/theme.css".to_string()
}

fn default_export() -> String {
    "dist/theme.export.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            css: default_css(),
            export: default_export(),
            selector_prefix: String::new(),
            wrappers: true,
            body: true,
        }
    }
}

impl TesseraConfig {
    /// Load configuration from a directory (looks for tessera.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = Self::config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `tessera init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Config file for a project directory, or the path itself if it is a file
    pub fn config_path(path: &Path) -> PathBuf {
        if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        }
    }

    /// Create a new configuration with the given project name
    pub fn new(name: &str) -> Self {
        Self {
            project: ProjectConfig {
                name: name.to_string(),
                description: None,
            },
            schema: SchemaConfig::default(),
            aliases: AliasesConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn alias_config(&self) -> Result<AliasConfig> {
        let initial_slot: Slot = self
            .aliases
            .initial_slot
            .parse()
            .map_err(|()| anyhow::anyhow!("Unknown initial_slot {:?}", self.aliases.initial_slot))?;
        Ok(AliasConfig::new(
            ThemeAliases::new(&self.aliases.light, &self.aliases.dark),
            initial_slot,
        ))
    }

    pub fn css_options(&self) -> CssOptions {
        CssOptions {
            selector_prefix: self.output.selector_prefix.clone(),
            include_wrappers: self.output.wrappers,
            include_body: self.output.body,
        }
    }
}
