use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_HTTP_URL};
use crate::models::{AuthMode, HttpMethod};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted field defaults and body templates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub url: String,
    pub method: HttpMethod,
    pub auth_type: AuthMode,
    pub username: String,
    pub password: String,
    pub token: String,
    pub headers: String,
    pub body: String,
    pub templates: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: String::from(DEFAULT_HTTP_URL),
            method: HttpMethod::GET,
            auth_type: AuthMode::None,
            username: String::new(),
            password: String::new(),
            token: String::new(),
            headers: String::from("{\n    \"Accept\": \"application/json\"\n}"),
            body: String::new(),
            templates: default_templates(),
        }
    }
}

/// Starter templates written into a fresh configuration
pub fn default_templates() -> Map<String, Value> {
    let mut templates = Map::new();
    templates.insert(
        "Create Incident".to_string(),
        json!({
            "short_description": "Short description of the incident",
            "priority": "2",
            "category": "network",
            "subcategory": "WAN"
        }),
    );
    templates.insert(
        "Update Change Request".to_string(),
        json!({
            "change_id": "CHG1234567",
            "description": "Updated description for change request",
            "state": "in progress"
        }),
    );
    templates
}

/// Opaque key-value persistence for [`Config`]
pub trait ConfigStore: Send {
    fn load(&self) -> Result<Config>;
    fn save(&self, config: &Config) -> Result<()>;
}

/// Stores the configuration as pretty JSON in a single file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// `$REQSCOPE_CONFIG`, else `~/.reqscope/config.json`
    pub fn default_location() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(CONFIG_DIR_NAME)
                    .join(CONFIG_FILE_NAME)
            });
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    /// A missing file yields the defaults
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        self.ensure_dir()?;
        let content = crate::projection::to_pretty(&serde_json::to_value(config)?);
        fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
