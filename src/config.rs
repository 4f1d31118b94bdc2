use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::client::DEFAULT_API_URL;
use crate::api::Credentials;
use crate::import::resolver::{DEFAULT_IMPORT_COMMAND_PREFIX, DEFAULT_RESOURCE_NAME_PREFIX};
use crate::import::{ImportError, ImportResult, Scope};
use crate::traits::FileSystem;

const CONFIG_FILE: &str = ".cf-import.yaml";

/// Values read from the YAML config file, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub account: Option<String>,
    pub zone: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub key: Option<String>,
    pub api_url: Option<String>,
    pub import_command_prefix: Option<String>,
    pub resource_name_prefix: Option<String>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub account: Option<String>,
    pub zone: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub key: Option<String>,
    pub api_url: Option<String>,
    pub import_command_prefix: Option<String>,
    pub resource_name_prefix: Option<String>,
}

/// Effective settings after layering overrides over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub account: Option<String>,
    pub zone: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub key: Option<String>,
    pub api_url: String,
    pub import_command_prefix: String,
    pub resource_name_prefix: String,
}

impl Settings {
    /// Load settings, reading the config file through `fs`
    pub fn load(fs: &dyn FileSystem, overrides: Overrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => Some(load_config_file(fs, path)?),
            None => match default_config_path() {
                Some(path) if fs.exists(&path) => Some(load_config_file(fs, &path)?),
                _ => None,
            },
        };

        Ok(Self::merge(overrides, file.unwrap_or_default()))
    }

    /// Layer overrides over file values, then apply defaults
    pub fn merge(overrides: Overrides, file: ConfigFile) -> Self {
        fn pick(over: Option<String>, file: Option<String>) -> Option<String> {
            over.filter(|v| !v.is_empty())
                .or_else(|| file.filter(|v| !v.is_empty()))
        }

        Self {
            account: pick(overrides.account, file.account),
            zone: pick(overrides.zone, file.zone),
            token: pick(overrides.token, file.token),
            email: pick(overrides.email, file.email),
            key: pick(overrides.key, file.key),
            api_url: pick(overrides.api_url, file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            import_command_prefix: pick(
                overrides.import_command_prefix,
                file.import_command_prefix,
            )
            .unwrap_or_else(|| DEFAULT_IMPORT_COMMAND_PREFIX.to_string()),
            resource_name_prefix: pick(overrides.resource_name_prefix, file.resource_name_prefix)
                .unwrap_or_else(|| DEFAULT_RESOURCE_NAME_PREFIX.to_string()),
        }
    }

    /// Validated account or zone scope
    pub fn scope(&self) -> ImportResult<Scope> {
        Scope::new(self.account.as_deref(), self.zone.as_deref())
    }

    pub fn credentials(&self) -> ImportResult<Credentials> {
        Credentials::resolve(
            self.token.as_deref(),
            self.email.as_deref(),
            self.key.as_deref(),
        )
    }
}

/// `~/.cf-import.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

fn load_config_file(fs: &dyn FileSystem, path: &Path) -> Result<ConfigFile> {
    let content = fs
        .read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let file = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    debug!(path = ?path, "loaded config file");

    Ok(file)
}

fn parse_config(content: &str) -> ImportResult<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(content).map_err(ImportError::from)
}
