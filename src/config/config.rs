use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// File names probed for a configuration when none is given explicitly.
const DEFAULT_FILE_NAMES: [&str; 4] = ["probe.toml", "probe.yml", "probe.yaml", "probe.json"];

/// Tool configuration. Every field is optional in the file; unspecified
/// fields use the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model server queried when `--server` is not given on the command line.
    pub server_url: Option<String>,

    /// HTTP request timeout, in seconds.
    pub http_timeout: u64,

    /// Page size requested when listing projects.
    pub page_size: u32,

    /// User agent presented to the model server.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            http_timeout: 30,
            page_size: 1024,
            user_agent: String::from("sysml-probe"),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the first of
    /// `probe.[toml|yml|yaml|json]` found under `base_path`, or fall back to
    /// defaults. Returns the configuration together with validation
    /// warnings; warnings never block execution.
    pub fn load(base_path: &Utf8Path, explicit: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let path = match explicit {
            Some(path) => Some(path.clone()),
            None => Self::find_default(base_path),
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        let warnings = config.validate();
        Ok((config, warnings))
    }

    fn find_default(base_path: &Utf8Path) -> Option<Utf8PathBuf> {
        DEFAULT_FILE_NAMES
            .iter()
            .map(|name| base_path.join(name))
            .find(|path| path.exists())
    }

    fn from_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).into_app_err_with(|| format!("unable to read config file '{path}'"))?;

        match path.extension() {
            Some("toml") => toml::from_str(&content).into_app_err_with(|| format!("unable to parse config file '{path}'")),
            Some("yml" | "yaml") => serde_yaml::from_str(&content).into_app_err_with(|| format!("unable to parse config file '{path}'")),
            Some("json") => serde_json::from_str(&content).into_app_err_with(|| format!("unable to parse config file '{path}'")),
            _ => bail!("unsupported config file format: '{path}'"),
        }
    }

    /// Check the configuration for values that are legal but almost
    /// certainly not what the user wants.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.http_timeout == 0 {
            warnings.push(String::from("http_timeout is 0; every request will time out immediately"));
        }

        if self.page_size == 0 {
            warnings.push(String::from("page_size is 0; project listings will be empty"));
        }

        if self.user_agent.trim().is_empty() {
            warnings.push(String::from("user_agent is empty; some servers reject anonymous clients"));
        }

        if let Some(server_url) = &self.server_url {
            if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
                warnings.push(format!("server_url '{server_url}' does not look like an HTTP(S) URL"));
            }
        }

        warnings
    }

    /// Write the embedded default configuration (with comments) to `path`.
    pub fn save_default(path: &Utf8Path) -> Result<()> {
        fs::write(path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("unable to write '{path}'"))
    }
}
