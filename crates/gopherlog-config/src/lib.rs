use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for one phlog build. Every field has a default, so a config
/// file only needs the values that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log repository to clone or pull.
    pub repo_url: String,
    /// Local checkout of the log repository.
    pub repo_path: PathBuf,
    /// Root of the generated gopher pages.
    pub gopher_path: PathBuf,
    /// Base URL media filenames are appended to.
    pub media_url: String,
    /// Wiki page script namespace references resolve against.
    pub wiki_url: String,
    /// Month page template; the bundled template is used when unset.
    pub template_path: Option<PathBuf>,
    pub gopher_host: String,
    pub gopher_port: u16,
    /// Fetch the repository before building.
    pub sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/Binary-Kitchen/kitchenlog.git".to_string(),
            repo_path: PathBuf::from("kitchenlog"),
            gopher_path: PathBuf::from("/var/gopher/Kuechenlog"),
            media_url: "https://raw.githubusercontent.com/Binary-Kitchen/kitchenlog/master/media/"
                .to_string(),
            wiki_url: "http://www.binary-kitchen.de/wiki/doku.php".to_string(),
            template_path: None,
            gopher_host: "gopher.binary-kitchen.de".to_string(),
            gopher_port: 70,
            sync: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.expand_paths();
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/gopherlog");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in every path setting.
    pub fn expand_paths(&mut self) {
        for path in [&mut self.repo_path, &mut self.gopher_path] {
            if let Some(expanded) = Self::expand_path(path) {
                *path = expanded;
            }
        }
        if let Some(template) = &mut self.template_path
            && let Some(expanded) = Self::expand_path(template)
        {
            *template = expanded;
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
