//! Locating and reading the `redraft` TOML configuration.
//!
//! A configuration file only changes how edits are written (arrow defaults,
//! indentation) and how input is cleaned up. When no file is found the
//! editor runs with [`AppConfig::default`].

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use redraft::{RedraftError, config::AppConfig};

/// Path of the per-project configuration file, relative to the working
/// directory.
const LOCAL_CONFIG: &str = "redraft/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for RedraftError {
    fn from(err: ConfigError) -> Self {
        RedraftError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Passed with `--config`; it must exist.
    Explicit,
    /// `redraft/config.toml` under the working directory.
    Local,
    /// `config.toml` in the platform configuration directory.
    System,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigSource::Explicit => "explicit",
            ConfigSource::Local => "local",
            ConfigSource::System => "system",
        };
        f.write_str(name)
    }
}

/// Load the configuration for one run.
///
/// An explicit path wins. Otherwise the local project file is tried, then
/// the platform configuration directory. With none of them present the
/// defaults are used.
///
/// # Errors
///
/// Returns [`RedraftError::Config`] when the explicit file is missing or
/// when the chosen file is not valid configuration TOML, and
/// [`RedraftError::Io`] when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, RedraftError> {
    let found = match explicit_path {
        Some(path) => Some((ConfigSource::Explicit, path.as_ref().to_path_buf())),
        None => discover(),
    };

    let Some((source, path)) = found else {
        debug!("No configuration file found, using defaults");
        return Ok(AppConfig::default());
    };

    info!(source:%, path:? = path; "Loading configuration");
    read_config(&path)
}

/// First existing configuration file among the implicit locations.
fn discover() -> Option<(ConfigSource, PathBuf)> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some((ConfigSource::Local, local));
    }

    let Some(dirs) = ProjectDirs::from("com", "redraft", "redraft") else {
        debug!("Platform configuration directory is unavailable");
        return None;
    };
    let system = dirs.config_dir().join("config.toml");
    if system.is_file() {
        Some((ConfigSource::System, system))
    } else {
        debug!(path:? = system; "No system configuration file");
        None
    }
}

fn read_config(path: &Path) -> Result<AppConfig, RedraftError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}
