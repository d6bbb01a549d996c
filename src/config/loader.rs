//! Configuration file discovery and loading.

use crate::config::schema::HarnessConfig;
use crate::config::validator::validate;
use crate::error::{Result, RunthisError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project-level configuration.
pub const CONFIG_DIR: &str = ".runthis";

/// Configuration filename inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Where the project config lives for `project_root`.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<HarnessConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RunthisError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RunthisError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into HarnessConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<HarnessConfig> {
    if content.trim().is_empty() {
        return Ok(HarnessConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| RunthisError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate config with optional path override.
///
/// If `config_override` is provided that file must exist. Otherwise
/// `.runthis/config.yml` under `project_root` is used when present and
/// built-in defaults when not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<HarnessConfig> {
    let config = if let Some(override_path) = config_override {
        load_config_file(override_path)?
    } else {
        let path = default_config_path(project_root);
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            HarnessConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}
