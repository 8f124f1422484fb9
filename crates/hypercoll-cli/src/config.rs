//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use hypercoll::config::RenderOptions;

use crate::error::CliError;

/// Page size of the generated SVG, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 595.0,
        }
    }
}

impl PageConfig {
    /// Checks that both page dimensions are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Validation`] for an unusable page size.
    pub fn validate(&self) -> Result<(), CliError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

/// Application configuration.
///
/// ```toml
/// [page]
/// width = 800
/// height = 800
///
/// [render]
/// radius = 300
/// span = 0.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    page: PageConfig,
    render: RenderOptions,
}

impl AppConfig {
    pub fn page(&self) -> PageConfig {
        self.page
    }

    /// Render options used when a dataset carries none of its own.
    pub fn render(&self) -> &RenderOptions {
        &self.render
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (hypercoll/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("hypercoll/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "hypercoll", "hypercoll") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CliError::MissingConfig(path.to_path_buf()));
    }

    let content = read_file(path)?;
    toml::from_str(&content).map_err(|err| CliError::parse(path, &content, &err))
}

/// Reads `path` to a string, tagging failures with the path.
pub(crate) fn read_file(path: impl Into<PathBuf>) -> Result<String, CliError> {
    let path = path.into();
    fs::read_to_string(&path).map_err(|err| CliError::io(path, err))
}
