//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory)
//! and layering command-line overrides on top.

use std::{fs, path::Path};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mopro::{MoproError, config::AppConfig};

use crate::Args;

/// Local configuration path, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = "mopro/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration `{path}`: {message}")]
    Parse { path: String, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(String),
}

impl From<ConfigError> for MoproError {
    fn from(err: ConfigError) -> Self {
        MoproError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`mopro/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MoproError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "mopro", "mopro") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Apply `--profile-package` and `--non-interactive` on top of `config`.
pub fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    let selection = config.selection_mut();
    if let Some(name) = &args.profile_package {
        selection.set_profile_package(name.as_str());
    }
    if args.non_interactive {
        selection.set_non_interactive(true);
    }
    config
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, MoproError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.display().to_string()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[selection]\nprofile_package = \"Shop\"\n\n[classification]\nancestor_search_timeout_ms = 250\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.selection().profile_package(), Some("Shop"));
        assert_eq!(config.classification().ancestor_search_timeout().as_millis(), 250);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, MoproError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[selection\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, MoproError::Config(_)));
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from(["mopro", "model.toml", "-p", "Bank", "--non-interactive"]);
        let config = apply_overrides(AppConfig::default(), &args);
        assert_eq!(config.selection().profile_package(), Some("Bank"));
        assert!(config.selection().non_interactive());
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let args = Args::parse_from(["mopro", "model.toml"]);
        let config = apply_overrides(AppConfig::default(), &args);
        assert_eq!(config.selection().profile_package(), None);
        assert!(!config.selection().non_interactive());
    }
}
