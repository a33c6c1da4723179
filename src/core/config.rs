//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.remedy-guide/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::navigator::{BackNavigation, RootSequencing};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GuideConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Catalog file, relative to `~/.remedy-guide/` unless absolute.
    pub catalog_file: Option<String>,
    pub strict_catalog: Option<bool>,
    pub back_navigation: Option<BackNavigation>,
    pub root_sequencing: Option<RootSequencing>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub subscribed: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// `None` = use the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    pub strict_catalog: bool,
    pub back_navigation: BackNavigation,
    pub root_sequencing: RootSequencing,
    pub subscribed: bool,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub catalog: Option<PathBuf>,
    pub back_navigation: Option<BackNavigation>,
    pub root_sequencing: Option<RootSequencing>,
    pub lenient: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.remedy-guide/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".remedy-guide"))
}

/// Returns the path to `~/.remedy-guide/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.remedy-guide/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GuideConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GuideConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(GuideConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<GuideConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GuideConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: GuideConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Remedy Guide Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# catalog_file = "my-catalog.toml"   # Relative to ~/.remedy-guide/ (default: bundled catalog)
# strict_catalog = true              # Reject catalogs with authoring slips
# back_navigation = "restart"        # "restart" or "history"
# root_sequencing = "first-only"     # "first-only" or "sequential"

# [profile]
# subscribed = false                 # Subscribers can track up to 10 children
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GuideConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &GuideConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Catalog: CLI → env → config (relative to config dir) → bundled
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| env("REMEDY_GUIDE_CATALOG").map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .catalog_file
                .as_deref()
                .map(resolve_catalog_file)
        });

    let back_navigation = cli
        .back_navigation
        .or_else(|| parse_env(&env, "REMEDY_GUIDE_BACK"))
        .or(config.general.back_navigation)
        .unwrap_or_default();

    let root_sequencing = cli
        .root_sequencing
        .or_else(|| parse_env(&env, "REMEDY_GUIDE_SEQUENCING"))
        .or(config.general.root_sequencing)
        .unwrap_or_default();

    // --lenient only ever relaxes
    let strict_catalog = !cli.lenient && config.general.strict_catalog.unwrap_or(true);

    let resolved = ResolvedConfig {
        catalog_path,
        strict_catalog,
        back_navigation,
        root_sequencing,
        subscribed: config.profile.subscribed.unwrap_or(false),
    };
    info!(
        "Resolved config: catalog={}, strict={}, back={:?}, sequencing={:?}",
        resolved
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
        resolved.strict_catalog,
        resolved.back_navigation,
        resolved.root_sequencing
    );
    resolved
}

fn resolve_catalog_file(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

/// Parse an enum-valued env var using the same spelling as the CLI flag.
fn parse_env<T: ValueEnum>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    match T::from_str(raw.trim(), false) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: unrecognized value", name, raw);
            None
        }
    }
}
