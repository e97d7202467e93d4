//! Configuration types and loading.
//!
//! The main entry point is [`FlowtreeConfig`], the contents of
//! `.flowtree/config.yaml`. [`load_config`] layers three sources, later ones
//! winning: built-in defaults, the YAML file, and `FLOWTREE_*` environment
//! variables (`FLOWTREE_BUILD__MODE=strict` sets `build.mode`).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use flowtree_core::{BuildMode, BuildOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "FLOWTREE_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized.
    #[error("failed to write config file: {0}")]
    WriteError(#[from] serde_yaml::Error),

    /// A layer held a value of the wrong shape.
    #[error("invalid configuration: {0}")]
    Invalid(Box<figment::Error>),

    /// The `.flowtree/` directory was not found.
    #[error("no .flowtree directory found (run 'flowtree config init' first)")]
    ConfigDirNotFound,
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(Box::new(err))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Tree building section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// `lenient` skips malformed entries, `strict` rejects the document.
    pub mode: BuildMode,

    /// Deepest level a node may sit at below the root.
    pub max_depth: usize,

    /// Most nodes one tree may hold.
    pub max_nodes: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let options = BuildOptions::default();
        Self {
            mode: options.mode,
            max_depth: options.max_depth,
            max_nodes: options.max_nodes,
        }
    }
}

impl BuildConfig {
    pub fn to_options(&self) -> BuildOptions {
        BuildOptions {
            mode: self.mode,
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

/// Diagram geometry section. Lengths are SVG user units (pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of a node's background box; text wraps at this minus padding.
    pub node_width: f64,

    /// Height of a node's background box.
    pub node_height: f64,

    /// Horizontal distance between tree levels.
    pub level_spacing: f64,

    /// Vertical distance of one separation unit. Siblings are two units
    /// apart, nodes with different parents three.
    pub row_unit: f64,

    /// Font size of node names; descriptions use 12px.
    pub font_size: f64,

    /// Offset of the tree from the top-left corner.
    pub margin_left: f64,
    pub margin_top: f64,

    /// Minimum canvas size; grows to fit the tree.
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 300.0,
            node_height: 100.0,
            level_spacing: 400.0,
            row_unit: 60.0,
            font_size: 14.0,
            margin_left: 100.0,
            margin_top: 50.0,
            min_width: 2000.0,
            min_height: 800.0,
        }
    }
}

/// Zoom controls section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Factor applied by one zoom-in step (and divided by one zoom-out step).
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 8.0,
            step: 1.25,
        }
    }
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Follow `NO_COLOR`, `CLICOLOR` and TTY detection.
    #[default]
    Auto,
    Always,
    Never,
}

/// Terminal output section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorChoice,

    /// Show descriptions under node names in `show`.
    pub descriptions: bool,

    /// Send long outlines through a pager.
    pub pager: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            descriptions: true,
            pager: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full flowtree configuration, corresponding to `.flowtree/config.yaml`.
///
/// Every section has defaults, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlowtreeConfig {
    pub build: BuildConfig,
    pub render: RenderConfig,
    pub zoom: ZoomConfig,
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration: defaults, then `<config_dir>/config.yaml` if present,
/// then `FLOWTREE_*` environment variables.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if a layer cannot be read or holds a
/// value of the wrong type.
pub fn load_config(config_dir: Option<&Path>) -> Result<FlowtreeConfig> {
    let mut figment = Figment::from(Serialized::defaults(FlowtreeConfig::default()));

    if let Some(dir) = config_dir {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Yaml::file(path));
        }
    }

    let config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside `config_dir`, creating the
/// directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or
/// [`ConfigError::WriteError`] if serialization fails.
pub fn save_config(config_dir: &Path, config: &FlowtreeConfig) -> Result<()> {
    std::fs::create_dir_all(config_dir)?;
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_dir.join(CONFIG_FILE_NAME), yaml)?;
    Ok(())
}
