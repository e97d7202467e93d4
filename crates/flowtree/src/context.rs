//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: global
//! flags, the configuration directory in use, and the loaded configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use flowtree_config::{ColorChoice, FlowtreeConfig, find_config_dir, load_config};
use flowtree_core::{BuildMode, BuildOptions};
use flowtree_ui::{LayoutOptions, Styles, SvgOptions, ZoomLimits};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// `.flowtree` directory in use, if one was given or found.
    pub config_dir: Option<PathBuf>,

    /// Effective configuration: defaults, file, then environment.
    pub config: FlowtreeConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    /// `--strict` was given; overrides `build.mode`.
    pub strict: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// `--config-dir` (or `FLOWTREE_DIR`) wins; otherwise `.flowtree/` is
    /// searched for from the current directory upwards.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config_dir = match &global.config_dir {
            Some(dir) => Some(dir.clone()),
            None => env::current_dir()
                .ok()
                .and_then(|cwd| find_config_dir(&cwd)),
        };
        debug!(config_dir = ?config_dir, "resolved config directory");

        let config = load_config(config_dir.as_deref()).context("failed to load configuration")?;

        Ok(Self {
            config_dir,
            config,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
            strict: global.strict,
        })
    }

    pub fn build_options(&self) -> BuildOptions {
        let mut options = self.config.build.to_options();
        if self.strict {
            options.mode = BuildMode::Strict;
        }
        options
    }

    pub fn styles(&self) -> Styles {
        match self.config.output.color {
            ColorChoice::Auto => Styles::detect(),
            ColorChoice::Always => Styles::new(true),
            ColorChoice::Never => Styles::plain(),
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        let render = &self.config.render;
        LayoutOptions {
            node_width: render.node_width,
            node_height: render.node_height,
            level_spacing: render.level_spacing,
            row_unit: render.row_unit,
            margin_left: render.margin_left,
            margin_top: render.margin_top,
            min_width: render.min_width,
            min_height: render.min_height,
        }
    }

    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            font_size: self.config.render.font_size,
            ..SvgOptions::default()
        }
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        let zoom = &self.config.zoom;
        ZoomLimits {
            min_scale: zoom.min_scale,
            max_scale: zoom.max_scale,
            step: zoom.step,
        }
    }
}
