//! Configuration for flowtree.
//!
//! Settings live in `.flowtree/config.yaml`, discovered by walking up from
//! the working directory (see [`config_dir`]), and can be overridden with
//! `FLOWTREE_<SECTION>__<KEY>` environment variables.

pub mod config;
pub mod config_dir;

pub use config::{
    BuildConfig, ColorChoice, ConfigError, FlowtreeConfig, OutputConfig, RenderConfig, ZoomConfig,
    load_config, save_config,
};
pub use config_dir::{ensure_config_dir, find_config_dir};
