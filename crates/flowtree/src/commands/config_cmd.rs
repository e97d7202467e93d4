//! `flowtree config` -- show, locate or initialize configuration.

use anyhow::{Context, Result, bail};
use flowtree_config::config::CONFIG_FILE_NAME;
use flowtree_config::{ConfigError, FlowtreeConfig, ensure_config_dir, save_config};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `flowtree config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            if ctx.json {
                output_json(&ctx.config);
            } else {
                let yaml = serde_yaml::to_string(&ctx.config).context("failed to serialize config")?;
                print!("{yaml}");
            }
        }

        ConfigCommands::Path => {
            let dir = ctx.config_dir.as_ref().ok_or(ConfigError::ConfigDirNotFound)?;
            if ctx.json {
                output_json(&serde_json::json!({
                    "dir": dir.display().to_string(),
                    "file": dir.join(CONFIG_FILE_NAME).display().to_string(),
                }));
            } else {
                println!("{}", dir.display());
            }
        }

        ConfigCommands::Init(init_args) => init(ctx, init_args)?,
    }
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let base = match &ctx.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let dir = ensure_config_dir(&base)
        .with_context(|| format!("failed to create {}", base.display()))?;
    let file = dir.join(CONFIG_FILE_NAME);

    if file.exists() && !args.force {
        bail!(
            "{} already exists\nHint: use --force to overwrite it",
            file.display()
        );
    }

    save_config(&dir, &FlowtreeConfig::default())
        .with_context(|| format!("failed to write {}", file.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({ "created": file.display().to_string() }));
    } else if !ctx.quiet {
        println!("Created {}", file.display());
    }
    Ok(())
}
