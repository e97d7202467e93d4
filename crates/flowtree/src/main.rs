//! `flowtree` -- view YAML flow definitions as trees.
//!
//! Parses CLI arguments with clap, loads configuration into the runtime
//! context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

const VERBOSE_FILTER: &str = "flowtree=debug,flowtree_core=debug,flowtree_config=debug,flowtree_ui=debug";

fn main() {
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| match &cli.command {
        Some(Commands::Build(args)) => commands::build::run(&ctx, args),
        Some(Commands::Show(args)) => commands::show::run(&ctx, args),
        Some(Commands::Render(args)) => commands::render::run(&ctx, args),
        Some(Commands::Check(args)) => commands::check::run(&ctx, args),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr when `--verbose` is given or `RUST_LOG` is set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
