//! `flowtree version` -- print version and platform.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, overridable at compile time.
const BUILD: &str = {
    match option_env!("FLOWTREE_BUILD") {
        Some(b) => b,
        None => "dev",
    }
};

/// Execute the `flowtree version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;

    if ctx.json {
        output_json(&serde_json::json!({
            "version": VERSION,
            "build": BUILD,
            "os": os,
            "arch": arch,
        }));
    } else {
        println!("flowtree version {} ({}) {}/{}", VERSION, BUILD, os, arch);
    }

    Ok(())
}
