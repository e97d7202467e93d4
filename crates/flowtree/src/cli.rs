//! Clap CLI definitions for the `flowtree` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// flowtree -- view YAML flow definitions as trees.
///
/// Reads a flow document (a `flows` mapping of step lists linked by
/// `if`/`then`/`else` transitions) and shows it as a tree in the terminal,
/// as JSON, or as an SVG diagram.
#[derive(Parser, Debug)]
#[command(
    name = "flowtree",
    about = "View YAML flow definitions as trees",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Configuration directory (default: auto-discover .flowtree/).
    #[arg(long, global = true, env = "FLOWTREE_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Reject malformed flow documents instead of skipping bad entries.
    #[arg(long, global = true)]
    pub strict: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the display tree as JSON.
    Build(BuildArgs),

    /// Print the tree as an indented outline.
    #[command(alias = "view")]
    Show(ShowArgs),

    /// Render the tree as an SVG diagram.
    Render(RenderArgs),

    /// Report problems in a flow document.
    #[command(alias = "lint")]
    Check(CheckArgs),

    /// Manage configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Flow document argument shared by the tree commands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Flow document path, or `-` for stdin.
    pub file: PathBuf,
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Arguments for `flowtree build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

// ---------------------------------------------------------------------------
// Show
// ---------------------------------------------------------------------------

/// Arguments for `flowtree show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Highlight nodes whose name or description contains this text.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Wrap descriptions to this width (default: terminal width).
    #[arg(long, short = 'w')]
    pub width: Option<usize>,

    /// Show node names only.
    #[arg(long)]
    pub no_descriptions: bool,

    /// Print directly instead of through the pager.
    #[arg(long)]
    pub no_pager: bool,
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Arguments for `flowtree render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: stdout).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Highlight nodes whose name or description contains this text.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Zoom steps: positive zooms in, negative zooms out.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub zoom: i32,
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Arguments for `flowtree check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `flowtree config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the configuration directory in use.
    Path,
    /// Create .flowtree/config.yaml with default values.
    Init(ConfigInitArgs),
}

/// Arguments for `flowtree config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `flowtree completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
