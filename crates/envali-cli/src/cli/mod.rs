//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "envali",
    bin_name = "envali",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Inspect and lint envali validation content",
    long_about = "envali reads the JSON content resources that supply range \
                  bounds, affixes and patterns to content-mapped entities, \
                  and checks them before a validator ever does.",
    after_help = "EXAMPLES:\n\
        \x20 envali check --root ./app\n\
        \x20 envali lookup user age --root ./app\n\
        \x20 envali presets --format json\n\
        \x20 envali completions bash > /usr/share/bash-completion/completions/envali",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint every content resource under the content root.
    #[command(
        visible_alias = "c",
        about = "Lint content resources",
        after_help = "EXAMPLES:\n\
            \x20 envali check\n\
            \x20 envali check --root ./service\n\
            \x20 envali check --output-format json"
    )]
    Check(CheckArgs),

    /// Show the content row a field resolves to.
    #[command(
        visible_alias = "l",
        about = "Resolve a field's content row",
        after_help = "EXAMPLES:\n\
            \x20 envali lookup user age\n\
            \x20 envali lookup order/line qty --root ./service"
    )]
    Lookup(LookupArgs),

    /// List the built-in regex presets.
    #[command(
        visible_alias = "p",
        about = "List regex presets",
        after_help = "EXAMPLES:\n\
            \x20 envali presets\n\
            \x20 envali presets --format json"
    )]
    Presets(PresetsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 envali completions bash > ~/.local/share/bash-completion/completions/envali\n\
            \x20 envali completions zsh  > ~/.zfunc/_envali\n\
            \x20 envali completions fish > ~/.config/fish/completions/envali.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the envali configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 envali config get content.root\n\
            \x20 envali config list\n\
            \x20 envali config path"
    )]
    Config(ConfigCommands),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `envali check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory that contains `content/envali/`.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Content root (default: content.root from config)"
    )]
    pub root: Option<PathBuf>,
}

// ── lookup ────────────────────────────────────────────────────────────────────

/// Arguments for `envali lookup`.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Content mapping, i.e. the resource name without directory or extension.
    #[arg(value_name = "MAPPING", help = "Content mapping, e.g. user")]
    pub mapping: String,

    /// Field name matched against `variableName`.
    #[arg(value_name = "FIELD", help = "Field name")]
    pub field: String,

    /// Directory that contains `content/envali/`.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Content root (default: content.root from config)"
    )]
    pub root: Option<PathBuf>,
}

// ── presets ───────────────────────────────────────────────────────────────────

/// Arguments for `envali presets`.
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PresetFormat,
}

/// Output format for the `presets` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetFormat {
    /// Name and pattern per line.
    Table,
    /// JSON array of `{ name, pattern }` objects.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `envali completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `envali config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `content.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
