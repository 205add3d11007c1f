//! Clap derive structures for the `hue-import` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hue-import -- resolve Hue device identities for Terraform
#[derive(Debug, Parser)]
#[command(
    name = "hue-import",
    version,
    about = "Resolve Hue bridge device identities and generate Terraform imports",
    long_about = "Correlates the bridge's device and zigbee connectivity registries so\n\
        lights and motion sensors can be looked up by MAC address, and writes\n\
        Terraform import blocks for everything the bridge manages.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Bridge profile to use
    #[arg(long, short = 'p', env = "HUE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Bridge host, IP, or URL (overrides profile)
    #[arg(long, short = 'b', env = "HUE_BRIDGE", global = true)]
    pub bridge: Option<String>,

    /// Bridge application key
    #[arg(long, env = "HUE_APPLICATION_KEY", global = true, hide_env = true)]
    pub application_key: Option<String>,

    /// Output format for lookups and listings
    #[arg(
        long,
        short = 'f',
        env = "HUE_FORMAT",
        default_value = "table",
        global = true
    )]
    pub format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Accept the bridge's self-signed TLS certificate
    #[arg(long, short = 'k', env = "HUE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HUE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List correlated devices and unresolved connectivity records
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// Light service id for a device MAC address
    LightId(MacArgs),

    /// Motion service id for a device MAC address
    MotionId(MacArgs),

    /// Behavior script id for a script name
    ScriptId(ScriptArgs),

    /// Write Terraform import blocks for every light and motion sensor
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct MacArgs {
    /// Zigbee MAC address, as shown by `devices`
    pub mac: String,
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Exact behavior script name (e.g. "Basic")
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Report destination: STDOUT or a file path (overrides profile)
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
