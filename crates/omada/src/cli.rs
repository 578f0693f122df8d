//! Clap derive structures for the `omada` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// omada -- list clients, devices and networks from an Omada controller
#[derive(Debug, Parser)]
#[command(
    name = "omada",
    version,
    about = "Query TP-Link Omada network controllers from the command line",
    long_about = "Logs in to an Omada controller with a username and password,\n\
        resolves the sites the account can access, and lists clients,\n\
        devices and networks for one site or all of them.",
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
    /// Controller profile to use
    #[arg(long, short = 'p', env = "OMADA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "OMADA_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Primary site name
    #[arg(long, short = 's', env = "OMADA_SITE", global = true)]
    pub site: Option<String>,

    /// Login username (overrides profile)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Output format [default: config `defaults.output`, else table]
    #[arg(long, short = 'o', env = "OMADA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "OMADA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The selected output format, table when none was chosen.
    pub fn format(&self) -> &OutputFormat {
        self.output.as_ref().unwrap_or(&OutputFormat::Table)
    }
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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
    /// Show controller identity (no login)
    Info,

    /// List the sites the account can access
    Sites,

    /// List connected clients
    #[command(alias = "cl")]
    Clients(ListArgs),

    /// List adopted and pending devices
    #[command(alias = "dev", alias = "d")]
    Devices(ListArgs),

    /// List LAN networks
    #[command(alias = "net", alias = "n")]
    Networks(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by the list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Merge results from every accessible site
    #[arg(long, short = 'a')]
    pub all_sites: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
