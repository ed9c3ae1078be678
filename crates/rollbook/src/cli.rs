//! Clap derive structures for the `rollbook` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rollbook -- look up a student's sessions and session records
#[derive(Debug, Parser)]
#[command(
    name = "rollbook",
    version,
    about = "Query the student records service from the command line",
    long_about = "Log in with a roll number and date of birth, list the sessions on\n\
        record, and fetch the basic, academic and subject details for one session.",
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
    /// Config profile to use
    #[arg(long, short = 'p', env = "ROLLBOOK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Records service URL (overrides profile)
    #[arg(long, short = 'b', env = "ROLLBOOK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROLLBOOK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, env = "ROLLBOOK_COLOR", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ROLLBOOK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 disables it; default from config)
    #[arg(long, env = "ROLLBOOK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and show the student's name, registration number and sessions
    Login(CredentialArgs),

    /// List the sessions on record (one per line with -o plain)
    #[command(alias = "ls")]
    Sessions(CredentialArgs),

    /// Fetch basic, academic and subject details for one session
    #[command(alias = "show")]
    Details(DetailsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Credentials ──────────────────────────────────────────────────────

/// Login fields. Missing values are prompted for on a terminal.
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Roll number (falls back to the profile's roll_number)
    #[arg(long, short = 'r', env = "ROLLBOOK_ROLL")]
    pub roll: Option<String>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long, short = 'd', env = "ROLLBOOK_DOB", hide_env_values = true)]
    pub dob: Option<String>,
}

#[derive(Debug, Args)]
pub struct DetailsArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Session to fetch (one of the sessions returned at login)
    #[arg(long, short = 's')]
    pub session: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Create or update a profile
    SetProfile {
        /// Profile name
        name: String,

        /// Records service URL
        #[arg(long = "url", id = "profile_url", value_name = "URL")]
        base_url: Option<String>,

        /// Roll number to pre-fill
        #[arg(long)]
        roll: Option<String>,

        /// Path to a custom CA certificate
        #[arg(long)]
        ca_cert: Option<PathBuf>,

        /// Accept invalid TLS certificates for this profile
        #[arg(long = "accept-invalid-certs", id = "profile_insecure", value_name = "BOOL")]
        insecure: Option<bool>,

        /// Request timeout in seconds (0 disables it)
        #[arg(long = "timeout-secs", id = "profile_timeout", value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
