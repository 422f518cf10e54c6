use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages (default for verbose)
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for read commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "quire - front matter and checklist editing for Markdown note vaults")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses RUST_LOG or defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging and parse warnings (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/quire/config.yaml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Vault root (overrides config file and QUIRE_VAULT_PATH)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a note's front matter, body and merged properties
    Show {
        /// Note reference (vault-relative or absolute, `.md` optional)
        note: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print a single property (fails when it is absent)
    Get {
        note: String,
        name: String,

        #[arg(short = 'f', long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Set a front matter property
    Set {
        note: String,
        name: String,
        value: String,

        /// Report the change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a front matter property
    Remove {
        note: String,
        name: String,

        #[arg(long)]
        dry_run: bool,
    },

    /// Reset every checked task box to `[ ]`
    Uncheck {
        note: String,

        #[arg(long)]
        dry_run: bool,
    },

    /// Sync the `pomodoros` property with the note's 🍅 lines
    ///
    /// Defaults to today's daily note.
    Pomodoros {
        /// Note to sync instead of the daily note
        #[arg(long)]
        note: Option<String>,

        /// Use the previous business day's daily note
        #[arg(long, conflicts_with = "note")]
        yesterday: bool,

        #[arg(long)]
        dry_run: bool,
    },

    /// Move open-task reminders to the note's `date`
    Reminders {
        note: String,

        #[arg(long)]
        dry_run: bool,
    },

    /// Mark a ticket resolved or closed and file it away
    Ticket {
        note: String,

        /// Work is done; records the end date
        #[arg(long, conflicts_with = "closed", required_unless_present = "closed")]
        resolved: bool,

        /// Ticket is abandoned
        #[arg(long)]
        closed: bool,

        /// Keep the note where it is
        #[arg(long)]
        no_move: bool,

        #[arg(long)]
        dry_run: bool,
    },

    /// List notes under a vault folder
    List {
        /// Vault-relative folder (defaults to the vault root)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Only list the folder itself, not its subfolders
        #[arg(long)]
        no_recursive: bool,
    },

    /// Show vault and configuration information
    Vault,
}
