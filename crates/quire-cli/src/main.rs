use anyhow::Result;
use clap::Parser;
use quire_core::TicketAction;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use quire_cli::{
    cli::{Cli, Commands},
    commands,
    context::CliContext,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let ctx = CliContext::load(cli.config.as_deref(), cli.vault.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Show { note, format } => commands::show::execute(&ctx, note, format),

        Commands::Get { note, name, format } => commands::property::get(&ctx, note, name, format),

        Commands::Set {
            note,
            name,
            value,
            dry_run,
        } => commands::property::set(&ctx, note, name, value, dry_run),

        Commands::Remove {
            note,
            name,
            dry_run,
        } => commands::property::remove(&ctx, note, name, dry_run),

        Commands::Uncheck { note, dry_run } => commands::tasks::uncheck(&ctx, note, dry_run),

        Commands::Pomodoros {
            note,
            yesterday,
            dry_run,
        } => commands::tasks::pomodoros(&ctx, note, yesterday, dry_run),

        Commands::Reminders { note, dry_run } => commands::tasks::reminders(&ctx, note, dry_run),

        Commands::Ticket {
            note,
            resolved,
            closed: _,
            no_move,
            dry_run,
        } => {
            let action = if resolved {
                TicketAction::Resolved
            } else {
                TicketAction::Closed
            };
            commands::ticket::execute(&ctx, note, action, no_move, dry_run)
        }

        Commands::List { path, no_recursive } => commands::list::execute(&ctx, path, !no_recursive),

        Commands::Vault => commands::vault::execute(&ctx),
    }
}

/// `--log-level` wins, then `--verbose`, then `RUST_LOG`, else warnings only.
/// Logs go to stderr so command output stays clean.
fn init_logging(cli: &Cli) {
    let filter = match (cli.log_level, cli.verbose) {
        (Some(level), _) => EnvFilter::default().add_directive(LevelFilter::from(level).into()),
        (None, true) => EnvFilter::new("debug"),
        (None, false) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
