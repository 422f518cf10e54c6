use crate::commands::{dry_run_suffix, note_label, persist};
use crate::context::{display_path, CliContext};
use anyhow::{Context, Result};
use chrono::Local;
use quire_core::tasks::{self, TicketAction};
use quire_core::vault::is_team_ticket;
use std::path::Path;
use tracing::{debug, warn};

pub fn execute(
    ctx: &CliContext,
    reference: String,
    action: TicketAction,
    no_move: bool,
    dry_run: bool,
) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);
    let task_config = &ctx.config.tasks;

    let now = Local::now().naive_local();
    let changed = tasks::apply_ticket_action(
        &mut note,
        action,
        &task_config.properties,
        &task_config.states,
        now,
    )?;
    persist(ctx, &mut note, changed, dry_run)?;
    if !changed {
        println!("ℹ️  {label}: nothing to update, ticket left in place");
        return Ok(());
    }
    println!(
        "🎫 {label}: marked {action} ({}){}",
        action.state(&task_config.states),
        dry_run_suffix(dry_run)
    );

    if no_move {
        return Ok(());
    }
    let Some(path) = note.path().map(Path::to_path_buf) else {
        return Ok(());
    };

    let resolved = action == TicketAction::Resolved;
    let team = is_team_ticket(&path, &task_config.paths.team.marker);
    let Some(destination) = task_config.paths.destination(resolved, team) else {
        if team {
            warn!(
                key = %format!("tasks.paths.team.{action}"),
                note = %path.display(),
                "No team destination folder configured, ticket stays put"
            );
        } else {
            debug!(action = %action, "No destination folder configured, ticket stays put");
        }
        return Ok(());
    };

    if dry_run {
        println!("📦 would move to {destination}");
        return Ok(());
    }

    let vault = ctx.vault().context("Moving a ticket requires a vault")?;
    let moved = vault.move_note(&path, Path::new(destination))?;
    println!("📦 moved to {}", display_path(ctx, &moved));
    Ok(())
}
