//! Checklist commands: `uncheck`, `pomodoros` and `reminders`

use crate::commands::{dry_run_suffix, note_label, persist};
use crate::context::CliContext;
use anyhow::Result;
use chrono::Local;
use quire_core::tasks;
use tracing::info;

pub fn uncheck(ctx: &CliContext, reference: String, dry_run: bool) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let modified = tasks::uncheck_all(&mut note)?;
    if ctx.verbose {
        for line in &modified {
            println!("  {line}");
        }
    }
    persist(ctx, &mut note, !modified.is_empty(), dry_run)?;

    println!(
        "☑️  {label}: {} task(s) unchecked{}",
        modified.len(),
        dry_run_suffix(dry_run)
    );
    Ok(())
}

pub fn pomodoros(
    ctx: &CliContext,
    reference: Option<String>,
    yesterday: bool,
    dry_run: bool,
) -> Result<()> {
    let reference = match reference {
        Some(reference) => reference,
        None => {
            let today = Local::now().date_naive();
            let date = if yesterday {
                tasks::last_business_day(today)
            } else {
                today
            };
            let reference = tasks::daily_note_reference(date, &ctx.config.daily_notes);
            info!(date = %date, note = %reference, "Using daily note");
            reference
        }
    };

    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let (status, changed) = tasks::sync_pomodoros(&mut note)?;
    persist(ctx, &mut note, changed, dry_run)?;

    let recorded = status
        .recorded
        .map_or_else(|| "none".to_string(), |n| n.to_string());
    if status.is_current() {
        println!("🍅 {label}: {} pomodoro(s), already recorded", status.counted);
    } else if changed {
        println!(
            "🍅 {label}: {} pomodoro(s), was {recorded}{}",
            status.counted,
            dry_run_suffix(dry_run)
        );
    } else {
        println!(
            "🍅 {label}: {} pomodoro(s), not recorded (no front matter)",
            status.counted
        );
    }
    Ok(())
}

pub fn reminders(ctx: &CliContext, reference: String, dry_run: bool) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let count = tasks::sync_reminders(&mut note)?;
    persist(ctx, &mut note, count > 0, dry_run)?;

    println!(
        "⏰ {label}: {count} reminder(s) updated{}",
        dry_run_suffix(dry_run)
    );
    Ok(())
}
