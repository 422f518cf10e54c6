//! `get`, `set` and `remove`

use crate::cli::OutputFormat;
use crate::commands::{dry_run_suffix, note_label, persist};
use crate::context::CliContext;
use crate::output::{print_json, render_value};
use anyhow::{bail, Result};

pub fn get(ctx: &CliContext, reference: String, name: String, format: OutputFormat) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let Some(value) = note.property(&name)? else {
        bail!("Property '{name}' not found in {label}");
    };

    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            println!("{}", render_value(value));
            Ok(())
        }
    }
}

pub fn set(
    ctx: &CliContext,
    reference: String,
    name: String,
    value: String,
    dry_run: bool,
) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let changed = note.set_property(&name, &value)?;
    persist(ctx, &mut note, changed, dry_run)?;

    if changed {
        println!("✅ {label}: {name} = {value}{}", dry_run_suffix(dry_run));
    } else if note.front_matter()?.is_none() {
        println!("ℹ️  {label} has no front matter, nothing changed");
    } else {
        println!("ℹ️  {label}: {name} already up to date");
    }
    Ok(())
}

pub fn remove(ctx: &CliContext, reference: String, name: String, dry_run: bool) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let changed = note.remove_property(&name)?;
    persist(ctx, &mut note, changed, dry_run)?;

    if changed {
        println!("🗑️  {label}: removed {name}{}", dry_run_suffix(dry_run));
    } else {
        println!("ℹ️  {label}: {name} not present in front matter");
    }
    Ok(())
}
