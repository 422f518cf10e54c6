pub mod list;
pub mod property;
pub mod show;
pub mod tasks;
pub mod ticket;
pub mod vault;

use crate::context::{display_path, CliContext};
use anyhow::Result;
use quire_core::Note;
use tracing::debug;

/// Write the note if it changed and this isn't a dry run; returns whether it was written
pub(crate) fn persist(ctx: &CliContext, note: &mut Note, changed: bool, dry_run: bool) -> Result<bool> {
    if !changed {
        return Ok(false);
    }
    if dry_run {
        debug!("Dry run, note not written");
        return Ok(false);
    }
    note.write_content()?;
    if let Some(path) = note.path() {
        debug!(path = %display_path(ctx, path), "Note saved");
    }
    Ok(true)
}

/// Name to show for a note in summaries
pub(crate) fn note_label(ctx: &CliContext, note: &Note) -> String {
    note.path()
        .map(|path| display_path(ctx, path))
        .unwrap_or_else(|| "<memory>".to_string())
}

/// Suffix appended to summaries of dry runs
pub(crate) fn dry_run_suffix(dry_run: bool) -> &'static str {
    if dry_run {
        " (dry run)"
    } else {
        ""
    }
}
