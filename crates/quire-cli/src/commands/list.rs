use crate::context::{display_path, CliContext};
use anyhow::Result;
use std::path::PathBuf;

pub fn execute(ctx: &CliContext, path: Option<PathBuf>, recursive: bool) -> Result<()> {
    let vault = ctx.vault()?;
    let notes = vault.list_notes(path.as_deref(), recursive)?;

    for note in &notes {
        let relative = note
            .strip_prefix(vault.root())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| display_path(ctx, note));
        println!("{relative}");
    }
    Ok(())
}
