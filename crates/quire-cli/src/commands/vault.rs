use crate::context::CliContext;
use anyhow::Result;
use quire_core::vault::OBSIDIAN_DIR;

pub fn execute(ctx: &CliContext) -> Result<()> {
    let vault = ctx.vault()?;
    let notes = vault.list_notes(None, true)?;

    println!("📁 Vault: {}", vault.root().display());
    println!(
        "   Obsidian settings: {}",
        if vault.root().join(OBSIDIAN_DIR).is_dir() {
            "found"
        } else {
            "missing"
        }
    );
    println!("   Notes: {}", notes.len());
    match &ctx.config_path {
        Some(path) => println!("⚙️  Config: {}", path.display()),
        None => println!("⚙️  Config: defaults"),
    }
    println!(
        "   Daily notes: {}/YYYY-MM-DD{}.md",
        ctx.config.daily_notes.folder, ctx.config.daily_notes.suffix
    );
    Ok(())
}
