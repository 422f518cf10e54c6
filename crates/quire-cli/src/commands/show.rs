use crate::cli::OutputFormat;
use crate::commands::note_label;
use crate::context::CliContext;
use crate::output::{print_json, render_value};
use anyhow::Result;
use serde_json::json;

pub fn execute(ctx: &CliContext, reference: String, format: OutputFormat) -> Result<()> {
    let mut note = ctx.open_note(&reference)?;
    let label = note_label(ctx, &note);

    let front_matter = note.front_matter()?.map(str::to_string);
    let body = note.body()?.to_string();
    let properties = note.properties()?.clone();
    let warnings: Vec<String> = note.warnings().iter().map(ToString::to_string).collect();

    match format {
        OutputFormat::Json => print_json(&json!({
            "path": note.path(),
            "front_matter": front_matter,
            "body": body,
            "properties": properties,
            "warnings": warnings,
        })),
        OutputFormat::Text => {
            println!("📄 {label}");
            match &front_matter {
                Some(yaml) => println!("\n--- front matter ---\n{}", yaml.trim_end()),
                None => println!("\n(no front matter)"),
            }
            println!("\n--- body ---\n{}", body.trim_end());

            println!("\n--- properties ---");
            if properties.is_empty() {
                println!("(none)");
            }
            for (key, value) in properties.iter() {
                println!("{key}: {}", render_value(value));
            }
            Ok(())
        }
    }
}
