//! Rendering helpers for command output

use anyhow::Result;
use quire_core::properties::scalar_to_string;
use quire_core::PropertyValue;
use serde::Serialize;

/// Render a property value on one line: scalars as text, collections as JSON
pub fn render_value(value: &PropertyValue) -> String {
    match scalar_to_string(value) {
        Some(text) => text,
        None if value.is_null() => String::new(),
        None => serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}")),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
