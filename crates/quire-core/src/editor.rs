//! Front matter property editing
//!
//! Edits touch exactly one key inside the front matter block and nothing
//! else: other lines, comments, key order and the body after the closing
//! `---` are carried over byte-for-byte. Lines written by an edit use the
//! document's own line ending. A document without front matter is never
//! given one.

use crate::document::{detect_line_ending, ends_with_line_ending, lines, split_frontmatter};
use tracing::trace;

/// Outcome of a property edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEdit {
    /// The document after the edit (identical to the input when unchanged)
    pub content: String,
    /// Whether the front matter text actually changed
    pub changed: bool,
}

impl PropertyEdit {
    fn unchanged(raw: &str) -> Self {
        Self {
            content: raw.to_string(),
            changed: false,
        }
    }
}

/// Set (`Some`) or remove (`None`) a front matter property
///
/// - existing key, new value: the text after the first `:` is replaced with
///   a single space and the value; the `name:` prefix is kept as written
/// - existing key, `None`: the whole line, terminator included, is deleted
/// - missing key, new value: `name: value` is appended to the block
/// - missing key, `None`: nothing happens
///
/// `changed` compares the front matter text before and after, so setting a
/// value that is already there reports `false`.
pub fn set_property(raw: &str, name: &str, value: Option<&str>) -> PropertyEdit {
    let eol = detect_line_ending(raw);

    let Some(block) = split_frontmatter(raw) else {
        trace!(property = name, "No front matter, edit skipped");
        return PropertyEdit::unchanged(raw);
    };

    let mut found = false;
    let mut new_body = String::with_capacity(block.body.len() + name.len() + 16);

    for line in lines(block.body) {
        let Some(colon) = property_colon(line.content, name) else {
            new_body.push_str(line.content);
            new_body.push_str(line.ending);
            continue;
        };

        found = true;
        if let Some(value) = value {
            new_body.push_str(&line.content[..=colon]);
            new_body.push(' ');
            new_body.push_str(value);
            new_body.push_str(line.ending);
        }
    }

    if !found {
        let Some(value) = value else {
            trace!(property = name, "Property not found, nothing to remove");
            return PropertyEdit::unchanged(raw);
        };
        if !new_body.is_empty() && !ends_with_line_ending(&new_body) {
            new_body.push_str(eol.as_str());
        }
        new_body.push_str(name);
        new_body.push_str(": ");
        new_body.push_str(value);
        new_body.push_str(eol.as_str());
    }

    if new_body == block.body {
        return PropertyEdit::unchanged(raw);
    }

    let rest = &raw[block.len()..];
    let mut content = String::with_capacity(raw.len() + new_body.len());
    content.push_str(block.start_marker);
    content.push_str(&new_body);
    content.push_str(block.end_marker);
    content.push_str(rest);

    trace!(property = name, removed = value.is_none(), "Front matter updated");
    PropertyEdit {
        content,
        changed: true,
    }
}

/// Remove a front matter property; same as `set_property(raw, name, None)`
pub fn remove_property(raw: &str, name: &str) -> PropertyEdit {
    set_property(raw, name, None)
}

/// Byte offset of the `:` if `line` declares `name` (`^name\s*:`)
fn property_colon(line: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let rest = line.strip_prefix(name)?;
    let after_ws = rest.trim_start();
    if !after_ws.starts_with(':') {
        return None;
    }
    Some(line.len() - after_ws.len())
}

/// A sequence of property edits applied one after another
///
/// ```
/// use quire_core::editor::PropertyEdits;
///
/// let doc = "---\nstate: open\nnext: call\n---\nBody\n";
/// let edit = PropertyEdits::new()
///     .set("state", "done")
///     .remove("next")
///     .apply(doc);
///
/// assert!(edit.changed);
/// assert_eq!(edit.content, "---\nstate: done\n---\nBody\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyEdits {
    edits: Vec<(String, Option<String>)>,
}

impl PropertyEdits {
    /// Start an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a set
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.edits.push((name.into(), Some(value.into())));
        self
    }

    /// Queue a removal
    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.edits.push((name.into(), None));
        self
    }

    /// Number of queued edits
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether no edits are queued
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit in order; `changed` is true if any edit changed text
    pub fn apply(&self, raw: &str) -> PropertyEdit {
        let mut current = PropertyEdit::unchanged(raw);
        for (name, value) in &self.edits {
            let next = set_property(&current.content, name, value.as_deref());
            current = PropertyEdit {
                changed: current.changed || next.changed,
                content: next.content,
            };
        }
        current
    }
}
