//! Format-preserving Markdown note model
//!
//! Notes are plain Markdown files with an optional YAML front matter block.
//! This crate reads their properties (front matter merged with inline
//! `key:: value` annotations), edits front matter one key at a time without
//! disturbing the rest of the file, and runs line-based checklist workflows
//! over note bodies.

pub mod document;
pub mod editor;
pub mod error;
pub mod lines;
pub mod note;
pub mod path;
pub mod properties;
pub mod tasks;
pub mod vault;

pub use document::{split_document, split_frontmatter, LineEnding, SplitDocument};
pub use editor::{remove_property, set_property, PropertyEdit, PropertyEdits};
pub use error::{NoteError, NoteResult, ParseWarning};
pub use lines::{find_lines, replace_lines, LineRewrite, SearchOptions};
pub use note::{Note, NoteState};
pub use path::{PathResolver, DEFAULT_EXTENSION};
pub use properties::{extract_properties, Extraction, PropertyMap, PropertyValue};
pub use tasks::{PomodoroStatus, TicketAction};
pub use vault::Vault;

// Configuration types injected into task workflows
pub use quire_config::{DailyNotes, TaskProperties, TaskStates};
