//! Note façade
//!
//! A [`Note`] binds a resolved path to lazily loaded content and a cached
//! property map:
//!
//! ```text
//! Unloaded --read--> Loaded --edit--> Modified --write--> Loaded
//!                      ^  \___ newer mtime on disk: re-read
//! ```
//!
//! Edits only change the in-memory copy; nothing reaches disk until
//! [`Note::write_content`].

use crate::document::split_document;
use crate::editor;
use crate::error::{NoteError, NoteResult, ParseWarning};
use crate::lines::{self, LineRewrite, SearchOptions};
use crate::path::resolve;
use crate::properties::{extract_properties, PropertyMap, PropertyValue};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace, warn};

/// Where a note is in its load/edit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Path known, content not read yet
    Unloaded,
    /// Content matches what was last read or written
    Loaded,
    /// In-memory content differs from disk
    Modified,
}

/// A Markdown note with cached content and properties
#[derive(Debug, Clone)]
pub struct Note {
    path: Option<PathBuf>,
    verbose: bool,
    content: Option<String>,
    /// Modification time of the file when `content` was read or written
    read_mtime: Option<SystemTime>,
    modified: bool,
    /// `None` when stale
    properties: Option<PropertyMap>,
    warnings: Vec<ParseWarning>,
}

impl Note {
    /// Open a note from a reference, resolving relative ones under `vault_root`
    ///
    /// Fails with `Validation` when the file is not a text document. The
    /// file itself is read lazily.
    pub fn open(reference: impl AsRef<Path>, vault_root: Option<&Path>) -> NoteResult<Self> {
        Self::from_path(resolve(reference, vault_root)?)
    }

    /// Open a note at an already resolved path
    pub fn from_path(path: impl Into<PathBuf>) -> NoteResult<Self> {
        let path = path.into();
        ensure_text_document(&path)?;
        debug!(path = %path.display(), "Note opened");
        Ok(Self {
            path: Some(path),
            verbose: false,
            content: None,
            read_mtime: None,
            modified: false,
            properties: None,
            warnings: Vec::new(),
        })
    }

    /// A pathless note over in-memory content
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            path: None,
            verbose: false,
            content: Some(content.into()),
            read_mtime: None,
            modified: false,
            properties: None,
            warnings: Vec::new(),
        }
    }

    /// Report parse warnings at `warn` instead of `trace`
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolved path, if the note is backed by a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current state
    pub fn state(&self) -> NoteState {
        if self.content.is_none() {
            NoteState::Unloaded
        } else if self.modified {
            NoteState::Modified
        } else {
            NoteState::Loaded
        }
    }

    /// Raw content, reading or re-reading the file when needed
    pub fn content(&mut self) -> NoteResult<&str> {
        self.refresh()?;
        Ok(self.content.as_deref().unwrap_or_default())
    }

    /// Raw front matter text between the `---` markers
    pub fn front_matter(&mut self) -> NoteResult<Option<&str>> {
        let content = self.content()?;
        Ok(split_document(content).frontmatter.map(|block| block.body))
    }

    /// Text after the front matter, or the whole document
    pub fn body(&mut self) -> NoteResult<&str> {
        let content = self.content()?;
        Ok(split_document(content).body)
    }

    /// Merged front matter and inline properties
    pub fn properties(&mut self) -> NoteResult<&PropertyMap> {
        self.refresh()?;
        if self.properties.is_none() {
            let extraction = extract_properties(self.content.as_deref().unwrap_or_default());
            for warning in &extraction.warnings {
                self.report(warning);
            }
            self.warnings = extraction.warnings;
            self.properties = Some(extraction.properties);
        }
        Ok(self.properties.get_or_insert_with(PropertyMap::new))
    }

    /// A single property
    pub fn property(&mut self, name: &str) -> NoteResult<Option<&PropertyValue>> {
        Ok(self.properties()?.get(name))
    }

    /// Warnings from the last property extraction
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Set a front matter property in memory; returns whether content changed
    pub fn set_property(&mut self, name: &str, value: &str) -> NoteResult<bool> {
        self.edit_property(name, Some(value))
    }

    /// Remove a front matter property in memory; returns whether content changed
    pub fn remove_property(&mut self, name: &str) -> NoteResult<bool> {
        self.edit_property(name, None)
    }

    fn edit_property(&mut self, name: &str, value: Option<&str>) -> NoteResult<bool> {
        let edit = editor::set_property(self.content()?, name, value);
        if edit.changed {
            debug!(property = name, removed = value.is_none(), "Property edited");
            self.replace_content(edit.content);
        } else if self.verbose {
            debug!(property = name, "Property edit made no change");
        }
        Ok(edit.changed)
    }

    /// Replace the in-memory content; the property cache is invalidated
    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
        self.modified = true;
        self.properties = None;
    }

    /// Body lines matching `pattern`, see [`lines::find_lines`]
    pub fn find_lines(&mut self, pattern: &str, options: &SearchOptions) -> NoteResult<Vec<String>> {
        lines::find_lines(self.content()?, pattern, options)
    }

    /// Regex replace across body lines; returns the rewritten lines
    pub fn replace_lines(&mut self, pattern: &str, replacement: &str) -> NoteResult<Vec<String>> {
        let rewrite = lines::replace_lines(self.content()?, pattern, replacement)?;
        Ok(self.apply_rewrite(rewrite))
    }

    /// Rewrite body lines with a closure; returns the rewritten lines
    pub fn rewrite_lines<F>(&mut self, f: F) -> NoteResult<Vec<String>>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let rewrite = lines::rewrite_lines(self.content()?, f);
        Ok(self.apply_rewrite(rewrite))
    }

    fn apply_rewrite(&mut self, rewrite: LineRewrite) -> Vec<String> {
        if rewrite.changed() {
            self.replace_content(rewrite.content);
        }
        rewrite.modified
    }

    /// Persist the in-memory content to the note's path
    pub fn write_content(&mut self) -> NoteResult<()> {
        let Some(path) = self.path.clone() else {
            return Err(NoteError::configuration("note has no path to write to"));
        };
        let Some(content) = self.content.as_deref() else {
            // Nothing was loaded, so disk already holds the content
            return Ok(());
        };

        fs::write(&path, content).map_err(|source| NoteError::Write {
            path: path.clone(),
            source,
        })?;

        self.read_mtime = modified_time(&path).ok();
        self.modified = false;
        self.properties = None;
        debug!(path = %path.display(), bytes = content.len(), "Note written");
        Ok(())
    }

    /// Drop cached content so the next access reads from disk
    pub fn invalidate(&mut self) {
        if self.path.is_some() {
            self.content = None;
            self.read_mtime = None;
            self.modified = false;
            self.properties = None;
        }
    }

    fn refresh(&mut self) -> NoteResult<()> {
        let Some(path) = self.path.as_deref() else {
            if self.content.is_none() {
                self.content = Some(String::new());
            }
            return Ok(());
        };

        // Unsaved edits win over whatever is on disk
        if self.modified {
            return Ok(());
        }

        let mtime = modified_time(path)?;
        if let (Some(_), Some(read_mtime)) = (&self.content, self.read_mtime) {
            if mtime <= read_mtime {
                return Ok(());
            }
            debug!(path = %path.display(), "Note changed on disk, re-reading");
        }

        let content = read_content(path)?;
        self.content = Some(content);
        self.read_mtime = Some(mtime);
        self.properties = None;
        Ok(())
    }

    fn report(&self, warning: &ParseWarning) {
        let path = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if self.verbose {
            warn!(path = %path, "{warning}");
        } else {
            trace!(path = %path, "{warning}");
        }
    }
}

/// Read a note file as UTF-8, keeping its line endings untouched
pub fn read_content(path: &Path) -> NoteResult<String> {
    let content = fs::read_to_string(path).map_err(|e| NoteError::from_io(path, e))?;
    trace!(path = %path.display(), bytes = content.len(), "Note read");
    Ok(content)
}

fn modified_time(path: &Path) -> NoteResult<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| NoteError::from_io(path, e))
}

/// Reject files whose extension maps to a non-text media type
fn ensure_text_document(path: &Path) -> NoteResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if matches!(extension.as_deref(), Some("md" | "markdown" | "txt")) {
        return Ok(());
    }

    let Some(mime) = mime_guess::from_path(path).first() else {
        return Ok(());
    };
    let text_like = mime.type_() == mime_guess::mime::TEXT
        || matches!(
            mime.subtype().as_str(),
            "json" | "yaml" | "x-yaml" | "toml" | "xml" | "javascript"
        );

    if text_like {
        Ok(())
    } else {
        Err(NoteError::validation(format!(
            "{} is not a text document ({mime})",
            path.display()
        )))
    }
}
