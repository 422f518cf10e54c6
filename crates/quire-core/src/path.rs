//! Note reference resolution

use crate::error::{NoteError, NoteResult};
use std::path::{Path, PathBuf};

/// Extension appended to references that don't carry one
pub const DEFAULT_EXTENSION: &str = "md";

/// Resolve a note reference to an absolute file path
///
/// Absolute references are kept as they are; relative ones are joined under
/// `vault_root`. `.md` is appended when the result has no extension. The
/// file is not required to exist.
pub fn resolve(reference: impl AsRef<Path>, vault_root: Option<&Path>) -> NoteResult<PathBuf> {
    let reference = reference.as_ref();

    let path = if reference.is_absolute() {
        reference.to_path_buf()
    } else {
        let root = vault_root.ok_or_else(|| {
            NoteError::configuration(format!(
                "vault path is required to resolve relative note '{}'",
                reference.display()
            ))
        })?;
        root.join(reference)
    };

    Ok(with_default_extension(path))
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(DEFAULT_EXTENSION);
    PathBuf::from(raw)
}

/// Resolves references against a fixed vault root
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    vault_root: Option<PathBuf>,
}

impl PathResolver {
    /// Resolver for a vault; relative references are joined under `vault_root`
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: Some(vault_root.into()),
        }
    }

    /// Resolver that only accepts absolute references
    pub fn without_vault() -> Self {
        Self { vault_root: None }
    }

    /// The configured vault root
    pub fn vault_root(&self) -> Option<&Path> {
        self.vault_root.as_deref()
    }

    /// Resolve a reference, see [`resolve`]
    pub fn resolve(&self, reference: impl AsRef<Path>) -> NoteResult<PathBuf> {
        resolve(reference, self.vault_root.as_deref())
    }
}
