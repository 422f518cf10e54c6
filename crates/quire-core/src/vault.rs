//! Vault directory operations

use crate::error::{NoteError, NoteResult};
use crate::note::Note;
use crate::path::{PathResolver, DEFAULT_EXTENSION};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory Obsidian keeps its settings in
pub const OBSIDIAN_DIR: &str = ".obsidian";

/// A directory of Markdown notes
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    resolver: PathResolver,
}

impl Vault {
    /// Open an existing vault directory; relative roots are made absolute
    pub fn open(root: impl Into<PathBuf>) -> NoteResult<Self> {
        let root = root.into();
        let root = std::path::absolute(&root).map_err(|e| NoteError::from_io(&root, e))?;
        let metadata = fs::metadata(&root).map_err(|e| NoteError::from_io(&root, e))?;
        if !metadata.is_dir() {
            return Err(NoteError::validation(format!(
                "vault path is not a directory: {}",
                root.display()
            )));
        }
        if !root.join(OBSIDIAN_DIR).is_dir() {
            warn!(vault = %root.display(), "No {OBSIDIAN_DIR} directory, is this an Obsidian vault?");
        }

        debug!(vault = %root.display(), "Vault opened");
        Ok(Self {
            resolver: PathResolver::new(root.clone()),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Resolve a reference inside the vault
    pub fn resolve(&self, reference: impl AsRef<Path>) -> NoteResult<PathBuf> {
        self.resolver.resolve(reference)
    }

    /// Open a note inside the vault
    pub fn note(&self, reference: impl AsRef<Path>) -> NoteResult<Note> {
        Note::from_path(self.resolve(reference)?)
    }

    /// Markdown files under `subdir` (or the root), sorted by path
    ///
    /// Hidden directories such as `.obsidian` and `.trash` are skipped.
    pub fn list_notes(&self, subdir: Option<&Path>, recursive: bool) -> NoteResult<Vec<PathBuf>> {
        let start = match subdir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };
        if !start.is_dir() {
            return Err(NoteError::NotFound { path: start });
        }

        let mut walker = WalkDir::new(&start).follow_links(false);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut notes: Vec<PathBuf> = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown(e.path()))
            .map(DirEntry::into_path)
            .collect();
        notes.sort();

        debug!(dir = %start.display(), count = notes.len(), "Notes listed");
        Ok(notes)
    }

    /// Move a note into `dest_dir` (vault-relative), creating it as needed
    ///
    /// An existing file with the same name is never overwritten; the moved
    /// note gets a `_1`, `_2`, ... suffix instead. Returns the new path.
    pub fn move_note(&self, note: &Path, dest_dir: &Path) -> NoteResult<PathBuf> {
        if !note.is_file() {
            return Err(NoteError::NotFound {
                path: note.to_path_buf(),
            });
        }
        let file_name = note
            .file_name()
            .ok_or_else(|| NoteError::validation(format!("not a file: {}", note.display())))?;

        let dest_dir = self.root.join(dest_dir);
        fs::create_dir_all(&dest_dir).map_err(|e| NoteError::from_io(&dest_dir, e))?;

        let target = unique_destination(&dest_dir, Path::new(file_name));
        move_file(note, &target).map_err(|source| NoteError::Write {
            path: target.clone(),
            source,
        })?;

        info!(from = %note.display(), to = %target.display(), "Note moved");
        Ok(target)
    }
}

/// Whether a note sits under a directory named `marker`
pub fn is_team_ticket(path: &Path, marker: &str) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == marker))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DEFAULT_EXTENSION))
}

/// Rename, or copy then remove when the rename fails (e.g. across filesystems)
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!(from = %from.display(), error = %err, "Rename failed, copying instead");
            copy_then_remove(from, to).map_err(|_| err)
        }
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;
    if let Err(err) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(err);
    }
    Ok(())
}

fn unique_destination(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{stem}_{n}{extension}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_then_remove_moves_content() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.md");
        let to = dir.path().join("b.md");
        fs::write(&from, "---\nestado: ✔️\n---\n").unwrap();

        copy_then_remove(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "---\nestado: ✔️\n---\n");
    }

    #[test]
    fn test_move_file_keeps_rename_error_when_copy_fails() {
        let dir = TempDir::new().unwrap();
        let err = move_file(&dir.path().join("missing.md"), &dir.path().join("b.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("b.md").exists());
    }

    fn vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(OBSIDIAN_DIR)).unwrap();
        fs::write(dir.path().join(OBSIDIAN_DIR).join("hidden.md"), "x").unwrap();
        fs::write(dir.path().join("inbox.md"), "---\na: 1\n---\n").unwrap();
        fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();
        fs::create_dir_all(dir.path().join("TICKETS/REVISIÓN DE TICKETS")).unwrap();
        fs::write(dir.path().join("TICKETS/t1.md"), "").unwrap();
        fs::write(dir.path().join("TICKETS/REVISIÓN DE TICKETS/t2.md"), "").unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn test_open_missing_and_file_roots() {
        let dir = TempDir::new().unwrap();
        let err = Vault::open(dir.path().join("missing")).unwrap_err();
        assert!(err.is_not_found());

        let file = dir.path().join("file.md");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            Vault::open(&file).unwrap_err(),
            NoteError::Validation(_)
        ));
    }

    #[test]
    fn test_list_notes() {
        let (dir, vault) = vault();

        let all = vault.list_notes(None, true).unwrap();
        assert_eq!(
            all,
            vec![
                dir.path().join("TICKETS/REVISIÓN DE TICKETS/t2.md"),
                dir.path().join("TICKETS/t1.md"),
                dir.path().join("inbox.md"),
            ]
        );

        let top = vault.list_notes(None, false).unwrap();
        assert_eq!(top, vec![dir.path().join("inbox.md")]);

        let tickets = vault.list_notes(Some(Path::new("TICKETS")), false).unwrap();
        assert_eq!(tickets, vec![dir.path().join("TICKETS/t1.md")]);

        assert!(vault
            .list_notes(Some(Path::new("nope")), true)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_move_note_avoids_overwrite() {
        let (dir, vault) = vault();
        fs::create_dir_all(dir.path().join("DONE")).unwrap();
        fs::write(dir.path().join("DONE/t1.md"), "existing").unwrap();

        let moved = vault
            .move_note(&dir.path().join("TICKETS/t1.md"), Path::new("DONE"))
            .unwrap();

        assert_eq!(moved, dir.path().join("DONE/t1_1.md"));
        assert!(!dir.path().join("TICKETS/t1.md").exists());
        assert_eq!(fs::read_to_string(dir.path().join("DONE/t1.md")).unwrap(), "existing");
    }

    #[test]
    fn test_move_note_creates_destination() {
        let (dir, vault) = vault();
        let moved = vault
            .move_note(&dir.path().join("inbox.md"), Path::new("ARCHIVE/2024"))
            .unwrap();
        assert_eq!(moved, dir.path().join("ARCHIVE/2024/inbox.md"));
        assert!(moved.is_file());

        let err = vault
            .move_note(&dir.path().join("inbox.md"), Path::new("ARCHIVE"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_note_resolves_inside_vault() {
        let (dir, vault) = vault();
        let mut note = vault.note("inbox").unwrap();
        assert_eq!(note.path(), Some(dir.path().join("inbox.md").as_path()));
        assert_eq!(note.property("a").unwrap().and_then(|v| v.as_u64()), Some(1));
    }

    #[test]
    fn test_is_team_ticket() {
        let marker = "REVISIÓN DE TICKETS";
        assert!(is_team_ticket(
            Path::new("/v/TICKETS/REVISIÓN DE TICKETS/t2.md"),
            marker
        ));
        assert!(!is_team_ticket(Path::new("/v/TICKETS/t1.md"), marker));
        assert!(!is_team_ticket(
            Path::new("/v/TICKETS/REVISIÓN DE TICKETS 2/t.md"),
            marker
        ));
    }
}
