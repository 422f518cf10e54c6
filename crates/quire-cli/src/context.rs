//! Shared state for command execution

use anyhow::{Context, Result};
use quire_config::{ConfigLoader, QuireConfig};
use quire_core::{Note, Vault};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loaded configuration plus global flags
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: QuireConfig,
    /// Config file actually read, if any
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

impl CliContext {
    /// Load configuration, applying the `--vault` override last
    pub fn load(config_path: Option<&Path>, vault: Option<&str>, verbose: bool) -> Result<Self> {
        let mut config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
        if let Some(vault) = vault {
            config.set_vault_path(vault);
        }

        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => ConfigLoader::default_path().filter(|path| path.exists()),
        };
        debug!(
            config = ?config_path,
            vault = ?config.obsidian.vault,
            "CLI context ready"
        );

        Ok(Self {
            config,
            config_path,
            verbose,
        })
    }

    /// Configured vault root, if any
    pub fn vault_root(&self) -> Option<&Path> {
        self.config.vault_path().ok()
    }

    /// Open the configured vault
    pub fn vault(&self) -> Result<Vault> {
        let root = self.config.vault_path()?;
        Vault::open(root).with_context(|| format!("Failed to open vault {}", root.display()))
    }

    /// Open a note; relative references need a configured vault
    pub fn open_note(&self, reference: &str) -> Result<Note> {
        let note = Note::open(reference, self.vault_root())?;
        Ok(note.with_verbose(self.verbose))
    }
}

/// Display path of a note, relative to the vault when possible
pub fn display_path(ctx: &CliContext, path: &Path) -> String {
    ctx.vault_root()
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}
