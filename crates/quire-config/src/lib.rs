//! # Quire Configuration
//!
//! Typed configuration for the Quire note tools: the vault root, the front
//! matter keys used by the ticket workflow, and daily note naming.
//!
//! ```rust,no_run
//! use quire_config::ConfigLoader;
//!
//! let config = ConfigLoader::load(None)?;
//! println!("vault: {}", config.vault_path()?.display());
//! # Ok::<(), quire_config::ConfigError>(())
//! ```

mod config;
mod loader;

pub use config::*;
pub use loader::*;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the expected layout
    #[error("Invalid configuration{}: {message}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// Configuration could not be rendered back to YAML
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// A vault root is required but none is configured
    #[error("Vault path is not configured (set obsidian.vault, QUIRE_VAULT_PATH or --vault)")]
    MissingVaultPath,
}
