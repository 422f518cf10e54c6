//! Configuration loading
//!
//! Precedence, lowest first: built-in defaults, the config file, the
//! `QUIRE_VAULT_PATH` environment variable, then explicit overrides applied
//! by the caller.

use crate::config::expand_path_buf;
use crate::{ConfigError, QuireConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configured vault root
pub const VAULT_PATH_ENV: &str = "QUIRE_VAULT_PATH";

/// Loads [`QuireConfig`] from disk and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config location (`~/.config/quire/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quire").join("config.yaml"))
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. When no path is given the default
    /// location is tried and silently skipped if absent.
    pub fn load(path: Option<&Path>) -> Result<QuireConfig, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    QuireConfig::default()
                }
            },
        };

        if let Ok(vault) = std::env::var(VAULT_PATH_ENV) {
            if !vault.is_empty() {
                debug!(vault = %vault, "Vault path overridden from environment");
                config.set_vault_path(vault);
            }
        }

        Ok(config)
    }

    /// Parse a single YAML config file
    pub fn load_from_file(path: &Path) -> Result<QuireConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;

        config.obsidian.vault = config.obsidian.vault.take().map(expand_path_buf);

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a YAML string; an empty document yields defaults
    pub fn from_yaml(contents: &str) -> Result<QuireConfig, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(QuireConfig::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// A commented example configuration file
    pub fn example() -> &'static str {
        r#"# Quire configuration
# Location: ~/.config/quire/config.yaml

obsidian:
  # Absolute path to the vault (overridden by QUIRE_VAULT_PATH or --vault)
  vault: ~/Documents/vault

tasks:
  # Front matter keys touched by `quire ticket`
  properties:
    state: estado
    end_date: fecha_realizacion
    update: actualizado
    next_step: siguiente_paso
    next_date: fecha_siguiente
  states:
    resolved: "✔️"
    closed: "❌"
  # Vault-relative folders finished tickets are moved into
  paths:
    resolved: TAREAS/Completadas
    closed: TAREAS/Cerradas
    team:
      marker: REVISIÓN DE TICKETS
      resolved: REVISIÓN DE TICKETS/Resueltos
      closed: REVISIÓN DE TICKETS/Cerrados

daily_notes:
  folder: CALENDARIO/NOTAS DIARIAS
  suffix: " Notas diarias"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_parses() {
        let config = ConfigLoader::from_yaml(ConfigLoader::example()).unwrap();
        assert_eq!(
            config.tasks.paths.destination(true, false),
            Some("TAREAS/Completadas")
        );
        assert_eq!(config.tasks.paths.team.marker, "REVISIÓN DE TICKETS");
        assert!(config.vault_path().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ConfigLoader::from_yaml("   \n").unwrap();
        assert_eq!(config, QuireConfig::default());
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let err = ConfigLoader::from_yaml("obsidian: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }
}
