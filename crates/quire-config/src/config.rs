//! Configuration model
//!
//! Mirrors the YAML layout of `config.yaml`:
//!
//! ```yaml
//! obsidian:
//!   vault: ~/Documents/vault
//! tasks:
//!   properties: { state: estado, ... }
//!   states: { resolved: "✔️", closed: "❌" }
//!   paths: { resolved: TAREAS/Completadas, team: { ... } }
//! daily_notes:
//!   folder: CALENDARIO/NOTAS DIARIAS
//! ```

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuireConfig {
    /// Vault location
    #[serde(default)]
    pub obsidian: VaultSection,

    /// Task workflow settings
    #[serde(default)]
    pub tasks: TaskConfig,

    /// Daily note naming
    #[serde(default)]
    pub daily_notes: DailyNotes,
}

/// Vault location section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultSection {
    /// Absolute path to the vault root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,
}

/// Task workflow settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Front matter keys used by ticket workflows
    #[serde(default)]
    pub properties: TaskProperties,

    /// Values written to the state property
    #[serde(default)]
    pub states: TaskStates,

    /// Destination folders for finished tickets
    #[serde(default)]
    pub paths: TaskPaths,
}

/// Names of the front matter keys the ticket workflow touches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskProperties {
    pub state: String,
    pub end_date: String,
    pub update: String,
    pub next_step: String,
    pub next_date: String,
}

impl Default for TaskProperties {
    fn default() -> Self {
        Self {
            state: "estado".to_string(),
            end_date: "fecha_realizacion".to_string(),
            update: "actualizado".to_string(),
            next_step: "siguiente_paso".to_string(),
            next_date: "fecha_siguiente".to_string(),
        }
    }
}

/// State values written when a ticket is finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStates {
    pub resolved: String,
    pub closed: String,
}

impl Default for TaskStates {
    fn default() -> Self {
        Self {
            resolved: "✔️".to_string(),
            closed: "❌".to_string(),
        }
    }
}

/// Vault-relative folders finished tickets are moved into
///
/// A key set to `null` disables filing for that action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPaths {
    pub resolved: Option<String>,

    pub closed: Option<String>,

    /// Destinations for tickets living under the team review folder
    pub team: TeamPaths,
}

impl Default for TaskPaths {
    fn default() -> Self {
        Self {
            resolved: Some("TAREAS/Completadas".to_string()),
            closed: Some("TAREAS/Cerradas".to_string()),
            team: TeamPaths::default(),
        }
    }
}

/// Destination folders for team tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPaths {
    /// Folder name that marks a note as a team ticket
    pub marker: String,

    pub resolved: Option<String>,

    pub closed: Option<String>,
}

impl Default for TeamPaths {
    fn default() -> Self {
        Self {
            marker: "REVISIÓN DE TICKETS".to_string(),
            resolved: Some("REVISIÓN DE TICKETS/Resueltos".to_string()),
            closed: Some("REVISIÓN DE TICKETS/Cerrados".to_string()),
        }
    }
}

/// Daily note naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyNotes {
    /// Vault-relative folder holding daily notes
    pub folder: String,
    /// Text appended after the `YYYY-MM-DD` date in the file stem
    pub suffix: String,
}

impl Default for DailyNotes {
    fn default() -> Self {
        Self {
            folder: "CALENDARIO/NOTAS DIARIAS".to_string(),
            suffix: " Notas diarias".to_string(),
        }
    }
}

impl QuireConfig {
    /// Vault root, or `MissingVaultPath` when none is configured
    pub fn vault_path(&self) -> Result<&Path, ConfigError> {
        self.obsidian
            .vault
            .as_deref()
            .ok_or(ConfigError::MissingVaultPath)
    }

    /// Replace the vault root, expanding `~` and environment variables
    pub fn set_vault_path(&mut self, path: impl AsRef<str>) {
        self.obsidian.vault = Some(expand_path(path.as_ref()));
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

impl TaskPaths {
    /// Destination for a finished ticket; team tickets only use the team folders
    pub fn destination(&self, resolved: bool, team: bool) -> Option<&str> {
        let path = match (team, resolved) {
            (true, true) => &self.team.resolved,
            (true, false) => &self.team.closed,
            (false, true) => &self.resolved,
            (false, false) => &self.closed,
        };
        path.as_deref()
    }
}

/// Expand a path read from a file; non-UTF-8 paths are kept as they are
pub(crate) fn expand_path_buf(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(raw) => expand_path(raw),
        None => path,
    }
}

/// Expand `~` and `$VAR` references; falls back to the literal input
pub(crate) fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!(path = raw, error = %e, "Could not expand path, using it verbatim");
            PathBuf::from(raw)
        }
    }
}
