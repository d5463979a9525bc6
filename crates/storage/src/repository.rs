//! Repository traits - abstract persistence for configurations and players
//!
//! These traits define what the application needs from storage.
//! How it is done (memory, JSON files) is the adapters' concern.

use shared::{ConfigurationId, Player, TeamConfiguration};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No configuration with this id (or name)
    #[error("Configuration not found: {id}")]
    NotFound { id: String },

    /// Failed to persist
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored blob could not be decoded
    #[error("Stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Team configuration repository
///
/// Saving is an upsert keyed by configuration id. Loading returns the saved
/// value verbatim.
pub trait ConfigurationRepository {
    /// Save a configuration (create or replace)
    fn save(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError>;

    /// Find a configuration by id
    fn find_by_id(&self, id: &ConfigurationId)
        -> Result<Option<TeamConfiguration>, RepositoryError>;

    /// All saved configurations, in the order they were first saved
    fn list_all(&self) -> Result<Vec<TeamConfiguration>, RepositoryError>;

    /// Delete a configuration; deleting an unknown id is not an error
    fn delete(&mut self, id: &ConfigurationId) -> Result<(), RepositoryError>;

    /// Remember the configuration being edited
    fn set_current(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError>;

    /// The configuration being edited, if any
    fn current(&self) -> Result<Option<TeamConfiguration>, RepositoryError>;

    /// First saved configuration with this exact name
    fn find_by_name(&self, name: &str) -> Result<Option<TeamConfiguration>, RepositoryError> {
        Ok(self.list_all()?.into_iter().find(|c| c.name == name))
    }

    /// Look a configuration up by id, then by name
    fn resolve(&self, key: &str) -> Result<TeamConfiguration, RepositoryError> {
        if let Some(config) = self.find_by_id(&ConfigurationId::new(key))? {
            return Ok(config);
        }
        self.find_by_name(key)?.ok_or_else(|| RepositoryError::NotFound {
            id: key.to_string(),
        })
    }

    /// Check if a configuration exists
    fn exists(&self, id: &ConfigurationId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Count all saved configurations
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list_all()?.len())
    }
}

/// Storage for the last imported roster
pub trait PlayerRepository {
    /// Replace the stored roster
    fn save_players(&mut self, players: &[Player]) -> Result<(), RepositoryError>;

    /// The stored roster; empty if nothing was imported yet
    fn load_players(&self) -> Result<Vec<Player>, RepositoryError>;

    /// Find a stored player by exact name
    fn find_player(&self, name: &str) -> Result<Option<Player>, RepositoryError> {
        Ok(self.load_players()?.into_iter().find(|p| p.name == name))
    }
}
