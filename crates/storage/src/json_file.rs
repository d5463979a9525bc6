//! JSON file repository
//!
//! Each storage key is one pretty-printed JSON file under the data directory:
//!
//! - `team_configurations.json`: array of saved configurations
//! - `current_configuration.json`: the configuration being edited
//! - `players_data.json`: the last imported roster
//!
//! A missing file reads as empty. Every write rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ConfigurationId, Player, TeamConfiguration};
use tracing::{debug, info};

use crate::repository::{ConfigurationRepository, PlayerRepository, RepositoryError};

pub const TEAM_CONFIGURATIONS_KEY: &str = "team_configurations";
pub const CURRENT_CONFIGURATION_KEY: &str = "current_configuration";
pub const PLAYERS_KEY: &str = "players_data";

/// File-backed repository rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    base_dir: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository; the directory is created on first write
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path for a storage key
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.key_path(key);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)?;
        debug!(path = %path.display(), "Wrote storage key");
        Ok(())
    }

    fn remove_key(&self, key: &str) -> Result<(), RepositoryError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl ConfigurationRepository for JsonFileRepository {
    fn save(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError> {
        let mut configurations = self.list_all()?;
        match configurations.iter_mut().find(|c| c.id == config.id) {
            Some(existing) => *existing = config.clone(),
            None => configurations.push(config.clone()),
        }
        self.write_key(TEAM_CONFIGURATIONS_KEY, &configurations)?;
        info!(id = %config.id, name = %config.name, "Saved team configuration");
        Ok(())
    }

    fn find_by_id(
        &self,
        id: &ConfigurationId,
    ) -> Result<Option<TeamConfiguration>, RepositoryError> {
        Ok(self.list_all()?.into_iter().find(|c| &c.id == id))
    }

    fn list_all(&self) -> Result<Vec<TeamConfiguration>, RepositoryError> {
        Ok(self
            .read_key::<Vec<TeamConfiguration>>(TEAM_CONFIGURATIONS_KEY)?
            .unwrap_or_default())
    }

    fn delete(&mut self, id: &ConfigurationId) -> Result<(), RepositoryError> {
        let mut configurations = self.list_all()?;
        let before = configurations.len();
        configurations.retain(|c| &c.id != id);
        if configurations.len() != before {
            self.write_key(TEAM_CONFIGURATIONS_KEY, &configurations)?;
            info!(id = %id, "Deleted team configuration");
        }

        if self.current()?.is_some_and(|c| &c.id == id) {
            self.remove_key(CURRENT_CONFIGURATION_KEY)?;
        }
        Ok(())
    }

    fn set_current(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError> {
        self.write_key(CURRENT_CONFIGURATION_KEY, config)
    }

    fn current(&self) -> Result<Option<TeamConfiguration>, RepositoryError> {
        self.read_key(CURRENT_CONFIGURATION_KEY)
    }
}

impl PlayerRepository for JsonFileRepository {
    fn save_players(&mut self, players: &[Player]) -> Result<(), RepositoryError> {
        self.write_key(PLAYERS_KEY, players)?;
        info!(count = players.len(), "Saved roster");
        Ok(())
    }

    fn load_players(&self) -> Result<Vec<Player>, RepositoryError> {
        Ok(self.read_key::<Vec<Player>>(PLAYERS_KEY)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{PlayerClass, SlotPosition};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample(name: &str) -> TeamConfiguration {
        let mut config = TeamConfiguration::new(name);
        let healer = Arc::new(Player::new("青衫客", 12_000, PlayerClass::Suwen).with_hall("一堂"));
        let tank = Arc::new(Player::new("铁壁", 15_000, PlayerClass::Tieyi));
        if let Ok(slot) = config.slot_mut(SlotPosition::new(0, 0, 0)) {
            *slot = Some(healer);
        }
        if let Ok(slot) = config.slot_mut(SlotPosition::new(3, 4, 5)) {
            *slot = Some(tank);
        }
        config
    }

    #[test]
    fn test_empty_directory_reads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("missing"));

        assert!(repo.list_all().unwrap().is_empty());
        assert!(repo.current().unwrap().is_none());
        assert!(repo.load_players().unwrap().is_empty());
    }

    #[test]
    fn test_save_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::new(dir.path());
        let config = sample("周末帮战");

        repo.save(&config).unwrap();

        let reopened = JsonFileRepository::new(dir.path());
        let loaded = reopened.find_by_id(&config.id).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.occupied_count(), 2);
        assert!(repo.key_path(TEAM_CONFIGURATIONS_KEY).exists());
    }

    #[test]
    fn test_upsert_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::new(dir.path());
        let mut first = sample("一");
        let second = sample("二");
        repo.save(&first).unwrap();
        repo.save(&second).unwrap();

        first.stamp("一改");
        repo.save(&first).unwrap();
        let names: Vec<_> = repo.list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["一改", "二"]);

        repo.delete(&first.id).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.find_by_name("二").unwrap().is_some());
    }

    #[test]
    fn test_deleting_current_clears_it() {
        let dir = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::new(dir.path());
        let config = sample("编辑中");
        repo.save(&config).unwrap();
        repo.set_current(&config).unwrap();
        assert_eq!(repo.current().unwrap().map(|c| c.id), Some(config.id.clone()));

        repo.delete(&config.id).unwrap();

        assert!(repo.current().unwrap().is_none());
        assert!(!repo.key_path(CURRENT_CONFIGURATION_KEY).exists());
    }

    #[test]
    fn test_players_persist() {
        let dir = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::new(dir.path());
        let players = vec![
            Player::new("青衫客", 12_000, PlayerClass::Suwen).with_hall("一堂"),
            Player::new("无名", 9_000, PlayerClass::Other),
        ];

        repo.save_players(&players).unwrap();

        let loaded = JsonFileRepository::new(dir.path()).load_players().unwrap();
        assert_eq!(loaded, players);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        fs::write(repo.key_path(TEAM_CONFIGURATIONS_KEY), "{not json").unwrap();

        assert!(matches!(repo.list_all(), Err(RepositoryError::Corrupt(_))));
    }
}
