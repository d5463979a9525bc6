//! In-Memory Repository
//!
//! Keeps configurations and the roster in process memory. Used by tests and
//! by the `memory` store setting.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use shared::{ConfigurationId, Player, TeamConfiguration};

use crate::repository::{ConfigurationRepository, PlayerRepository, RepositoryError};

fn lock_error(kind: &str) -> RepositoryError {
    RepositoryError::Persistence {
        message: format!("Failed to acquire {} lock", kind),
    }
}

/// In-memory configuration and roster repository
///
/// Thread-safe implementation using RwLock. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigurationRepository {
    configurations: Arc<RwLock<IndexMap<String, TeamConfiguration>>>,
    current: Arc<RwLock<Option<TeamConfiguration>>>,
    players: Arc<RwLock<Vec<Player>>>,
}

impl InMemoryConfigurationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigurationRepository for InMemoryConfigurationRepository {
    fn save(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError> {
        let mut configurations = self.configurations.write().map_err(|_| lock_error("write"))?;
        configurations.insert(config.id.as_str().to_string(), config.clone());
        Ok(())
    }

    fn find_by_id(
        &self,
        id: &ConfigurationId,
    ) -> Result<Option<TeamConfiguration>, RepositoryError> {
        let configurations = self.configurations.read().map_err(|_| lock_error("read"))?;
        Ok(configurations.get(id.as_str()).cloned())
    }

    fn list_all(&self) -> Result<Vec<TeamConfiguration>, RepositoryError> {
        let configurations = self.configurations.read().map_err(|_| lock_error("read"))?;
        Ok(configurations.values().cloned().collect())
    }

    fn delete(&mut self, id: &ConfigurationId) -> Result<(), RepositoryError> {
        let mut configurations = self.configurations.write().map_err(|_| lock_error("write"))?;
        configurations.shift_remove(id.as_str());
        Ok(())
    }

    fn set_current(&mut self, config: &TeamConfiguration) -> Result<(), RepositoryError> {
        let mut current = self.current.write().map_err(|_| lock_error("write"))?;
        *current = Some(config.clone());
        Ok(())
    }

    fn current(&self) -> Result<Option<TeamConfiguration>, RepositoryError> {
        let current = self.current.read().map_err(|_| lock_error("read"))?;
        Ok(current.clone())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let configurations = self.configurations.read().map_err(|_| lock_error("read"))?;
        Ok(configurations.len())
    }
}

impl PlayerRepository for InMemoryConfigurationRepository {
    fn save_players(&mut self, players: &[Player]) -> Result<(), RepositoryError> {
        let mut stored = self.players.write().map_err(|_| lock_error("write"))?;
        *stored = players.to_vec();
        Ok(())
    }

    fn load_players(&self) -> Result<Vec<Player>, RepositoryError> {
        let stored = self.players.read().map_err(|_| lock_error("read"))?;
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{PlayerClass, SlotPosition};

    fn sample(name: &str) -> TeamConfiguration {
        let mut config = TeamConfiguration::new(name);
        let player = Arc::new(Player::new("青衫客", 12_000, PlayerClass::Suwen));
        if let Ok(slot) = config.slot_mut(SlotPosition::new(1, 2, 3)) {
            *slot = Some(player);
        }
        config
    }

    #[test]
    fn test_save_and_find() {
        let mut repo = InMemoryConfigurationRepository::new();
        let config = sample("周末帮战");

        repo.save(&config).unwrap();

        let found = repo.find_by_id(&config.id).unwrap().unwrap();
        assert_eq!(found, config);
        assert!(repo.exists(&config.id).unwrap());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_is_upsert() {
        let mut repo = InMemoryConfigurationRepository::new();
        let mut config = sample("周末帮战");
        repo.save(&config).unwrap();

        config.stamp("改名");
        repo.save(&config).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_by_id(&config.id).unwrap().unwrap().name, "改名");
    }

    #[test]
    fn test_list_keeps_save_order_and_delete() {
        let mut repo = InMemoryConfigurationRepository::new();
        let first = sample("一");
        let second = sample("二");
        let third = sample("三");
        for c in [&first, &second, &third] {
            repo.save(c).unwrap();
        }

        repo.delete(&second.id).unwrap();
        repo.delete(&ConfigurationId::new("missing")).unwrap();

        let names: Vec<_> = repo.list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["一", "三"]);
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let mut repo = InMemoryConfigurationRepository::new();
        let config = sample("周末帮战");
        repo.save(&config).unwrap();

        assert_eq!(repo.resolve(config.id.as_str()).unwrap().id, config.id);
        assert_eq!(repo.resolve("周末帮战").unwrap().id, config.id);
        assert!(matches!(
            repo.resolve("nope"),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_current_configuration() {
        let mut repo = InMemoryConfigurationRepository::new();
        assert!(repo.current().unwrap().is_none());

        let config = sample("编辑中");
        repo.set_current(&config).unwrap();

        assert_eq!(repo.current().unwrap(), Some(config));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_players_replace() {
        let mut repo = InMemoryConfigurationRepository::new();
        repo.save_players(&[Player::new("a", 1, PlayerClass::Other)]).unwrap();
        repo.save_players(&[
            Player::new("b", 2, PlayerClass::Other),
            Player::new("c", 3, PlayerClass::Tieyi),
        ])
        .unwrap();

        let players = repo.load_players().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(repo.find_player("c").unwrap().unwrap().class, PlayerClass::Tieyi);
        assert!(repo.find_player("a").unwrap().is_none());
    }
}
