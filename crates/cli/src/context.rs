//! Runtime context shared by every command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use report::Exporter;
use shared::{AppConfig, Player, StoreKind, TeamConfiguration};
use storage::{
    ConfigurationRepository, InMemoryConfigurationRepository, JsonFileRepository,
    PlayerRepository,
};
use tracing::debug;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "roster.json";

/// Everything a store must provide
pub trait Store: ConfigurationRepository + PlayerRepository {}

impl<T: ConfigurationRepository + PlayerRepository> Store for T {}

/// Loaded settings plus the store they select
pub struct Context {
    pub config: AppConfig,
    pub store: Box<dyn Store>,
}

impl Context {
    /// Load settings from `config_path` (or `roster.json`) and open the store
    ///
    /// `data_dir` overrides the configured data directory.
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if config_path.is_some() {
            AppConfig::from_file(path)?
        } else {
            AppConfig::load_or_default(path)?
        };
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        debug!(?config, "Loaded settings");
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        let store: Box<dyn Store> = match config.store {
            StoreKind::File => Box::new(JsonFileRepository::new(config.data_dir.clone())),
            StoreKind::Memory => Box::new(InMemoryConfigurationRepository::new()),
        };
        Self { config, store }
    }

    /// In-memory context with default settings
    pub fn in_memory() -> Self {
        Self::from_config(AppConfig {
            store: StoreKind::Memory,
            ..AppConfig::default()
        })
    }

    /// The configuration being edited, or a fresh one
    pub fn current_or_new(&self) -> anyhow::Result<TeamConfiguration> {
        Ok(self
            .store
            .current()?
            .unwrap_or_else(|| TeamConfiguration::new(self.config.default_config_name.clone())))
    }

    /// Saved configuration by id or name, or the current one when no key is given
    pub fn select(&self, key: Option<&str>) -> anyhow::Result<TeamConfiguration> {
        match key {
            Some(key) => Ok(self.store.resolve(key)?),
            None => self.current_or_new(),
        }
    }

    /// The stored roster, shared for slot placement
    pub fn roster(&self) -> anyhow::Result<Vec<Arc<Player>>> {
        Ok(self
            .store
            .load_players()?
            .into_iter()
            .map(Arc::new)
            .collect())
    }

    /// Stamp `config` with `name` and the current time, save it and make it current
    pub fn save_as(&mut self, config: &mut TeamConfiguration, name: &str) -> anyhow::Result<()> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Configuration name must not be blank");
        }
        config.stamp(name);
        self.store.save(config)?;
        self.store.set_current(config)?;
        Ok(())
    }

    /// Exporter writing into `out_dir`
    pub fn exporter(&self, out_dir: &Path) -> Exporter {
        Exporter::new(out_dir, self.config.add_bom)
    }
}
