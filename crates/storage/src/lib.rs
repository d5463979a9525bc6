//! # Guild Roster Storage
//!
//! Persistence for team configurations and the imported roster.
//!
//! ```text
//! Port                       │  Adapters
//! ───────────────────────────┼──────────────────────────────
//! trait ConfigurationRepo    │  InMemoryConfigurationRepository
//!   fn save()                │  JsonFileRepository
//!   fn find_by_id()          │
//! trait PlayerRepository     │  InMemoryConfigurationRepository
//!   fn save_players()        │  JsonFileRepository
//! ```

pub mod in_memory;
pub mod json_file;
pub mod repository;

pub use in_memory::InMemoryConfigurationRepository;
pub use json_file::JsonFileRepository;
pub use repository::{ConfigurationRepository, PlayerRepository, RepositoryError};
