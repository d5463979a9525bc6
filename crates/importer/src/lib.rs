//! # Guild Roster Importer
//!
//! Reads roster and battle-log CSV exports. Headers may be Chinese or
//! English; rows that fail validation are skipped and counted.

mod columns;
pub mod battle;
pub mod players;
pub mod stats;

pub use battle::BattleCsvLoader;
pub use players::PlayerCsvLoader;
pub use stats::ImportStats;
