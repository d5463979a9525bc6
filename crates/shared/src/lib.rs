//! # Guild Roster Shared
//!
//! Common types and interfaces used across all roster crates.

pub mod battle;
pub mod config;
pub mod error;
pub mod player;
pub mod team;

// Re-exports
pub use battle::*;
pub use config::*;
pub use error::*;
pub use player::*;
pub use team::*;
