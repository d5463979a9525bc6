//! CLI Commands

pub mod battle;
pub mod compare;
pub mod init;
pub mod team;

pub use battle::BattleCommand;
pub use compare::CompareCommand;
pub use init::InitCommand;
pub use team::TeamCommand;
