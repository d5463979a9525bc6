//! Guild Roster CLI library
//!
//! The `roster` binary is a thin clap front over these modules so the
//! command handlers and the interactive session can be tested directly.

pub mod board;
pub mod commands;
pub mod context;
pub mod display;
pub mod interactive;
