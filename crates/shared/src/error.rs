//! Error types for the roster

use thiserror::Error;

use crate::team::{SlotPosition, REGIMENT_CAPACITY};

/// Error raised when a slot address lies outside the fixed board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Slot {position} does not exist (regiments 0-3, squads 0-4, positions 0-5)")]
pub struct InvalidAddressError {
    pub position: SlotPosition,
}

/// Error raised by the caller-side policy when a regiment is already full
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Regiment '{regiment_name}' is full ({occupied}/{})", REGIMENT_CAPACITY)]
pub struct CapacityExceededError {
    pub regiment: usize,
    pub regiment_name: String,
    pub occupied: usize,
}

/// General roster error type
#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddressError),

    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceededError),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
