//! Team configuration types
//!
//! A configuration is a fixed board: 4 regiments, each of 5 squads, each of
//! 6 slots. Slots hold shared references to players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::InvalidAddressError;
use crate::player::{Player, PlayerId};

pub const REGIMENT_COUNT: usize = 4;
pub const SQUADS_PER_REGIMENT: usize = 5;
pub const SLOTS_PER_SQUAD: usize = 6;
pub const REGIMENT_CAPACITY: usize = SQUADS_PER_REGIMENT * SLOTS_PER_SQUAD;
pub const TOTAL_CAPACITY: usize = REGIMENT_COUNT * REGIMENT_CAPACITY;

/// Name given to a configuration that has never been saved
pub const DEFAULT_CONFIGURATION_NAME: &str = "新配置";

/// Address of one slot on the board (all indices 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPosition {
    pub regiment: usize,
    pub squad: usize,
    pub position: usize,
}

impl SlotPosition {
    pub fn new(regiment: usize, squad: usize, position: usize) -> Self {
        Self {
            regiment,
            squad,
            position,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.regiment < REGIMENT_COUNT
            && self.squad < SQUADS_PER_REGIMENT
            && self.position < SLOTS_PER_SQUAD
    }

    /// Check the address against the board bounds
    pub fn validate(self) -> Result<Self, InvalidAddressError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(InvalidAddressError { position: self })
        }
    }

    /// Every valid address in board order
    pub fn all() -> impl Iterator<Item = SlotPosition> {
        (0..REGIMENT_COUNT).flat_map(|r| {
            (0..SQUADS_PER_REGIMENT)
                .flat_map(move |s| (0..SLOTS_PER_SQUAD).map(move |p| SlotPosition::new(r, s, p)))
        })
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.regiment, self.squad, self.position)
    }
}

/// Six slots of a regiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    /// Display number (1-5)
    pub id: u32,
    pub players: [Option<Arc<Player>>; SLOTS_PER_SQUAD],
}

impl Squad {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            players: Default::default(),
        }
    }

    pub fn occupied(&self) -> usize {
        self.players.iter().filter(|p| p.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.players = Default::default();
    }
}

/// A regiment of five squads, capacity 30
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regiment {
    /// Display number (1-4)
    pub id: u32,
    pub name: String,
    pub squads: [Squad; SQUADS_PER_REGIMENT],
}

impl Regiment {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("团{}", id),
            squads: std::array::from_fn(|i| Squad::new(i as u32 + 1)),
        }
    }

    pub fn occupied(&self) -> usize {
        self.squads.iter().map(Squad::occupied).sum()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() >= REGIMENT_CAPACITY
    }
}

/// Unique identifier for a TeamConfiguration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(String);

impl ConfigurationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// TeamConfiguration - the root aggregate of the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfiguration {
    pub id: ConfigurationId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub regiments: [Regiment; REGIMENT_COUNT],
}

impl TeamConfiguration {
    /// Create an empty board
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ConfigurationId::generate(),
            name: name.into(),
            created_at: Utc::now(),
            regiments: std::array::from_fn(|i| Regiment::new(i as u32 + 1)),
        }
    }

    /// Occupant of a slot
    pub fn get(&self, at: SlotPosition) -> Result<Option<&Arc<Player>>, InvalidAddressError> {
        let at = at.validate()?;
        Ok(self.regiments[at.regiment].squads[at.squad].players[at.position].as_ref())
    }

    /// Mutable access to a slot
    pub fn slot_mut(
        &mut self,
        at: SlotPosition,
    ) -> Result<&mut Option<Arc<Player>>, InvalidAddressError> {
        let at = at.validate()?;
        Ok(&mut self.regiments[at.regiment].squads[at.squad].players[at.position])
    }

    /// Number of occupied slots in one regiment (0 for an unknown index)
    pub fn regiment_occupancy(&self, regiment: usize) -> usize {
        self.regiments.get(regiment).map(Regiment::occupied).unwrap_or(0)
    }

    /// Number of occupied slots on the whole board
    pub fn occupied_count(&self) -> usize {
        self.regiments.iter().map(Regiment::occupied).sum()
    }

    /// Every occupied slot in board order
    pub fn occupants(&self) -> impl Iterator<Item = (SlotPosition, &Arc<Player>)> {
        self.regiments.iter().enumerate().flat_map(|(r, regiment)| {
            regiment.squads.iter().enumerate().flat_map(move |(s, squad)| {
                squad
                    .players
                    .iter()
                    .enumerate()
                    .filter_map(move |(p, slot)| slot.as_ref().map(|pl| (SlotPosition::new(r, s, p), pl)))
            })
        })
    }

    /// Where a player currently sits, if anywhere
    pub fn find_player(&self, id: &PlayerId) -> Option<SlotPosition> {
        self.occupants()
            .find(|(_, player)| &player.id == id)
            .map(|(at, _)| at)
    }

    /// Empty every slot, keeping ids and names
    pub fn clear(&mut self) {
        for regiment in &mut self.regiments {
            for squad in &mut regiment.squads {
                squad.clear();
            }
        }
    }

    /// Give the configuration its saved name and timestamp
    pub fn stamp(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.created_at = Utc::now();
    }
}

impl Default for TeamConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIGURATION_NAME)
    }
}
