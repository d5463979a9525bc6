//! Caller-side capacity policy
//!
//! The allocator primitives never refuse a placement for capacity reasons.
//! Callers that take operator input run this check before placing a player
//! from the roster and surface the error as a warning.
//!
//! Moves need no check: a regiment has exactly as many slots as its
//! capacity, so a swap can never push one past 30.

use shared::{
    CapacityExceededError, InvalidAddressError, RosterError, SlotPosition, TeamConfiguration,
    REGIMENT_CAPACITY,
};

/// Refuse a placement into a regiment that already holds 30 players
pub fn ensure_capacity(config: &TeamConfiguration, regiment: usize) -> Result<(), RosterError> {
    let target = config.regiments.get(regiment).ok_or(InvalidAddressError {
        position: SlotPosition::new(regiment, 0, 0),
    })?;

    let occupied = target.occupied();
    if occupied >= REGIMENT_CAPACITY {
        return Err(CapacityExceededError {
            regiment,
            regiment_name: target.name.clone(),
            occupied,
        }
        .into());
    }
    Ok(())
}
