//! Slot Allocator - manual placement primitives
//!
//! Three atomic mutations on a [`TeamConfiguration`]:
//! 1. Place: put a player into a slot, overwriting whoever was there
//! 2. Swap: exchange the contents of two slots
//! 3. Remove: empty a slot
//!
//! Addresses are validated before anything is touched, so a failed call
//! leaves the configuration exactly as it was. Capacity is not checked here;
//! see [`crate::policy`].

use std::sync::Arc;

use shared::{InvalidAddressError, Player, SlotPosition, TeamConfiguration};
use tracing::debug;

/// Events emitted by the allocator
///
/// Used for logging and operator feedback; the allocator itself
/// does nothing with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationEvent {
    /// A player was put into a slot
    Placed {
        at: SlotPosition,
        player: String,
        /// Previous occupant, now off the board
        displaced: Option<String>,
    },
    /// Two slots exchanged their contents
    Swapped {
        from: SlotPosition,
        to: SlotPosition,
        /// Player that left `from` (if any)
        moved: Option<String>,
        /// Player that left `to` (if any)
        exchanged: Option<String>,
    },
    /// A slot was emptied
    Removed {
        at: SlotPosition,
        player: Option<String>,
    },
}

/// SlotAllocator - stateless; all state lives in the configuration
#[derive(Debug, Clone, Copy)]
pub struct SlotAllocator;

impl SlotAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Place a player at `at`, overwriting any occupant (no implicit swap)
    pub fn place(
        &self,
        config: &mut TeamConfiguration,
        at: SlotPosition,
        player: Arc<Player>,
    ) -> Result<AllocationEvent, InvalidAddressError> {
        let slot = config.slot_mut(at)?;
        let name = player.name.clone();
        let displaced = slot.replace(player).map(|p| p.name.clone());

        debug!(%at, player = %name, ?displaced, "placed player");
        Ok(AllocationEvent::Placed {
            at,
            player: name,
            displaced,
        })
    }

    /// Exchange whatever occupies `from` and `to`
    ///
    /// Empty ↔ empty is a no-op; occupied ↔ empty moves the occupant.
    pub fn swap(
        &self,
        config: &mut TeamConfiguration,
        from: SlotPosition,
        to: SlotPosition,
    ) -> Result<AllocationEvent, InvalidAddressError> {
        // Both addresses are checked before either slot is touched
        from.validate()?;
        to.validate()?;

        let leaving_from = config.slot_mut(from)?.take();
        let leaving_to = config.slot_mut(to)?.take();

        let moved = leaving_from.as_ref().map(|p| p.name.clone());
        let exchanged = leaving_to.as_ref().map(|p| p.name.clone());

        *config.slot_mut(from)? = leaving_to;
        *config.slot_mut(to)? = leaving_from;

        debug!(%from, %to, ?moved, ?exchanged, "swapped slots");
        Ok(AllocationEvent::Swapped {
            from,
            to,
            moved,
            exchanged,
        })
    }

    /// Empty the slot at `at`; an already empty slot is left as is
    pub fn remove(
        &self,
        config: &mut TeamConfiguration,
        at: SlotPosition,
    ) -> Result<AllocationEvent, InvalidAddressError> {
        let player = config.slot_mut(at)?.take().map(|p| p.name.clone());

        debug!(%at, ?player, "removed player");
        Ok(AllocationEvent::Removed { at, player })
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
