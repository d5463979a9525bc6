//! Board edits driven by operator input
//!
//! Slots are typed as `regiment.squad.position`, counted from 1 the way the
//! board is printed. Placement from the roster goes through the capacity
//! policy; moves and removals go straight to the allocator.

use std::sync::Arc;

use anyhow::{anyhow, bail};
use roster::{ensure_capacity, AllocationEvent, SlotAllocator};
use shared::{Player, SlotPosition, TeamConfiguration};

/// Parse `r.s.p` (1-based; `,` also accepted) into a board address
pub fn parse_slot(input: &str) -> anyhow::Result<SlotPosition> {
    let parts: Vec<&str> = input.trim().split(['.', ',']).collect();
    let [regiment, squad, position] = parts.as_slice() else {
        bail!("Slot must look like regiment.squad.position, e.g. 1.2.3");
    };

    let index = |part: &str, what: &str| -> anyhow::Result<usize> {
        let value: usize = part
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {} '{}'", what, part))?;
        value
            .checked_sub(1)
            .ok_or_else(|| anyhow!("{} numbers start at 1", what))
    };

    let at = SlotPosition::new(
        index(*regiment, "regiment")?,
        index(*squad, "squad")?,
        index(*position, "position")?,
    );
    Ok(at.validate()?)
}

/// Place a roster player, found by exact name, into `at`
///
/// Refuses players already on the board and regiments that are full.
pub fn place_by_name(
    config: &mut TeamConfiguration,
    players: &[Arc<Player>],
    name: &str,
    at: SlotPosition,
) -> anyhow::Result<AllocationEvent> {
    let player = players
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| anyhow!("No player named '{}' in the roster", name))?;

    if let Some(existing) = config.find_player(&player.id) {
        bail!(
            "{} is already placed at {}; use move instead",
            player.name,
            existing
        );
    }

    let at = at.validate()?;
    ensure_capacity(config, at.regiment)?;
    Ok(SlotAllocator::new().place(config, at, player.clone())?)
}

/// Exchange two slots
pub fn move_slot(
    config: &mut TeamConfiguration,
    from: SlotPosition,
    to: SlotPosition,
) -> anyhow::Result<AllocationEvent> {
    Ok(SlotAllocator::new().swap(config, from, to)?)
}

/// Empty a slot
pub fn remove_slot(config: &mut TeamConfiguration, at: SlotPosition) -> anyhow::Result<AllocationEvent> {
    Ok(SlotAllocator::new().remove(config, at)?)
}

/// Roster players that are not on the board, in roster order
pub fn bench<'a>(config: &TeamConfiguration, players: &'a [Arc<Player>]) -> Vec<&'a Arc<Player>> {
    players
        .iter()
        .filter(|p| config.find_player(&p.id).is_none())
        .collect()
}
