//! Closest-trophy player selection.

use crate::models::RankedPlayer;

/// Player whose trophy count is closest to `target`.
///
/// Ties go to the player appearing first in `players`. Returns `None` only
/// for an empty slice.
pub fn closest_player(players: &[RankedPlayer], target: i64) -> Option<&RankedPlayer> {
    // min_by_key keeps the first of several equal minima
    players.iter().min_by_key(|p| p.trophy_distance(target))
}
