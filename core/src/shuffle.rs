//! Shuffle move generation.
//!
//! Scrambles the board with a bounded sequence of legal moves rather than a
//! random permutation, so every shuffled state is reachable (and undoable)
//! by construction. The only tie-breaking rule: a step never undoes the
//! immediately preceding one. Longer cycles are allowed.

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::board::{Board, Coord, TileId};

/// The four unit offsets, scanned in this fixed order: right, left, up, down.
const UNIT_OFFSETS: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
];

/// Progress of the current shuffle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShuffleState {
    moves_remaining: u32,
    prev_offset: Coord,
}

impl ShuffleState {
    pub(crate) fn new() -> Self {
        ShuffleState {
            moves_remaining: 0,
            prev_offset: Coord::ZERO,
        }
    }

    pub(crate) fn start(&mut self, length: u32) {
        self.moves_remaining = length;
        self.prev_offset = Coord::ZERO;
    }

    pub(crate) fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub(crate) fn is_active(&self) -> bool {
        self.moves_remaining > 0
    }

    /// Pick the tile for the next shuffle step.
    ///
    /// Scans the unit offsets from a uniformly random start index, wrapping,
    /// and takes the first one that stays in bounds and is not the reverse
    /// of the previous step. Decrements the countdown only when a step is
    /// taken; on a board of size >= 2 at least one offset always qualifies,
    /// so `None` is only reachable with no shuffle in progress.
    pub(crate) fn next_move(&mut self, board: &Board, rng: &mut SmallRng) -> Option<TileId> {
        if self.moves_remaining == 0 {
            return None;
        }
        let start = rng.gen_range(0..UNIT_OFFSETS.len());
        for i in 0..UNIT_OFFSETS.len() {
            let offset = UNIT_OFFSETS[(start + i) % UNIT_OFFSETS.len()];
            if offset == -self.prev_offset {
                continue;
            }
            let Some(tile) = board.tile_at(board.empty_coord() + offset) else {
                continue;
            };
            self.moves_remaining -= 1;
            self.prev_offset = offset;
            debug!(remaining = self.moves_remaining, %tile, "shuffle step");
            return Some(tile);
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
