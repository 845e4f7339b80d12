//! # Sliding-Tile Puzzle Core Engine
//!
//! A pure Rust implementation of a 15-puzzle-style sliding game: an N x N
//! grid of tiles with one empty slot, a single-flight move queue that
//! serializes animated moves, a shuffle generator with anti-reversal
//! tie-breaking, and an undo stack that replays history backwards. Designed
//! for easy integration with CLI and WebAssembly frontends.
//!
//! The engine never renders and never interpolates: a presentation layer
//! reports tile presses and animation completions, and the engine answers
//! each event with at most one [`MoveStarted`] describing the animation to
//! run next. The board itself is updated the moment a move starts; the
//! animation is purely visual. All randomness comes from a caller-supplied
//! seed, so shuffles are reproducible.
//!
//! Every entry point takes `&mut self`, which is what serializes the state
//! machine: a completion callback finishes its whole idle-to-animating
//! transition before any other event can observe the queue.
//!
//! ## Example
//!
//! ```rust
//! use slide_puzzle_core::Puzzle;
//!
//! let mut puzzle = Puzzle::new(4, 42).unwrap();
//! let first = puzzle.start_shuffle(20).unwrap();
//! // ... presentation layer animates `first.tile`, then reports back:
//! let next = puzzle.animation_complete();
//! assert!(next.is_some()); // the shuffle chains one move at a time
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

pub mod board;
mod shuffle;

pub use board::{Board, Coord, TileId};

use shuffle::ShuffleState;

/// Smallest supported board; below this a shuffle step could dead-end.
pub const MIN_BOARD_SIZE: u32 = 2;

/// Errors that can occur while constructing a [`Puzzle`].
///
/// Everything after construction degrades to a no-op instead of failing:
/// invalid move requests are dropped, spurious completions are ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("board size must be at least {}, got {0}", MIN_BOARD_SIZE)]
    SizeTooSmall(u32),
}

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Tiles per side.
    pub size: u32,
    /// Animation duration handed out for player moves.
    pub move_duration: Duration,
    /// Animation duration handed out for shuffle and undo moves.
    pub shuffle_move_duration: Duration,
    /// Default shuffle length for frontends that do not pick their own.
    pub shuffle_length: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            size: 4,
            move_duration: Duration::from_millis(200),
            shuffle_move_duration: Duration::from_millis(100),
            shuffle_length: 20,
        }
    }
}

/// Where a queued move came from. Decides the animation duration and
/// whether the move is recorded on the undo stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Direct player input.
    Player,
    /// Generated by the shuffle generator.
    Shuffle,
    /// Replayed backwards off the undo stack.
    Undo,
}

/// A move the engine has applied and wants animated.
///
/// At most one is emitted per engine call. The board is already swapped by
/// the time this is returned: `tile` occupies `to` and the empty tile
/// occupies `from`. The presentation layer should tween the tile from
/// `from` to `to` over `duration`, then call
/// [`Puzzle::animation_complete`]. This event doubles as the swap
/// notification for effects; the swap partner is always the empty tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveStarted {
    pub tile: TileId,
    pub kind: MoveKind,
    /// Cell the tile moved out of (now the empty cell).
    pub from: Coord,
    /// Cell the tile now occupies; the animation target.
    pub to: Coord,
    /// How long the presentation layer should animate.
    pub duration: Duration,
}

/// Move-queue gate: at most one animation is ever in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueueState {
    Idle,
    Animating,
}

/// The puzzle state machine.
///
/// Owns the board, the pending move queue, the undo stack and the shuffle
/// generator. See the crate docs for the event protocol.
pub struct Puzzle {
    board: Board,
    config: PuzzleConfig,
    state: QueueState,
    /// Pending requests in arrival order; duplicates allowed.
    pending: VecDeque<(TileId, MoveKind)>,
    /// Applied moves, most recent last.
    history: Vec<TileId>,
    shuffle: ShuffleState,
    reversing: bool,
    rng: SmallRng,
}

impl Puzzle {
    /// Create a solved puzzle with default durations and the given seed.
    pub fn new(size: u32, seed: u64) -> Result<Self, PuzzleError> {
        Self::with_config(
            PuzzleConfig {
                size,
                ..PuzzleConfig::default()
            },
            seed,
        )
    }

    pub fn with_config(config: PuzzleConfig, seed: u64) -> Result<Self, PuzzleError> {
        if config.size < MIN_BOARD_SIZE {
            return Err(PuzzleError::SizeTooSmall(config.size));
        }
        Ok(Puzzle {
            board: Board::new(config.size),
            config,
            state: QueueState::Idle,
            pending: VecDeque::new(),
            history: Vec::new(),
            shuffle: ShuffleState::new(),
            reversing: false,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Back to the solved layout with a fresh seed. Drops every queued and
    /// recorded move.
    pub fn reset(&mut self, seed: u64) {
        self.board = Board::new(self.config.size);
        self.state = QueueState::Idle;
        self.pending.clear();
        self.history.clear();
        self.shuffle = ShuffleState::new();
        self.reversing = false;
        self.rng = SmallRng::seed_from_u64(seed);
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// Player pressed a tile: enqueue it and process the queue.
    pub fn press_tile(&mut self, tile: TileId) -> Option<MoveStarted> {
        self.enqueue_tile(tile);
        self.process_pending()
    }

    /// Player pressed the cell at `coord`. Presses on the empty cell or out
    /// of bounds are ignored.
    pub fn press_cell(&mut self, coord: Coord) -> Option<MoveStarted> {
        let tile = self.board.tile_at(coord)?;
        if tile == self.board.empty_tile() {
            return None;
        }
        self.press_tile(tile)
    }

    /// Enqueue a press without processing the queue.
    ///
    /// Lets an input layer batch several presses and release them together
    /// with [`Puzzle::process_pending`]; `press_tile` is exactly the two in
    /// sequence.
    pub fn enqueue_tile(&mut self, tile: TileId) {
        self.pending.push_back((tile, MoveKind::Player));
    }

    /// Process queued moves until one starts animating or the queue empties.
    pub fn process_pending(&mut self) -> Option<MoveStarted> {
        self.drain()
    }

    /// The presentation layer finished the in-flight animation.
    ///
    /// Goes back to idle, starts the next queued move if any, then lets an
    /// active shuffle or reversal chain its next step. Calling this while
    /// nothing is animating is a no-op.
    pub fn animation_complete(&mut self) -> Option<MoveStarted> {
        if self.state != QueueState::Animating {
            return None;
        }
        self.state = QueueState::Idle;

        let mut started = self.drain();

        // The shuffle generates its next step even when a queued player
        // move won the race above; the step just waits in the queue.
        if self.shuffle.is_active() {
            if let Some(tile) = self.shuffle.next_move(&self.board, &mut self.rng) {
                self.pending.push_back((tile, MoveKind::Shuffle));
            }
            if started.is_none() {
                started = self.drain();
            }
        }

        if started.is_none() {
            started = self.continue_reverse();
        }

        if started.is_none() && self.board.is_solved() {
            info!("board solved");
        }

        started
    }

    // -------------------------------------------------------------------------
    // Shuffle
    // -------------------------------------------------------------------------

    /// Begin a shuffle of `length` randomized legal moves.
    ///
    /// The first step is taken immediately; every animation completion
    /// chains the next one until none remain. A step never undoes the
    /// previous one, so the scramble cannot trivially oscillate.
    pub fn start_shuffle(&mut self, length: u32) -> Option<MoveStarted> {
        info!(length, "shuffle started");
        self.shuffle.start(length);
        if let Some(tile) = self.shuffle.next_move(&self.board, &mut self.rng) {
            self.pending.push_back((tile, MoveKind::Shuffle));
        }
        self.drain()
    }

    // -------------------------------------------------------------------------
    // Undo
    // -------------------------------------------------------------------------

    /// Undo every recorded move, most recent first, one animation at a time.
    ///
    /// A popped tile sits where the empty cell just was, so pressing it
    /// again is exactly the inverse swap. Each completion pops the next
    /// entry until the stack is empty. Player presses arriving mid-reverse
    /// are drained (and recorded) first, so they get unwound too.
    pub fn reverse_all(&mut self) -> Option<MoveStarted> {
        if self.history.is_empty() {
            return None;
        }
        self.reversing = true;
        self.continue_reverse()
    }

    /// Cancel all queued-but-unapplied input without touching the board.
    ///
    /// Returns the discarded tiles so the presentation layer can stop any
    /// pressed-tile effects. An in-flight animation still runs to
    /// completion; only pending entries can be cancelled.
    pub fn discard_pending(&mut self) -> Vec<TileId> {
        let discarded: Vec<TileId> = self.pending.drain(..).map(|(tile, _)| tile).collect();
        if !discarded.is_empty() {
            debug!(count = discarded.len(), "discarded pending moves");
        }
        discarded
    }

    fn continue_reverse(&mut self) -> Option<MoveStarted> {
        if !self.reversing || self.state == QueueState::Animating || !self.pending.is_empty() {
            return None;
        }
        while let Some(tile) = self.history.pop() {
            self.pending.push_back((tile, MoveKind::Undo));
            if let Some(started) = self.drain() {
                return Some(started);
            }
            // Entry failed validation (cannot normally happen); keep
            // unwinding.
        }
        self.reversing = false;
        None
    }

    // -------------------------------------------------------------------------
    // Queue internals
    // -------------------------------------------------------------------------

    /// Pop pending moves until one validates and starts animating.
    ///
    /// Entries that are stale by the time they reach the front (no longer
    /// adjacent to the empty cell) are dropped without being retried or
    /// surfaced.
    fn drain(&mut self) -> Option<MoveStarted> {
        if self.state == QueueState::Animating {
            return None;
        }
        while let Some((tile, kind)) = self.pending.pop_front() {
            let Some(from) = self.board.coord_of(tile) else {
                debug!(%tile, "dropped move for unknown tile");
                continue;
            };
            let Some(to) = self.board.try_move(tile) else {
                debug!(%tile, %from, "dropped non-adjacent move");
                continue;
            };
            if kind != MoveKind::Undo {
                self.history.push(tile);
            }
            self.state = QueueState::Animating;
            return Some(MoveStarted {
                tile,
                kind,
                from,
                to,
                duration: self.duration_for(kind),
            });
        }
        None
    }

    fn duration_for(&self, kind: MoveKind) -> Duration {
        match kind {
            MoveKind::Player => self.config.move_duration,
            MoveKind::Shuffle | MoveKind::Undo => self.config.shuffle_move_duration,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Tiles per side.
    pub fn size(&self) -> u32 {
        self.board.size()
    }

    pub fn is_animating(&self) -> bool {
        self.state == QueueState::Animating
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// True while a reversal chain still has history to unwind.
    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    pub fn shuffle_moves_remaining(&self) -> u32 {
        self.shuffle.moves_remaining()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Puzzle {{ state: {:?}, pending: {}, history: {}, shuffle_remaining: {} }}",
            self.state,
            self.pending.len(),
            self.history.len(),
            self.shuffle.moves_remaining()
        )?;
        write!(f, "{}", self.board)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Report completions until a completion starts nothing new.
    fn drive_to_idle(puzzle: &mut Puzzle) -> Vec<MoveStarted> {
        let mut moves = Vec::new();
        while puzzle.is_animating() {
            if let Some(started) = puzzle.animation_complete() {
                moves.push(started);
            }
        }
        moves
    }

    // -------------------------------------------------------------------------
    // Construction tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_starts_solved_and_idle() {
        let puzzle = Puzzle::new(4, 42).unwrap();
        assert!(puzzle.is_solved());
        assert!(!puzzle.is_animating());
        assert_eq!(puzzle.pending_count(), 0);
        assert_eq!(puzzle.history_count(), 0);
        assert_eq!(puzzle.shuffle_moves_remaining(), 0);
    }

    #[test]
    fn test_rejects_tiny_board() {
        assert_eq!(
            Puzzle::new(1, 0).err(),
            Some(PuzzleError::SizeTooSmall(1))
        );
        assert_eq!(
            Puzzle::new(0, 0).err(),
            Some(PuzzleError::SizeTooSmall(0))
        );
        assert!(Puzzle::new(2, 0).is_ok());
    }

    // -------------------------------------------------------------------------
    // Press / queue tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_press_adjacent_tile_starts_move() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        let started = puzzle.press_cell(Coord::new(3, 1)).unwrap();

        assert_eq!(started.kind, MoveKind::Player);
        assert_eq!(started.from, Coord::new(3, 1));
        assert_eq!(started.to, Coord::new(3, 0));
        assert_eq!(started.duration, Duration::from_millis(200));
        assert!(puzzle.is_animating());
        assert_eq!(puzzle.board().empty_coord(), Coord::new(3, 1));
        assert_eq!(puzzle.history_count(), 1);
    }

    #[test]
    fn test_press_non_adjacent_tile_is_dropped() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        assert_eq!(puzzle.press_cell(Coord::new(0, 0)), None);
        assert!(!puzzle.is_animating());
        assert_eq!(puzzle.history_count(), 0);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_press_empty_cell_is_ignored() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        assert_eq!(puzzle.press_cell(Coord::new(3, 0)), None);
        assert_eq!(puzzle.pending_count(), 0);
    }

    #[test]
    fn test_single_move_in_flight() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        puzzle.press_cell(Coord::new(3, 1)).unwrap();

        // Empty is now at (3, 1); (2, 1) is a legal follow-up, but the
        // first animation has not completed yet.
        let second = puzzle.press_cell(Coord::new(2, 1));
        assert_eq!(second, None);
        assert_eq!(puzzle.pending_count(), 1);

        let started = puzzle.animation_complete().unwrap();
        assert_eq!(started.from, Coord::new(2, 1));
        assert_eq!(puzzle.pending_count(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        // Walk the empty cell left along the top row: each queued press is
        // adjacent to the empty cell at the time of its own turn.
        let first = puzzle.press_cell(Coord::new(2, 0)).unwrap();
        puzzle.press_cell(Coord::new(1, 0));
        puzzle.press_cell(Coord::new(0, 0));
        assert_eq!(puzzle.pending_count(), 2);

        let second = puzzle.animation_complete().unwrap();
        let third = puzzle.animation_complete().unwrap();
        assert_eq!(puzzle.animation_complete(), None);

        assert_eq!(first.from, Coord::new(2, 0));
        assert_eq!(second.from, Coord::new(1, 0));
        assert_eq!(third.from, Coord::new(0, 0));
        assert_eq!(puzzle.board().empty_coord(), Coord::new(0, 0));
    }

    #[test]
    fn test_stale_queued_press_is_dropped() {
        // The 4x4 scenario: press (3, 1), then (2, 0) while animating.
        // Once (3, 1) has moved, the empty cell is at (3, 1) and (2, 0)
        // is a diagonal-ish (1, 1) away, so the queued press is discarded.
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        puzzle.press_cell(Coord::new(3, 1)).unwrap();
        puzzle.press_cell(Coord::new(2, 0));
        assert_eq!(puzzle.pending_count(), 1);

        assert_eq!(puzzle.animation_complete(), None);
        assert_eq!(puzzle.pending_count(), 0);
        assert!(!puzzle.is_animating());
        assert_eq!(puzzle.history_count(), 1);
    }

    #[test]
    fn test_animation_complete_while_idle_is_noop() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        assert_eq!(puzzle.animation_complete(), None);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_batched_input_matches_sequential_play() {
        let mut batched = Puzzle::new(4, 1).unwrap();
        let mut sequential = Puzzle::new(4, 1).unwrap();

        let presses = [Coord::new(3, 1), Coord::new(2, 1), Coord::new(2, 0)];
        for &cell in &presses {
            sequential.press_cell(cell);
            drive_to_idle(&mut sequential);
        }

        // Same presses, held back and released at once. Queuing by the
        // pre-move cells works because nothing moves until the release;
        // the queue re-validates each entry against the live board.
        for &cell in &presses {
            let tile = batched.board().tile_at(cell).unwrap();
            batched.enqueue_tile(tile);
        }
        assert!(!batched.is_animating());
        batched.process_pending().unwrap();
        drive_to_idle(&mut batched);

        assert_eq!(batched.board(), sequential.board());
    }

    // -------------------------------------------------------------------------
    // Shuffle tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_shuffle_single_step_scenario() {
        // Fresh 4x4, empty at (3, 0): the only legal first steps move the
        // tile at (2, 0) or (3, 1).
        let mut puzzle = Puzzle::new(4, 7).unwrap();
        let started = puzzle.start_shuffle(1).unwrap();

        assert_eq!(started.kind, MoveKind::Shuffle);
        assert_eq!(started.duration, Duration::from_millis(100));
        assert!([Coord::new(2, 0), Coord::new(3, 1)].contains(&started.from));
        assert_eq!(puzzle.shuffle_moves_remaining(), 0);

        assert_eq!(puzzle.animation_complete(), None);
        assert!(!puzzle.is_animating());
    }

    #[test]
    fn test_shuffle_runs_to_length() {
        let mut puzzle = Puzzle::new(4, 1234).unwrap();
        let first = puzzle.start_shuffle(20).unwrap();
        let rest = drive_to_idle(&mut puzzle);

        assert_eq!(1 + rest.len(), 20);
        assert!(rest.iter().all(|m| m.kind == MoveKind::Shuffle));
        assert_eq!(puzzle.shuffle_moves_remaining(), 0);
        assert_eq!(puzzle.history_count(), 20);
        assert!(!puzzle.is_animating());
        let _ = first;
    }

    #[test]
    fn test_shuffle_never_immediately_backtracks() {
        let mut puzzle = Puzzle::new(4, 99).unwrap();
        let mut moves = vec![puzzle.start_shuffle(50).unwrap()];
        moves.extend(drive_to_idle(&mut puzzle));
        assert_eq!(moves.len(), 50);

        for pair in moves.windows(2) {
            let step = pair[0].to - pair[0].from;
            let next = pair[1].to - pair[1].from;
            assert_ne!(next, -step, "shuffle undid the previous step");
        }
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let run = |seed| {
            let mut puzzle = Puzzle::new(4, seed).unwrap();
            let mut moves = vec![puzzle.start_shuffle(30).unwrap()];
            moves.extend(drive_to_idle(&mut puzzle));
            moves
        };

        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }

    #[test]
    fn test_shuffle_zero_length_is_noop() {
        let mut puzzle = Puzzle::new(4, 0).unwrap();
        assert_eq!(puzzle.start_shuffle(0), None);
        assert!(puzzle.is_solved());
        assert!(!puzzle.is_animating());
    }

    #[test]
    fn test_player_press_during_shuffle_keeps_both_durations() {
        let mut puzzle = Puzzle::new(4, 21).unwrap();
        puzzle.start_shuffle(3).unwrap();

        // Press a tile next to the empty cell; it queues behind the
        // in-flight shuffle move and drains first on completion.
        let empty = puzzle.board().empty_coord();
        let cell = if empty.y + 1 < 4 {
            Coord::new(empty.x, empty.y + 1)
        } else {
            Coord::new(empty.x, empty.y - 1)
        };
        assert_eq!(puzzle.press_cell(cell), None);
        let mut moves = drive_to_idle(&mut puzzle);
        assert_eq!(puzzle.shuffle_moves_remaining(), 0);

        moves.retain(|m| m.kind == MoveKind::Player);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].duration, Duration::from_millis(200));
    }

    // -------------------------------------------------------------------------
    // Undo tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_reverse_restores_exact_state() {
        let mut puzzle = Puzzle::new(4, 3).unwrap();
        let snapshot = puzzle.board().clone();

        for cell in [Coord::new(3, 1), Coord::new(2, 1), Coord::new(2, 0)] {
            puzzle.press_cell(cell);
            drive_to_idle(&mut puzzle);
        }
        assert_ne!(*puzzle.board(), snapshot);
        assert_eq!(puzzle.history_count(), 3);

        let first = puzzle.reverse_all().unwrap();
        assert_eq!(first.kind, MoveKind::Undo);
        assert_eq!(first.duration, Duration::from_millis(100));
        let rest = drive_to_idle(&mut puzzle);

        assert_eq!(1 + rest.len(), 3);
        assert_eq!(*puzzle.board(), snapshot);
        assert!(!puzzle.is_reversing());
        assert_eq!(puzzle.history_count(), 0);
    }

    #[test]
    fn test_reverse_after_shuffle_solves_board() {
        let mut puzzle = Puzzle::new(5, 77).unwrap();
        puzzle.start_shuffle(40).unwrap();
        drive_to_idle(&mut puzzle);
        assert_eq!(puzzle.history_count(), 40);

        puzzle.reverse_all().unwrap();
        drive_to_idle(&mut puzzle);

        assert!(puzzle.is_solved());
        assert_eq!(puzzle.history_count(), 0);
        assert!(!puzzle.is_reversing());
    }

    #[test]
    fn test_reverse_does_not_re_record() {
        let mut puzzle = Puzzle::new(4, 11).unwrap();
        puzzle.press_cell(Coord::new(3, 1));
        drive_to_idle(&mut puzzle);
        assert_eq!(puzzle.history_count(), 1);

        puzzle.reverse_all().unwrap();
        drive_to_idle(&mut puzzle);

        assert_eq!(puzzle.history_count(), 0);
        // A second reversal has nothing left to do.
        assert_eq!(puzzle.reverse_all(), None);
    }

    #[test]
    fn test_discard_pending_cancels_unapplied_input_only() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        let started = puzzle.press_cell(Coord::new(3, 1)).unwrap();
        puzzle.press_cell(Coord::new(2, 1));
        puzzle.press_cell(Coord::new(2, 0));
        assert_eq!(puzzle.pending_count(), 2);

        let discarded = puzzle.discard_pending();
        assert_eq!(discarded.len(), 2);
        assert_eq!(puzzle.pending_count(), 0);
        // The in-flight move still finishes; nothing new starts.
        assert!(puzzle.is_animating());
        assert_eq!(puzzle.animation_complete(), None);
        assert_eq!(puzzle.board().empty_coord(), started.from);
    }

    #[test]
    fn test_discard_pending_when_empty() {
        let mut puzzle = Puzzle::new(4, 42).unwrap();
        assert!(puzzle.discard_pending().is_empty());
    }

    // -------------------------------------------------------------------------
    // Reset test
    // -------------------------------------------------------------------------

    #[test]
    fn test_reset_matches_fresh_puzzle() {
        let mut puzzle = Puzzle::new(4, 8).unwrap();
        puzzle.start_shuffle(15).unwrap();
        drive_to_idle(&mut puzzle);

        puzzle.reset(8);
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.history_count(), 0);
        assert_eq!(puzzle.shuffle_moves_remaining(), 0);

        // Identical seeds shuffle identically after the reset.
        let mut fresh = Puzzle::new(4, 8).unwrap();
        puzzle.start_shuffle(10).unwrap();
        fresh.start_shuffle(10).unwrap();
        drive_to_idle(&mut puzzle);
        drive_to_idle(&mut fresh);
        assert_eq!(puzzle.board(), fresh.board());
    }

    // -------------------------------------------------------------------------
    // Display test
    // -------------------------------------------------------------------------

    #[test]
    fn test_debug_format() {
        let puzzle = Puzzle::new(4, 42).unwrap();
        let debug = format!("{puzzle:?}");
        assert!(debug.contains("Puzzle"));
        assert!(debug.contains("state: Idle"));
    }
}
