//! # Sliding Puzzle WebAssembly Bindings
//!
//! This crate wraps the puzzle engine in a class-like API for web
//! frontends. JavaScript owns the tweening: every input method returns the
//! move the engine started (or `null`), the page animates the tile between
//! the two cells, then calls `animationComplete()` and receives the next
//! chained move, if any.

use serde::Serialize;
use slide_puzzle_core::{Coord, MoveKind, MoveStarted, Puzzle};
use wasm_bindgen::prelude::*;

/// A started move, serialized for JavaScript.
#[derive(Serialize)]
pub struct JsMove {
    /// Slice index of the moved tile.
    pub tile: u32,
    /// "player", "shuffle" or "undo".
    pub kind: &'static str,
    /// Cell the tile moved out of (now the empty cell).
    pub from_x: i32,
    pub from_y: i32,
    /// Cell the tile now occupies; the tween target.
    pub to_x: i32,
    pub to_y: i32,
    /// Tween duration in milliseconds.
    pub duration_ms: f64,
}

impl JsMove {
    fn from_move(started: MoveStarted) -> JsMove {
        JsMove {
            tile: started.tile.index() as u32,
            kind: match started.kind {
                MoveKind::Player => "player",
                MoveKind::Shuffle => "shuffle",
                MoveKind::Undo => "undo",
            },
            from_x: started.from.x,
            from_y: started.from.y,
            to_x: started.to.x,
            to_y: started.to.y,
            duration_ms: started.duration.as_secs_f64() * 1000.0,
        }
    }
}

/// WebAssembly wrapper for the sliding-tile puzzle.
#[wasm_bindgen]
pub struct WasmPuzzle {
    puzzle: Puzzle,
}

#[wasm_bindgen]
impl WasmPuzzle {
    /// Create a solved puzzle of the given size with a deterministic seed.
    ///
    /// Fails for boards smaller than 2x2.
    #[wasm_bindgen(constructor)]
    pub fn new(size: u32, seed: u64) -> Result<WasmPuzzle, JsValue> {
        let puzzle = Puzzle::new(size, seed).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(WasmPuzzle { puzzle })
    }

    /// Reset to the solved layout with a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.puzzle.reset(seed);
    }

    /// Player pressed the tile with the given slice index.
    ///
    /// Returns the started move, or `null` when the press was queued,
    /// dropped, or the index is unknown.
    #[wasm_bindgen(js_name = pressTile)]
    pub fn press_tile(&mut self, index: u32) -> JsValue {
        let Some(tile) = self.puzzle.board().tile_from_index(index as usize) else {
            return JsValue::NULL;
        };
        to_js(self.puzzle.press_tile(tile))
    }

    /// Player pressed the cell at `(x, y)`.
    #[wasm_bindgen(js_name = pressCell)]
    pub fn press_cell(&mut self, x: i32, y: i32) -> JsValue {
        to_js(self.puzzle.press_cell(Coord::new(x, y)))
    }

    /// The page's tween for the in-flight move finished.
    ///
    /// Returns the next started move (queued input, shuffle chain or undo
    /// chain), or `null` once everything is idle.
    #[wasm_bindgen(js_name = animationComplete)]
    pub fn animation_complete(&mut self) -> JsValue {
        to_js(self.puzzle.animation_complete())
    }

    /// Begin a shuffle of `length` randomized legal moves.
    #[wasm_bindgen(js_name = startShuffle)]
    pub fn start_shuffle(&mut self, length: u32) -> JsValue {
        to_js(self.puzzle.start_shuffle(length))
    }

    /// Undo every recorded move, most recent first.
    #[wasm_bindgen(js_name = reverseAll)]
    pub fn reverse_all(&mut self) -> JsValue {
        to_js(self.puzzle.reverse_all())
    }

    /// Cancel queued-but-unapplied input. Returns the slice indices of the
    /// discarded tiles so the page can stop their pressed effects.
    #[wasm_bindgen(js_name = discardPending)]
    pub fn discard_pending(&mut self) -> Vec<u32> {
        self.puzzle
            .discard_pending()
            .into_iter()
            .map(|tile| tile.index() as u32)
            .collect()
    }

    /// Current board as slice indices in row-major order.
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> Vec<u32> {
        let board = self.puzzle.board();
        let n = board.size() as i32;
        let mut cells = Vec::with_capacity((n * n) as usize);
        for y in 0..n {
            for x in 0..n {
                let tile = board
                    .tile_at(Coord::new(x, y))
                    .expect("coordinate within bounds");
                cells.push(tile.index() as u32);
            }
        }
        cells
    }

    /// Slice index of the (invisible) empty tile.
    #[wasm_bindgen(js_name = emptyTile)]
    pub fn empty_tile(&self) -> u32 {
        self.puzzle.board().empty_tile().index() as u32
    }

    pub fn size(&self) -> u32 {
        self.puzzle.size()
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.puzzle.is_animating()
    }

    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    #[wasm_bindgen(js_name = isReversing)]
    pub fn is_reversing(&self) -> bool {
        self.puzzle.is_reversing()
    }

    #[wasm_bindgen(js_name = shuffleMovesRemaining)]
    pub fn shuffle_moves_remaining(&self) -> u32 {
        self.puzzle.shuffle_moves_remaining()
    }

    #[wasm_bindgen(js_name = pendingCount)]
    pub fn pending_count(&self) -> u32 {
        self.puzzle.pending_count() as u32
    }
}

/// Serialize a started move for JavaScript, `null` when nothing started.
fn to_js(started: Option<MoveStarted>) -> JsValue {
    match started {
        Some(mv) => serde_wasm_bindgen::to_value(&JsMove::from_move(mv)).unwrap_or(JsValue::NULL),
        None => JsValue::NULL,
    }
}
