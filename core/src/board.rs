//! Grid geometry and the authoritative tile board.
//!
//! The board is a bijection between cells and tiles: every cell holds exactly
//! one tile and every tile occupies exactly one cell. The empty slot is
//! itself a regular tile (frontends simply do not draw it), so a move is
//! nothing more than swapping one tile with the empty tile.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A 2D grid position, or an offset between two positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ZERO: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Squared Euclidean distance to `other`.
    pub fn sq_distance(self, other: Coord) -> i32 {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }

    /// Two cells are adjacent when exactly one axis differs by one.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.sq_distance(other) == 1
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identity of a tile: its index in the solved row-major layout.
///
/// The index doubles as the image-slice index a frontend uses to texture the
/// tile. Ids are handed out by the board; use [`Board::tile_from_index`] to
/// turn a raw frontend integer back into one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u16);

impl TileId {
    /// Slice index of this tile in the solved layout.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// N x N mapping between coordinates and tiles, plus the empty-slot tracker.
///
/// Holds two mutually-inverse maps: `cells` (cell -> tile, row-major) and
/// `coords` (tile -> cell). Every mutation goes through [`Board::try_move`],
/// which swaps matching entries in both, so the bijection can never break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: i32,
    /// Cell -> tile, row-major (`index = y * size + x`).
    cells: Vec<TileId>,
    /// Tile -> cell, indexed by `TileId::index`.
    coords: Vec<Coord>,
    empty: TileId,
}

impl Board {
    /// Solved layout. The empty tile starts at `(size - 1, 0)`.
    ///
    /// Callers validate `size >= 2`; see [`crate::Puzzle::with_config`].
    pub(crate) fn new(size: u32) -> Board {
        let n = size as i32;
        let count = (n * n) as usize;
        let mut cells = Vec::with_capacity(count);
        let mut coords = Vec::with_capacity(count);
        for y in 0..n {
            for x in 0..n {
                cells.push(TileId((y * n + x) as u16));
                coords.push(Coord::new(x, y));
            }
        }
        Board {
            size: n,
            cells,
            coords,
            empty: TileId((n - 1) as u16),
        }
    }

    fn idx(&self, coord: Coord) -> usize {
        (coord.y * self.size + coord.x) as usize
    }

    /// Tiles per side.
    pub fn size(&self) -> u32 {
        self.size as u32
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.size && coord.y >= 0 && coord.y < self.size
    }

    /// Tile occupying `coord`, or `None` out of bounds.
    pub fn tile_at(&self, coord: Coord) -> Option<TileId> {
        if self.in_bounds(coord) {
            Some(self.cells[self.idx(coord)])
        } else {
            None
        }
    }

    /// Current cell of `tile`, or `None` for an id this board never issued.
    pub fn coord_of(&self, tile: TileId) -> Option<Coord> {
        self.coords.get(tile.index()).copied()
    }

    /// Validate a raw tile index coming from a frontend.
    pub fn tile_from_index(&self, index: usize) -> Option<TileId> {
        if index < self.coords.len() {
            Some(TileId(index as u16))
        } else {
            None
        }
    }

    pub fn empty_tile(&self) -> TileId {
        self.empty
    }

    pub fn empty_coord(&self) -> Coord {
        self.coords[self.empty.index()]
    }

    /// Cell `tile` occupies in the solved layout.
    pub fn home_coord(&self, tile: TileId) -> Coord {
        let index = tile.index() as i32;
        Coord::new(index % self.size, index / self.size)
    }

    /// True when every tile sits on its home cell.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, tile)| tile.index() == i)
    }

    /// Try to slide `tile` into the empty cell.
    ///
    /// Succeeds only when the tile is adjacent to the empty cell. On success
    /// both map entries and both coordinates are swapped and the tile's new
    /// cell (the empty tile's previous one) is returned as the animation
    /// target. On failure the board is untouched.
    pub(crate) fn try_move(&mut self, tile: TileId) -> Option<Coord> {
        let from = self.coord_of(tile)?;
        let target = self.empty_coord();
        if !from.is_adjacent(target) {
            return None;
        }
        let from_idx = self.idx(from);
        let target_idx = self.idx(target);
        self.cells.swap(from_idx, target_idx);
        self.coords[tile.index()] = target;
        self.coords[self.empty.index()] = from;
        Some(target)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line: String = std::iter::repeat("+----")
            .take(self.size as usize)
            .chain(std::iter::once("+"))
            .collect();
        writeln!(f, "{line}")?;
        for y in 0..self.size {
            write!(f, "|")?;
            for x in 0..self.size {
                let tile = self.cells[self.idx(Coord::new(x, y))];
                if tile == self.empty {
                    write!(f, "    |")?;
                } else {
                    write!(f, "{:^4}|", tile.index() + 1)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
