//! Grid collaborator: cell-index arithmetic and edge-direction lookup.
//!
//! The engine only needs two things from a grid: its width, and the
//! direction of travel between two cell indices. Both are expressed by the
//! [`Grid`] trait. [`RectGrid`] is a bounded, planar implementation.
//!
//! Cells are numbered row-major: `index = row * width + column`. Rows grow
//! towards [`DirectionFlags::SOUTH`], columns towards [`DirectionFlags::EAST`].
//! Grids never wrap; stepping off the east edge of a row is not an edge.

use crate::error::{PathError, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Index of a single cell on a grid.
pub type CellIndex = i32;

/// A set of compass directions stored as a bitset.
///
/// [`edge_direction`] yields at most one flag. OR-ing the incoming and
/// outgoing flags of a vertex tells whether the path runs straight through
/// it ([`is_straight`](Self::is_straight)) or turns
/// ([`is_turn`](Self::is_turn)).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionFlags(u8);

impl DirectionFlags {
    /// No adjacency.
    pub const NONE: Self = Self(0);
    /// Towards the previous row (`index - width`).
    pub const NORTH: Self = Self(1);
    /// Towards the next column (`index + 1`).
    pub const EAST: Self = Self(1 << 1);
    /// Towards the next row (`index + width`).
    pub const SOUTH: Self = Self(1 << 2);
    /// Towards the previous column (`index - 1`).
    pub const WEST: Self = Self(1 << 3);

    /// Both horizontal directions.
    pub const HORIZONTAL: Self = Self(Self::EAST.0 | Self::WEST.0);
    /// Both vertical directions.
    pub const VERTICAL: Self = Self(Self::NORTH.0 | Self::SOUTH.0);

    /// Create a flag set from raw bits. Bits above the four directions are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (Self::HORIZONTAL.0 | Self::VERTICAL.0))
    }

    /// The underlying bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if no direction is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every direction in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if the set is exactly one axis in both senses (`EAST|WEST` or
    /// `NORTH|SOUTH`): two collinear edges meeting at a vertex.
    pub const fn is_straight(self) -> bool {
        self.0 == Self::HORIZONTAL.0 || self.0 == Self::VERTICAL.0
    }

    /// True if the set holds exactly one horizontal and one vertical flag:
    /// two perpendicular edges meeting at a vertex.
    pub const fn is_turn(self) -> bool {
        (self.0 & Self::HORIZONTAL.0).count_ones() == 1
            && (self.0 & Self::VERTICAL.0).count_ones() == 1
            && self.0.count_ones() == 2
    }
}

impl BitOr for DirectionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirectionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DirectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (flag, c) in [
            (Self::NORTH, 'N'),
            (Self::EAST, 'E'),
            (Self::SOUTH, 'S'),
            (Self::WEST, 'W'),
        ] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Direction of travel from `from` to `to` on a planar grid `width` columns wide.
///
/// Returns a single flag when the two cells share an edge, and
/// [`DirectionFlags::NONE`] otherwise: for equal indices, for diagonal or
/// distant cells, for a non-positive `width`, and for `±1` steps that would
/// cross from the end of one row to the start of another.
pub fn edge_direction(from: CellIndex, to: CellIndex, width: i32) -> DirectionFlags {
    if width <= 0 {
        return DirectionFlags::NONE;
    }
    let delta = i64::from(to) - i64::from(from);
    let row_step = i64::from(width);
    let same_row = from.div_euclid(width) == to.div_euclid(width);
    match delta {
        1 if same_row => DirectionFlags::EAST,
        -1 if same_row => DirectionFlags::WEST,
        d if d == row_step => DirectionFlags::SOUTH,
        d if d == -row_step => DirectionFlags::NORTH,
        _ => DirectionFlags::NONE,
    }
}

/// `(column, row)` of `index` on a grid `width` columns wide.
pub fn cell_of(index: CellIndex, width: i32) -> IVec2 {
    IVec2::new(index.rem_euclid(width), index.div_euclid(width))
}

/// The grid a [`Path`](crate::Path) lives on.
///
/// Implementors must be immutable for as long as paths borrow them.
pub trait Grid {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Direction of travel between two cells. Defaults to the planar
    /// [`edge_direction`] rule.
    fn edge_direction(&self, from: CellIndex, to: CellIndex) -> DirectionFlags {
        edge_direction(from, to, self.width())
    }

    /// `(column, row)` of a cell index.
    fn cell(&self, index: CellIndex) -> IVec2 {
        cell_of(index, self.width())
    }
}

/// A bounded rectangular grid of `width * height` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectGrid {
    width: i32,
    height: i32,
}

impl RectGrid {
    /// Creates a grid; both dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(PathError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `index` names a cell of this grid.
    pub fn contains(&self, index: CellIndex) -> bool {
        (0..self.width * self.height).contains(&index)
    }

    /// Cell index of `(column, row)`, or `None` when outside the grid.
    pub fn index_of(&self, cell: IVec2) -> Option<CellIndex> {
        let in_bounds =
            (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y);
        in_bounds.then(|| cell.y * self.width + cell.x)
    }
}

impl Grid for RectGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn edge_direction(&self, from: CellIndex, to: CellIndex) -> DirectionFlags {
        if !self.contains(from) || !self.contains(to) {
            return DirectionFlags::NONE;
        }
        edge_direction(from, to, self.width)
    }
}
