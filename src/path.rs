//! Immutable ordered sequences of grid cells.

use crate::error::{PathError, Result};
use crate::grid::{CellIndex, Grid};
use glam::IVec2;

/// An ordered sequence of cell indices on a [`Grid`].
///
/// A closed path is a loop: the edge from the last stored position back to
/// the first is implied and not stored. The same cell may appear more than
/// once at non-adjacent positions.
///
/// Paths are immutable after construction. Operations that reorder a path,
/// like [`rotated`](Self::rotated), return a new one.
#[derive(Debug)]
pub struct Path<'g, G: Grid + ?Sized> {
    grid: &'g G,
    positions: Vec<CellIndex>,
    closed: bool,
    length: f64,
}

impl<G: Grid + ?Sized> Clone for Path<'_, G> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            positions: self.positions.clone(),
            closed: self.closed,
            length: self.length,
        }
    }
}

impl<'g, G: Grid + ?Sized> Path<'g, G> {
    /// Creates a path whose [`path_length`](Self::path_length) is its stored
    /// position count.
    pub fn new(grid: &'g G, positions: Vec<CellIndex>, closed: bool) -> Result<Self> {
        let length = positions.len() as f64;
        Self::with_length(grid, positions, closed, length)
    }

    /// Creates a path with an explicit scalar length (e.g. a traversal cost).
    pub fn with_length(
        grid: &'g G,
        positions: Vec<CellIndex>,
        closed: bool,
        length: f64,
    ) -> Result<Self> {
        if positions.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(Self {
            grid,
            positions,
            closed,
            length,
        })
    }

    /// Number of stored positions.
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Number of logical positions: one more than [`count`](Self::count)
    /// for a closed path, accounting for the implied closing edge.
    pub fn position_count(&self) -> usize {
        if self.closed {
            self.count() + 1
        } else {
            self.count()
        }
    }

    /// True if the path is a loop.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The scalar length supplied at construction, or `count` by default.
    pub fn path_length(&self) -> f64 {
        self.length
    }

    /// The grid this path lives on.
    pub fn grid(&self) -> &'g G {
        self.grid
    }

    /// Width of the owning grid.
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    /// The stored cell indices, in order.
    pub fn positions(&self) -> &[CellIndex] {
        &self.positions
    }

    /// Cell index at stored position `index`.
    pub fn get(&self, index: usize) -> Result<CellIndex> {
        self.positions
            .get(index)
            .copied()
            .ok_or(PathError::IndexOutOfRange {
                index: index as isize,
                count: self.count(),
            })
    }

    /// First stored cell.
    pub fn first(&self) -> CellIndex {
        self.positions[0]
    }

    /// Last stored cell. For a loop this is the cell just before the
    /// implied closing edge.
    pub fn last(&self) -> CellIndex {
        self.positions[self.positions.len() - 1]
    }

    /// `(column, row)` of every stored position, in order.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.positions.iter().map(|&index| self.grid.cell(index))
    }

    /// Returns this loop re-anchored to start at stored position `anchor`.
    ///
    /// The result holds `positions[anchor]` followed by the remaining
    /// `count - 1` cells in their cyclic order. Grid and path length are
    /// carried over unchanged.
    pub fn rotated(&self, anchor: usize) -> Result<Self> {
        if !self.closed {
            return Err(PathError::NotClosed);
        }
        let count = self.count();
        if anchor >= count {
            return Err(PathError::IndexOutOfRange {
                index: anchor as isize,
                count,
            });
        }
        let positions = (0..count)
            .map(|offset| self.positions[(anchor + offset) % count])
            .collect();
        Self::with_length(self.grid, positions, true, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RectGrid;

    #[test]
    fn test_counts_and_default_length() {
        let grid = RectGrid::new(10, 10).unwrap();
        let open = Path::new(&grid, vec![20, 21, 22], false).unwrap();
        assert_eq!(open.count(), 3);
        assert_eq!(open.position_count(), 3);
        assert_eq!(open.path_length(), 3.0);

        let closed = Path::with_length(&grid, vec![0, 1, 11, 10], true, 7.5).unwrap();
        assert_eq!(closed.count(), 4);
        assert_eq!(closed.position_count(), 5);
        assert_eq!(closed.path_length(), 7.5);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let grid = RectGrid::new(10, 10).unwrap();
        assert!(matches!(
            Path::new(&grid, Vec::new(), false),
            Err(PathError::EmptyPath)
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        let grid = RectGrid::new(10, 10).unwrap();
        let path = Path::new(&grid, vec![5, 6], false).unwrap();
        assert_eq!(path.get(1).unwrap(), 6);
        assert!(matches!(
            path.get(2),
            Err(PathError::IndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_cells_use_grid_width() {
        let grid = RectGrid::new(10, 10).unwrap();
        let path = Path::new(&grid, vec![0, 1, 11], false).unwrap();
        let cells: Vec<IVec2> = path.cells().collect();
        assert_eq!(
            cells,
            vec![IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_rotated_keeps_cyclic_order() {
        let grid = RectGrid::new(10, 10).unwrap();
        let path = Path::with_length(&grid, vec![0, 1, 11, 10], true, 4.5).unwrap();
        let rotated = path.rotated(2).unwrap();
        assert_eq!(rotated.positions(), &[11, 10, 0, 1]);
        assert!(rotated.is_closed());
        assert_eq!(rotated.path_length(), 4.5);

        assert!(matches!(
            path.rotated(4),
            Err(PathError::IndexOutOfRange { index: 4, count: 4 })
        ));

        let open = Path::new(&grid, vec![0, 1], false).unwrap();
        assert!(matches!(open.rotated(0), Err(PathError::NotClosed)));
    }
}
