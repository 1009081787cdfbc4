//! Derived, read-only snapshots of a path: turtle string, endpoints and run
//! statistics.
//!
//! [`PathMetrics`] is computed once from a [`Path`]. [`LoopMetrics`] does the
//! same for a closed loop and can re-anchor the loop at any of its original
//! positions, recomputing everything.

use crate::builder::TurtleStringBuilder;
use crate::config::TurtleConfig;
use crate::error::{PathError, Result};
use crate::grid::{CellIndex, Grid};
use crate::path::Path;
use crate::query::{SymbolCounts, TurtleQuery};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Plain-data view of a [`PathMetrics`] snapshot, detached from the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub closed: bool,
    pub path_length: f64,
    /// `(column, row)` of the first stored cell.
    pub start: IVec2,
    /// `(column, row)` of the last stored cell.
    pub end: IVec2,
    pub turtle: String,
    pub longest_straight: usize,
    pub longest_turn: usize,
    pub counts: SymbolCounts,
}

/// A path together with its turtle string and summary statistics.
#[derive(Debug)]
pub struct PathMetrics<'g, G: Grid + ?Sized> {
    path: Path<'g, G>,
    config: TurtleConfig,
    turtle: String,
    start: IVec2,
    end: IVec2,
    longest_straight: usize,
    longest_turn: usize,
    counts: SymbolCounts,
}

impl<'g, G: Grid + ?Sized> PathMetrics<'g, G> {
    /// Builds the turtle string of `path` and derives all statistics from it.
    /// The path's closed flag is passed through to every query.
    pub fn new(path: Path<'g, G>, config: TurtleConfig) -> Self {
        let turtle = TurtleStringBuilder::new(config).build(&path);
        let query = TurtleQuery::new(config);
        let closed = path.is_closed();
        let grid = path.grid();

        Self {
            start: grid.cell(path.first()),
            end: grid.cell(path.last()),
            longest_straight: query.maximum_consecutive_straights(&turtle, closed),
            longest_turn: query.maximum_consecutive_turns(&turtle, closed),
            counts: query.counts(&turtle),
            turtle,
            config,
            path,
        }
    }

    pub fn path(&self) -> &Path<'g, G> {
        &self.path
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// The turtle string, written with the configured alphabet.
    pub fn turtle_string(&self) -> &str {
        &self.turtle
    }

    /// `(column, row)` of the first stored cell.
    pub fn start_cell(&self) -> IVec2 {
        self.start
    }

    /// `(column, row)` of the last stored cell.
    pub fn end_cell(&self) -> IVec2 {
        self.end
    }

    /// Longest run of Straight symbols.
    pub fn longest_straight(&self) -> usize {
        self.longest_straight
    }

    /// Longest run of Left/Right symbols.
    pub fn longest_turn(&self) -> usize {
        self.longest_turn
    }

    pub fn counts(&self) -> SymbolCounts {
        self.counts
    }

    /// A query engine using the same alphabet the turtle string was built with.
    pub fn query(&self) -> TurtleQuery {
        TurtleQuery::new(self.config)
    }

    /// Grid cell at stored path position `index`.
    pub fn grid_index(&self, index: usize) -> Result<CellIndex> {
        self.path.get(index)
    }

    /// Grid cell at a fraction of the way along the path.
    ///
    /// The stored position is `round(fraction * count)` clamped to
    /// `[0, count - 1]`, so out-of-range fractions resolve to an endpoint.
    /// Halves round away from zero; NaN resolves to the first cell.
    pub fn grid_index_at_fraction(&self, fraction: f64) -> CellIndex {
        let positions = self.path.positions();
        let scaled = (fraction * positions.len() as f64).round();
        // `max` maps NaN to 0.0 and the cast saturates at usize::MAX.
        let index = (scaled.max(0.0) as usize).min(positions.len() - 1);
        positions[index]
    }

    pub fn summary(&self) -> PathSummary {
        PathSummary {
            closed: self.path.is_closed(),
            path_length: self.path.path_length(),
            start: self.start,
            end: self.end,
            turtle: self.turtle.clone(),
            longest_straight: self.longest_straight,
            longest_turn: self.longest_turn,
            counts: self.counts,
        }
    }
}

/// [`PathMetrics`] for a closed loop with a movable anchor.
///
/// The loop as first supplied is kept untouched. Every
/// [`rotate`](Self::rotate) re-anchors relative to that original ordering,
/// so rotations are absolute: rotating to `k` and then to `0` restores the
/// original turtle string exactly.
#[derive(Debug)]
pub struct LoopMetrics<'g, G: Grid + ?Sized> {
    original: Path<'g, G>,
    anchor: usize,
    metrics: PathMetrics<'g, G>,
}

impl<'g, G: Grid + ?Sized> LoopMetrics<'g, G> {
    /// Metrics for `path` anchored at its first stored position.
    pub fn new(path: Path<'g, G>, config: TurtleConfig) -> Result<Self> {
        Self::with_anchor(path, 0, config)
    }

    /// Metrics for `path` anchored at stored position `anchor`.
    ///
    /// Fails with [`PathError::NotClosed`] for an open path and
    /// [`PathError::IndexOutOfRange`] for an anchor outside the loop.
    pub fn with_anchor(path: Path<'g, G>, anchor: usize, config: TurtleConfig) -> Result<Self> {
        if !path.is_closed() {
            return Err(PathError::NotClosed);
        }
        let working = path.rotated(anchor)?;
        Ok(Self {
            metrics: PathMetrics::new(working, config),
            original: path,
            anchor,
        })
    }

    /// Re-anchors the loop so it starts at original position `anchor`, then
    /// recomputes the turtle string and statistics.
    ///
    /// On error the current anchor and metrics are left unchanged.
    pub fn rotate(&mut self, anchor: usize) -> Result<()> {
        let working = self.original.rotated(anchor)?;
        self.metrics = PathMetrics::new(working, self.metrics.config);
        tracing::debug!(
            from = self.anchor,
            to = anchor,
            count = self.original.count(),
            "re-anchored loop"
        );
        self.anchor = anchor;
        Ok(())
    }

    /// Original position the working loop currently starts at.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// The loop as first supplied, never reordered.
    pub fn original(&self) -> &Path<'g, G> {
        &self.original
    }

    /// Metrics of the loop as currently anchored.
    pub fn metrics(&self) -> &PathMetrics<'g, G> {
        &self.metrics
    }
}
