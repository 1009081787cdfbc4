//! Builder that walks a [`Path`] and writes its turtle string.
//!
//! The entry point is [`TurtleStringBuilder`]. Configure it with a
//! [`TurtleConfig`], then call [`TurtleStringBuilder::build`] for the rendered
//! string or [`TurtleStringBuilder::turns`] for the raw symbols.

use crate::config::TurtleConfig;
use crate::grid::Grid;
use crate::path::Path;
use crate::turtle::{Turn, classify};

/// Produces turtle strings for paths.
#[derive(Clone, Debug, Default)]
pub struct TurtleStringBuilder {
    config: TurtleConfig,
}

impl TurtleStringBuilder {
    /// Creates a builder that renders with `config.alphabet`.
    pub fn new(config: TurtleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Classifies every vertex of `path` that has a defined turn.
    ///
    /// # Open paths
    ///
    /// Both endpoints are skipped, giving `count - 2` symbols for positions
    /// `1..count-1`. Paths of fewer than three cells give none.
    ///
    /// # Closed paths
    ///
    /// Every stored position is classified, giving `count` symbols. The
    /// first position is entered from the last, and the last leaves towards
    /// the first.
    ///
    /// A single-cell path has no edges and yields no symbols either way.
    pub fn turns<G: Grid + ?Sized>(&self, path: &Path<'_, G>) -> Vec<Turn> {
        let grid = path.grid();
        let positions = path.positions();
        let count = positions.len();

        let turns: Vec<Turn> = if count < 2 {
            Vec::new()
        } else if path.is_closed() {
            (0..count)
                .map(|i| classify(grid, positions, (i + count - 1) % count, i, (i + 1) % count))
                .collect()
        } else {
            (1..count - 1)
                .map(|i| classify(grid, positions, i - 1, i, i + 1))
                .collect()
        };

        let invalid = turns.iter().filter(|&&t| t == Turn::Invalid).count();
        if invalid > 0 {
            tracing::debug!(
                invalid,
                count,
                closed = path.is_closed(),
                "path has vertices whose neighbours are not grid-adjacent"
            );
        }
        turns
    }

    /// Renders the turtle string of `path` with the configured alphabet.
    pub fn build<G: Grid + ?Sized>(&self, path: &Path<'_, G>) -> String {
        let turtle = self.config.alphabet.render(&self.turns(path));
        tracing::trace!(%turtle, closed = path.is_closed(), "built turtle string");
        turtle
    }
}
