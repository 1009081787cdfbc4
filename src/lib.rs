//! # gridturtle
//!
//! Encodes paths on a rectangular grid as *turtle strings* and answers
//! structural questions about them.
//!
//! A [`Path`] is an ordered list of cell indices, open or closed. The
//! [`TurtleStringBuilder`] classifies every vertex as Straight, Left, Right or
//! Invalid and writes one symbol per vertex. [`TurtleQuery`] then finds
//! U-turns, straightaways, windowed straight/turn ratios and longest runs,
//! treating closed loops as circular. [`PathMetrics`] and [`LoopMetrics`]
//! bundle a path with its derived string and statistics; loops can be
//! re-anchored at any original position.
//!
//! ```
//! use gridturtle::{Path, PathMetrics, RectGrid, TurtleConfig};
//!
//! let grid = RectGrid::new(10, 10)?;
//! let path = Path::new(&grid, vec![20, 21, 22, 23, 24], false)?;
//! let metrics = PathMetrics::new(path, TurtleConfig::default());
//! assert_eq!(metrics.turtle_string(), "SSS");
//! assert_eq!(metrics.longest_straight(), 3);
//! # Ok::<(), gridturtle::PathError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod path;
pub mod query;
pub mod turtle;

pub use builder::*;
pub use config::*;
pub use error::PathError;
pub use grid::*;
pub use metrics::*;
pub use path::*;
pub use query::*;
pub use turtle::*;
