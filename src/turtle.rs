//! Turtle symbols, the alphabet they are rendered with, and the turn classifier.

use crate::error::{PathError, Result};
use crate::grid::{CellIndex, Grid};
use crate::path::Path;
use serde::{Deserialize, Serialize};

/// Local geometry of a path at one vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Incoming and outgoing edges are collinear.
    Straight,
    /// The path turns left.
    Left,
    /// The path turns right.
    Right,
    /// The neighbouring cells are not grid-adjacent to this one, or the
    /// path doubles back on itself.
    Invalid,
}

impl Turn {
    /// True for [`Turn::Left`] and [`Turn::Right`].
    pub fn is_turn(self) -> bool {
        matches!(self, Turn::Left | Turn::Right)
    }
}

/// The four characters a turtle string is written with.
///
/// Producer and consumer of a turtle string must agree on the alphabet, so it
/// travels inside [`TurtleConfig`](crate::TurtleConfig) rather than living in
/// global state. Symbols are distinct ASCII characters, which keeps string
/// byte offsets equal to symbol positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[char; 4]", into = "[char; 4]")]
pub struct TurtleAlphabet {
    straight: char,
    left: char,
    right: char,
    invalid: char,
}

impl Default for TurtleAlphabet {
    fn default() -> Self {
        Self {
            straight: 'S',
            left: 'L',
            right: 'R',
            invalid: 'X',
        }
    }
}

impl TurtleAlphabet {
    /// Creates an alphabet, rejecting duplicate or non-ASCII symbols.
    pub fn new(straight: char, left: char, right: char, invalid: char) -> Result<Self> {
        let symbols = [straight, left, right, invalid];
        if let Some(c) = symbols.iter().find(|c| !c.is_ascii()) {
            return Err(PathError::InvalidAlphabet(format!(
                "symbol {c:?} is not ASCII"
            )));
        }
        for (i, a) in symbols.iter().enumerate() {
            if symbols[i + 1..].contains(a) {
                return Err(PathError::InvalidAlphabet(format!(
                    "symbol {a:?} is used more than once"
                )));
            }
        }
        Ok(Self {
            straight,
            left,
            right,
            invalid,
        })
    }

    pub fn straight(&self) -> char {
        self.straight
    }

    pub fn left(&self) -> char {
        self.left
    }

    pub fn right(&self) -> char {
        self.right
    }

    pub fn invalid(&self) -> char {
        self.invalid
    }

    /// Character for `turn`.
    pub fn symbol(&self, turn: Turn) -> char {
        match turn {
            Turn::Straight => self.straight,
            Turn::Left => self.left,
            Turn::Right => self.right,
            Turn::Invalid => self.invalid,
        }
    }

    /// Inverse of [`symbol`](Self::symbol); `None` for characters outside the alphabet.
    pub fn turn_of(&self, c: char) -> Option<Turn> {
        match c {
            c if c == self.straight => Some(Turn::Straight),
            c if c == self.left => Some(Turn::Left),
            c if c == self.right => Some(Turn::Right),
            c if c == self.invalid => Some(Turn::Invalid),
            _ => None,
        }
    }

    /// Writes `turns` out as a turtle string.
    pub fn render(&self, turns: &[Turn]) -> String {
        turns.iter().map(|&t| self.symbol(t)).collect()
    }
}

impl TryFrom<[char; 4]> for TurtleAlphabet {
    type Error = PathError;

    fn try_from([straight, left, right, invalid]: [char; 4]) -> Result<Self> {
        Self::new(straight, left, right, invalid)
    }
}

impl From<TurtleAlphabet> for [char; 4] {
    fn from(a: TurtleAlphabet) -> Self {
        [a.straight, a.left, a.right, a.invalid]
    }
}

/// Classifies the vertex at stored position `index` of `path`.
///
/// When `is_loop` is set, the neighbours of the first and last positions
/// wrap around the stored sequence. Otherwise the endpoints of the path
/// have no turn, and asking for one fails with
/// [`PathError::IndexOutOfRange`] naming the missing neighbour.
pub fn classify_at<G: Grid + ?Sized>(
    path: &Path<'_, G>,
    index: usize,
    is_loop: bool,
) -> Result<Turn> {
    let count = path.count();
    if index >= count {
        return Err(PathError::IndexOutOfRange {
            index: index as isize,
            count,
        });
    }
    let prior = match index.checked_sub(1) {
        Some(prior) => prior,
        None if is_loop => count - 1,
        None => return Err(PathError::IndexOutOfRange { index: -1, count }),
    };
    let next = match index + 1 {
        next if next < count => next,
        _ if is_loop => 0,
        next => {
            return Err(PathError::IndexOutOfRange {
                index: next as isize,
                count,
            });
        }
    };
    Ok(classify(path.grid(), path.positions(), prior, index, next))
}

/// Turn at `positions[at]`, entered from `positions[prior]` and left towards
/// `positions[next]`. All three indices must be in bounds.
pub(crate) fn classify<G: Grid + ?Sized>(
    grid: &G,
    positions: &[CellIndex],
    prior: usize,
    at: usize,
    next: usize,
) -> Turn {
    let before = positions[prior];
    let here = positions[at];
    let after = positions[next];

    // Both edges are looked up pointing into `here`.
    let combined = grid.edge_direction(before, here) | grid.edge_direction(after, here);

    if combined.is_straight() {
        Turn::Straight
    } else if combined.is_turn() {
        // Handedness from (|d_in| - 2) * d_in * d_out: a column step has
        // magnitude 1, a row step has magnitude `width`. Evaluated on signs
        // only, which is exact and cannot overflow.
        let delta_in = i64::from(here) - i64::from(before);
        let delta_out = i64::from(after) - i64::from(here);
        let test = (delta_in.abs() - 2).signum() * delta_in.signum() * delta_out.signum();
        if test < 0 { Turn::Left } else { Turn::Right }
    } else {
        Turn::Invalid
    }
}
