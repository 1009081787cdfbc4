//! Configuration shared by the turtle-string builder and the query engine.

use crate::turtle::TurtleAlphabet;
use serde::{Deserialize, Serialize};

/// Upper clip applied to windows of
/// [`TurtleQuery::speed_agility_ratio`](crate::TurtleQuery::speed_agility_ratio)
/// on open turtle strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowClip {
    /// Windows may reach the last symbol (`len - 1`).
    #[default]
    Inclusive,
    /// Windows stop one symbol short of the end (`len - 2`), so the last
    /// symbol never contributes. Kept for compatibility with ratios
    /// computed by older tooling.
    ExcludeLast,
}

/// Configuration for turtle-string production and queries.
///
/// A builder and a query engine must share the same alphabet for the
/// strings one produces to mean anything to the other. Build one config
/// at startup and hand copies to both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Characters used for Straight / Left / Right / Invalid.
    pub alphabet: TurtleAlphabet,
    /// Upper window clip for open-string ratios.
    pub window_clip: WindowClip,
}

impl TurtleConfig {
    /// Replaces the alphabet (builder pattern).
    pub fn with_alphabet(mut self, alphabet: TurtleAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Replaces the window clip (builder pattern).
    pub fn with_window_clip(mut self, window_clip: WindowClip) -> Self {
        self.window_clip = window_clip;
        self
    }
}
