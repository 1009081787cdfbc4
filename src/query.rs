//! Structural queries over turtle strings.
//!
//! [`TurtleQuery`] works on the rendered string alone; it never needs the
//! path or the grid. Every query takes an `is_closed` flag. For a closed
//! loop the string is circular and matches or runs may cross from its last
//! symbol back to its first.
//!
//! Positions are byte offsets into the string. Alphabet symbols are ASCII,
//! so for any string the builder produced these are symbol positions.

use crate::config::{TurtleConfig, WindowClip};
use crate::error::Result;
use crate::turtle::Turn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Number of occurrences of each symbol in a turtle string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCounts {
    pub straight: usize,
    pub left: usize,
    pub right: usize,
    pub invalid: usize,
    /// Characters that are not part of the alphabet.
    pub unknown: usize,
}

impl SymbolCounts {
    /// Left plus right turns.
    pub fn turns(&self) -> usize {
        self.left + self.right
    }

    /// Total number of characters counted.
    pub fn total(&self) -> usize {
        self.straight + self.left + self.right + self.invalid + self.unknown
    }
}

/// Pattern query engine over turtle strings written in one alphabet.
#[derive(Clone, Debug, Default)]
pub struct TurtleQuery {
    config: TurtleConfig,
}

impl TurtleQuery {
    pub fn new(config: TurtleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    fn byte(&self, turn: Turn) -> u8 {
        // Alphabet symbols are validated ASCII.
        self.config.alphabet.symbol(turn) as u8
    }

    /// Start positions of the leftmost non-overlapping matches of the
    /// regular expression `pattern`.
    ///
    /// For a closed loop the search runs over `turtle` with its first symbol
    /// appended, so a match that ends exactly on the wrap point is found.
    /// Only matches starting inside the original string are reported.
    pub fn search(&self, turtle: &str, pattern: &str, is_closed: bool) -> Result<Vec<usize>> {
        let re = Regex::new(pattern)?;
        Ok(find_starts(&re, turtle, is_closed, false))
    }

    /// Like [`search`](Self::search), but a new match may begin one symbol
    /// after the start of the previous one.
    pub fn search_overlapping(
        &self,
        turtle: &str,
        pattern: &str,
        is_closed: bool,
    ) -> Result<Vec<usize>> {
        let re = Regex::new(pattern)?;
        Ok(find_starts(&re, turtle, is_closed, true))
    }

    /// Start positions of every U-turn: a pair of same-handed turns (`LL` or
    /// `RR`) that is not part of a longer run of that hand.
    ///
    /// Two quarter turns the same way reverse the heading. Three or more in a
    /// row spiral, and a loop of nothing but left turns just circles, so
    /// neither counts. On a closed loop pairs and their neighbours wrap.
    pub fn u_turns(&self, turtle: &str, is_closed: bool) -> Vec<usize> {
        let bytes = turtle.as_bytes();
        let n = bytes.len();
        let (left, right) = (self.byte(Turn::Left), self.byte(Turn::Right));
        let pairs = if is_closed { n } else { n.saturating_sub(1) };
        let at = |i: usize| -> Option<u8> {
            if is_closed { Some(bytes[i % n]) } else { bytes.get(i).copied() }
        };
        (0..pairs)
            .filter(|&i| {
                let hand = bytes[i];
                let before = match i {
                    0 if is_closed => at(n - 1),
                    0 => None,
                    _ => at(i - 1),
                };
                (hand == left || hand == right)
                    && at(i + 1) == Some(hand)
                    && before != Some(hand)
                    && at(i + 2) != Some(hand)
            })
            .collect()
    }

    /// Start positions of maximal runs of Straight symbols at least
    /// `min_length` long (a `min_length` of 0 is treated as 1).
    ///
    /// Each qualifying run is reported once, at its first symbol; shorter
    /// runs inside it are not. On a closed loop a run crossing the wrap
    /// point is a single run starting in the tail of the string, and a loop
    /// that is straight all the way round reports position 0.
    pub fn straightaways(&self, turtle: &str, min_length: usize, is_closed: bool) -> Vec<usize> {
        let bytes = turtle.as_bytes();
        let n = bytes.len();
        let straight = self.byte(Turn::Straight);
        let min_length = min_length.max(1);

        let Some(break_at) = bytes.iter().position(|&b| b != straight) else {
            return if n >= min_length { vec![0] } else { Vec::new() };
        };

        // On a loop, start scanning just after a non-straight symbol so no
        // run is split by the wrap point; the scan then ends on that symbol.
        let first = if is_closed { break_at + 1 } else { 0 };
        let mut starts = Vec::new();
        let mut run: Option<(usize, usize)> = None;
        for step in 0..n {
            let i = (first + step) % n;
            if bytes[i] == straight {
                run.get_or_insert((i, 0)).1 += 1;
            } else if let Some((start, len)) = run.take()
                && len >= min_length
            {
                starts.push(start);
            }
        }
        if let Some((start, len)) = run
            && len >= min_length
        {
            starts.push(start);
        }
        starts.sort_unstable();
        starts
    }

    /// Fraction of Straight symbols within `half_window` symbols either side
    /// of `center`.
    ///
    /// On an open string the window is clipped to `[0, len - 1]`, or to
    /// `[0, len - 2]` under [`WindowClip::ExcludeLast`]. A clipped window
    /// holding one symbol yields 1.0 or 0.0. An empty or inverted window
    /// (empty string, `center` beyond the clip) yields `-1.0`.
    ///
    /// On a closed loop the window wraps around the string and is never
    /// clipped; it is capped at the loop length.
    pub fn speed_agility_ratio(
        &self,
        turtle: &str,
        center: usize,
        half_window: usize,
        is_closed: bool,
    ) -> f64 {
        let bytes = turtle.as_bytes();
        let n = bytes.len();
        let straight = self.byte(Turn::Straight);

        if is_closed {
            if n == 0 {
                return -1.0;
            }
            let window = half_window.saturating_mul(2).saturating_add(1).min(n);
            let start = (center % n + n - half_window % n) % n;
            let straights = (0..window)
                .filter(|offset| bytes[(start + offset) % n] == straight)
                .count();
            return straights as f64 / window as f64;
        }

        let upper = match self.config.window_clip {
            WindowClip::Inclusive => n.checked_sub(1),
            WindowClip::ExcludeLast => n.checked_sub(2),
        };
        let Some(upper) = upper else {
            return -1.0;
        };
        let start = center.saturating_sub(half_window);
        let end = center.saturating_add(half_window).min(upper);
        if start > end {
            return -1.0;
        }
        let window = &bytes[start..=end];
        let straights = window.iter().filter(|&&b| b == straight).count();
        straights as f64 / window.len() as f64
    }

    /// Length of the longest run of Straight symbols.
    ///
    /// On a closed loop a run may cross the wrap point; it is never longer
    /// than the string itself.
    pub fn maximum_consecutive_straights(&self, turtle: &str, is_closed: bool) -> usize {
        let straight = self.byte(Turn::Straight);
        longest_run(turtle.as_bytes(), is_closed, |b| b == straight)
    }

    /// Length of the longest run of Left/Right symbols, in any mix.
    pub fn maximum_consecutive_turns(&self, turtle: &str, is_closed: bool) -> usize {
        let (left, right) = (self.byte(Turn::Left), self.byte(Turn::Right));
        longest_run(turtle.as_bytes(), is_closed, |b| b == left || b == right)
    }

    /// Occurrences of each symbol.
    pub fn counts(&self, turtle: &str) -> SymbolCounts {
        let alphabet = &self.config.alphabet;
        turtle
            .chars()
            .fold(SymbolCounts::default(), |mut counts, c| {
                match alphabet.turn_of(c) {
                    Some(Turn::Straight) => counts.straight += 1,
                    Some(Turn::Left) => counts.left += 1,
                    Some(Turn::Right) => counts.right += 1,
                    Some(Turn::Invalid) => counts.invalid += 1,
                    None => counts.unknown += 1,
                }
                counts
            })
    }
}

fn find_starts(re: &Regex, turtle: &str, is_closed: bool, overlapping: bool) -> Vec<usize> {
    let len = turtle.len();
    let haystack: Cow<'_, str> = match turtle.chars().next() {
        Some(first) if is_closed => Cow::Owned(format!("{turtle}{first}")),
        _ => Cow::Borrowed(turtle),
    };

    if !overlapping {
        return re
            .find_iter(&haystack)
            .map(|m| m.start())
            .take_while(|&start| start < len)
            .collect();
    }

    let mut starts = Vec::new();
    let mut at = 0;
    while at < len {
        let Some(m) = re.find_at(&haystack, at) else {
            break;
        };
        if m.start() >= len {
            break;
        }
        starts.push(m.start());
        let step = haystack[m.start()..].chars().next().map_or(1, char::len_utf8);
        at = m.start() + step;
    }
    starts
}

/// Longest run of bytes satisfying `matches`, optionally treating `bytes`
/// as circular. A single pass; no doubled copy of the input.
fn longest_run(bytes: &[u8], is_closed: bool, matches: impl Fn(u8) -> bool) -> usize {
    let n = bytes.len();
    let Some(break_at) = bytes.iter().position(|&b| !matches(b)) else {
        return n;
    };
    let first = if is_closed { break_at + 1 } else { 0 };
    let mut best = 0;
    let mut run = 0;
    for step in 0..n {
        if matches(bytes[(first + step) % n]) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turtle::TurtleAlphabet;

    fn query() -> TurtleQuery {
        TurtleQuery::default()
    }

    #[test]
    fn test_straightaways_report_maximal_runs_once() {
        assert_eq!(query().straightaways("SSSLSS", 2, false), vec![0, 4]);
        assert_eq!(query().straightaways("SSSLSS", 3, false), vec![0]);
        assert_eq!(query().straightaways("LSRSL", 1, false), vec![1, 3]);
        assert_eq!(query().straightaways("LSRSL", 0, false), vec![1, 3]);
        assert!(query().straightaways("", 1, false).is_empty());
    }

    #[test]
    fn test_straightaways_on_loop_join_across_wrap() {
        // Tail "SS" and head "S" form one run of three starting at 4.
        assert_eq!(query().straightaways("SLSRSS", 3, true), vec![4]);
        assert!(query().straightaways("SLSRSS", 3, false).is_empty());
        assert_eq!(query().straightaways("SLSRSS", 1, true), vec![2, 4]);
        assert_eq!(query().straightaways("SSSS", 2, true), vec![0]);
        assert!(query().straightaways("SSSS", 5, true).is_empty());
    }

    #[test]
    fn test_u_turns() {
        assert_eq!(query().u_turns("SLLSRRS", false), vec![1, 4]);
        assert!(query().u_turns("LLL", false).is_empty());
        assert!(query().u_turns("SLLLS", false).is_empty());
        assert_eq!(query().u_turns("LLRR", false), vec![0, 2]);
        assert!(query().u_turns("LRLRXX", false).is_empty());
        // Wraps from the last symbol to the first on a loop.
        assert_eq!(query().u_turns("RSLR", true), vec![3]);
        assert!(query().u_turns("RSLR", false).is_empty());
        assert!(query().u_turns("", true).is_empty());
        // A loop turning one way throughout never reverses.
        assert!(query().u_turns("LLLL", true).is_empty());
        assert!(query().u_turns("LL", true).is_empty());
    }

    #[test]
    fn test_search_wraps_on_loop() {
        let q = query();
        assert_eq!(q.search("SLSSL", "SS", false).unwrap(), vec![2]);
        // "LSSLS" + "L": the match "SL" at 4 ends on the appended symbol.
        assert_eq!(q.search("LSSLS", "SL", true).unwrap(), vec![2, 4]);
        assert_eq!(q.search("LSSLS", "SL", false).unwrap(), vec![2]);
        // A match starting on the appended symbol itself is not reported.
        assert_eq!(q.search("SLS", "S", true).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_search_overlapping_and_bad_pattern() {
        let q = query();
        assert_eq!(q.search("SSSS", "SS", false).unwrap(), vec![0, 2]);
        assert_eq!(q.search_overlapping("SSSS", "SS", false).unwrap(), vec![0, 1, 2]);
        assert_eq!(q.search_overlapping("SSSS", "SS", true).unwrap(), vec![0, 1, 2, 3]);
        assert!(matches!(
            q.search("SSS", "S(", false),
            Err(crate::PathError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_ratio_open_inclusive_clip() {
        let q = query();
        // Window [0, 2] of "SSLL".
        assert!((q.speed_agility_ratio("SSLL", 1, 1, false) - 2.0 / 3.0).abs() < 1e-12);
        // Window [2, 3]: last symbol included.
        assert_eq!(q.speed_agility_ratio("SSLS", 3, 1, false), 0.5);
        // One-symbol windows.
        assert_eq!(q.speed_agility_ratio("SL", 0, 0, false), 1.0);
        assert_eq!(q.speed_agility_ratio("SL", 1, 0, false), 0.0);
        assert_eq!(q.speed_agility_ratio("", 0, 3, false), -1.0);
        assert_eq!(q.speed_agility_ratio("SL", 5, 1, false), -1.0);
    }

    #[test]
    fn test_ratio_open_exclude_last_clip() {
        let q = TurtleQuery::new(TurtleConfig::default().with_window_clip(WindowClip::ExcludeLast));
        // Window [2, 3] clips to [2, 2]: only the L.
        assert_eq!(q.speed_agility_ratio("SSLS", 3, 1, false), 0.0);
        assert_eq!(q.speed_agility_ratio("SSLS", 0, 10, false), 2.0 / 3.0);
        // Centered on the last symbol with no spread: inverted window.
        assert_eq!(q.speed_agility_ratio("SSLS", 3, 0, false), -1.0);
        assert_eq!(q.speed_agility_ratio("S", 0, 1, false), -1.0);
    }

    #[test]
    fn test_ratio_closed_wraps() {
        let q = query();
        // Window {3, 0, 1} of "SLLS".
        assert_eq!(q.speed_agility_ratio("SLLS", 0, 1, true), 2.0 / 3.0);
        // Window larger than the loop covers it once.
        assert_eq!(q.speed_agility_ratio("SLLS", 2, 9, true), 0.5);
        assert_eq!(q.speed_agility_ratio("", 0, 1, true), -1.0);
    }

    #[test]
    fn test_longest_runs() {
        let q = query();
        assert_eq!(q.maximum_consecutive_straights("SSLSSSRL", false), 3);
        assert_eq!(q.maximum_consecutive_turns("SSLSSSRL", false), 2);
        // Open: "SS" + "S" are separate; closed they join across the wrap.
        assert_eq!(q.maximum_consecutive_straights("SSLRS", false), 2);
        assert_eq!(q.maximum_consecutive_straights("SSLRS", true), 3);
        assert_eq!(q.maximum_consecutive_turns("LSSRR", true), 3);
        assert_eq!(q.maximum_consecutive_straights("SSSS", true), 4);
        assert_eq!(q.maximum_consecutive_turns("SSSS", true), 0);
        assert_eq!(q.maximum_consecutive_turns("", true), 0);
        // Invalid breaks a turn run.
        assert_eq!(q.maximum_consecutive_turns("LXR", false), 1);
    }

    #[test]
    fn test_custom_alphabet() {
        let alphabet = TurtleAlphabet::new('.', '(', ')', '#').unwrap();
        let q = TurtleQuery::new(TurtleConfig::default().with_alphabet(alphabet));
        assert_eq!(q.u_turns("((.))", false), vec![0, 3]);
        assert_eq!(q.straightaways("..(..", 2, false), vec![0, 3]);
        assert_eq!(q.maximum_consecutive_turns(".()#", false), 2);
        let counts = q.counts("..()#S");
        assert_eq!(counts.straight, 2);
        assert_eq!(counts.turns(), 2);
        assert_eq!(counts.invalid, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), 6);
    }
}
