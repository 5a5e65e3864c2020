//! Composite tiebreaker: numeric ordering key and its fixed text encoding.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;

/// Cap on the late-loss penalty so it always renders as three digits.
pub const MAX_LOSS_PENALTY: u32 = 999;

/// Secondary ranking key, compared after raw points. Higher is better.
///
/// Rendered as `points`, then the opponent strength and schedule strength
/// with one decimal and the decimal point removed, then the loss penalty as
/// three digits. A player without opponents renders as `points` followed by
/// eight zeros. For example 6 points, 75.3%, 50.0% and a penalty of 4 give
/// `6753500004`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TiebreakKey {
    pub points: u32,
    /// Average opponent win percentage in tenths of a percent.
    pub opponent_strength: Option<u32>,
    /// Average of the opponents' own opponent strength, in tenths.
    pub schedule_strength: u32,
    /// Sum of `round²` over lost matches, at most [`MAX_LOSS_PENALTY`].
    pub loss_penalty: u32,
}

impl TiebreakKey {
    fn sort_key(&self) -> (u32, u32, u32, Reverse<u32>, bool) {
        (
            self.points,
            self.opponent_strength.unwrap_or(0),
            self.schedule_strength,
            Reverse(self.loss_penalty),
            self.opponent_strength.is_some(),
        )
    }
}

impl Ord for TiebreakKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for TiebreakKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TiebreakKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opponent_strength {
            None => write!(f, "{}00000000", self.points),
            Some(opponents) => write!(
                f,
                "{}{}{}{:03}",
                self.points,
                Tenths(opponents),
                Tenths(self.schedule_strength),
                self.loss_penalty.min(MAX_LOSS_PENALTY)
            ),
        }
    }
}

/// A percentage in tenths, printed as `{:.1}` without the decimal point.
struct Tenths(u32);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0 / 10, self.0 % 10)
    }
}

/// Round a percentage to one decimal exactly as `{:.1}` does (ties to even on
/// the binary value) and express it in tenths, so the key and the text agree.
pub(crate) fn to_tenths(percentage: f64) -> u32 {
    format!("{:.1}", percentage.max(0.0))
        .replace('.', "")
        .parse()
        .unwrap_or(0)
}
