//! Read-only views over a finished simulation: per-round results and standings.

use crate::models::{Match, Player, PlayerId, PlayerStats, TiebreakKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All matches of one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResults {
    pub round_number: u32,
    pub matches: Vec<Match>,
}

impl RoundResults {
    /// The bye match of this round, if any.
    pub fn bye(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_bye())
    }
}

/// Group matches by round number (ascending), keeping their order within a round.
pub fn group_by_round(matches: &[Match]) -> Vec<RoundResults> {
    let mut rounds: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round_number).or_default().push(m.clone());
    }
    rounds
        .into_iter()
        .map(|(round_number, matches)| RoundResults {
            round_number,
            matches,
        })
        .collect()
}

/// One row of the final standings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub player_id: PlayerId,
    pub points: u32,
    /// Text form of the composite tiebreaker.
    pub tiebreaker: String,
    pub stats: PlayerStats,
}

/// Players sorted by `(points, tiebreaker)` descending. Equal keys keep roster order.
pub fn rank_players(players: &[Player]) -> Vec<(&Player, TiebreakKey)> {
    let mut ranked: Vec<(&Player, TiebreakKey)> = players
        .iter()
        .map(|p| (p, p.tiebreak_key(players)))
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
}

/// Final standings for the roster.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    rank_players(players)
        .into_iter()
        .enumerate()
        .map(|(i, (p, key))| Standing {
            rank: i + 1,
            player_id: p.id,
            points: key.points,
            tiebreaker: key.to_string(),
            stats: p.stats(),
        })
        .collect()
}
