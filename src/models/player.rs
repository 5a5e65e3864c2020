//! Player and PlayerStats data structures, plus the per-player scoring methods.

use crate::models::game::{Match, MatchOutcome};
use crate::models::tiebreak::{to_tenths, TiebreakKey, MAX_LOSS_PENALTY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier for a player. Ids are 0..N-1 and double as roster indices.
pub type PlayerId = usize;

/// Points for a win (a bye counts as a win).
pub const POINTS_PER_WIN: u32 = 3;
/// Points for a draw.
pub const POINTS_PER_DRAW: u32 = 1;

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
    pub games_played: usize,
    pub win_percentage: f64,
    pub had_bye: bool,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            player_id: p.id,
            wins: p.wins,
            losses: p.losses,
            draws: p.draws,
            points: p.points(),
            games_played: p.games_played(),
            win_percentage: p.win_percentage(),
            had_bye: p.had_bye,
        }
    }
}

/// A competitor in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Ids of every opponent met so far. Byes never add an entry.
    pub opponents_faced: BTreeSet<PlayerId>,
    /// Matches in round order, byes included.
    pub match_history: Vec<Match>,
    pub had_bye: bool,
}

impl Player {
    /// Create a new player with the given id. Counters start at zero.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            wins: 0,
            losses: 0,
            draws: 0,
            opponents_faced: BTreeSet::new(),
            match_history: Vec::new(),
            had_bye: false,
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// 3 per win, 1 per draw, 0 per loss.
    pub fn points(&self) -> u32 {
        POINTS_PER_WIN * self.wins + POINTS_PER_DRAW * self.draws
    }

    pub fn games_played(&self) -> usize {
        self.match_history.len()
    }

    pub fn match_history(&self) -> &[Match] {
        &self.match_history
    }

    /// `(wins + draws / 2) / games * 100`, or 0 before the first match.
    pub fn win_percentage(&self) -> f64 {
        let games = self.wins + self.losses + self.draws;
        if games == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + f64::from(self.draws) / 2.0) / f64::from(games) * 100.0
    }

    pub fn has_played_against(&self, other: PlayerId) -> bool {
        self.opponents_faced.contains(&other)
    }

    /// Opponents in match order. Byes are skipped.
    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.match_history
            .iter()
            .filter_map(move |m| m.opponent_of(self.id))
    }

    /// Apply a resolved match to this player's counters and history.
    pub fn record_match(&mut self, m: Match) {
        debug_assert!(m.involves(self.id));
        match m.outcome {
            MatchOutcome::Bye => {
                self.wins += 1;
                self.had_bye = true;
            }
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Win(winner) if winner == self.id => self.wins += 1,
            MatchOutcome::Win(_) => self.losses += 1,
        }
        if let Some(opponent) = m.opponent_of(self.id) {
            self.opponents_faced.insert(opponent);
        }
        self.match_history.push(m);
    }

    /// Mean win percentage of this player's opponents, looked up in `roster`.
    /// None when the player has not met anyone.
    pub fn average_opponent_win_percentage(&self, roster: &[Player]) -> Option<f64> {
        mean(
            self.opponents()
                .filter_map(|id| roster.get(id))
                .map(Player::win_percentage),
        )
    }

    /// Mean over opponents of their own average opponent win percentage.
    pub fn average_schedule_strength(&self, roster: &[Player]) -> Option<f64> {
        mean(
            self.opponents()
                .filter_map(|id| roster.get(id))
                .filter_map(|opponent| opponent.average_opponent_win_percentage(roster)),
        )
    }

    /// Sum of `round²` over lost matches, capped at 999.
    pub fn loss_penalty(&self) -> u32 {
        self.match_history
            .iter()
            .filter(|m| m.loser() == Some(self.id))
            .fold(0u32, |acc, m| {
                acc.saturating_add(m.round_number.saturating_mul(m.round_number))
            })
            .min(MAX_LOSS_PENALTY)
    }

    /// Numeric composite key used to order players with equal points.
    pub fn tiebreak_key(&self, roster: &[Player]) -> TiebreakKey {
        TiebreakKey {
            points: self.points(),
            opponent_strength: self.average_opponent_win_percentage(roster).map(to_tenths),
            schedule_strength: self
                .average_schedule_strength(roster)
                .map_or(0, to_tenths),
            loss_penalty: self.loss_penalty(),
        }
    }

    /// Text form of the composite tiebreaker (see [`TiebreakKey`]).
    pub fn tiebreaker(&self, roster: &[Player]) -> String {
        self.tiebreak_key(roster).to_string()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}
