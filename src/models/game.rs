//! Match and MatchOutcome: one pairing (or bye) in one round.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Position of a match in the simulation's global match list.
pub type MatchId = usize;

/// How a match ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Decisive result; holds the winner's id.
    Win(PlayerId),
    Draw,
    /// `player1` had no opponent and is credited with a win.
    Bye,
}

/// A single match. Created once by the pairing engine and never modified.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-indexed round this match was generated in.
    pub round_number: u32,
    pub player1: PlayerId,
    /// None only for a bye.
    pub player2: Option<PlayerId>,
    pub outcome: MatchOutcome,
}

impl Match {
    /// A bye for `player` in `round_number`.
    pub fn bye(id: MatchId, round_number: u32, player: PlayerId) -> Self {
        Self {
            id,
            round_number,
            player1: player,
            player2: None,
            outcome: MatchOutcome::Bye,
        }
    }

    /// A played match between two players. `winner` of None means a draw.
    pub fn played(
        id: MatchId,
        round_number: u32,
        player1: PlayerId,
        player2: PlayerId,
        winner: Option<PlayerId>,
    ) -> Self {
        debug_assert!(winner.map_or(true, |w| w == player1 || w == player2));
        Self {
            id,
            round_number,
            player1,
            player2: Some(player2),
            outcome: winner.map_or(MatchOutcome::Draw, MatchOutcome::Win),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.outcome == MatchOutcome::Bye
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == MatchOutcome::Draw
    }

    /// Whether `player` took part in this match.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == Some(player)
    }

    /// The other participant, from `player`'s point of view. None for a bye
    /// or when `player` is not in this match.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        let other = self.player2?;
        if self.player1 == player {
            Some(other)
        } else if other == player {
            Some(self.player1)
        } else {
            None
        }
    }

    /// Winner of the match; the bye recipient for a bye, None for a draw.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.outcome {
            MatchOutcome::Win(id) => Some(id),
            MatchOutcome::Bye => Some(self.player1),
            MatchOutcome::Draw => None,
        }
    }

    /// Loser of a decisive match. Draws and byes have no loser.
    pub fn loser(&self) -> Option<PlayerId> {
        match self.outcome {
            MatchOutcome::Win(id) => self.opponent_of(id),
            MatchOutcome::Draw | MatchOutcome::Bye => None,
        }
    }
}
