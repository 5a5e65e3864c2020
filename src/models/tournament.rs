//! Tournament configuration and roster, plus the crate's error type.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Smallest roster that yields at least one round.
pub const MIN_PLAYERS: usize = 2;
/// Upper bound for the draw percentage.
pub const MAX_DRAW_PERCENTAGE: u32 = 100;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Player count below 2 or draw percentage outside [0, 100].
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// No stored simulation with this id.
    #[error("Simulation {0} not found")]
    SimulationNotFound(Uuid),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Validated settings plus the roster. Players are created once here and
/// never replaced; the simulation only mutates them in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub player_count: usize,
    /// Chance (in percent) that a pairing ends in a draw.
    pub draw_percentage: u32,
    /// `ceil(log2(player_count))`.
    pub round_count: u32,
    /// Indexed by player id.
    pub players: Vec<Player>,
}

impl Tournament {
    /// Create a tournament with players 0..player_count.
    ///
    /// Rejects fewer than two players (no meaningful round count) and a draw
    /// percentage above 100.
    pub fn new(player_count: usize, draw_percentage: u32) -> Result<Self, TournamentError> {
        let round_count = round_count_for(player_count)?;
        validate_draw_percentage(draw_percentage)?;
        Ok(Self {
            id: Uuid::new_v4(),
            player_count,
            draw_percentage,
            round_count,
            players: (0..player_count).map(Player::new).collect(),
        })
    }

    /// Mutable reference to a player by id.
    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }
}

/// Number of rounds for a roster of `player_count`: `ceil(log2(n))`.
pub fn round_count_for(player_count: usize) -> Result<u32, TournamentError> {
    if player_count < MIN_PLAYERS {
        return Err(TournamentError::InvalidConfiguration(format!(
            "need at least {} players, got {}",
            MIN_PLAYERS, player_count
        )));
    }
    player_count
        .checked_next_power_of_two()
        .map(usize::trailing_zeros)
        .ok_or_else(|| {
            TournamentError::InvalidConfiguration(format!(
                "player count {} is too large",
                player_count
            ))
        })
}

/// Reject draw percentages above 100.
pub fn validate_draw_percentage(draw_percentage: u32) -> Result<(), TournamentError> {
    if draw_percentage > MAX_DRAW_PERCENTAGE {
        return Err(TournamentError::InvalidConfiguration(format!(
            "draw percentage must be between 0 and {}, got {}",
            MAX_DRAW_PERCENTAGE, draw_percentage
        )));
    }
    Ok(())
}
