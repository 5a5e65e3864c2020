//! Data structures for the Swiss simulator: players, matches, tiebreakers, tournament.

mod game;
mod player;
mod tiebreak;
mod tournament;

pub use game::{Match, MatchId, MatchOutcome};
pub use player::{Player, PlayerId, PlayerStats, POINTS_PER_DRAW, POINTS_PER_WIN};
pub use tiebreak::{TiebreakKey, MAX_LOSS_PENALTY};
pub use tournament::{
    round_count_for, validate_draw_percentage, Tournament, TournamentError, TournamentId,
    MAX_DRAW_PERCENTAGE, MIN_PLAYERS,
};
