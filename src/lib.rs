//! Swiss tournament simulator: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    find_opponent, find_pairing, group_by_round, rank_players, run_simulation, scarcity,
    select_bye_recipient, standings, CompletedSimulation, RoundResults, Simulation,
    SimulationConfig, Standing, MAX_PLAYERS, MAX_POINT_GAP,
};
pub use models::{
    round_count_for, Match, MatchId, MatchOutcome, Player, PlayerId, PlayerStats, TiebreakKey,
    Tournament, TournamentError, TournamentId, MAX_DRAW_PERCENTAGE, MAX_LOSS_PENALTY, MIN_PLAYERS,
    POINTS_PER_DRAW, POINTS_PER_WIN,
};
