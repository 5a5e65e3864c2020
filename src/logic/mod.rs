//! Tournament business logic: setup, pairing, the round engine and results.

mod pairing;
mod results;
mod setup;
mod simulation;

pub use pairing::{find_opponent, find_pairing, scarcity, select_bye_recipient, MAX_POINT_GAP};
pub use results::{group_by_round, rank_players, standings, RoundResults, Standing};
pub use setup::{run_simulation, CompletedSimulation, SimulationConfig, MAX_PLAYERS};
pub use simulation::Simulation;
