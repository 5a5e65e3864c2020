//! Setup: simulation settings and the one-call runner used by the web shell.

use crate::logic::results::{group_by_round, standings, RoundResults, Standing};
use crate::logic::simulation::Simulation;
use crate::models::{
    round_count_for, validate_draw_percentage, Match, PlayerStats, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Largest roster accepted by [`SimulationConfig::validate`]. Pairing cost grows
/// cubically with the roster, so requests beyond this are refused up front.
pub const MAX_PLAYERS: usize = 256;

/// Settings for one simulated tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub player_count: usize,
    #[serde(default)]
    pub draw_percentage: u32,
    /// Fixed seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(player_count: usize, draw_percentage: u32) -> Self {
        Self {
            player_count,
            draw_percentage,
            seed: None,
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Same checks as [`Tournament::new`], without building the roster, plus
    /// the [`MAX_PLAYERS`] cap.
    pub fn validate(&self) -> Result<(), TournamentError> {
        round_count_for(self.player_count)?;
        if self.player_count > MAX_PLAYERS {
            return Err(TournamentError::InvalidConfiguration(format!(
                "at most {} players can be simulated, got {}",
                MAX_PLAYERS, self.player_count
            )));
        }
        validate_draw_percentage(self.draw_percentage)
    }
}

/// A tournament after all its rounds were played, with the global match list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletedSimulation {
    pub tournament: Tournament,
    pub matches: Vec<Match>,
}

impl CompletedSimulation {
    pub fn rounds(&self) -> Vec<RoundResults> {
        group_by_round(&self.matches)
    }

    /// Stats in roster order.
    pub fn player_stats(&self) -> Vec<PlayerStats> {
        self.tournament.players.iter().map(|p| p.stats()).collect()
    }

    pub fn standings(&self) -> Vec<Standing> {
        standings(&self.tournament.players)
    }
}

/// Validate `config`, build the tournament and play every round.
pub fn run_simulation(config: &SimulationConfig) -> Result<CompletedSimulation, TournamentError> {
    config.validate()?;
    let mut tournament = Tournament::new(config.player_count, config.draw_percentage)?;
    let rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let mut simulation = Simulation::with_rng(&mut tournament, rng);
    simulation.run();
    let matches = simulation.into_matches();

    log::info!(
        "Simulated {} players at {}% draws: {} rounds, {} matches",
        tournament.player_count,
        tournament.draw_percentage,
        tournament.round_count,
        matches.len()
    );
    Ok(CompletedSimulation {
        tournament,
        matches,
    })
}
