//! The round engine: runs every round of a tournament and records the matches.

use crate::logic::pairing::{find_pairing, select_bye_recipient};
use crate::logic::results::{group_by_round, RoundResults};
use crate::models::{Match, PlayerId, Tournament};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Runs the rounds of a borrowed [`Tournament`] and owns the resulting matches.
///
/// A simulation is single-use: calling [`Simulation::run`] twice plays every
/// round again on top of the existing results.
pub struct Simulation<'a, R = StdRng> {
    tournament: &'a mut Tournament,
    matches: Vec<Match>,
    current_round: u32,
    rng: R,
}

impl<'a> Simulation<'a, StdRng> {
    /// Simulation driven by an entropy-seeded generator.
    pub fn new(tournament: &'a mut Tournament) -> Self {
        Self::with_rng(tournament, StdRng::from_entropy())
    }

    /// Reproducible simulation: same seed, same pairings and results.
    pub fn seeded(tournament: &'a mut Tournament, seed: u64) -> Self {
        Self::with_rng(tournament, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> Simulation<'a, R> {
    pub fn with_rng(tournament: &'a mut Tournament, rng: R) -> Self {
        Self {
            tournament,
            matches: Vec::new(),
            current_round: 0,
            rng,
        }
    }

    /// Play all `round_count` rounds in order.
    pub fn run(&mut self) {
        self.current_round = 0;
        for _ in 0..self.tournament.round_count {
            self.current_round += 1;
            self.play_round();
        }
        log::info!(
            "Tournament {} finished: {} players, {} rounds, {} matches",
            self.tournament.id,
            self.tournament.player_count,
            self.tournament.round_count,
            self.matches.len()
        );
    }

    fn play_round(&mut self) {
        let round = self.current_round;
        let first_match = self.matches.len();

        let mut pool: Vec<PlayerId> = (0..self.tournament.players.len()).collect();
        pool.shuffle(&mut self.rng);

        if pool.len() % 2 == 1 {
            if let Some(id) = select_bye_recipient(&self.tournament.players, &pool) {
                pool.retain(|&p| p != id);
                log::debug!("Round {}: player {} receives a bye", round, id);
                self.commit(Match::bye(self.matches.len(), round, id));
            }
        }

        while pool.len() >= 2 {
            let Some((a, b)) = find_pairing(&self.tournament.players, &pool, &mut self.rng) else {
                break;
            };
            pool.retain(|&p| p != a && p != b);
            let winner = self.decide_winner(a, b);
            log::debug!("Round {}: player {} vs player {} -> {:?}", round, a, b, winner);
            self.commit(Match::played(self.matches.len(), round, a, b, winner));
        }

        if !pool.is_empty() {
            log::warn!(
                "Round {}: no legal pairing left for {} player(s): {:?}",
                round,
                pool.len(),
                pool
            );
        }
        log::info!(
            "Round {} completed ({} matches, {} unpaired)",
            round,
            self.matches.len() - first_match,
            pool.len()
        );
    }

    /// Roll in `0..100`; below the draw percentage is a draw, otherwise the
    /// lower id wins.
    fn decide_winner(&mut self, a: PlayerId, b: PlayerId) -> Option<PlayerId> {
        let roll: u32 = self.rng.gen_range(0..100);
        if roll < self.tournament.draw_percentage {
            None
        } else {
            Some(a.min(b))
        }
    }

    /// Apply a match to its participants and append it to the global list.
    fn commit(&mut self, m: Match) {
        for id in std::iter::once(m.player1).chain(m.player2) {
            if let Some(player) = self.tournament.get_player_mut(id) {
                player.record_match(m.clone());
            }
        }
        self.matches.push(m);
    }
}

impl<'a, R> Simulation<'a, R> {
    /// Every match so far, in round order then pairing order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// 0 before [`Simulation::run`], then the last round played.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn tournament(&self) -> &Tournament {
        &*self.tournament
    }

    /// Matches grouped by round number, ascending.
    pub fn rounds(&self) -> Vec<RoundResults> {
        group_by_round(&self.matches)
    }

    /// Release the match list, ending the borrow of the tournament.
    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }
}
