//! Integration tests for points, win percentage, tiebreakers and standings.

use approx::assert_relative_eq;
use swiss_tournament_sim::{standings, Match, MatchOutcome, Player, TiebreakKey};

/// Round 1: 0 beats 1, 2 has a bye. Round 2: 0 draws 2, 1 has a bye.
fn small_roster() -> Vec<Player> {
    let mut players: Vec<Player> = (0..3).map(Player::new).collect();
    let matches = [
        Match::played(0, 1, 0, 1, Some(0)),
        Match::bye(1, 1, 2),
        Match::played(2, 2, 0, 2, None),
        Match::bye(3, 2, 1),
    ];
    for m in matches {
        for id in std::iter::once(m.player1).chain(m.player2) {
            players[id].record_match(m.clone());
        }
    }
    players
}

#[test]
fn record_match_updates_counters_and_opponents() {
    let players = small_roster();
    let (p0, p1, p2) = (&players[0], &players[1], &players[2]);

    assert_eq!((p0.wins, p0.losses, p0.draws), (1, 0, 1));
    assert_eq!((p1.wins, p1.losses, p1.draws), (1, 1, 0));
    assert_eq!((p2.wins, p2.losses, p2.draws), (1, 0, 1));
    assert!(p1.had_bye && p2.had_bye && !p0.had_bye);

    assert_eq!(p0.opponents().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(p1.opponents().collect::<Vec<_>>(), vec![0]);
    assert!(p0.has_played_against(2));
    assert!(!p1.has_played_against(2));
    assert!(!p2.opponents_faced.contains(&2));

    for p in &players {
        assert_eq!(p.games_played(), 2);
        assert!(p.match_history().iter().all(|m| m.involves(p.id)));
    }
}

#[test]
fn points_are_three_per_win_one_per_draw() {
    let players = small_roster();
    assert_eq!(players[0].points(), 4);
    assert_eq!(players[1].points(), 3);
    assert_eq!(players[2].points(), 4);
}

#[test]
fn win_percentage_counts_draws_as_half() {
    let players = small_roster();
    assert_relative_eq!(players[0].win_percentage(), 75.0);
    assert_relative_eq!(players[1].win_percentage(), 50.0);
    assert_relative_eq!(Player::new(9).win_percentage(), 0.0);
}

#[test]
fn opponent_strength_terms() {
    let players = small_roster();
    assert_relative_eq!(
        players[0].average_opponent_win_percentage(&players).unwrap(),
        62.5
    );
    assert_relative_eq!(players[0].average_schedule_strength(&players).unwrap(), 75.0);
    assert_relative_eq!(players[1].average_schedule_strength(&players).unwrap(), 62.5);
    assert!(Player::new(0).average_opponent_win_percentage(&players).is_none());
}

#[test]
fn tiebreaker_text_encoding() {
    let players = small_roster();
    assert_eq!(players[0].tiebreaker(&players), "4625750000");
    assert_eq!(players[1].tiebreaker(&players), "3750625001");
    assert_eq!(players[2].tiebreaker(&players), "4750625000");
}

#[test]
fn tiebreaker_rounds_exact_halves_like_one_decimal_formatting() {
    // Player 0 loses to 1 (62.5%) and to 2 (50.0%): opponent average 56.25.
    let mut players: Vec<Player> = (0..6).map(Player::new).collect();
    let matches = [
        Match::played(0, 1, 0, 1, Some(1)),
        Match::played(1, 2, 0, 2, Some(2)),
        Match::played(2, 2, 1, 3, Some(1)),
        Match::played(3, 3, 1, 4, None),
        Match::played(4, 4, 1, 5, Some(5)),
        Match::played(5, 3, 2, 3, Some(3)),
    ];
    for m in matches {
        for id in std::iter::once(m.player1).chain(m.player2) {
            players[id].record_match(m.clone());
        }
    }

    let average = players[0].average_opponent_win_percentage(&players).unwrap();
    assert_relative_eq!(average, 56.25);
    assert_eq!(format!("{:.1}", average), "56.2");

    let key = players[0].tiebreak_key(&players);
    assert_eq!(key.opponent_strength, Some(562));
    assert_eq!(key.schedule_strength, 375);
    assert_eq!(players[0].tiebreaker(&players), "0562375005");
}

#[test]
fn tiebreaker_without_opponents_is_points_and_eight_zeros() {
    let mut lone = Player::new(0);
    assert_eq!(lone.tiebreaker(&[]), "000000000");
    lone.record_match(Match::bye(0, 1, 0));
    assert_eq!(lone.tiebreaker(&[]), "300000000");
}

#[test]
fn tiebreak_key_display() {
    let key = TiebreakKey {
        points: 6,
        opponent_strength: Some(753),
        schedule_strength: 500,
        loss_penalty: 4,
    };
    assert_eq!(key.to_string(), "6753500004");

    let perfect = TiebreakKey {
        points: 9,
        opponent_strength: Some(1000),
        schedule_strength: 0,
        loss_penalty: 999,
    };
    assert_eq!(perfect.to_string(), "9100000999");
}

#[test]
fn loss_penalty_squares_rounds_and_saturates() {
    let mut p = Player::new(0);
    p.record_match(Match::played(0, 2, 0, 1, Some(1)));
    p.record_match(Match::played(1, 3, 0, 2, Some(2)));
    p.record_match(Match::played(2, 4, 0, 3, Some(0)));
    p.record_match(Match::played(3, 5, 0, 4, None));
    assert_eq!(p.loss_penalty(), 4 + 9);

    let mut late = Player::new(0);
    for (i, round) in [20u32, 21, 22].into_iter().enumerate() {
        late.record_match(Match::played(i, round, 0, i + 1, Some(i + 1)));
    }
    assert_eq!(late.loss_penalty(), 999);
}

#[test]
fn more_points_always_rank_higher() {
    let strong_schedule = TiebreakKey {
        points: 3,
        opponent_strength: Some(1000),
        schedule_strength: 1000,
        loss_penalty: 0,
    };
    let weak_schedule = TiebreakKey {
        points: 4,
        opponent_strength: Some(0),
        schedule_strength: 0,
        loss_penalty: 999,
    };
    assert!(weak_schedule > strong_schedule);
}

#[test]
fn late_losses_rank_lower() {
    let base = TiebreakKey {
        points: 6,
        opponent_strength: Some(500),
        schedule_strength: 500,
        loss_penalty: 1,
    };
    let later_loss = TiebreakKey {
        loss_penalty: 16,
        ..base
    };
    assert!(base > later_loss);
}

#[test]
fn standings_sort_by_points_then_tiebreaker() {
    let players = small_roster();
    let table = standings(&players);
    let order: Vec<_> = table.iter().map(|s| s.player_id).collect();
    assert_eq!(order, vec![2, 0, 1]);
    assert_eq!(table[0].rank, 1);
    assert_eq!(table[0].tiebreaker, "4750625000");
    assert_eq!(table[2].points, 3);
    assert_eq!(table[2].stats.losses, 1);
}

#[test]
fn match_helpers() {
    let decisive = Match::played(0, 1, 4, 7, Some(7));
    assert_eq!(decisive.outcome, MatchOutcome::Win(7));
    assert_eq!(decisive.winner(), Some(7));
    assert_eq!(decisive.loser(), Some(4));
    assert_eq!(decisive.opponent_of(4), Some(7));
    assert_eq!(decisive.opponent_of(5), None);

    let draw = Match::played(1, 1, 2, 3, None);
    assert!(draw.is_draw());
    assert_eq!(draw.winner(), None);
    assert_eq!(draw.loser(), None);

    let bye = Match::bye(2, 1, 5);
    assert!(bye.is_bye());
    assert_eq!(bye.player2, None);
    assert_eq!(bye.winner(), Some(5));
    assert_eq!(bye.opponent_of(5), None);
}
