//! Pairing rules: bye selection and opponent search within a round's pool.

use crate::models::{Player, PlayerId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Largest point difference allowed in the preferred opponent tier.
pub const MAX_POINT_GAP: u32 = 3;

/// Pick the bye recipient from `pool`: the lowest `(points, tiebreaker)` among
/// players who have not had a bye yet, or the lowest of the whole pool when
/// everyone already had one. Equal keys go to the first player in pool order.
pub fn select_bye_recipient(roster: &[Player], pool: &[PlayerId]) -> Option<PlayerId> {
    let eligible = pool.iter().copied().filter(|&id| !roster[id].had_bye);
    lowest_ranked(roster, eligible).or_else(|| {
        let fallback = lowest_ranked(roster, pool.iter().copied());
        if let Some(id) = fallback {
            log::warn!("Every player already had a bye; giving a second one to player {}", id);
        }
        fallback
    })
}

fn lowest_ranked(roster: &[Player], ids: impl Iterator<Item = PlayerId>) -> Option<PlayerId> {
    ids.min_by_key(|&id| roster[id].tiebreak_key(roster))
}

/// How many other players in `pool` `player` has not met yet.
pub fn scarcity(roster: &[Player], pool: &[PlayerId], player: PlayerId) -> usize {
    pool.iter()
        .filter(|&&other| other != player && !roster[player].has_played_against(other))
        .count()
}

/// Find one legal pairing in `pool`.
///
/// Players are tried in ascending scarcity (ties keep pool order) so that the
/// most constrained ones are placed first. Returns None when nobody in the
/// pool has an unplayed opponent left.
pub fn find_pairing<R: Rng + ?Sized>(
    roster: &[Player],
    pool: &[PlayerId],
    rng: &mut R,
) -> Option<(PlayerId, PlayerId)> {
    let mut order: Vec<(usize, PlayerId)> = pool
        .iter()
        .map(|&id| (scarcity(roster, pool, id), id))
        .collect();
    order.sort_by_key(|&(count, _)| count);

    order.into_iter().find_map(|(_, player)| {
        find_opponent(roster, pool, player, &mut *rng).map(|opponent| (player, opponent))
    })
}

/// Best opponent for `player` among `pool`.
///
/// Tier 1: unplayed opponents within [`MAX_POINT_GAP`] points. Tier 2: any
/// unplayed opponent. Rematches are never offered. Inside the tier the
/// point bucket closest to `player`'s points wins (lower bucket on a tie) and
/// the opponent is drawn at random from it.
pub fn find_opponent<R: Rng + ?Sized>(
    roster: &[Player],
    pool: &[PlayerId],
    player: PlayerId,
    rng: &mut R,
) -> Option<PlayerId> {
    let me = &roster[player];
    let points = me.points();

    let unplayed: Vec<PlayerId> = pool
        .iter()
        .copied()
        .filter(|&other| other != player && !me.has_played_against(other))
        .collect();
    let close: Vec<PlayerId> = unplayed
        .iter()
        .copied()
        .filter(|&other| roster[other].points().abs_diff(points) <= MAX_POINT_GAP)
        .collect();

    let tier = if close.is_empty() { unplayed } else { close };
    pick_from_closest_bucket(roster, &tier, points, rng)
}

fn pick_from_closest_bucket<R: Rng + ?Sized>(
    roster: &[Player],
    candidates: &[PlayerId],
    target_points: u32,
    rng: &mut R,
) -> Option<PlayerId> {
    let mut buckets: BTreeMap<u32, Vec<PlayerId>> = BTreeMap::new();
    for &id in candidates {
        buckets.entry(roster[id].points()).or_default().push(id);
    }
    let (_, bucket) = buckets
        .iter()
        .min_by_key(|(bucket_points, _)| bucket_points.abs_diff(target_points))?;
    bucket.choose(rng).copied()
}
