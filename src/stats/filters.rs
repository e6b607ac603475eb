//! Filter-and-reduce helpers shared by the aggregators.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::plays::PlayEvent;

/// Distinct weeks present in the log, ascending.
pub fn weeks_with_data(plays: &[PlayEvent]) -> Vec<u32> {
    plays
        .iter()
        .map(|p| p.week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn week_slice(plays: &[PlayEvent], week: u32) -> Vec<&PlayEvent> {
    plays.iter().filter(|p| p.week == week).collect()
}

/// Rows where `player` is the player involved.
pub fn acted<'a>(plays: &[&'a PlayEvent], player: &str) -> Vec<&'a PlayEvent> {
    plays.iter().copied().filter(|p| p.acted_by(player)).collect()
}

/// Rows where `player` has a position assignment.
pub fn on_field<'a>(plays: &[&'a PlayEvent], player: &str) -> Vec<&'a PlayEvent> {
    plays.iter().copied().filter(|p| p.on_field(player)).collect()
}

pub fn count(plays: &[&PlayEvent], predicate: impl Fn(&PlayEvent) -> bool) -> u32 {
    plays.iter().filter(|&&p| predicate(p)).count() as u32
}

pub fn sum_yards(plays: &[&PlayEvent], predicate: impl Fn(&PlayEvent) -> bool) -> i64 {
    plays
        .iter()
        .filter(|&&p| predicate(p))
        .map(|p| p.yards_or_zero())
        .sum()
}

pub fn sum_points(plays: &[&PlayEvent], predicate: impl Fn(&PlayEvent) -> bool) -> i64 {
    plays
        .iter()
        .filter(|&&p| predicate(p))
        .map(|p| i64::from(p.points))
        .sum()
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

/// `total / games`, or 0 when no games were played.
pub fn per_game(total: f64, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        total / f64::from(games)
    }
}

/// Most frequent item; ties go to whichever was seen first.
pub fn most_common<T: Eq + Hash + Copy>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (order, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, order)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(item, _)| item)
}
