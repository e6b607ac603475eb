use std::collections::BTreeSet;

use serde::Serialize;

use super::{
    filters::{acted, count, most_common, on_field, per_game, percentage, sum_yards, week_slice},
    table::{StatTable, StatValue},
    StatsError,
};
use crate::plays::{Action, AttemptOutcome, PlayEvent, Position, Side, TouchdownType};

/// A player's counting stats over some slice of the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerTotals {
    pub offensive_position: Option<Position>,
    pub defensive_position: Option<Position>,
    /// `None` when the player never lined up at quarterback.
    pub passing_yards: Option<i64>,
    pub rushing_yards: i64,
    pub receiving_yards: i64,
    pub rushing_tds: u32,
    pub receiving_tds: u32,
    pub sacks: u32,
    pub flags_pulled: u32,
    pub offensive_plays: u32,
    pub successful_offense: u32,
    pub defensive_plays: u32,
    pub successful_defense: u32,
}

fn most_common_position(field: &[&PlayEvent], player: &str, side: Side) -> Option<Position> {
    most_common(
        field
            .iter()
            .flat_map(|p| p.player_positions.positions_of(player))
            .filter(|position| position.side() == side),
    )
}

/// Completed offensive passing yardage over the rows where `player` was
/// quarterback.
pub fn passing_yards(rows: &[&PlayEvent], player: &str) -> Option<i64> {
    let at_quarterback: Vec<&PlayEvent> = rows
        .iter()
        .copied()
        .filter(|p| {
            p.player_positions
                .positions_of(player)
                .any(|position| position == Position::Quarterback)
        })
        .collect();
    if at_quarterback.is_empty() {
        return None;
    }

    Some(sum_yards(&at_quarterback, |p| {
        p.is_offense() && p.pass_outcome == Some(AttemptOutcome::Complete)
    }))
}

impl PlayerTotals {
    pub fn from_plays(rows: &[&PlayEvent], player: &str) -> Self {
        let actions = acted(rows, player);
        let field = on_field(rows, player);

        let sacks = count(&actions, |p| p.is_defense() && p.is_action(Action::Sack));
        let flag_pulls = count(&actions, |p| p.is_defense() && p.is_action(Action::FlagPull));

        Self {
            offensive_position: most_common_position(&field, player, Side::Offense),
            defensive_position: most_common_position(&field, player, Side::Defense),
            passing_yards: passing_yards(rows, player),
            rushing_yards: sum_yards(&actions, |p| p.is_offense() && p.is_action(Action::Run)),
            receiving_yards: sum_yards(&actions, |p| p.is_offense() && p.is_action(Action::Pass)),
            rushing_tds: count(&actions, |p| {
                p.is_offense() && p.touchdown_type == Some(TouchdownType::Rushing)
            }),
            receiving_tds: count(&actions, |p| {
                p.is_offense() && p.touchdown_type == Some(TouchdownType::Passing)
            }),
            sacks,
            flags_pulled: flag_pulls + sacks,
            offensive_plays: count(&field, PlayEvent::is_offense),
            successful_offense: count(&field, |p| {
                p.is_offense() && p.yards.is_some_and(|yards| yards > 0)
            }),
            defensive_plays: count(&field, PlayEvent::is_defense),
            successful_defense: count(&field, |p| {
                p.is_defense() && p.yards.is_some_and(|yards| yards <= 0)
            }),
        }
    }
}

fn position_value(position: Option<Position>) -> StatValue {
    position.map_or_else(StatValue::not_available, |p| p.to_string().into())
}

/// Season-long averages for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonStats {
    pub player: String,
    pub games_played: u32,
    pub totals: PlayerTotals,
}

impl PlayerSeasonStats {
    pub fn from_plays(plays: &[PlayEvent], player: &str) -> Result<Self, StatsError> {
        let rows: Vec<&PlayEvent> = plays.iter().collect();
        let games_played = on_field(&rows, player)
            .iter()
            .map(|p| p.week)
            .collect::<BTreeSet<_>>()
            .len() as u32;

        if games_played == 0 && acted(&rows, player).is_empty() {
            return Err(StatsError::NoPlayerData(player.to_string()));
        }

        Ok(Self {
            player: player.to_string(),
            games_played,
            totals: PlayerTotals::from_plays(&rows, player),
        })
    }

    fn average(&self, total: impl Into<f64>) -> StatValue {
        StatValue::decimal(per_game(total.into(), self.games_played))
    }

    pub fn to_table(&self) -> StatTable {
        let t = &self.totals;
        let passing = match t.passing_yards {
            Some(yards) => self.average(yards as f64),
            None => StatValue::not_available(),
        };

        StatTable::new()
            .with("Games Played (w/stats available)", self.games_played)
            .with("Most Common Offensive Position", position_value(t.offensive_position))
            .with("Most Common Defensive Position", position_value(t.defensive_position))
            .with("Average Passing Yards per Game", passing)
            .with("Average Rushing Yards per Game", self.average(t.rushing_yards as f64))
            .with("Average Receiving Yards per Game", self.average(t.receiving_yards as f64))
            .with("Average Rushing TDs per Game", self.average(t.rushing_tds))
            .with("Average Receiving TDs per Game", self.average(t.receiving_tds))
            .with("Average # Flags Pulled per Game", self.average(t.flags_pulled))
            .with("Average Sacks per Game", self.average(t.sacks))
            .with(
                "Average # Offensive Plays on Field per Game",
                self.average(t.offensive_plays),
            )
            .with(
                "Average # Defensive Plays on Field per Game",
                self.average(t.defensive_plays),
            )
    }
}

/// One player's raw totals for a single week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerGameStats {
    pub player: String,
    pub week: u32,
    pub totals: PlayerTotals,
}

impl PlayerGameStats {
    pub fn from_plays(plays: &[PlayEvent], player: &str, week: u32) -> Result<Self, StatsError> {
        let rows = week_slice(plays, week);
        if on_field(&rows, player).is_empty() && acted(&rows, player).is_empty() {
            return Err(StatsError::NoPlayerGameData {
                player: player.to_string(),
                week,
            });
        }

        Ok(Self {
            player: player.to_string(),
            week,
            totals: PlayerTotals::from_plays(&rows, player),
        })
    }

    pub fn to_table(&self) -> StatTable {
        let t = &self.totals;
        let passing = t
            .passing_yards
            .map_or_else(StatValue::not_available, StatValue::from);

        StatTable::new()
            .with("Position (Offensive)", position_value(t.offensive_position))
            .with("Position (Defense)", position_value(t.defensive_position))
            .with("Passing yards", passing)
            .with("Rushing yards", t.rushing_yards)
            .with("Receiving yards", t.receiving_yards)
            .with("Rushing TDs", t.rushing_tds)
            .with("Receiving TDs", t.receiving_tds)
            .with("Sacks", t.sacks)
            .with("Flags pulled", t.flags_pulled)
            .with("Number of offensive plays", t.offensive_plays)
            .with(
                "Successful offensive plays (%)",
                StatValue::decimal(percentage(t.successful_offense, t.offensive_plays)),
            )
            .with("Number of defensive plays", t.defensive_plays)
            .with(
                "Successful defensive plays (%)",
                StatValue::decimal(percentage(t.successful_defense, t.defensive_plays)),
            )
    }
}
