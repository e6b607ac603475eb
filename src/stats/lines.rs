//! Per-player, per-game lines derived from the play log.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    filters::{acted, count, on_field, percentage, week_slice, weeks_with_data},
    game::GameTotals,
    player::PlayerTotals,
    table::round_tenth,
    YardageScope,
};
use crate::plays::{Action, AttemptOutcome, PlayEvent, PlayLogError, Position};

const NOT_PLAYED: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PlayerGameLine {
    pub player: String,
    pub week: u32,
    pub opponent: String,
    pub result: String,
    #[serde(rename = "POSITION (OFF)")]
    pub offensive_position: String,
    #[serde(rename = "POSITION (DEF)")]
    pub defensive_position: String,
    #[serde(rename = "COMPLETED PASSES")]
    pub completed_passes: u32,
    #[serde(rename = "ATTEMPTED PASSES")]
    pub attempted_passes: u32,
    #[serde(rename = "COMPLETION %")]
    pub completion_pct: f64,
    #[serde(rename = "PASSING YARDS")]
    pub passing_yards: i64,
    pub carries: u32,
    #[serde(rename = "RUSHING YARDS")]
    pub rushing_yards: i64,
    #[serde(rename = "LONGEST RUSH")]
    pub longest_rush: i64,
    pub receptions: u32,
    #[serde(rename = "RECEIVING YARDS")]
    pub receiving_yards: i64,
    #[serde(rename = "RUSHING TDs")]
    pub rushing_tds: u32,
    #[serde(rename = "RECEIVING TDs")]
    pub receiving_tds: u32,
    #[serde(rename = "TOTAL TDs")]
    pub total_tds: u32,
    #[serde(rename = "FLAGS PULLED")]
    pub flags_pulled: u32,
    #[serde(rename = "SACKS (ON DEF)")]
    pub sacks: u32,
    #[serde(rename = "CONVERSION POINTS")]
    pub conversion_points: i64,
    #[serde(rename = "TOTAL POINTS")]
    pub total_points: i64,
}

fn position_label(position: Option<Position>) -> String {
    position.map_or_else(|| NOT_PLAYED.to_string(), |p| p.to_string())
}

impl PlayerGameLine {
    fn build(rows: &[&PlayEvent], player: &str, week: u32, opponent: &str, result: &str) -> Self {
        let totals = PlayerTotals::from_plays(rows, player);
        let actions = acted(rows, player);
        let field = on_field(rows, player);

        let passes: Vec<&PlayEvent> = field
            .iter()
            .copied()
            .filter(|p| {
                p.is_offense()
                    && p.pass_outcome.is_some()
                    && p.player_positions
                        .positions_of(player)
                        .any(|position| position == Position::Quarterback)
            })
            .collect();
        let completed_passes = count(&passes, |p| p.pass_outcome == Some(AttemptOutcome::Complete));
        let attempted_passes = passes.len() as u32;

        let runs: Vec<&PlayEvent> = actions
            .iter()
            .copied()
            .filter(|p| p.is_offense() && p.is_action(Action::Run))
            .collect();

        let conversion_points: i64 = actions
            .iter()
            .filter(|p| p.is_offense() && p.is_action(Action::Conversion))
            .map(|p| i64::from(p.points))
            .sum();
        let total_tds = totals.rushing_tds + totals.receiving_tds;

        Self {
            player: player.to_string(),
            week,
            opponent: opponent.to_string(),
            result: result.to_string(),
            offensive_position: position_label(totals.offensive_position),
            defensive_position: position_label(totals.defensive_position),
            completed_passes,
            attempted_passes,
            completion_pct: round_tenth(percentage(completed_passes, attempted_passes)),
            passing_yards: totals.passing_yards.unwrap_or_default(),
            carries: runs.len() as u32,
            rushing_yards: totals.rushing_yards,
            longest_rush: runs.iter().map(|p| p.yards_or_zero()).max().unwrap_or_default(),
            receptions: count(&actions, |p| {
                p.is_offense()
                    && p.is_action(Action::Pass)
                    && p.pass_outcome == Some(AttemptOutcome::Complete)
            }),
            receiving_yards: totals.receiving_yards,
            rushing_tds: totals.rushing_tds,
            receiving_tds: totals.receiving_tds,
            total_tds,
            flags_pulled: totals.flags_pulled,
            sacks: totals.sacks,
            conversion_points,
            total_points: i64::from(total_tds) * 6 + conversion_points,
        }
    }

    /// One line per player on the field in `week`, ordered by name.
    pub fn for_week(plays: &[PlayEvent], week: u32) -> Vec<Self> {
        let rows = week_slice(plays, week);
        let Some(first) = rows.first() else {
            return Vec::new();
        };
        // Outcome does not depend on which rows count towards yardage.
        let result = GameTotals::from_plays(&rows, YardageScope::AllPlays).outcome();

        let players: BTreeSet<&str> = rows
            .iter()
            .flat_map(|p| p.player_positions.iter().map(|a| a.player.as_str()))
            .collect();

        players
            .into_iter()
            .map(|player| Self::build(&rows, player, week, &first.opponent, result))
            .collect()
    }

    pub fn for_season(plays: &[PlayEvent]) -> Vec<Self> {
        weeks_with_data(plays)
            .into_iter()
            .flat_map(|week| Self::for_week(plays, week))
            .collect()
    }

    /// Renders lines as CSV with the upper-case column header.
    pub fn to_csv(lines: &[Self]) -> Result<Vec<u8>, PlayLogError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for line in lines {
            writer.serialize(line)?;
        }
        writer
            .into_inner()
            .map_err(|e| PlayLogError::Io(e.into_error()))
    }
}
