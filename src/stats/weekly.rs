use serde::Serialize;

use super::{
    filters::week_slice,
    game::GameTotals,
    table::{StatTable, StatValue},
    StatsError, YardageScope,
};
use crate::plays::PlayEvent;

/// One game's result and raw counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxScore {
    pub week: u32,
    pub opponent: String,
    pub outcome: &'static str,
    pub totals: GameTotals,
}

impl BoxScore {
    pub fn from_plays(plays: &[PlayEvent], week: u32, scope: YardageScope) -> Result<Self, StatsError> {
        let rows = week_slice(plays, week);
        let first = rows.first().ok_or(StatsError::NoWeekData(week))?;
        let totals = GameTotals::from_plays(&rows, scope);

        Ok(Self {
            week,
            opponent: first.opponent.clone(),
            outcome: totals.outcome(),
            totals,
        })
    }

    pub fn to_table(&self, team_name: &str) -> StatTable {
        let t = &self.totals;
        StatTable::new()
            .with("Week", self.week)
            .with("Opponent Name", self.opponent.as_str())
            .with("Outcome", self.outcome)
            .with(format!("{team_name} Score"), t.team_points)
            .with("Opponent Score", t.opponent_points)
            .with("Total Plays", t.plays)
            .with("Total Offensive Plays", t.offensive_plays)
            .with("Total Defensive Plays", t.defensive_plays)
            .with("% Plays on Offense", StatValue::decimal(t.offense_share()))
            .with("Successful Offensive Plays", t.successful_offense)
            .with(
                "% Successful Offensive Plays",
                StatValue::decimal(t.offense_success_rate()),
            )
            .with("Successful Defensive Stops", t.successful_defense)
            .with(
                "% Successful Defensive Stops",
                StatValue::decimal(t.defense_success_rate()),
            )
            .with("Passing TDs", t.passing_tds)
            .with("Rushing TDs", t.rushing_tds)
            .with("Total TDs", t.total_tds())
            .with("Int (while on offense)", t.interceptions_thrown)
            .with("Int (while on defense)", t.interceptions_gained)
            .with("Total Rushing Yards", t.rushing_yards)
            .with("Total Receiving Yards", t.receiving_yards)
            .with("Total Flags Pulled", t.flags_pulled)
            .with("Successful Conversions", t.conversions_made)
            .with("Attempted Conversions", t.conversions_attempted)
            .with("Conversion Rate", StatValue::decimal(t.conversion_rate()))
            .with("Total Penalties", t.penalties)
    }
}
