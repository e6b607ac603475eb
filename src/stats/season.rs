use super::{
    filters::{per_game, percentage, week_slice, weeks_with_data},
    game::GameTotals,
    table::{StatTable, StatValue},
    StatsError, YardageScope,
};
use crate::plays::PlayEvent;

/// Per-week totals and their season sum.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    pub per_week: Vec<(u32, GameTotals)>,
    pub totals: GameTotals,
}

impl SeasonSummary {
    pub fn from_plays(plays: &[PlayEvent], scope: YardageScope) -> Result<Self, StatsError> {
        let weeks = weeks_with_data(plays);
        if weeks.is_empty() {
            return Err(StatsError::NoPlays);
        }

        let mut totals = GameTotals::default();
        let per_week = weeks
            .into_iter()
            .map(|week| {
                let game = GameTotals::from_plays(&week_slice(plays, week), scope);
                totals += &game;
                (week, game)
            })
            .collect();

        Ok(Self { per_week, totals })
    }

    pub fn games(&self) -> u32 {
        self.per_week.len() as u32
    }

    fn average(&self, total: impl Into<f64>) -> StatValue {
        StatValue::decimal(per_game(total.into(), self.games()))
    }

    /// Mean of a per-week rate, not the rate of the season sums.
    fn average_rate(&self, rate: impl Fn(&GameTotals) -> f64) -> StatValue {
        let sum: f64 = self.per_week.iter().map(|(_, game)| rate(game)).sum();
        StatValue::decimal(per_game(sum, self.games()))
    }

    pub fn to_table(&self, team_name: &str) -> StatTable {
        let t = &self.totals;
        StatTable::new()
            .with("Games Played (w/stats)", self.games())
            .with(
                format!("Average {team_name} Points per Game"),
                self.average(t.team_points as f64),
            )
            .with(
                "Average Opponent Points per Game",
                self.average(t.opponent_points as f64),
            )
            .with("Average Total Plays per Game", self.average(t.plays))
            .with("Average Offensive Plays per Game", self.average(t.offensive_plays))
            .with("Average Defensive Plays per Game", self.average(t.defensive_plays))
            .with("Average % Time on Offense", self.average_rate(GameTotals::offense_share))
            .with(
                "Average Successful Offensive Plays per Game",
                self.average(t.successful_offense),
            )
            .with(
                "Average Successful Defensive Plays per Game",
                self.average(t.successful_defense),
            )
            .with(
                "% Successful Offensive Plays per Game",
                self.average_rate(GameTotals::offense_success_rate),
            )
            .with(
                "% Successful Defensive Plays per Game",
                self.average_rate(GameTotals::defense_success_rate),
            )
            .with("Average Passing TDs per Game", self.average(t.passing_tds))
            .with("Average Rushing TDs per Game", self.average(t.rushing_tds))
            .with("Average Total TDs per Game", self.average(t.total_tds()))
            .with(
                "Average Interceptions (while on Offense) per Game",
                self.average(t.interceptions_thrown),
            )
            .with(
                "Average Interceptions (while on Defense) per Game",
                self.average(t.interceptions_gained),
            )
            .with("Average Rushing Yards per Game", self.average(t.rushing_yards as f64))
            .with("Average Receiving Yards per Game", self.average(t.receiving_yards as f64))
            .with("Average Flags Pulled per Game", self.average(t.flags_pulled))
            .with(
                "Average Successful Conversions per Game",
                self.average(t.conversions_made),
            )
            .with(
                "Average Attempted Conversions per Game",
                self.average(t.conversions_attempted),
            )
            // Unlike the other rates this one is pooled: season made over season
            // attempted from unrounded totals, not the ratio of the rounded
            // per-game averages above, so a week with more attempts weighs more.
            .with(
                "Average Conversion Rate (%)",
                StatValue::decimal(percentage(t.conversions_made, t.conversions_attempted)),
            )
            .with("Average Penalties per Game", self.average(t.penalties))
    }
}
