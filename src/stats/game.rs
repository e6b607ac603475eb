use std::ops::AddAssign;

use serde::Serialize;

use super::{
    filters::{count, percentage, sum_points, sum_yards},
    YardageScope,
};
use crate::plays::{Action, AttemptOutcome, PlayEvent, TouchdownType};

/// Team quantities for one game, or the sum of several.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameTotals {
    pub team_points: i64,
    pub opponent_points: i64,
    pub plays: u32,
    pub offensive_plays: u32,
    pub defensive_plays: u32,
    pub passing_tds: u32,
    pub rushing_tds: u32,
    pub interceptions_thrown: u32,
    pub interceptions_gained: u32,
    pub rushing_yards: i64,
    pub receiving_yards: i64,
    pub flags_pulled: u32,
    pub conversions_made: u32,
    pub conversions_attempted: u32,
    pub penalties: u32,
    pub successful_offense: u32,
    pub successful_defense: u32,
}

fn is_touchdown(play: &PlayEvent, kind: TouchdownType) -> bool {
    play.is_offense() && play.is_action(Action::Touchdown) && play.touchdown_type == Some(kind)
}

fn counts_as_rushing(play: &PlayEvent, scope: YardageScope) -> bool {
    let scored = play.touchdown_type == Some(TouchdownType::Rushing);
    match scope {
        YardageScope::AllPlays => play.is_offense() && (play.is_action(Action::Run) || scored),
        YardageScope::ScoringPlaysOnly => play.is_offense() && scored,
    }
}

fn counts_as_receiving(play: &PlayEvent, scope: YardageScope) -> bool {
    let scored = play.touchdown_type == Some(TouchdownType::Passing);
    match scope {
        YardageScope::AllPlays => play.is_offense() && (play.is_action(Action::Pass) || scored),
        YardageScope::ScoringPlaysOnly => play.is_offense() && scored,
    }
}

impl GameTotals {
    pub fn from_plays(plays: &[&PlayEvent], scope: YardageScope) -> Self {
        Self {
            team_points: sum_points(plays, |p| p.is_offense() && !p.is_action(Action::PickSix)),
            opponent_points: sum_points(plays, |p| {
                p.is_defense() || (p.is_offense() && p.is_action(Action::PickSix))
            }),
            plays: plays.len() as u32,
            offensive_plays: count(plays, PlayEvent::is_offense),
            defensive_plays: count(plays, PlayEvent::is_defense),
            passing_tds: count(plays, |p| is_touchdown(p, TouchdownType::Passing)),
            rushing_tds: count(plays, |p| is_touchdown(p, TouchdownType::Rushing)),
            interceptions_thrown: count(plays, |p| {
                p.is_offense() && p.action.is_some_and(Action::is_interception)
            }),
            interceptions_gained: count(plays, |p| {
                p.is_defense() && p.action.is_some_and(Action::is_interception)
            }),
            rushing_yards: sum_yards(plays, |p| counts_as_rushing(p, scope)),
            receiving_yards: sum_yards(plays, |p| counts_as_receiving(p, scope)),
            flags_pulled: count(plays, |p| p.is_action(Action::FlagPull)),
            conversions_made: count(plays, |p| {
                p.is_offense() && p.conversion_outcome == Some(AttemptOutcome::Complete)
            }),
            conversions_attempted: count(plays, |p| {
                p.is_offense() && p.is_action(Action::Conversion)
            }),
            penalties: count(plays, |p| p.is_action(Action::Penalty)),
            successful_offense: count(plays, |p| {
                p.is_offense() && p.yards.is_some_and(|yards| yards > 0)
            }),
            successful_defense: count(plays, |p| {
                p.is_defense() && p.yards.is_some_and(|yards| yards <= 0)
            }),
        }
    }

    pub fn total_tds(&self) -> u32 {
        self.passing_tds + self.rushing_tds
    }

    pub fn offense_share(&self) -> f64 {
        percentage(self.offensive_plays, self.plays)
    }

    pub fn offense_success_rate(&self) -> f64 {
        percentage(self.successful_offense, self.offensive_plays)
    }

    pub fn defense_success_rate(&self) -> f64 {
        percentage(self.successful_defense, self.defensive_plays)
    }

    pub fn conversion_rate(&self) -> f64 {
        percentage(self.conversions_made, self.conversions_attempted)
    }

    /// "W" only on a strictly higher score.
    pub fn outcome(&self) -> &'static str {
        if self.team_points > self.opponent_points {
            "W"
        } else {
            "L"
        }
    }
}

impl AddAssign<&GameTotals> for GameTotals {
    fn add_assign(&mut self, other: &GameTotals) {
        self.team_points += other.team_points;
        self.opponent_points += other.opponent_points;
        self.plays += other.plays;
        self.offensive_plays += other.offensive_plays;
        self.defensive_plays += other.defensive_plays;
        self.passing_tds += other.passing_tds;
        self.rushing_tds += other.rushing_tds;
        self.interceptions_thrown += other.interceptions_thrown;
        self.interceptions_gained += other.interceptions_gained;
        self.rushing_yards += other.rushing_yards;
        self.receiving_yards += other.receiving_yards;
        self.flags_pulled += other.flags_pulled;
        self.conversions_made += other.conversions_made;
        self.conversions_attempted += other.conversions_attempted;
        self.penalties += other.penalties;
        self.successful_offense += other.successful_offense;
        self.successful_defense += other.successful_defense;
    }
}
