use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    filters::weeks_with_data,
    lines::PlayerGameLine,
    player::{PlayerGameStats, PlayerSeasonStats},
    season::SeasonSummary,
    weekly::BoxScore,
    StatsError, YardageScope,
};
use crate::plays::{models::NO_SPECIFIC_PLAYER, PlayEvent, PlayLogError, PlayLogRepository};

const DEFAULT_MAX_WEEKS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekListing {
    pub with_data: Vec<u32>,
    pub selectable: Vec<u32>,
}

/// Read-side views over the play log. Every call recomputes from the full
/// log.
pub struct StatsService {
    repository: Arc<dyn PlayLogRepository>,
    scope: YardageScope,
    roster: Vec<String>,
    max_weeks: u32,
}

impl StatsService {
    pub fn builder(repository: Arc<dyn PlayLogRepository>) -> StatsServiceBuilder {
        StatsServiceBuilder::new(repository)
    }

    pub fn yardage_scope(&self) -> YardageScope {
        self.scope
    }

    async fn plays(&self) -> Result<Vec<PlayEvent>, StatsError> {
        let plays = self.repository.load().await?;
        debug!(plays = plays.len(), "Loaded plays for aggregation");
        Ok(plays)
    }

    /// Like `plays`, but a log that does not exist yet reads as empty.
    async fn plays_or_empty(&self) -> Result<Vec<PlayEvent>, StatsError> {
        match self.repository.load().await {
            Ok(plays) => Ok(plays),
            Err(PlayLogError::Missing(_)) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn season_summary(&self) -> Result<SeasonSummary, StatsError> {
        SeasonSummary::from_plays(&self.plays().await?, self.scope)
    }

    #[instrument(skip(self))]
    pub async fn box_score(&self, week: u32) -> Result<BoxScore, StatsError> {
        BoxScore::from_plays(&self.plays().await?, week, self.scope)
    }

    #[instrument(skip(self))]
    pub async fn player_season(&self, player: &str) -> Result<PlayerSeasonStats, StatsError> {
        PlayerSeasonStats::from_plays(&self.plays().await?, player)
    }

    #[instrument(skip(self))]
    pub async fn player_game(&self, player: &str, week: u32) -> Result<PlayerGameStats, StatsError> {
        PlayerGameStats::from_plays(&self.plays().await?, player, week)
    }

    #[instrument(skip(self))]
    pub async fn game_lines(&self, week: u32) -> Result<Vec<PlayerGameLine>, StatsError> {
        let lines = PlayerGameLine::for_week(&self.plays().await?, week);
        if lines.is_empty() {
            return Err(StatsError::NoWeekData(week));
        }
        Ok(lines)
    }

    #[instrument(skip(self))]
    pub async fn export_game_lines(&self) -> Result<Vec<u8>, StatsError> {
        let lines = PlayerGameLine::for_season(&self.plays_or_empty().await?);
        debug!(lines = lines.len(), "Exporting game lines");
        Ok(PlayerGameLine::to_csv(&lines)?)
    }

    pub async fn weeks(&self) -> Result<WeekListing, StatsError> {
        let plays = self.plays_or_empty().await?;
        Ok(WeekListing {
            with_data: weeks_with_data(&plays),
            selectable: (1..=self.max_weeks).collect(),
        })
    }

    /// Configured roster plus anyone named in the log, sorted.
    pub async fn players(&self) -> Result<Vec<String>, StatsError> {
        let plays = self.plays_or_empty().await?;

        let mut names: BTreeSet<String> = self.roster.iter().cloned().collect();
        for play in &plays {
            names.extend(play.player_positions.iter().map(|a| a.player.clone()));
            names.extend(play.players_on_field.iter().cloned());
            names.extend(play.player_involved.iter().cloned());
        }
        names.remove(NO_SPECIFIC_PLAYER);
        names.remove("");

        Ok(names.into_iter().collect())
    }
}

pub struct StatsServiceBuilder {
    repository: Arc<dyn PlayLogRepository>,
    scope: YardageScope,
    roster: Vec<String>,
    max_weeks: u32,
}

impl StatsServiceBuilder {
    fn new(repository: Arc<dyn PlayLogRepository>) -> Self {
        Self {
            repository,
            scope: YardageScope::default(),
            roster: Vec::new(),
            max_weeks: DEFAULT_MAX_WEEKS,
        }
    }

    pub fn with_yardage_scope(mut self, scope: YardageScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_roster(mut self, roster: Vec<String>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_max_weeks(mut self, max_weeks: u32) -> Self {
        self.max_weeks = max_weeks;
        self
    }

    pub fn build(self) -> StatsService {
        StatsService {
            repository: self.repository,
            scope: self.scope,
            roster: self.roster,
            max_weeks: self.max_weeks,
        }
    }
}
