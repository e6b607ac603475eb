use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    entry::EntrySession,
    errors::{PlayLogError, ValidationError},
    models::{contains_reserved_separator, Action, PlayEvent, PlayerPositions, NO_SPECIFIC_PLAYER},
    repository::{latest_sequence, PlayLogRepository},
    types::{PlayForm, SelectWeekRequest},
};
use crate::{config::TeamProfile, shared::AppError};

/// Number of players a team fields on every snap.
pub const PLAYERS_ON_FIELD: usize = 7;

/// Service for recording and correcting plays
pub struct PlayEntryService {
    repository: Arc<dyn PlayLogRepository>,
    team: Arc<TeamProfile>,
}

impl PlayEntryService {
    pub fn new(repository: Arc<dyn PlayLogRepository>, team: Arc<TeamProfile>) -> Self {
        Self { repository, team }
    }

    /// Current log for the admin view; a log that does not exist yet is empty.
    pub async fn list_plays(&self) -> Result<Vec<PlayEvent>, AppError> {
        match self.repository.load().await {
            Ok(plays) => Ok(plays),
            Err(PlayLogError::Missing(_)) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Entry state for `week`, picking up where the log left off so play
    /// sequences stay unique within the week.
    #[instrument(skip(self))]
    pub async fn open_entry(&self, week: u32) -> Result<EntrySession, AppError> {
        if week == 0 {
            return Err(ValidationError::InvalidWeek.into());
        }

        let plays = self.list_plays().await?;
        let opponent = plays
            .iter()
            .find(|p| p.week == week)
            .map(|p| p.opponent.clone())
            .unwrap_or_default();

        Ok(EntrySession {
            week,
            opponent,
            play_count: latest_sequence(&plays, week),
        })
    }

    /// Switches the session to another week and/or sets the opponent.
    /// The counter is re-read from the log; a week that already has plays
    /// keeps its logged opponent.
    #[instrument(skip(self, entry))]
    pub async fn select_week(
        &self,
        entry: &mut EntrySession,
        request: SelectWeekRequest,
    ) -> Result<(), AppError> {
        let logged = self.open_entry(request.week).await?;
        let typed_opponent = (request.week == entry.week).then(|| entry.opponent.clone());
        if request.week != entry.week {
            info!(week = logged.week, play_count = logged.play_count, "Switched entry week");
        }
        *entry = logged;
        if entry.play_count == 0 {
            if let Some(opponent) = typed_opponent {
                entry.opponent = opponent;
            }
        }

        if let Some(opponent) = request
            .opponent
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
        {
            if entry.play_count > 0 && opponent != entry.opponent {
                warn!(week = entry.week, logged = %entry.opponent, requested = %opponent, "Opponent change rejected");
                return Err(ValidationError::OpponentLocked {
                    week: entry.week,
                    opponent: entry.opponent.clone(),
                }
                .into());
            }
            entry.opponent = opponent;
        }

        Ok(())
    }

    /// Validates a form, appends the play and advances the session counter.
    /// The log assigns the sequence, so several logins on one week never
    /// hand out the same number.
    #[instrument(skip(self, entry, form), fields(week = entry.week))]
    pub async fn submit_play(
        &self,
        entry: &mut EntrySession,
        form: PlayForm,
    ) -> Result<PlayEvent, AppError> {
        let event = match self.build_event(entry, form) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Rejected play entry");
                return Err(e.into());
            }
        };

        let stored = self.repository.append(event).await?;
        entry.play_count = stored.play_sequence;

        info!(
            play = stored.play_sequence,
            action = ?stored.action,
            points = stored.points,
            "Play recorded"
        );
        Ok(stored)
    }

    /// Removes the newest logged play of the session's week and re-syncs the
    /// session counter from the log.
    #[instrument(skip(self, entry), fields(week = entry.week, play = entry.play_count))]
    pub async fn delete_last_play(&self, entry: &mut EntrySession) -> Result<PlayEvent, AppError> {
        let deleted = self.repository.delete_latest(entry.week).await?;
        let had_count = entry.play_count;
        entry.play_count = latest_sequence(&self.list_plays().await?, entry.week);

        let Some(deleted) = deleted else {
            let message = if had_count == 0 {
                "No plays have been inputted yet for deletion."
            } else {
                "No play available to delete for the current week."
            };
            return Err(AppError::NotFound(message.to_string()));
        };

        info!(deleted = deleted.play_sequence, play_count = entry.play_count, "Last play deleted");
        Ok(deleted)
    }

    fn check_name(&self, name: &str) -> Result<(), ValidationError> {
        if contains_reserved_separator(name) {
            return Err(ValidationError::ReservedSeparator(name.to_string()));
        }
        if !self.team.roster.is_empty() && !self.team.is_rostered(name) {
            return Err(ValidationError::UnknownPlayer(name.to_string()));
        }
        Ok(())
    }

    fn build_event(&self, entry: &EntrySession, form: PlayForm) -> Result<PlayEvent, ValidationError> {
        if entry.week == 0 {
            return Err(ValidationError::InvalidWeek);
        }
        if entry.opponent.trim().is_empty() {
            return Err(ValidationError::MissingOpponent);
        }
        if form.players_on_field.len() != PLAYERS_ON_FIELD {
            return Err(ValidationError::WrongPlayerCount {
                expected: PLAYERS_ON_FIELD,
                actual: form.players_on_field.len(),
            });
        }

        let mut seen = HashSet::new();
        for player in &form.players_on_field {
            self.check_name(player)?;
            if !seen.insert(player.as_str()) {
                return Err(ValidationError::DuplicatePlayer(player.clone()));
            }
        }

        let mut positions = PlayerPositions::new();
        for pick in &form.positions {
            if !seen.contains(pick.player.as_str()) {
                return Err(ValidationError::PositionForAbsentPlayer(pick.player.clone()));
            }
            if pick.position.side() != form.side {
                return Err(ValidationError::PositionWrongSide {
                    player: pick.player.clone(),
                    position: pick.position,
                    side: form.side,
                });
            }
        }
        // Stored in on-field order regardless of the order picks arrived in.
        for player in &form.players_on_field {
            let pick = form
                .positions
                .iter()
                .rev()
                .find(|pick| &pick.player == player)
                .ok_or_else(|| ValidationError::MissingPosition(player.clone()))?;
            positions.assign(player.clone(), pick.position.to_string());
        }

        if !(1..=4).contains(&form.down) {
            return Err(ValidationError::DownOutOfRange(form.down));
        }
        if !(-100..=100).contains(&form.yards) {
            return Err(ValidationError::YardsOutOfRange(form.yards));
        }

        let action = form.action;
        let touchdown_type = match action {
            Action::Touchdown => Some(form.touchdown_type.ok_or(ValidationError::MissingAttribute {
                action,
                attribute: "a touchdown type",
            })?),
            _ => None,
        };
        let pass_outcome = match action {
            Action::Pass => Some(form.pass_outcome.ok_or(ValidationError::MissingAttribute {
                action,
                attribute: "a pass outcome",
            })?),
            _ => None,
        };
        let (conversion_type, conversion_outcome) = match action {
            Action::Conversion => (
                Some(form.conversion_type.ok_or(ValidationError::MissingAttribute {
                    action,
                    attribute: "a conversion type",
                })?),
                Some(form.conversion_outcome.ok_or(ValidationError::MissingAttribute {
                    action,
                    attribute: "a conversion outcome",
                })?),
            ),
            _ => (None, None),
        };

        let player_involved = match form.player_involved {
            Some(name) if action.names_player() && name != NO_SPECIFIC_PLAYER => {
                self.check_name(&name)?;
                Some(name)
            }
            _ => None,
        };

        Ok(PlayEvent {
            week: entry.week,
            opponent: entry.opponent.clone(),
            half: Some(form.half),
            down: Some(form.down),
            yards_to_go: Some(form.yards_to_go),
            play_sequence: entry.next_play(),
            side: Some(form.side),
            players_on_field: form.players_on_field,
            player_positions: positions,
            action: Some(action),
            player_involved,
            touchdown_type,
            pass_outcome,
            conversion_type,
            conversion_outcome,
            yards: Some(form.yards),
            points: PlayEvent::points_for(Some(action), conversion_type, conversion_outcome),
            notes: form.notes,
        })
    }
}
