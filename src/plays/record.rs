//! Flat CSV row for the play log and its conversion to [`PlayEvent`].

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::{
    errors::PlayLogError,
    models::{PlayEvent, PlayerPositions, NO_SPECIFIC_PLAYER},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    #[serde(rename = "Week", deserialize_with = "lenient_int")]
    pub week: Option<i64>,
    #[serde(rename = "Opponent", default)]
    pub opponent: String,
    #[serde(rename = "Half", default)]
    pub half: Option<String>,
    #[serde(rename = "Down", default, deserialize_with = "lenient_int")]
    pub down: Option<i64>,
    #[serde(rename = "Yards to Go", default, deserialize_with = "lenient_int")]
    pub yards_to_go: Option<i64>,
    #[serde(rename = "Play", default, deserialize_with = "lenient_int")]
    pub play: Option<i64>,
    #[serde(rename = "Offense/Defense", default)]
    pub side: Option<String>,
    #[serde(rename = "Players on Field", default)]
    pub players_on_field: String,
    #[serde(rename = "Player Positions", default)]
    pub player_positions: String,
    #[serde(rename = "Action", default)]
    pub action: Option<String>,
    #[serde(rename = "Player Involved", default)]
    pub player_involved: Option<String>,
    #[serde(rename = "Touchdown Type", default)]
    pub touchdown_type: Option<String>,
    #[serde(rename = "Pass Outcome", default)]
    pub pass_outcome: Option<String>,
    #[serde(rename = "Conversion Type", default)]
    pub conversion_type: Option<String>,
    #[serde(rename = "Conversion Outcome", default)]
    pub conversion_outcome: Option<String>,
    #[serde(rename = "Yards", default, deserialize_with = "lenient_int")]
    pub yards: Option<i64>,
    #[serde(rename = "Points", default, deserialize_with = "lenient_int")]
    pub points: Option<i64>,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}

impl PlayRecord {
    pub const HEADERS: [&'static str; 18] = [
        "Week",
        "Opponent",
        "Half",
        "Down",
        "Yards to Go",
        "Play",
        "Offense/Defense",
        "Players on Field",
        "Player Positions",
        "Action",
        "Player Involved",
        "Touchdown Type",
        "Pass Outcome",
        "Conversion Type",
        "Conversion Outcome",
        "Yards",
        "Points",
        "Notes",
    ];

    /// Converts a row read from disk. `row` is the 1-based data row used in
    /// error messages.
    pub fn into_event(self, row: usize) -> Result<PlayEvent, PlayLogError> {
        let week = self
            .week
            .and_then(|w| u32::try_from(w).ok())
            .filter(|w| *w > 0)
            .ok_or_else(|| PlayLogError::MalformedRow {
                row,
                message: "Week must be a positive integer".to_string(),
            })?;

        let player_positions = PlayerPositions::parse(&self.player_positions)
            .map_err(|source| PlayLogError::MalformedPositions { row, source })?;

        let players_on_field = self
            .players_on_field
            .split(PlayerPositions::ENTRY_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let player_involved = self
            .player_involved
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && name != NO_SPECIFIC_PLAYER);

        Ok(PlayEvent {
            week,
            opponent: self.opponent,
            half: label(self.half),
            down: self.down.and_then(|d| u8::try_from(d).ok()),
            yards_to_go: self.yards_to_go.and_then(|y| u32::try_from(y).ok()),
            play_sequence: self
                .play
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or_default(),
            side: label(self.side),
            players_on_field,
            player_positions,
            action: label(self.action),
            player_involved,
            touchdown_type: label(self.touchdown_type),
            pass_outcome: label(self.pass_outcome),
            conversion_type: label(self.conversion_type),
            conversion_outcome: label(self.conversion_outcome),
            yards: self.yards.and_then(|y| i32::try_from(y).ok()),
            points: self
                .points
                .and_then(|p| i32::try_from(p).ok())
                .unwrap_or_default(),
            notes: self.notes,
        })
    }
}

impl From<&PlayEvent> for PlayRecord {
    fn from(event: &PlayEvent) -> Self {
        Self {
            week: Some(event.week.into()),
            opponent: event.opponent.clone(),
            half: event.half.map(|h| h.to_string()),
            down: event.down.map(i64::from),
            yards_to_go: event.yards_to_go.map(i64::from),
            play: Some(event.play_sequence.into()),
            side: event.side.map(|s| s.to_string()),
            players_on_field: event
                .players_on_field
                .join(PlayerPositions::ENTRY_SEPARATOR),
            player_positions: event.player_positions.encode(),
            action: event.action.map(|a| a.to_string()),
            player_involved: event.player_involved.clone(),
            touchdown_type: event.touchdown_type.map(|t| t.to_string()),
            pass_outcome: event.pass_outcome.map(|o| o.to_string()),
            conversion_type: event.conversion_type.map(|t| t.to_string()),
            conversion_outcome: event.conversion_outcome.map(|o| o.to_string()),
            yards: event.yards.map(i64::from),
            points: Some(event.points.into()),
            notes: event.notes.clone(),
        }
    }
}

/// Unknown or blank labels read as absent.
fn label<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Accepts `3`, `3.0` and blanks; spreadsheet tools like to write whole
/// numbers as floats.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Some(value));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) if value.fract() == 0.0 && value.is_finite() => Ok(Some(value as i64)),
        _ => Err(serde::de::Error::custom(format!("'{raw}' is not a whole number"))),
    }
}
