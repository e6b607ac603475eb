use serde::{Deserialize, Serialize};

use super::{
    entry::EntrySession,
    models::{Action, AttemptOutcome, ConversionType, Half, PlayEvent, Position, Side, TouchdownType},
};

/// Request payload for choosing the game being recorded
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectWeekRequest {
    pub week: u32,
    #[serde(default)]
    pub opponent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionPick {
    pub player: String,
    pub position: Position,
}

/// One submission of the play entry form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayForm {
    pub side: Side,
    pub half: Half,
    pub down: u8,
    pub yards_to_go: u32,
    pub players_on_field: Vec<String>,
    pub positions: Vec<PositionPick>,
    pub action: Action,
    #[serde(default)]
    pub player_involved: Option<String>,
    #[serde(default)]
    pub touchdown_type: Option<TouchdownType>,
    #[serde(default)]
    pub pass_outcome: Option<AttemptOutcome>,
    #[serde(default)]
    pub conversion_type: Option<ConversionType>,
    #[serde(default)]
    pub conversion_outcome: Option<AttemptOutcome>,
    pub yards: i32,
    #[serde(default)]
    pub notes: String,
}

/// Response for a recorded play
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitPlayResponse {
    pub play: PlayEvent,
    pub entry: EntrySession,
}

/// Response for a deleted play
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePlayResponse {
    pub deleted: PlayEvent,
    pub entry: EntrySession,
}
