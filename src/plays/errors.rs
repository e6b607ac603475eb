use std::path::PathBuf;

use thiserror::Error;

use super::models::{Action, Position, PositionParseError, Side};

#[derive(Debug, Error)]
pub enum PlayLogError {
    #[error("No play log found at {}. Use the admin page to record plays.", .0.display())]
    Missing(PathBuf),

    #[error("Play log row {row}: {source}")]
    MalformedPositions {
        row: usize,
        #[source]
        source: PositionParseError,
    },

    #[error("Play log row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Week {week} is already recorded against {logged}")]
    OpponentConflict { week: u32, logged: String },

    #[error("Play log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Play log CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Entry-form rule violations, reported back to the admin verbatim.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Week must be at least 1")]
    InvalidWeek,

    #[error("Enter the opponent before recording plays")]
    MissingOpponent,

    #[error("Week {week} is already recorded against {opponent}")]
    OpponentLocked { week: u32, opponent: String },

    #[error("Please select exactly {expected} players (got {actual})")]
    WrongPlayerCount { expected: usize, actual: usize },

    #[error("{0} was selected more than once")]
    DuplicatePlayer(String),

    #[error("{0} is not on the roster")]
    UnknownPlayer(String),

    #[error("No position given for {0}")]
    MissingPosition(String),

    #[error("{0} has a position but is not on the field")]
    PositionForAbsentPlayer(String),

    #[error("{position} is not a {side} position ({player})")]
    PositionWrongSide {
        player: String,
        position: Position,
        side: Side,
    },

    #[error("Down must be between 1 and 4 (got {0})")]
    DownOutOfRange(u8),

    #[error("Yards must be between -100 and 100 (got {0})")]
    YardsOutOfRange(i32),

    #[error("{action} requires {attribute}")]
    MissingAttribute {
        action: Action,
        attribute: &'static str,
    },

    #[error("Name '{0}' contains a reserved separator")]
    ReservedSeparator(String),
}
