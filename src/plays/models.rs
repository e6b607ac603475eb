use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Value the entry form offers when nobody in particular made the play.
pub const NO_SPECIFIC_PLAYER: &str = "No specific player";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Side {
    Offense,
    Defense,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Half {
    #[serde(rename = "1st")]
    #[strum(to_string = "1st")]
    First,
    #[serde(rename = "2nd")]
    #[strum(to_string = "2nd")]
    Second,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Action {
    Pass,
    Run,
    #[serde(rename = "Flag Pull")]
    #[strum(to_string = "Flag Pull")]
    FlagPull,
    Touchdown,
    Conversion,
    Interception,
    #[serde(rename = "Forced Fumble")]
    #[strum(to_string = "Forced Fumble")]
    ForcedFumble,
    Sack,
    #[serde(rename = "Pick-Six")]
    #[strum(to_string = "Pick-Six")]
    PickSix,
    Penalty,
}

impl Action {
    /// Interceptions and pick-sixes both count as a turnover through the air.
    pub fn is_interception(self) -> bool {
        matches!(self, Action::Interception | Action::PickSix)
    }

    /// Whether the entry form asks who made the play.
    pub fn names_player(self) -> bool {
        !matches!(self, Action::PickSix | Action::Penalty)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum TouchdownType {
    #[serde(rename = "Passing Touchdown")]
    #[strum(to_string = "Passing Touchdown")]
    Passing,
    #[serde(rename = "Rushing Touchdown")]
    #[strum(to_string = "Rushing Touchdown")]
    Rushing,
}

/// Outcome of a pass or a conversion attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum AttemptOutcome {
    Complete,
    Incomplete,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ConversionType {
    #[serde(rename = "1-point")]
    #[strum(to_string = "1-point")]
    OnePoint,
    #[serde(rename = "2-point")]
    #[strum(to_string = "2-point")]
    TwoPoint,
}

impl ConversionType {
    pub fn points(self) -> i32 {
        match self {
            ConversionType::OnePoint => 1,
            ConversionType::TwoPoint => 2,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Position {
    Quarterback,
    #[serde(rename = "Wide Receiver")]
    #[strum(to_string = "Wide Receiver")]
    WideReceiver,
    #[serde(rename = "Running Back")]
    #[strum(to_string = "Running Back")]
    RunningBack,
    #[serde(rename = "Tight End")]
    #[strum(to_string = "Tight End")]
    TightEnd,
    Center,
    #[serde(rename = "Pass Rusher")]
    #[strum(to_string = "Pass Rusher")]
    PassRusher,
    #[serde(rename = "Corner Back")]
    #[strum(to_string = "Corner Back")]
    CornerBack,
    Safety,
}

impl Position {
    pub fn side(self) -> Side {
        match self {
            Position::Quarterback
            | Position::WideReceiver
            | Position::RunningBack
            | Position::TightEnd
            | Position::Center => Side::Offense,
            Position::PassRusher | Position::CornerBack | Position::Safety => Side::Defense,
        }
    }

    /// The vocabulary offered for one side, in form order.
    pub fn for_side(side: Side) -> impl Iterator<Item = Position> {
        Position::iter().filter(move |position| position.side() == side)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("position entry '{entry}' is missing the '{}' separator", PlayerPositions::NAME_SEPARATOR)]
pub struct PositionParseError {
    pub entry: String,
}

/// One "player as position" pair. The label is kept as written so that
/// positions outside the known vocabulary survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssignment {
    pub player: String,
    pub label: String,
}

impl PositionAssignment {
    pub fn position(&self) -> Option<Position> {
        self.label.parse().ok()
    }
}

/// Ordered player → position mapping for a single play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerPositions(Vec<PositionAssignment>);

impl PlayerPositions {
    pub const ENTRY_SEPARATOR: &'static str = ", ";
    pub const NAME_SEPARATOR: &'static str = " as ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a label, replacing any earlier assignment for the same player.
    pub fn assign(&mut self, player: impl Into<String>, label: impl Into<String>) {
        let player = player.into();
        let label = label.into();
        match self.0.iter_mut().find(|a| a.player == player) {
            Some(existing) => existing.label = label,
            None => self.0.push(PositionAssignment { player, label }),
        }
    }

    pub fn with(mut self, player: impl Into<String>, position: Position) -> Self {
        self.assign(player, position.to_string());
        self
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|a| a.player == player)
    }

    pub fn label_of(&self, player: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.player == player)
            .map(|a| a.label.as_str())
    }

    pub fn position_of(&self, player: &str) -> Option<Position> {
        self.label_of(player).and_then(|label| label.parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionAssignment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every known position listed for `player`, in stored order. Stored rows
    /// may name a player more than once.
    pub fn positions_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = Position> + 'a {
        self.0
            .iter()
            .filter(move |a| a.player == player)
            .filter_map(PositionAssignment::position)
    }

    /// Parses the stored `"name as position, name as position"` text. Entries
    /// are kept as written, repeats included.
    pub fn parse(text: &str) -> Result<Self, PositionParseError> {
        let mut positions = Self::new();
        for entry in text
            .split(Self::ENTRY_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
        {
            let (name, label) =
                entry
                    .split_once(Self::NAME_SEPARATOR)
                    .ok_or_else(|| PositionParseError {
                        entry: entry.to_string(),
                    })?;
            positions.0.push(PositionAssignment {
                player: name.trim().to_string(),
                label: label.trim().to_string(),
            });
        }
        Ok(positions)
    }

    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|a| format!("{}{}{}", a.player, Self::NAME_SEPARATOR, a.label))
            .collect::<Vec<_>>()
            .join(Self::ENTRY_SEPARATOR)
    }
}

/// True when a name would corrupt the stored position or player-list text.
pub fn contains_reserved_separator(name: &str) -> bool {
    name.contains(PlayerPositions::ENTRY_SEPARATOR.trim_end())
        || name.contains(PlayerPositions::NAME_SEPARATOR)
}

/// One recorded snap. Situational fields are optional because older logs
/// leave them blank; aggregation treats a missing value as non-matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub week: u32,
    pub opponent: String,
    pub half: Option<Half>,
    pub down: Option<u8>,
    pub yards_to_go: Option<u32>,
    pub play_sequence: u32,
    pub side: Option<Side>,
    pub players_on_field: Vec<String>,
    pub player_positions: PlayerPositions,
    pub action: Option<Action>,
    pub player_involved: Option<String>,
    pub touchdown_type: Option<TouchdownType>,
    pub pass_outcome: Option<AttemptOutcome>,
    pub conversion_type: Option<ConversionType>,
    pub conversion_outcome: Option<AttemptOutcome>,
    pub yards: Option<i32>,
    pub points: i32,
    pub notes: String,
}

impl PlayEvent {
    pub fn new(week: u32, opponent: impl Into<String>, play_sequence: u32, side: Side, action: Action) -> Self {
        Self {
            week,
            opponent: opponent.into(),
            half: None,
            down: None,
            yards_to_go: None,
            play_sequence,
            side: Some(side),
            players_on_field: Vec::new(),
            player_positions: PlayerPositions::new(),
            action: Some(action),
            player_involved: None,
            touchdown_type: None,
            pass_outcome: None,
            conversion_type: None,
            conversion_outcome: None,
            yards: Some(0),
            points: 0,
            notes: String::new(),
        }
    }

    pub fn with_yards(mut self, yards: i32) -> Self {
        self.yards = Some(yards);
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player_involved = Some(player.into());
        self
    }

    /// Sets the positions and derives the on-field list from them.
    pub fn with_positions(mut self, positions: PlayerPositions) -> Self {
        self.players_on_field = positions.iter().map(|a| a.player.clone()).collect();
        self.player_positions = positions;
        self
    }

    pub fn with_touchdown(mut self, touchdown_type: TouchdownType) -> Self {
        self.touchdown_type = Some(touchdown_type);
        self.points = Self::points_for(self.action, self.conversion_type, self.conversion_outcome);
        self
    }

    pub fn with_pass_outcome(mut self, outcome: AttemptOutcome) -> Self {
        self.pass_outcome = Some(outcome);
        self
    }

    pub fn with_conversion(mut self, conversion_type: ConversionType, outcome: AttemptOutcome) -> Self {
        self.conversion_type = Some(conversion_type);
        self.conversion_outcome = Some(outcome);
        self.points = Self::points_for(self.action, self.conversion_type, self.conversion_outcome);
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    /// Points credited at entry time: six for a touchdown or pick-six, one or
    /// two for a completed conversion, nothing otherwise.
    pub fn points_for(
        action: Option<Action>,
        conversion_type: Option<ConversionType>,
        conversion_outcome: Option<AttemptOutcome>,
    ) -> i32 {
        match (action, conversion_type, conversion_outcome) {
            (Some(Action::Touchdown | Action::PickSix), _, _) => 6,
            (Some(Action::Conversion), Some(kind), Some(AttemptOutcome::Complete)) => kind.points(),
            _ => 0,
        }
    }

    pub fn is_offense(&self) -> bool {
        self.side == Some(Side::Offense)
    }

    pub fn is_defense(&self) -> bool {
        self.side == Some(Side::Defense)
    }

    pub fn is_action(&self, action: Action) -> bool {
        self.action == Some(action)
    }

    pub fn yards_or_zero(&self) -> i64 {
        self.yards.map(i64::from).unwrap_or_default()
    }

    pub fn acted_by(&self, player: &str) -> bool {
        self.player_involved.as_deref() == Some(player)
    }

    pub fn on_field(&self, player: &str) -> bool {
        self.player_positions.contains(player)
    }
}
