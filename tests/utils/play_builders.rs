#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Value};

use flagstats::plays::{Action, PlayerPositions, Position, Side};
use flagstats::PlayEvent;

/// The seven players fielded in every test form, in form order.
pub const LINEUP: [&str; 7] = ["Ana", "Ben", "Cal", "Dee", "Eli", "Fay", "Gus"];

const OFFENSE: [&str; 7] = [
    "Quarterback",
    "Wide Receiver",
    "Running Back",
    "Tight End",
    "Center",
    "Wide Receiver",
    "Wide Receiver",
];

const DEFENSE: [&str; 7] = [
    "Pass Rusher",
    "Corner Back",
    "Corner Back",
    "Safety",
    "Safety",
    "Corner Back",
    "Pass Rusher",
];

// ============================================================================
// Entry form builder
// ============================================================================

/// Builds the JSON body of one entry form submission.
pub struct PlayFormBuilder {
    side: &'static str,
    players: Vec<&'static str>,
    action: &'static str,
    player_involved: Option<&'static str>,
    extra: Vec<(&'static str, &'static str)>,
    yards: i32,
    down: u8,
}

impl PlayFormBuilder {
    pub fn offense(action: &'static str) -> Self {
        Self {
            side: "Offense",
            players: LINEUP.to_vec(),
            action,
            player_involved: None,
            extra: Vec::new(),
            yards: 0,
            down: 1,
        }
    }

    pub fn defense(action: &'static str) -> Self {
        Self {
            side: "Defense",
            ..Self::offense(action)
        }
    }

    pub fn by(mut self, player: &'static str) -> Self {
        self.player_involved = Some(player);
        self
    }

    pub fn yards(mut self, yards: i32) -> Self {
        self.yards = yards;
        self
    }

    pub fn down(mut self, down: u8) -> Self {
        self.down = down;
        self
    }

    pub fn with(mut self, field: &'static str, value: &'static str) -> Self {
        self.extra.push((field, value));
        self
    }

    /// Fields only the first `count` players of the lineup.
    pub fn players(mut self, count: usize) -> Self {
        self.players.truncate(count);
        self
    }

    pub fn build(self) -> Value {
        let labels = if self.side == "Offense" { OFFENSE } else { DEFENSE };
        let positions: Vec<Value> = self
            .players
            .iter()
            .zip(labels)
            .map(|(player, position)| json!({ "player": player, "position": position }))
            .collect();

        let mut form = json!({
            "side": self.side,
            "half": "1st",
            "down": self.down,
            "yards_to_go": 10,
            "players_on_field": self.players,
            "positions": positions,
            "action": self.action,
            "player_involved": self.player_involved,
            "yards": self.yards,
        });
        for (field, value) in self.extra {
            form[field] = json!(value);
        }
        form
    }
}

pub fn run_form(player: &'static str, yards: i32) -> Value {
    PlayFormBuilder::offense("Run").by(player).yards(yards).build()
}

pub fn pass_form(receiver: &'static str, yards: i32, complete: bool) -> Value {
    PlayFormBuilder::offense("Pass")
        .by(receiver)
        .yards(yards)
        .with("pass_outcome", if complete { "Complete" } else { "Incomplete" })
        .build()
}

pub fn rushing_td_form(player: &'static str, yards: i32) -> Value {
    PlayFormBuilder::offense("Touchdown")
        .by(player)
        .yards(yards)
        .with("touchdown_type", "Rushing Touchdown")
        .build()
}

pub fn conversion_form(kind: &'static str, complete: bool) -> Value {
    PlayFormBuilder::offense("Conversion")
        .by("Ben")
        .with("conversion_type", kind)
        .with("conversion_outcome", if complete { "Complete" } else { "Incomplete" })
        .build()
}

pub fn flag_pull_form(player: &'static str, yards: i32) -> Value {
    PlayFormBuilder::defense("Flag Pull").by(player).yards(yards).build()
}

// ============================================================================
// Play log fixtures
// ============================================================================

/// Offensive lineup with Ana at quarterback and Ben at receiver.
pub fn offense_positions() -> PlayerPositions {
    PlayerPositions::new()
        .with("Ana", Position::Quarterback)
        .with("Ben", Position::WideReceiver)
        .with("Cal", Position::RunningBack)
}

pub fn defense_positions() -> PlayerPositions {
    PlayerPositions::new()
        .with("Ana", Position::Safety)
        .with("Ben", Position::CornerBack)
        .with("Cal", Position::PassRusher)
}

pub fn offense_play(week: u32, opponent: &str, sequence: u32, action: Action) -> PlayEvent {
    PlayEvent::new(week, opponent, sequence, Side::Offense, action).with_positions(offense_positions())
}

pub fn defense_play(week: u32, opponent: &str, sequence: u32, action: Action) -> PlayEvent {
    PlayEvent::new(week, opponent, sequence, Side::Defense, action).with_positions(defense_positions())
}

// ============================================================================
// Response helpers
// ============================================================================

/// Looks up one statistic in a `{ title, statistics }` response body.
pub fn stat(body: &Value, statistic: &str) -> Value {
    body["statistics"]
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["statistic"] == statistic))
        .map(|row| row["value"].clone())
        .unwrap_or_else(|| panic!("statistic '{statistic}' missing from {body}"))
}
