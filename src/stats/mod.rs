pub mod filters;
pub mod game;
pub mod lines;
pub mod player;
pub mod season;
pub mod service;
pub mod table;
pub mod types;
pub mod weekly;

mod errors;
mod handlers;

pub use errors::StatsError;
pub use game::GameTotals;
pub use handlers::{
    export_game_lines, get_box_score, get_player_game, get_player_season, get_season_summary,
    get_week_game_lines, list_players, list_weeks,
};
pub use lines::PlayerGameLine;
pub use service::{StatsService, WeekListing};
pub use table::{StatTable, StatValue};
pub use types::StatsResponse;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which rows count towards team rushing and receiving yardage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum YardageScope {
    /// Offensive runs and passes plus their touchdowns.
    #[default]
    AllPlays,
    /// Only rows carrying the matching touchdown type.
    ScoringPlaysOnly,
}
