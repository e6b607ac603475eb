use thiserror::Error;

use crate::plays::PlayLogError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("No plays have been recorded yet. Use the admin page to record plays.")]
    NoPlays,

    #[error("No stats available for Week {0}. Please select another week.")]
    NoWeekData(u32),

    #[error("No stats recorded for {0}")]
    NoPlayerData(String),

    #[error("No stats recorded for {player} in week {week}")]
    NoPlayerGameData { player: String, week: u32 },

    #[error(transparent)]
    Log(#[from] PlayLogError),
}
