use serde::{Deserialize, Serialize};

use super::table::StatTable;

/// A titled statistics table as served to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub title: String,
    pub statistics: StatTable,
}

impl StatsResponse {
    pub fn new(title: impl Into<String>, statistics: StatTable) -> Self {
        Self {
            title: title.into(),
            statistics,
        }
    }
}
