// Library crate for the flag football stats server
// This file exposes the public API for integration tests

pub mod config;
pub mod plays;
pub mod routes;
pub mod session;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, TeamConfig, TeamProfile};
pub use plays::{CsvPlayLogRepository, InMemoryPlayLogRepository, PlayEvent, PlayLogRepository};
pub use routes::build_router;
pub use shared::{AppError, AppState};
pub use stats::{StatTable, StatValue, StatsService, YardageScope};
