// Public API - what other modules can use
pub use entry::{EntrySession, EntrySessions};
pub use errors::{PlayLogError, ValidationError};
pub use handlers::{delete_last_play, get_entry, list_plays, select_entry, submit_play};
pub use models::{
    Action, AttemptOutcome, ConversionType, Half, PlayEvent, PlayerPositions, Position, Side,
    TouchdownType,
};
pub use repository::{CsvPlayLogRepository, InMemoryPlayLogRepository, PlayLogRepository};
pub use service::PlayEntryService;

// Internal modules
mod entry;
mod errors;
mod handlers;
pub mod models;
pub mod record;
pub mod repository;
pub mod service;
pub mod types;
