use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{errors::PlayLogError, models::PlayEvent, record::PlayRecord};

/// Storage for the play-by-play log.
#[async_trait]
pub trait PlayLogRepository: Send + Sync {
    /// Returns every play in insertion order.
    async fn load(&self) -> Result<Vec<PlayEvent>, PlayLogError>;

    /// Appends one play as the next play of its week and returns the stored
    /// row. The stored sequence is one past the highest sequence already
    /// logged for the week, whatever the caller put in `play_sequence`.
    async fn append(&self, event: PlayEvent) -> Result<PlayEvent, PlayLogError>;

    /// Removes the newest play of `week` (highest sequence, last written on
    /// a tie). Returns `None` and leaves the log untouched when the week is
    /// empty.
    async fn delete_latest(&self, week: u32) -> Result<Option<PlayEvent>, PlayLogError>;
}

/// Highest play sequence logged for `week`, 0 when the week is empty.
pub fn latest_sequence(plays: &[PlayEvent], week: u32) -> u32 {
    plays
        .iter()
        .filter(|p| p.week == week)
        .map(|p| p.play_sequence)
        .max()
        .unwrap_or_default()
}

/// Numbers `event` as the week's next play. A week keeps the opponent of its
/// first row.
fn next_in_week(plays: &[PlayEvent], mut event: PlayEvent) -> Result<PlayEvent, PlayLogError> {
    if let Some(first) = plays.iter().find(|p| p.week == event.week) {
        if first.opponent != event.opponent {
            return Err(PlayLogError::OpponentConflict {
                week: event.week,
                logged: first.opponent.clone(),
            });
        }
    }
    event.play_sequence = latest_sequence(plays, event.week) + 1;
    Ok(event)
}

fn remove_latest(plays: &mut Vec<PlayEvent>, week: u32) -> Option<PlayEvent> {
    plays
        .iter()
        .enumerate()
        .filter(|(_, p)| p.week == week)
        .max_by_key(|(_, p)| p.play_sequence)
        .map(|(index, _)| index)
        .map(|index| plays.remove(index))
}

/// In-memory play log for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryPlayLogRepository {
    plays: RwLock<Vec<PlayEvent>>,
}

impl InMemoryPlayLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plays(plays: Vec<PlayEvent>) -> Self {
        Self {
            plays: RwLock::new(plays),
        }
    }
}

#[async_trait]
impl PlayLogRepository for InMemoryPlayLogRepository {
    async fn load(&self) -> Result<Vec<PlayEvent>, PlayLogError> {
        Ok(self.plays.read().await.clone())
    }

    async fn append(&self, event: PlayEvent) -> Result<PlayEvent, PlayLogError> {
        let mut plays = self.plays.write().await;
        let stored = next_in_week(&plays, event)?;
        plays.push(stored.clone());
        Ok(stored)
    }

    async fn delete_latest(&self, week: u32) -> Result<Option<PlayEvent>, PlayLogError> {
        let mut plays = self.plays.write().await;
        Ok(remove_latest(&mut plays, week))
    }
}

/// CSV-file play log.
///
/// The file is read once and cached for the life of the process. Every
/// append or delete rewrites the whole file through a temporary sibling and
/// a rename; writers are serialized by `write_lock`.
pub struct CsvPlayLogRepository {
    path: PathBuf,
    cache: RwLock<Option<Vec<PlayEvent>>>,
    write_lock: Mutex<()>,
}

impl CsvPlayLogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses play-log CSV text.
    pub fn parse(bytes: &[u8]) -> Result<Vec<PlayEvent>, PlayLogError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let mut plays = Vec::new();
        for (index, result) in reader.deserialize::<PlayRecord>().enumerate() {
            let record = result?;
            plays.push(record.into_event(index + 1)?);
        }
        Ok(plays)
    }

    /// Renders plays as play-log CSV text, header first.
    pub fn render(plays: &[PlayEvent]) -> Result<Vec<u8>, PlayLogError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(PlayRecord::HEADERS)?;
        for play in plays {
            writer.serialize(PlayRecord::from(play))?;
        }

        writer
            .into_inner()
            .map_err(|e| PlayLogError::Io(e.into_error()))
    }

    async fn read_file(&self) -> Result<Vec<PlayEvent>, PlayLogError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let plays = Self::parse(&bytes)?;
                info!(path = %self.path.display(), plays = plays.len(), "Loaded play log");
                Ok(plays)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PlayLogError::Missing(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn cached(&self) -> Result<Vec<PlayEvent>, PlayLogError> {
        {
            let cache = self.cache.read().await;
            if let Some(plays) = cache.as_ref() {
                return Ok(plays.clone());
            }
        }

        let plays = self.read_file().await?;
        *self.cache.write().await = Some(plays.clone());
        Ok(plays)
    }

    /// Current contents for a write; a missing file starts an empty log.
    async fn cached_or_empty(&self) -> Result<Vec<PlayEvent>, PlayLogError> {
        match self.cached().await {
            Err(PlayLogError::Missing(path)) => {
                info!(path = %path.display(), "Starting a new play log");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn persist(&self, plays: Vec<PlayEvent>) -> Result<(), PlayLogError> {
        let bytes = Self::render(&plays)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        tokio::fs::write(&temp_path, bytes).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), plays = plays.len(), "Play log written");
        *self.cache.write().await = Some(plays);
        Ok(())
    }
}

#[async_trait]
impl PlayLogRepository for CsvPlayLogRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Vec<PlayEvent>, PlayLogError> {
        self.cached().await
    }

    #[instrument(skip(self, event), fields(week = event.week))]
    async fn append(&self, event: PlayEvent) -> Result<PlayEvent, PlayLogError> {
        let _guard = self.write_lock.lock().await;

        let mut plays = self.cached_or_empty().await?;
        let stored = next_in_week(&plays, event)?;
        debug!(play = stored.play_sequence, "Appending play");
        plays.push(stored.clone());
        self.persist(plays).await?;
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn delete_latest(&self, week: u32) -> Result<Option<PlayEvent>, PlayLogError> {
        let _guard = self.write_lock.lock().await;

        let mut plays = self.cached_or_empty().await?;
        let Some(removed) = remove_latest(&mut plays, week) else {
            warn!("No play logged for the week");
            return Ok(None);
        };

        self.persist(plays).await?;
        Ok(Some(removed))
    }
}
