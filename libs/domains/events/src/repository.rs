//! Event store: read-only access to the events document

use crate::error::Result;
use crate::models::{Event, Tag};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Consistent view of the catalogue: events and their tags from one read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(rename = "eventsTags", default)]
    pub tags: Vec<Tag>,
}

impl Snapshot {
    pub fn new(events: Vec<Event>, tags: Vec<Tag>) -> Self {
        Self { events, tags }
    }

    /// First event with this id
    pub fn find_event(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Tags referencing the event, in document order
    pub fn tags_for_event(&self, id: i64) -> Vec<Tag> {
        self.tags
            .iter()
            .filter(|t| t.event_id == id)
            .cloned()
            .collect()
    }
}

/// Source of catalogue snapshots
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Read the current catalogue
    async fn load_snapshot(&self) -> Result<Snapshot>;
}

/// Location of the events document.
///
/// - `EVENTS_DB_PATH`: JSON file with `events` and `eventsTags` (default `database.json`)
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl FromEnv for StoreConfig {
    fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            path: PathBuf::from(env_or_default("EVENTS_DB_PATH", "database.json")),
        })
    }
}

/// [`EventStore`] over a JSON document on disk.
///
/// The file is read on every call so edits show up without a restart.
#[derive(Clone, Debug)]
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl EventStore for JsonFileEventStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_snapshot(&self) -> Result<Snapshot> {
        let bytes = tokio::fs::read(&self.path).await?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

        debug!(
            events = snapshot.events.len(),
            tags = snapshot.tags.len(),
            "Loaded events document"
        );
        Ok(snapshot)
    }
}

/// In-memory [`EventStore`] for tests and fixtures
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl InMemoryEventStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Swap in a new catalogue
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = snapshot;
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.read().await.clone())
    }
}
