//! Document store for the four taxonomy collections.
//!
//! Each collection sits behind its own `RwLock` and keeps insertion order.
//! Writers hold a single collection lock at a time and release it before the
//! snapshot is written, so lock order never matters for them. The snapshot
//! reads all four collections in a fixed order under `persist_lock`.

mod leagues;
mod sports;
mod teams;
mod tournaments;

pub use teams::TeamFilter;
pub use tournaments::TournamentFilter;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::models::{EntityId, LeagueEdition, Sport, Team, Tournament};

/// On-disk snapshot layout
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub sports: Vec<Sport>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub leagues: Vec<LeagueEdition>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    sports: &'a [Sport],
    tournaments: &'a [Tournament],
    teams: &'a [Team],
    leagues: &'a [LeagueEdition],
}

/// Stored records addressed by their id
pub(crate) trait Record {
    fn record_id(&self) -> &EntityId;
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn record_id(&self) -> &EntityId {
                &self.id
            }
        })*
    };
}

impl_record!(Sport, Tournament, Team, LeagueEdition);

/// How to take back an in-memory change when its snapshot write fails
#[derive(Debug)]
pub(crate) enum Undo<T> {
    /// The record with this id was pushed
    Insert(EntityId),
    /// The record was overwritten; this is its previous value
    Update(T),
    /// The record was removed from this index
    Remove(usize, T),
}

impl<T: Record> Undo<T> {
    fn apply(self, records: &mut Vec<T>) {
        match self {
            Undo::Insert(id) => records.retain(|r| r.record_id() != &id),
            Undo::Update(previous) => {
                if let Some(slot) = records
                    .iter_mut()
                    .find(|r| r.record_id() == previous.record_id())
                {
                    *slot = previous;
                }
            }
            Undo::Remove(idx, record) => {
                let idx = idx.min(records.len());
                records.insert(idx, record);
            }
        }
    }
}

#[derive(Debug)]
pub struct Database {
    sports: RwLock<Vec<Sport>>,
    tournaments: RwLock<Vec<Tournament>>,
    teams: RwLock<Vec<Team>>,
    leagues: RwLock<Vec<LeagueEdition>>,
    snapshot_path: Option<PathBuf>,
    persist_lock: Mutex<()>,
}

impl Database {
    /// A database that lives only in memory
    pub fn in_memory() -> Self {
        Self::from_collections(Collections::default(), None)
    }

    /// Opens the snapshot at `path`, starting empty if the file doesn't exist yet.
    /// Every write afterwards rewrites the snapshot.
    #[instrument]
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let collections = if path.exists() {
            let content = fs::read_to_string(path).await?;
            let collections: Collections = serde_json::from_str(&content)?;
            info!(
                "Loaded snapshot: sports={}, tournaments={}, teams={}, leagues={}",
                collections.sports.len(),
                collections.tournaments.len(),
                collections.teams.len(),
                collections.leagues.len()
            );
            collections
        } else {
            info!(
                "No snapshot at {}, starting with empty collections",
                path.display()
            );
            Collections::default()
        };

        Ok(Self::from_collections(
            collections,
            Some(path.to_path_buf()),
        ))
    }

    pub fn from_collections(collections: Collections, snapshot_path: Option<PathBuf>) -> Self {
        Database {
            sports: RwLock::new(collections.sports),
            tournaments: RwLock::new(collections.tournaments),
            teams: RwLock::new(collections.teams),
            leagues: RwLock::new(collections.leagues),
            snapshot_path,
            persist_lock: Mutex::new(()),
        }
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Persists a change already applied to `collection`. If the snapshot
    /// can't be written the change is undone, so memory never holds a record
    /// the data file doesn't.
    pub(crate) async fn commit<T: Record>(
        &self,
        collection: &RwLock<Vec<T>>,
        undo: Undo<T>,
    ) -> Result<(), AppError> {
        if let Err(e) = self.persist().await {
            warn!("Snapshot write failed, reverting in-memory change: {}", e);
            undo.apply(&mut *collection.write().await);
            return Err(e);
        }
        Ok(())
    }

    /// Writes all collections to the snapshot file, if one is configured.
    /// The file is written next to the target and renamed over it.
    pub(crate) async fn persist(&self) -> Result<(), AppError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let _guard = self.persist_lock.lock().await;
        let content = {
            let sports = self.sports.read().await;
            let tournaments = self.tournaments.read().await;
            let teams = self.teams.read().await;
            let leagues = self.leagues.read().await;
            serde_json::to_string_pretty(&SnapshotRef {
                sports: &sports,
                tournaments: &tournaments,
                teams: &teams,
                leagues: &leagues,
            })?
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp_path, path).await?;

        debug!(
            "Snapshot written: {} bytes to {}",
            content.len(),
            path.display()
        );
        Ok(())
    }
}
