//! Saved workout persistence with file locking.
//!
//! All saved workouts live in one JSON document under the data directory.
//! Writers take an exclusive lock on a sidecar lock file for the whole
//! read-check-write cycle, so the per-user cap cannot be raced past.
//! Readers take a shared lock.

use crate::{Error, Result, SavedWorkout, WorkoutPlan};
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Maximum saved workouts a single user may hold
pub const MAX_SAVED_PER_USER: usize = 10;

const STORE_FILE: &str = "saved_workouts.json";
const LOCK_FILE: &str = "saved_workouts.lock";

/// Owner-scoped persistence for saved workouts
pub trait WorkoutStore {
    /// Saved workouts for `owner_id`, newest first
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<SavedWorkout>>;

    fn get(&self, owner_id: &str, id: Uuid) -> Result<SavedWorkout>;

    /// Save a plan, rejecting with `CapacityReached` once the owner has
    /// `MAX_SAVED_PER_USER` rows
    fn insert(&mut self, owner_id: &str, plan: WorkoutPlan) -> Result<SavedWorkout>;

    /// Delete by id; `NotFound` when missing or owned by someone else
    fn delete(&mut self, owner_id: &str, id: Uuid) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    workouts: Vec<SavedWorkout>,
}

/// JSON-file-backed store with file locking
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted in `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            path: data_dir.join(STORE_FILE),
            lock_path: data_dir.join(LOCK_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(file)
    }

    /// Read the document; caller holds the lock
    ///
    /// With `strict` unset a corrupted document reads as empty, which is fine
    /// for listing but would drop rows if written back.
    fn read_document(&self, strict: bool) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }

        let mut contents = String::new();
        File::open(&self.path)?.read_to_string(&mut contents)?;

        match serde_json::from_str::<StoreDocument>(&contents) {
            Ok(doc) => Ok(doc),
            Err(e) if strict => Err(Error::Json(e)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse saved workouts {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                Ok(StoreDocument::default())
            }
        }
    }

    /// Atomically replace the document; caller holds the exclusive lock
    fn write_document(&self, doc: &StoreDocument) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            Error::Other(format!("Store path {:?} has no parent", self.path))
        })?;
        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, doc)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn read_shared(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }

        let lock = self.open_lock()?;
        lock.lock_shared()?;
        let result = self.read_document(false);
        release(result, lock.unlock(), &self.lock_path)
    }

    /// Load, modify and save under one exclusive lock
    ///
    /// Nothing is written when `f` fails.
    fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>,
    {
        let lock = self.open_lock()?;
        lock.lock_exclusive()?;

        let result = self.read_document(true).and_then(|mut doc| {
            let out = f(&mut doc)?;
            self.write_document(&doc)?;
            Ok(out)
        });

        release(result, lock.unlock(), &self.lock_path)
    }
}

/// Outcome of a locked operation once the lock is released
///
/// The lock also goes away when the file is closed, so a failed unlock is
/// logged and never turns a finished read or write into an error.
fn release<T>(result: Result<T>, unlock: std::io::Result<()>, lock_path: &Path) -> Result<T> {
    if let Err(e) = unlock {
        tracing::warn!("Failed to release lock {:?}: {}", lock_path, e);
    }
    result
}

impl WorkoutStore for JsonFileStore {
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<SavedWorkout>> {
        let mut owned: Vec<SavedWorkout> = self
            .read_shared()?
            .workouts
            .into_iter()
            .filter(|w| w.owner_id == owner_id)
            .collect();
        // Stored in insertion order; reverse first so equal timestamps stay newest first
        owned.reverse();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!("Listed {} saved workouts for {}", owned.len(), owner_id);
        Ok(owned)
    }

    fn get(&self, owner_id: &str, id: Uuid) -> Result<SavedWorkout> {
        self.read_shared()?
            .workouts
            .into_iter()
            .find(|w| w.id == id && w.owner_id == owner_id)
            .ok_or(Error::NotFound(id))
    }

    fn insert(&mut self, owner_id: &str, plan: WorkoutPlan) -> Result<SavedWorkout> {
        self.update(|doc| {
            let owned = doc.workouts.iter().filter(|w| w.owner_id == owner_id).count();
            if owned >= MAX_SAVED_PER_USER {
                tracing::info!(
                    "Rejected save for {}: already holds {} workouts",
                    owner_id,
                    owned
                );
                return Err(Error::CapacityReached {
                    limit: MAX_SAVED_PER_USER,
                });
            }

            let saved = SavedWorkout {
                id: Uuid::new_v4(),
                owner_id: owner_id.to_string(),
                name: plan.plan_name.clone(),
                plan,
                created_at: Utc::now(),
            };
            doc.workouts.push(saved.clone());

            tracing::debug!("Saved workout {} for {}", saved.id, owner_id);
            Ok(saved)
        })
    }

    fn delete(&mut self, owner_id: &str, id: Uuid) -> Result<()> {
        self.update(|doc| {
            let index = doc
                .workouts
                .iter()
                .position(|w| w.id == id && w.owner_id == owner_id)
                .ok_or(Error::NotFound(id))?;
            doc.workouts.remove(index);

            tracing::debug!("Deleted workout {} for {}", id, owner_id);
            Ok(())
        })
    }
}
