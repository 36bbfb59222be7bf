use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::WordRecord;

/// Errors that can occur while loading or saving word files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access word file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse word file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no recordings found for user id {0:?}")]
    UnknownUser(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Per-user word files on disk.
///
/// Input recordings live under `normalized_voc/<user>/`, labeled output
/// under `labeled_voc/<user>/` with the same file names. Loading prefers
/// the labeled copy when one exists so a session resumes where it left
/// off.
pub struct WordStore {
    normalized_dir: PathBuf,
    labeled_dir: PathBuf,
    words: Vec<String>,
}

impl WordStore {
    /// Opens the store for one user, creating the output directory and
    /// listing that user's recordings in sorted order.
    pub fn open(data_root: &Path, user_id: &str) -> StoreResult<Self> {
        let normalized_dir = data_root.join("normalized_voc").join(user_id);
        let labeled_dir = data_root.join("labeled_voc").join(user_id);

        if user_id.is_empty() || !normalized_dir.is_dir() {
            return Err(StoreError::UnknownUser(user_id.to_owned()));
        }

        let mut words = Vec::new();
        for entry in fs::read_dir(&normalized_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                words.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        if words.is_empty() {
            return Err(StoreError::UnknownUser(user_id.to_owned()));
        }
        words.sort();

        fs::create_dir_all(&labeled_dir)?;
        log::info!("opened store for user {user_id:?}: {} words", words.len());

        Ok(Self {
            normalized_dir,
            labeled_dir,
            words,
        })
    }

    /// Sorted word file names.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn labeled_dir(&self) -> &Path {
        &self.labeled_dir
    }

    /// Loads one word record, preferring the labeled copy over the
    /// normalized input.
    pub fn load(&self, name: &str) -> StoreResult<WordRecord> {
        let labeled = self.labeled_dir.join(name);
        let path = if labeled.is_file() {
            labeled
        } else {
            self.normalized_dir.join(name)
        };
        let json = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&json)?;
        log::debug!("loaded {}", path.display());
        Ok(record)
    }

    /// Writes a labeled record, overwriting any previous labeling.
    pub fn save(&self, name: &str, record: &WordRecord) -> StoreResult<()> {
        fs::create_dir_all(&self.labeled_dir)?;
        let path = self.labeled_dir.join(name);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        log::info!("saved labeled word to {}", path.display());
        Ok(())
    }
}
