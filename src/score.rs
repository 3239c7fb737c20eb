use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{APP_DIR_NAME, HIGH_SCORE_KEY};

const STORE_FILE_NAME: &str = "storage.json";

/// String slots keyed by name, as kept on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoreFile {
    slots: BTreeMap<String, String>,
}

/// Durable home of the best score.
pub trait ScoreStore {
    /// Reads the persisted high score. A missing slot reads as `Ok(0)`.
    fn load_high_score(&mut self) -> Result<u32, StoreError>;

    /// Overwrites the persisted high score.
    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {} is not a JSON object of strings", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store contents")]
    Encode(#[source] serde_json::Error),
    #[error("failed to create store directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write store file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("slot {key:?} holds {value:?}, which is not a score")]
    InvalidValue { key: &'static str, value: String },
}

/// Returns the platform-correct store file path.
#[must_use]
pub fn default_store_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STORE_FILE_NAME);
    base
}

/// Key-value JSON file, one string value per slot.
///
/// Slots other than the high score are preserved on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str::<StoreFile>(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut json = serde_json::to_string_pretty(file).map_err(StoreError::Encode)?;
        json.push('\n');

        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for FileStore {
    fn load_high_score(&mut self) -> Result<u32, StoreError> {
        let file = self.read_file()?;
        parse_score(file.slots.get(HIGH_SCORE_KEY).map(String::as_str))
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let mut file = match self.read_file() {
            Ok(file) => file,
            Err(StoreError::Parse { .. }) => {
                log::warn!(
                    "discarding unreadable store file {}",
                    self.path.display()
                );
                StoreFile::default()
            }
            Err(e) => return Err(e),
        };

        file.slots.insert(HIGH_SCORE_KEY.to_owned(), score.to_string());
        self.write_file(&file)
    }
}

/// Process-local store, for tests and for running without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose high score slot holds `raw` verbatim.
    #[must_use]
    pub fn with_raw_high_score(raw: &str) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(HIGH_SCORE_KEY.to_owned(), raw.to_owned());
        Self { slots }
    }

    /// Raw text of the high score slot, if set.
    #[must_use]
    pub fn raw_high_score(&self) -> Option<&str> {
        self.slots.get(HIGH_SCORE_KEY).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> Result<u32, StoreError> {
        parse_score(self.raw_high_score())
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.slots
            .insert(HIGH_SCORE_KEY.to_owned(), score.to_string());
        Ok(())
    }
}

fn parse_score(raw: Option<&str>) -> Result<u32, StoreError> {
    let Some(raw) = raw else {
        return Ok(0);
    };

    raw.trim()
        .parse()
        .map_err(|_| StoreError::InvalidValue {
            key: HIGH_SCORE_KEY,
            value: raw.to_owned(),
        })
}
