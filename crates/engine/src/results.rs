use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::engine::GameResult;

pub const FINAL_SCORE_KEY: &str = "finalScore";
/// Elapsed whole seconds.
pub const FINAL_TIME_KEY: &str = "finalTime";

#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value for {key} is not a whole number: {value:?}")]
    Malformed { key: String, value: String },
}

/// String-keyed persistent surface the results view reads after a game.
pub trait ResultsStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), ResultsError>;
    fn get(&self, key: &str) -> Result<Option<String>, ResultsError>;
}

/// Write both hand-off entries.
pub fn save_result(store: &mut impl ResultsStore, result: &GameResult) -> Result<(), ResultsError> {
    store.set(FINAL_SCORE_KEY, &result.score.to_string())?;
    store.set(FINAL_TIME_KEY, &result.elapsed_seconds.to_string())?;
    Ok(())
}

/// Read back `(score, seconds)` if a game has finished.
pub fn load_result(store: &impl ResultsStore) -> Result<Option<(u64, u64)>, ResultsError> {
    let (Some(score), Some(time)) = (store.get(FINAL_SCORE_KEY)?, store.get(FINAL_TIME_KEY)?)
    else {
        return Ok(None);
    };
    let parse = |key: &str, value: String| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| ResultsError::Malformed {
                key: key.to_string(),
                value,
            })
    };
    Ok(Some((parse(FINAL_SCORE_KEY, score)?, parse(FINAL_TIME_KEY, time)?)))
}

#[derive(Debug, Clone, Default)]
pub struct MemoryResults {
    entries: BTreeMap<String, String>,
}

impl MemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResultsStore for MemoryResults {
    fn set(&mut self, key: &str, value: &str) -> Result<(), ResultsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, ResultsError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// A flat JSON object on disk. Every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileResults {
    path: PathBuf,
}

impl JsonFileResults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ResultsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ResultsStore for JsonFileResults {
    fn set(&mut self, key: &str, value: &str) -> Result<(), ResultsError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        tracing::debug!(path = %self.path.display(), key, value, "stored result entry");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, ResultsError> {
        Ok(self.read_all()?.remove(key))
    }
}
