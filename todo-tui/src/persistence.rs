//! Persistence for lightweight UI state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use todo_core::StatusFilter;

/// Filter and search term restored on the next launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub filter: StatusFilter,
    pub search: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let state = serde_json::from_str::<PersistedState>(&contents)?;
    Ok(Some(state))
}

pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() -> Result<(), PersistenceError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("todo-tui.json");

        let state = PersistedState {
            filter: StatusFilter::Active,
            search: "gym".to_string(),
        };
        save(&path, &state)?;
        assert_eq!(load(&path)?, Some(state));
        Ok(())
    }

    #[test]
    fn missing_file_loads_none() -> Result<(), PersistenceError> {
        let dir = tempfile::tempdir()?;
        assert_eq!(load(&dir.path().join("absent.json"))?, None);
        Ok(())
    }
}
