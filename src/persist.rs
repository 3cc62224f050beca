//! Storyboard persistence.
//!
//! Defines the serialized record shape for file and export collaborators.
//! The record mirrors the in-memory aggregate exactly, revision history
//! included, and every collection serializes in a fixed order, so
//! serialize -> deserialize -> serialize reproduces the bytes.

use crate::storyboard::Storyboard;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save file version.
const SAVE_VERSION: u32 = 1;

/// Quick-access facts about a save, readable without loading the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Storyboard title.
    pub title: String,

    /// Number of scenes.
    pub scene_count: usize,

    /// Number of characters.
    pub character_count: usize,

    /// Storyboard revision at save time.
    pub revision: u64,
}

/// A saved storyboard with everything needed to resume authoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStoryboard {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created.
    pub saved_at: chrono::DateTime<chrono::Utc>,

    /// Quick-access metadata about the save.
    pub summary: SaveSummary,

    /// The complete storyboard, history and all.
    pub storyboard: Storyboard,
}

impl SavedStoryboard {
    /// Wrap a storyboard in a save record.
    pub fn new(storyboard: Storyboard) -> Self {
        let summary = SaveSummary {
            title: storyboard.title().as_str().to_string(),
            scene_count: storyboard.scene_count(),
            character_count: storyboard.character_count(),
            revision: storyboard.metadata().revision(),
        };

        Self {
            version: SAVE_VERSION,
            saved_at: chrono::Utc::now(),
            summary,
            storyboard,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, checking the save version.
    pub fn from_json(content: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = self.to_json()?;
        fs::write(&path, content).await?;
        info!(title = %self.summary.title, "storyboard saved");
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Read a save's summary without deserializing the full board.
    pub async fn peek_summary(path: impl AsRef<Path>) -> Result<SaveSummary, PersistError> {
        let content = fs::read_to_string(path).await?;

        // Parse just enough to get the summary.
        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            summary: SaveSummary,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.summary)
    }
}

/// Information about a save file.
#[derive(Debug, Clone)]
pub struct SaveInfo {
    /// Path to the save file.
    pub path: String,

    /// Save summary.
    pub summary: SaveSummary,
}

/// List all storyboard saves in a directory, sorted by title.
pub async fn list_saves(dir: impl AsRef<Path>) -> Result<Vec<SaveInfo>, PersistError> {
    let mut saves = Vec::new();

    let dir_path = dir.as_ref();
    if !dir_path.exists() {
        fs::create_dir_all(dir_path).await?;
        return Ok(saves);
    }

    let mut entries = fs::read_dir(dir_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            if let Ok(summary) = SavedStoryboard::peek_summary(&path).await {
                saves.push(SaveInfo {
                    path: path.to_string_lossy().to_string(),
                    summary,
                });
            }
        }
    }

    saves.sort_by(|a, b| a.summary.title.cmp(&b.summary.title));
    Ok(saves)
}

/// Generate a save path for a storyboard title.
pub fn save_path(dir: impl AsRef<Path>, title: &str) -> std::path::PathBuf {
    let sanitized = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    dir.as_ref().join(format!("{sanitized}.json"))
}
