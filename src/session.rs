//! StorySession - the concurrency wrapper around a storyboard.
//!
//! The core is single-writer, multi-reader: commands are serialized behind
//! a write lock while queries run concurrently against the shared state or
//! an owned snapshot. No I/O happens inside the locked region; persistence
//! and AI collaborators work on snapshots and submit results back as
//! ordinary commands.

use crate::command::{Command, Outcome};
use crate::error::StoryError;
use crate::id::SceneId;
use crate::path::StoryPath;
use crate::storyboard::Storyboard;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A shared handle to one storyboard.
///
/// Cloning the session clones the handle, not the board; all clones see
/// the same state.
#[derive(Debug, Clone)]
pub struct StorySession {
    board: Arc<RwLock<Storyboard>>,
}

impl StorySession {
    /// Wrap a storyboard in a session.
    pub fn new(board: Storyboard) -> Self {
        Self {
            board: Arc::new(RwLock::new(board)),
        }
    }

    /// Submit a mutation command.
    ///
    /// Commands on the same session never interleave; each one runs to
    /// completion behind the write lock.
    pub async fn submit(&self, command: Command) -> Result<Outcome, StoryError> {
        let mut board = self.board.write().await;
        let outcome = board.apply(command)?;
        debug!(revision = board.metadata().revision(), "command applied");
        Ok(outcome)
    }

    /// Clone an immutable snapshot of the current state.
    ///
    /// The snapshot is fully detached: later mutations do not affect it.
    pub async fn snapshot(&self) -> Storyboard {
        self.board.read().await.clone()
    }

    /// Resolve the current linear story.
    pub async fn path(&self, start: Option<SceneId>) -> Result<StoryPath, StoryError> {
        self.board.read().await.path(start)
    }

    /// Run a read-only closure against the current state.
    ///
    /// Readers may run concurrently with each other but never with an
    /// in-flight mutation.
    pub async fn read<T>(&self, f: impl FnOnce(&Storyboard) -> T) -> T {
        f(&*self.board.read().await)
    }
}
