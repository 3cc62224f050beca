//! Error types for storyboard operations.
//!
//! Every failure here is locally detected, synchronous, and recoverable by
//! the caller; the core never retries internally. Orphaned scenes are a
//! diagnostic on a successful path result, not an error.

use crate::content::TextError;
use crate::id::{AuthorId, CharacterId, SceneId, StoryboardId, VariantId};
use thiserror::Error;

/// Errors from storyboard mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("unknown storyboard {0}")]
    UnknownStoryboard(StoryboardId),

    #[error("unknown scene {0}")]
    UnknownScene(SceneId),

    #[error("unknown variant {0}")]
    UnknownVariant(VariantId),

    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),

    #[error("unknown author {0}")]
    UnknownAuthor(AuthorId),

    #[error("scene {0} cannot link to itself")]
    SelfLoop(SceneId),

    #[error("sequential edge {from} -> {to} would close a cycle")]
    CycleViolation { from: SceneId, to: SceneId },

    #[error("scene {0} appears more than once")]
    DuplicateScene(SceneId),

    #[error("scene {0} has only one variant")]
    CannotRemoveLastVariant(SceneId),

    #[error("removing the active variant of scene {0} requires a replacement")]
    ActiveVariantRequired(SceneId),

    #[error("multiple root scenes and no designated start")]
    AmbiguousRoot { candidates: Vec<SceneId> },

    #[error("stale revision: caller saw {expected}, entity is at {actual}")]
    StaleRevision { expected: u64, actual: u64 },

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("path resolution cancelled")]
    Cancelled,
}
