//! Story graph engine for narrative authoring tools.
//!
//! This crate provides:
//! - Scenes with interchangeable draft variants, one active at a time
//! - A web of sequential/branch/alternative edges between scenes
//! - An on-demand resolver deriving the linear reading order from the web
//! - Characters, relationships, and full revision history on every entity
//! - A single aggregate entry point with transactional command semantics
//!
//! # Quick Start
//!
//! ```ignore
//! use storyboard_core::{Command, Outcome, StorySession, Storyboard, Title};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = StorySession::new(Storyboard::new(Title::new("My Story")?));
//!
//!     let Outcome::SceneCreated(opening) = session.submit(Command::CreateScene).await? else {
//!         unreachable!()
//!     };
//!     let Outcome::SceneCreated(finale) = session.submit(Command::CreateScene).await? else {
//!         unreachable!()
//!     };
//!     session
//!         .submit(Command::AddEdge {
//!             from: opening,
//!             to: finale,
//!             kind: storyboard_core::EdgeKind::Sequential,
//!         })
//!         .await?;
//!
//!     let path = session.path(None).await?;
//!     println!("{} scenes on the path", path.len());
//!     Ok(())
//! }
//! ```

pub mod character;
pub mod command;
pub mod content;
pub mod error;
pub mod graph;
pub mod id;
pub mod metadata;
pub mod path;
pub mod persist;
pub mod scene;
pub mod session;
pub mod storyboard;
pub mod template;
pub mod testing;

// Primary public API
pub use character::{Character, CharacterName, CharacterPatch, RelationKind};
pub use command::{Command, Outcome, Proposal};
pub use content::{
    CameraLocation, DialogueLine, SceneElement, SceneHeading, Summary, TextError, TimeOfDay,
    Title, VariantContent,
};
pub use error::StoryError;
pub use graph::{EdgeKind, SceneEdge, SceneGraph};
pub use id::{AnyId, AuthorId, CharacterId, IdKind, SceneId, StoryboardId, VariantId};
pub use metadata::{Metadata, RevisionEntry};
pub use path::{PathEntry, StoryPath};
pub use persist::{PersistError, SaveInfo, SaveSummary, SavedStoryboard};
pub use scene::{Scene, Variant};
pub use session::StorySession;
pub use storyboard::{Author, Storyboard};
pub use template::{Beat, StoryTemplate};
