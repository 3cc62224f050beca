//! Type-safe identifiers for every domain object.
//!
//! Uses the newtype pattern to prevent mixing up different ID types at
//! compile time. Identifiers are opaque, immutable, and generated from
//! high-entropy UUIDs so they never collide across process restarts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around UUID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID.
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID.
            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Create a nil (all zeros) ID - useful for testing.
            #[inline]
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Check if this is a nil ID.
            #[inline]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a storyboard.
    StoryboardId
);

define_id!(
    /// Unique identifier for a scene.
    SceneId
);

define_id!(
    /// Unique identifier for a scene variant.
    VariantId
);

define_id!(
    /// Unique identifier for a character.
    CharacterId
);

define_id!(
    /// Unique identifier for an author.
    AuthorId
);

/// The kinds of domain objects that carry identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    Storyboard,
    Scene,
    Variant,
    Character,
    Author,
}

impl IdKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            IdKind::Storyboard => "storyboard",
            IdKind::Scene => "scene",
            IdKind::Variant => "variant",
            IdKind::Character => "character",
            IdKind::Author => "author",
        }
    }
}

/// An identifier of any kind.
///
/// Used by generic queries such as `Storyboard::history`, which accept the
/// id of any revision-tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnyId {
    Storyboard(StoryboardId),
    Scene(SceneId),
    Variant(VariantId),
    Character(CharacterId),
    Author(AuthorId),
}

impl AnyId {
    /// Generate a fresh identifier of the given kind.
    pub fn generate(kind: IdKind) -> Self {
        match kind {
            IdKind::Storyboard => AnyId::Storyboard(StoryboardId::new()),
            IdKind::Scene => AnyId::Scene(SceneId::new()),
            IdKind::Variant => AnyId::Variant(VariantId::new()),
            IdKind::Character => AnyId::Character(CharacterId::new()),
            IdKind::Author => AnyId::Author(AuthorId::new()),
        }
    }

    /// The kind of this identifier.
    pub fn kind(&self) -> IdKind {
        match self {
            AnyId::Storyboard(_) => IdKind::Storyboard,
            AnyId::Scene(_) => IdKind::Scene,
            AnyId::Variant(_) => IdKind::Variant,
            AnyId::Character(_) => IdKind::Character,
            AnyId::Author(_) => IdKind::Author,
        }
    }
}

impl fmt::Display for AnyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyId::Storyboard(id) => write!(f, "{}:{}", self.kind().name(), id),
            AnyId::Scene(id) => write!(f, "{}:{}", self.kind().name(), id),
            AnyId::Variant(id) => write!(f, "{}:{}", self.kind().name(), id),
            AnyId::Character(id) => write!(f, "{}:{}", self.kind().name(), id),
            AnyId::Author(id) => write!(f, "{}:{}", self.kind().name(), id),
        }
    }
}

impl From<SceneId> for AnyId {
    fn from(id: SceneId) -> Self {
        AnyId::Scene(id)
    }
}

impl From<VariantId> for AnyId {
    fn from(id: VariantId) -> Self {
        AnyId::Variant(id)
    }
}

impl From<CharacterId> for AnyId {
    fn from(id: CharacterId) -> Self {
        AnyId::Character(id)
    }
}

impl From<StoryboardId> for AnyId {
    fn from(id: StoryboardId) -> Self {
        AnyId::Storyboard(id)
    }
}

impl From<AuthorId> for AnyId {
    fn from(id: AuthorId) -> Self {
        AnyId::Author(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = SceneId::new();
        let b = SceneId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_roundtrip() {
        let id = VariantId::new();
        let parsed: VariantId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_nil_id() {
        assert!(SceneId::nil().is_nil());
        assert!(!SceneId::new().is_nil());
    }

    #[test]
    fn test_generate_matches_kind() {
        for kind in [
            IdKind::Storyboard,
            IdKind::Scene,
            IdKind::Variant,
            IdKind::Character,
            IdKind::Author,
        ] {
            assert_eq!(AnyId::generate(kind).kind(), kind);
        }
    }

    #[test]
    fn test_serde_transparent() {
        let id = SceneId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: SceneId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
