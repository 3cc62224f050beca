//! Characters and the relationships between them.
//!
//! Characters are owned by the storyboard and referenced everywhere else by
//! id. Relationship links are directed id pairs; callers that want symmetry
//! author both directions (the [`RelationKind::inverse`] helper exists for
//! exactly that), the core never infers it.

use crate::content::{TextError, MAX_NAME_LEN};
use crate::id::CharacterId;
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A validated character name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterName(String);

impl CharacterName {
    pub fn new(input: &str) -> Result<Self, TextError> {
        let cleaned = crate::content::clean_text(input);

        if cleaned.is_empty() {
            return Err(TextError::Empty);
        }

        if cleaned.chars().count() > MAX_NAME_LEN {
            return Err(TextError::TooLong { max: MAX_NAME_LEN });
        }

        if cleaned.chars().any(|c| c.is_control()) {
            return Err(TextError::ControlChars);
        }

        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CharacterName {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kinds of relationships between characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Family,
    Friend,
    Ally,
    Mentor,
    Student,
    Romantic,
    Acquaintance,
    Rival,
    Enemy,
}

impl RelationKind {
    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            RelationKind::Family => "family of",
            RelationKind::Friend => "friend of",
            RelationKind::Ally => "ally of",
            RelationKind::Mentor => "mentor to",
            RelationKind::Student => "student of",
            RelationKind::Romantic => "romantic with",
            RelationKind::Acquaintance => "acquainted with",
            RelationKind::Rival => "rival of",
            RelationKind::Enemy => "enemy of",
        }
    }

    /// Check if this is a positive relationship.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            RelationKind::Family
                | RelationKind::Friend
                | RelationKind::Ally
                | RelationKind::Mentor
                | RelationKind::Student
                | RelationKind::Romantic
        )
    }

    /// Check if this is a negative relationship.
    pub fn is_negative(&self) -> bool {
        matches!(self, RelationKind::Rival | RelationKind::Enemy)
    }

    /// The kind a caller would record on the other end when authoring
    /// symmetrically.
    pub fn inverse(&self) -> RelationKind {
        match self {
            RelationKind::Mentor => RelationKind::Student,
            RelationKind::Student => RelationKind::Mentor,
            // Symmetric kinds.
            RelationKind::Family
            | RelationKind::Friend
            | RelationKind::Ally
            | RelationKind::Romantic
            | RelationKind::Acquaintance
            | RelationKind::Rival
            | RelationKind::Enemy => *self,
        }
    }
}

/// A character in the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    name: CharacterName,
    pub backstory: Option<String>,
    pub motivations: BTreeSet<String>,
    /// Ordered arc-stage descriptors, e.g. "refuses the call".
    pub arc: Vec<String>,
    relationships: BTreeMap<CharacterId, RelationKind>,
    metadata: Metadata,
}

impl Character {
    pub(crate) fn new(name: CharacterName) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            backstory: None,
            motivations: BTreeSet::new(),
            arc: Vec::new(),
            relationships: BTreeMap::new(),
            metadata: Metadata::attach(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn set_name(&mut self, name: CharacterName) {
        self.name = name;
    }

    /// All directed relationship links from this character.
    pub fn relationships(&self) -> &BTreeMap<CharacterId, RelationKind> {
        &self.relationships
    }

    /// The relationship this character holds toward `other`, if any.
    pub fn relationship_with(&self, other: CharacterId) -> Option<RelationKind> {
        self.relationships.get(&other).copied()
    }

    pub(crate) fn set_relationship(&mut self, other: CharacterId, kind: RelationKind) {
        self.relationships.insert(other, kind);
    }

    pub(crate) fn clear_relationship(&mut self, other: CharacterId) -> bool {
        self.relationships.remove(&other).is_some()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// A partial update to a character.
///
/// Unset fields are left alone. `base_revision` carries the revision the
/// caller last saw; when present, a mismatch rejects the whole patch with
/// `StaleRevision`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub backstory: Option<String>,
    pub clear_backstory: bool,
    pub motivations: Option<BTreeSet<String>>,
    pub arc: Option<Vec<String>>,
    pub base_revision: Option<u64>,
}

impl CharacterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    pub fn without_backstory(mut self) -> Self {
        self.clear_backstory = true;
        self
    }

    pub fn with_motivations<I, S>(mut self, motivations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.motivations = Some(motivations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_arc<I, S>(mut self, arc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arc = Some(arc.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_base_revision(mut self, revision: u64) -> Self {
        self.base_revision = Some(revision);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.backstory.is_none()
            && !self.clear_backstory
            && self.motivations.is_none()
            && self.arc.is_none()
    }
}
