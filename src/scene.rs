//! Scenes and their draft variants.
//!
//! A scene is a stable slot in the story; its variants are interchangeable
//! draft bodies for that slot, exactly one of which is active at a time.
//! Variants live in creation order and belong exclusively to their scene.

use crate::content::VariantContent;
use crate::error::StoryError;
use crate::id::{SceneId, VariantId};
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// One draft of a scene's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Back-reference to the owning scene. Not ownership.
    pub scene_id: SceneId,
    pub content: VariantContent,
    pub author_note: Option<String>,
    metadata: Metadata,
}

impl Variant {
    fn new(scene_id: SceneId, content: VariantContent, author_note: Option<String>) -> Self {
        Self {
            id: VariantId::new(),
            scene_id,
            content,
            author_note,
            metadata: Metadata::attach(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// A stable narrative slot holding one or more draft variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    variants: Vec<Variant>,
    active_variant: VariantId,
    metadata: Metadata,
}

impl Scene {
    /// Create a scene with one empty variant, which becomes active.
    pub(crate) fn new() -> Self {
        Self::with_first_variant(VariantContent::empty(), None)
    }

    /// Create a scene whose auto-created first variant carries the given
    /// content and note.
    pub(crate) fn with_first_variant(
        content: VariantContent,
        author_note: Option<String>,
    ) -> Self {
        let id = SceneId::new();
        let variant = Variant::new(id, content, author_note);
        let active = variant.id;
        Self {
            id,
            variants: vec![variant],
            active_variant: active,
            metadata: Metadata::attach(),
        }
    }

    /// Variants in creation order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Id of the currently active variant. Always present in `variants`.
    pub fn active_variant_id(&self) -> VariantId {
        self.active_variant
    }

    /// The currently active variant.
    pub fn active_variant(&self) -> Option<&Variant> {
        self.variant(self.active_variant)
    }

    /// Look up a variant owned by this scene.
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub(crate) fn variant_mut(&mut self, id: VariantId) -> Option<&mut Variant> {
        self.variants.iter_mut().find(|v| v.id == id)
    }

    pub fn contains_variant(&self, id: VariantId) -> bool {
        self.variants.iter().any(|v| v.id == id)
    }

    /// Append a new variant. The active selection is unchanged.
    pub(crate) fn push_variant(
        &mut self,
        content: VariantContent,
        author_note: Option<String>,
    ) -> VariantId {
        let variant = Variant::new(self.id, content, author_note);
        let id = variant.id;
        self.variants.push(variant);
        id
    }

    /// Select the active variant.
    pub(crate) fn set_active(&mut self, id: VariantId) -> Result<(), StoryError> {
        if !self.contains_variant(id) {
            return Err(StoryError::UnknownVariant(id));
        }
        self.active_variant = id;
        Ok(())
    }

    /// Remove a variant.
    ///
    /// Removing the sole variant is rejected; removing the active variant
    /// requires a replacement, selected atomically with the removal.
    pub(crate) fn remove_variant(
        &mut self,
        id: VariantId,
        replacement: Option<VariantId>,
    ) -> Result<Variant, StoryError> {
        let index = self
            .variants
            .iter()
            .position(|v| v.id == id)
            .ok_or(StoryError::UnknownVariant(id))?;

        if self.variants.len() == 1 {
            return Err(StoryError::CannotRemoveLastVariant(self.id));
        }

        // Validate the replacement before touching anything.
        if let Some(replacement) = replacement {
            if replacement == id || !self.contains_variant(replacement) {
                return Err(StoryError::UnknownVariant(replacement));
            }
        }

        if id == self.active_variant {
            let replacement = replacement.ok_or(StoryError::ActiveVariantRequired(self.id))?;
            self.active_variant = replacement;
        }

        Ok(self.variants.remove(index))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
