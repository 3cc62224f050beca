//! The storyboard aggregate: the core's single public entry point.
//!
//! All entities are created through storyboard commands, never constructed
//! and inserted from outside, which is what guarantees identity uniqueness
//! and metadata initialization. Every mutation validates completely before
//! touching state, then applies and records revisions in one step, so a
//! failed call leaves nothing half-changed.
//!
//! Scenes, characters, and authors live in arena-style collections in
//! creation order; everything cross-entity is an id reference.

use crate::character::{Character, CharacterName, CharacterPatch, RelationKind};
use crate::content::{self, SceneElement, Summary, Title, VariantContent, MAX_NAME_LEN};
use crate::error::StoryError;
use crate::graph::{EdgeKind, SceneEdge, SceneGraph};
use crate::id::{AnyId, AuthorId, CharacterId, SceneId, StoryboardId, VariantId};
use crate::metadata::{Metadata, RevisionEntry};
use crate::path::{self, StoryPath};
use crate::scene::{Scene, Variant};
use crate::template::StoryTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use tracing::debug;

/// An author credited on the storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    name: String,
    metadata: Metadata,
}

impl Author {
    fn new(name: String) -> Self {
        Self {
            id: AuthorId::new(),
            name,
            metadata: Metadata::attach(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// The project workbench: scenes, their web, characters, and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storyboard {
    pub id: StoryboardId,
    title: Title,
    summary: Option<Summary>,
    template: Option<StoryTemplate>,
    authors: Vec<Author>,
    scenes: Vec<Scene>,
    graph: SceneGraph,
    characters: Vec<Character>,
    metadata: Metadata,
}

impl Storyboard {
    /// Create an empty storyboard.
    pub fn new(title: Title) -> Self {
        let board = Self {
            id: StoryboardId::new(),
            title,
            summary: None,
            template: None,
            authors: Vec::new(),
            scenes: Vec::new(),
            graph: SceneGraph::new(),
            characters: Vec::new(),
            metadata: Metadata::attach(),
        };
        debug!(id = %board.id, title = %board.title, "storyboard created");
        board
    }

    /// Create a storyboard seeded from a template: one scene per beat,
    /// chained into reading order, each auto variant's note carrying the
    /// beat label.
    pub fn from_template(title: Title, template: StoryTemplate) -> Self {
        let mut board = Self::new(title);
        board.template = Some(template);

        let ids: Vec<SceneId> = template
            .beats()
            .iter()
            .map(|beat| {
                let scene =
                    Scene::with_first_variant(VariantContent::empty(), Some(beat.label.to_string()));
                let id = scene.id;
                board.scenes.push(scene);
                id
            })
            .collect();
        board.graph.replace_sequential(&ids);

        board.metadata.touch(format!("seeded from {} template", template.name()));
        board
    }

    // =========================================================================
    // Read views
    // =========================================================================

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn template(&self) -> Option<StoryTemplate> {
        self.template
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Scenes in creation order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Characters in creation order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// The full web of edges.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Look up a scene.
    pub fn scene(&self, id: SceneId) -> Result<&Scene, StoryError> {
        self.scenes
            .iter()
            .find(|s| s.id == id)
            .ok_or(StoryError::UnknownScene(id))
    }

    /// Look up a variant within a scene.
    pub fn variant(&self, scene: SceneId, variant: VariantId) -> Result<&Variant, StoryError> {
        self.scene(scene)?
            .variant(variant)
            .ok_or(StoryError::UnknownVariant(variant))
    }

    /// Look up a character.
    pub fn character(&self, id: CharacterId) -> Result<&Character, StoryError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or(StoryError::UnknownCharacter(id))
    }

    /// Look up an author.
    pub fn author(&self, id: AuthorId) -> Result<&Author, StoryError> {
        self.authors
            .iter()
            .find(|a| a.id == id)
            .ok_or(StoryError::UnknownAuthor(id))
    }

    /// Resolve the current linear story.
    pub fn path(&self, start: Option<SceneId>) -> Result<StoryPath, StoryError> {
        path::resolve(&self.scenes, &self.graph, start)
    }

    /// Resolve the current linear story with a cooperative cancellation
    /// flag, for very large webs.
    pub fn path_cancellable(
        &self,
        start: Option<SceneId>,
        cancel: &AtomicBool,
    ) -> Result<StoryPath, StoryError> {
        path::resolve_cancellable(&self.scenes, &self.graph, start, cancel)
    }

    /// Scenes the realized story leaves behind, in creation order.
    ///
    /// Same semantics as the `orphans` field of [`StoryPath`]: everything
    /// not reachable from the resolved start along sequential edges.
    pub fn orphans(&self, start: Option<SceneId>) -> Result<Vec<SceneId>, StoryError> {
        Ok(self.path(start)?.orphans)
    }

    /// Revision history of any tracked entity.
    pub fn history(&self, id: AnyId) -> Result<&[RevisionEntry], StoryError> {
        match id {
            AnyId::Storyboard(sid) => {
                if sid != self.id {
                    return Err(StoryError::UnknownStoryboard(sid));
                }
                Ok(self.metadata.history())
            }
            AnyId::Scene(sid) => Ok(self.scene(sid)?.metadata().history()),
            AnyId::Variant(vid) => self
                .scenes
                .iter()
                .find_map(|s| s.variant(vid))
                .map(|v| v.metadata().history())
                .ok_or(StoryError::UnknownVariant(vid)),
            AnyId::Character(cid) => Ok(self.character(cid)?.metadata().history()),
            AnyId::Author(aid) => Ok(self.author(aid)?.metadata().history()),
        }
    }

    // =========================================================================
    // Scene & variant commands
    // =========================================================================

    /// Create a scene with one empty variant, already active.
    pub fn create_scene(&mut self) -> SceneId {
        let scene = Scene::new();
        let id = scene.id;
        self.scenes.push(scene);
        self.metadata.touch("scene created");
        debug!(scene = %id, "scene created");
        id
    }

    /// Append a new draft variant. The active selection is unchanged.
    pub fn add_variant(
        &mut self,
        scene: SceneId,
        content: VariantContent,
        author_note: Option<String>,
    ) -> Result<VariantId, StoryError> {
        let slot = self.scene_mut(scene)?;
        let id = slot.push_variant(content, author_note);
        slot.metadata_mut().touch("variant added");
        self.metadata.touch("variant added");
        debug!(scene = %scene, variant = %id, "variant added");
        Ok(id)
    }

    /// Replace a variant's content.
    ///
    /// `base_revision` is the variant revision the caller last saw; when
    /// present, a mismatch fails with `StaleRevision` and nothing changes.
    /// Returns the variant's new revision.
    pub fn update_variant(
        &mut self,
        scene: SceneId,
        variant: VariantId,
        content: VariantContent,
        base_revision: Option<u64>,
    ) -> Result<u64, StoryError> {
        let slot = self.scene_mut(scene)?;
        let draft = slot
            .variant_mut(variant)
            .ok_or(StoryError::UnknownVariant(variant))?;

        // The revision guard runs before the content lands, so a stale
        // caller changes nothing.
        let expected = base_revision.unwrap_or_else(|| draft.metadata().revision());
        let revision = draft.metadata_mut().record_change(expected, "content updated")?;
        draft.content = content;
        self.metadata.touch("variant updated");
        debug!(scene = %scene, variant = %variant, revision, "variant updated");
        Ok(revision)
    }

    /// Select which draft is the scene's active one.
    pub fn set_active_variant(
        &mut self,
        scene: SceneId,
        variant: VariantId,
    ) -> Result<(), StoryError> {
        let slot = self.scene_mut(scene)?;
        slot.set_active(variant)?;
        slot.metadata_mut().touch("active variant changed");
        self.metadata.touch("active variant changed");
        debug!(scene = %scene, variant = %variant, "active variant changed");
        Ok(())
    }

    /// Remove a draft variant.
    ///
    /// Removing the sole variant fails with `CannotRemoveLastVariant`;
    /// removing the active one requires `replacement`, which is selected
    /// atomically with the removal.
    pub fn remove_variant(
        &mut self,
        scene: SceneId,
        variant: VariantId,
        replacement: Option<VariantId>,
    ) -> Result<(), StoryError> {
        let slot = self.scene_mut(scene)?;
        slot.remove_variant(variant, replacement)?;
        slot.metadata_mut().touch("variant removed");
        self.metadata.touch("variant removed");
        debug!(scene = %scene, variant = %variant, "variant removed");
        Ok(())
    }

    /// Delete a scene, cascading its graph edges and variants in the same
    /// commit.
    pub fn remove_scene(&mut self, scene: SceneId) -> Result<(), StoryError> {
        let index = self
            .scenes
            .iter()
            .position(|s| s.id == scene)
            .ok_or(StoryError::UnknownScene(scene))?;

        self.graph.remove_scene(scene);
        self.scenes.remove(index);
        self.metadata.touch("scene removed");
        debug!(scene = %scene, "scene removed with edges and variants");
        Ok(())
    }

    // =========================================================================
    // Graph commands
    // =========================================================================

    /// Link two scenes in the web.
    pub fn add_edge(
        &mut self,
        from: SceneId,
        to: SceneId,
        kind: EdgeKind,
    ) -> Result<(), StoryError> {
        self.scene(from)?;
        self.scene(to)?;

        let inserted = self.graph.add_edge(SceneEdge::new(from, to, kind))?;
        if inserted {
            self.metadata.touch(format!("{} edge added", kind.name()));
            debug!(%from, %to, kind = kind.name(), "edge added");
        }
        Ok(())
    }

    /// Remove a link from the web. Removing an absent edge is a no-op.
    pub fn remove_edge(
        &mut self,
        from: SceneId,
        to: SceneId,
        kind: EdgeKind,
    ) -> Result<(), StoryError> {
        self.scene(from)?;
        self.scene(to)?;

        if self.graph.remove_edge(&SceneEdge::new(from, to, kind)) {
            self.metadata.touch(format!("{} edge removed", kind.name()));
            debug!(%from, %to, kind = kind.name(), "edge removed");
        }
        Ok(())
    }

    /// Replace the whole sequential subgraph with the chain induced by
    /// `order`, in one atomic step.
    ///
    /// Scenes omitted from `order` keep only their branch/alternative
    /// edges and surface as orphans. Fails with `UnknownScene` or
    /// `DuplicateScene` on malformed input, leaving the graph untouched.
    pub fn reorder(&mut self, order: &[SceneId]) -> Result<(), StoryError> {
        let mut seen = HashSet::with_capacity(order.len());
        for &id in order {
            self.scene(id)?;
            if !seen.insert(id) {
                return Err(StoryError::DuplicateScene(id));
            }
        }

        self.graph.replace_sequential(order);
        self.metadata.touch("scenes reordered");
        debug!(count = order.len(), "sequential subgraph replaced");
        Ok(())
    }

    // =========================================================================
    // Character commands
    // =========================================================================

    /// Create a character.
    pub fn create_character(&mut self, name: &str) -> Result<CharacterId, StoryError> {
        let name = CharacterName::new(name)?;
        let character = Character::new(name);
        let id = character.id;
        self.characters.push(character);
        self.metadata.touch("character created");
        debug!(character = %id, "character created");
        Ok(id)
    }

    /// Apply a partial update to a character.
    ///
    /// The whole patch is validated (including the optional
    /// `base_revision` staleness check) before any field changes. Returns
    /// the character's new revision.
    pub fn update_character(
        &mut self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<u64, StoryError> {
        // Validate everything up front.
        let parsed_name = match patch.name.as_deref() {
            Some(input) => Some(CharacterName::new(input)?),
            None => None,
        };

        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoryError::UnknownCharacter(id))?;

        let expected = patch
            .base_revision
            .unwrap_or_else(|| character.metadata().revision());
        let revision = character
            .metadata_mut()
            .record_change(expected, "profile updated")?;

        if let Some(name) = parsed_name {
            character.set_name(name);
        }
        if let Some(backstory) = patch.backstory {
            character.backstory = Some(backstory);
        }
        if patch.clear_backstory {
            character.backstory = None;
        }
        if let Some(motivations) = patch.motivations {
            character.motivations = motivations;
        }
        if let Some(arc) = patch.arc {
            character.arc = arc;
        }

        self.metadata.touch("character updated");
        debug!(character = %id, revision, "character updated");
        Ok(revision)
    }

    /// Record a directed relationship from one character to another.
    ///
    /// Both ends must exist in this storyboard. Symmetry is the caller's
    /// choice; the core records exactly what was submitted.
    pub fn add_relationship(
        &mut self,
        from: CharacterId,
        to: CharacterId,
        kind: RelationKind,
    ) -> Result<(), StoryError> {
        self.character(to)?;

        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id == from)
            .ok_or(StoryError::UnknownCharacter(from))?;

        character.set_relationship(to, kind);
        character.metadata_mut().touch("relationship added");
        self.metadata.touch("relationship added");
        debug!(%from, %to, kind = kind.name(), "relationship added");
        Ok(())
    }

    /// Drop a directed relationship. Dropping an absent link is a no-op.
    pub fn remove_relationship(
        &mut self,
        from: CharacterId,
        to: CharacterId,
    ) -> Result<(), StoryError> {
        self.character(to)?;

        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id == from)
            .ok_or(StoryError::UnknownCharacter(from))?;

        if character.clear_relationship(to) {
            character.metadata_mut().touch("relationship removed");
            self.metadata.touch("relationship removed");
        }
        Ok(())
    }

    /// Delete a character, resolving every reference to it: relationship
    /// entries in other characters are stripped and dialogue speaker
    /// attributions are cleared, all in the same commit.
    pub fn remove_character(&mut self, id: CharacterId) -> Result<(), StoryError> {
        let index = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoryError::UnknownCharacter(id))?;

        self.characters.remove(index);

        for character in &mut self.characters {
            if character.clear_relationship(id) {
                character.metadata_mut().touch("relationship removed");
            }
        }

        for scene in &mut self.scenes {
            let variant_ids: Vec<VariantId> =
                scene.variants().iter().map(|v| v.id).collect();
            for vid in variant_ids {
                let Some(draft) = scene.variant_mut(vid) else {
                    continue;
                };
                let mut cleared = false;
                for element in &mut draft.content.elements {
                    if let SceneElement::Dialogue { speaker, .. } = element {
                        if *speaker == Some(id) {
                            *speaker = None;
                            cleared = true;
                        }
                    }
                }
                if cleared {
                    draft.metadata_mut().touch("speaker cleared");
                }
            }
        }

        self.metadata.touch("character removed");
        debug!(character = %id, "character removed with references resolved");
        Ok(())
    }

    // =========================================================================
    // Board-level commands
    // =========================================================================

    /// Rename the storyboard.
    pub fn set_title(&mut self, title: &str) -> Result<(), StoryError> {
        self.title = Title::new(title)?;
        self.metadata.touch("title changed");
        Ok(())
    }

    /// Set or clear the story summary.
    pub fn set_summary(&mut self, summary: Option<&str>) -> Result<(), StoryError> {
        self.summary = match summary {
            Some(input) => Some(Summary::new(input)?),
            None => None,
        };
        self.metadata.touch("summary changed");
        Ok(())
    }

    /// Set or clear the template marker. Existing scenes are untouched.
    pub fn set_template(&mut self, template: Option<StoryTemplate>) {
        self.template = template;
        self.metadata.touch("template changed");
    }

    /// Credit an author.
    pub fn add_author(&mut self, name: &str) -> Result<AuthorId, StoryError> {
        let name = content::validated(name, Some(MAX_NAME_LEN))?;
        let author = Author::new(name);
        let id = author.id;
        self.authors.push(author);
        self.metadata.touch("author added");
        Ok(id)
    }

    /// Remove an author credit.
    pub fn remove_author(&mut self, id: AuthorId) -> Result<(), StoryError> {
        let index = self
            .authors
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoryError::UnknownAuthor(id))?;
        self.authors.remove(index);
        self.metadata.touch("author removed");
        Ok(())
    }

    fn scene_mut(&mut self, id: SceneId) -> Result<&mut Scene, StoryError> {
        self.scenes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoryError::UnknownScene(id))
    }
}

impl Default for Storyboard {
    fn default() -> Self {
        Self::new(Title::default())
    }
}
