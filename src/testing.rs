//! Testing utilities for storyboard scenarios.
//!
//! This module provides tools for integration testing:
//! - `StoryHarness` for building boards with a few keystrokes
//! - Assertion helpers for verifying paths and selections
//!
//! Harness methods panic on misuse; they are for tests, not for
//! collaborators.

use crate::content::VariantContent;
use crate::graph::EdgeKind;
use crate::id::{CharacterId, SceneId, VariantId};
use crate::path::StoryPath;
use crate::storyboard::Storyboard;

/// A scripted-scenario builder over a storyboard.
pub struct StoryHarness {
    /// The board under test.
    pub board: Storyboard,
}

impl StoryHarness {
    /// Create a harness with an empty, default-titled board.
    pub fn new() -> Self {
        Self {
            board: Storyboard::default(),
        }
    }

    /// Create a scene.
    pub fn scene(&mut self) -> SceneId {
        self.board.create_scene()
    }

    /// Create a scene whose auto variant carries the given text.
    pub fn scene_with_text(&mut self, text: &str) -> SceneId {
        let id = self.board.create_scene();
        let active = self
            .board
            .scene(id)
            .expect("scene just created")
            .active_variant_id();
        let content = VariantContent::text(text).expect("valid scene text");
        self.board
            .update_variant(id, active, content, None)
            .expect("update fresh variant");
        id
    }

    /// Chain scenes with sequential edges, in order.
    pub fn chain(&mut self, scenes: &[SceneId]) -> &mut Self {
        for pair in scenes.windows(2) {
            self.board
                .add_edge(pair[0], pair[1], EdgeKind::Sequential)
                .expect("chain over known scenes");
        }
        self
    }

    /// Add a branch edge.
    pub fn branch(&mut self, from: SceneId, to: SceneId) -> &mut Self {
        self.board
            .add_edge(from, to, EdgeKind::Branch)
            .expect("branch over known scenes");
        self
    }

    /// Create a character.
    pub fn character(&mut self, name: &str) -> CharacterId {
        self.board.create_character(name).expect("valid name")
    }

    /// Add a draft variant to a scene.
    pub fn draft(&mut self, scene: SceneId, text: &str) -> VariantId {
        let content = VariantContent::text(text).expect("valid draft text");
        self.board
            .add_variant(scene, content, None)
            .expect("draft on known scene")
    }

    /// Resolve the path, panicking on failure.
    pub fn path(&self) -> StoryPath {
        self.board.path(None).expect("resolvable path")
    }

    /// Resolve the path from a designated start.
    pub fn path_from(&self, start: SceneId) -> StoryPath {
        self.board.path(Some(start)).expect("resolvable path")
    }
}

impl Default for StoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the resolved path visits exactly these scenes, in order.
#[track_caller]
pub fn assert_path(harness: &StoryHarness, expected: &[SceneId]) {
    let actual = harness.path().scene_ids();
    assert_eq!(
        actual, expected,
        "expected path {expected:?}, got {actual:?}"
    );
}

/// Assert a scene's active variant.
#[track_caller]
pub fn assert_active_variant(harness: &StoryHarness, scene: SceneId, variant: VariantId) {
    let actual = harness
        .board
        .scene(scene)
        .expect("scene exists")
        .active_variant_id();
    assert_eq!(
        actual, variant,
        "expected active variant {variant}, got {actual}"
    );
}

/// Assert the scene's active variant is one of its own variants.
#[track_caller]
pub fn assert_active_variant_owned(harness: &StoryHarness, scene: SceneId) {
    let slot = harness.board.scene(scene).expect("scene exists");
    assert!(
        slot.contains_variant(slot.active_variant_id()),
        "scene {scene} active variant is not among its variants"
    );
}

/// Assert an entity's revision is at least `minimum`.
#[track_caller]
pub fn assert_revision_at_least(harness: &StoryHarness, minimum: u64) {
    let actual = harness.board.metadata().revision();
    assert!(
        actual >= minimum,
        "expected board revision >= {minimum}, got {actual}"
    );
}
