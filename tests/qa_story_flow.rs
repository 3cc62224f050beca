//! QA tests for the core authoring flow.
//!
//! These walk the documented end-to-end scenarios:
//! - drafting variants and selecting among them
//! - linking scenes and resolving the reading order
//! - optimistic-concurrency conflicts
//!
//! Run with: `cargo test --test qa_story_flow`

use storyboard_core::testing::{assert_active_variant, assert_active_variant_owned, StoryHarness};
use storyboard_core::{
    CharacterPatch, EdgeKind, StoryError, Storyboard, Title, VariantContent,
};

#[test]
fn qa_draft_select_link_resolve() {
    let mut board = Storyboard::new(Title::new("Flow").unwrap());

    // S1 comes with an auto-created active variant V1.
    let s1 = board.create_scene();
    let v1 = board.scene(s1).unwrap().active_variant_id();

    // A second draft does not steal the selection.
    let v2 = board
        .add_variant(s1, VariantContent::text("draft B").unwrap(), None)
        .unwrap();
    assert_eq!(board.scene(s1).unwrap().active_variant_id(), v1);

    // Selecting it does.
    board.set_active_variant(s1, v2).unwrap();
    assert_eq!(board.scene(s1).unwrap().active_variant_id(), v2);

    // Link in a second scene and resolve.
    let s2 = board.create_scene();
    let s2_auto = board.scene(s2).unwrap().active_variant_id();
    board.add_edge(s1, s2, EdgeKind::Sequential).unwrap();

    let path = board.path(None).unwrap();
    let pairs: Vec<_> = path.entries.iter().map(|e| (e.scene, e.variant)).collect();
    assert_eq!(pairs, vec![(s1, v2), (s2, s2_auto)]);
    assert!(path.is_complete());
}

#[test]
fn qa_two_roots_need_a_designated_start() {
    let mut board = Storyboard::default();
    let s1 = board.create_scene();
    let s2 = board.create_scene();

    match board.path(None) {
        Err(StoryError::AmbiguousRoot { candidates }) => {
            assert_eq!(candidates, vec![s1, s2]);
        }
        other => panic!("expected AmbiguousRoot, got {other:?}"),
    }

    // A designated start resolves it; the other root is reported.
    let path = board.path(Some(s1)).unwrap();
    assert_eq!(path.scene_ids(), vec![s1]);
    assert_eq!(path.orphans, vec![s2]);
}

#[test]
fn qa_path_is_idempotent() {
    let mut harness = StoryHarness::new();
    let a = harness.scene_with_text("cold open");
    let b = harness.scene_with_text("act one");
    let c = harness.scene_with_text("tag");
    harness.chain(&[a, b, c]);
    harness.branch(b, a);

    let first = harness.path();
    let second = harness.path();
    assert_eq!(first, second);
}

#[test]
fn qa_active_variant_always_owned() {
    let mut harness = StoryHarness::new();
    let scene = harness.scene();
    let v1 = harness.board.scene(scene).unwrap().active_variant_id();

    let v2 = harness.draft(scene, "second");
    let v3 = harness.draft(scene, "third");
    assert_active_variant_owned(&harness, scene);

    harness.board.set_active_variant(scene, v2).unwrap();
    assert_active_variant_owned(&harness, scene);

    harness.board.remove_variant(scene, v2, Some(v3)).unwrap();
    assert_active_variant(&harness, scene, v3);
    assert_active_variant_owned(&harness, scene);

    harness.board.remove_variant(scene, v1, None).unwrap();
    assert_active_variant_owned(&harness, scene);

    // Down to one variant: it can never be removed.
    let err = harness.board.remove_variant(scene, v3, None).unwrap_err();
    assert_eq!(err, StoryError::CannotRemoveLastVariant(scene));
    assert_eq!(harness.board.scene(scene).unwrap().variants().len(), 1);
}

#[test]
fn qa_stale_revision_conflict() {
    let mut board = Storyboard::default();
    let id = board.create_character("Envy").unwrap();

    // Two editors fetch the same revision.
    let seen = board.character(id).unwrap().metadata().revision();

    // Editor one commits.
    board
        .update_character(
            id,
            CharacterPatch::new()
                .with_backstory("toured with the band")
                .with_base_revision(seen),
        )
        .unwrap();

    // Editor two's patch is now stale and must be rejected whole.
    let err = board
        .update_character(
            id,
            CharacterPatch::new()
                .with_backstory("never toured at all")
                .with_motivations(["fame"])
                .with_base_revision(seen),
        )
        .unwrap_err();
    assert!(matches!(err, StoryError::StaleRevision { .. }));

    let character = board.character(id).unwrap();
    assert_eq!(character.backstory.as_deref(), Some("toured with the band"));
    assert!(character.motivations.is_empty());

    // Refetching the revision lets the retry go through.
    let current = character.metadata().revision();
    board
        .update_character(
            id,
            CharacterPatch::new()
                .with_motivations(["fame"])
                .with_base_revision(current),
        )
        .unwrap();
    assert!(board.character(id).unwrap().motivations.contains("fame"));
}

#[test]
fn qa_revision_history_tracks_the_session() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    harness.chain(&[a, b]);
    harness.draft(a, "alternate opening");

    let history = harness.board.metadata().history();
    let summaries: Vec<_> = history.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(
        summaries,
        vec![
            "created",
            "scene created",
            "scene created",
            "sequential edge added",
            "variant added",
        ]
    );

    // Revisions strictly increase and are never rewritten.
    for pair in history.windows(2) {
        assert_eq!(pair[1].revision, pair[0].revision + 1);
    }
}
