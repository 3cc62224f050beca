//! QA tests for the scene web: structural edits and their invariants.
//!
//! Run with: `cargo test --test qa_graph`

use storyboard_core::testing::{assert_path, StoryHarness};
use storyboard_core::{EdgeKind, SceneEdge, StoryError, Storyboard};

#[test]
fn qa_sequential_cycles_are_rejected_without_side_effects() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    let c = harness.scene();
    harness.chain(&[a, b, c]);

    let edges_before = harness.board.graph().edges().to_vec();
    let revision_before = harness.board.metadata().revision();

    let err = harness
        .board
        .add_edge(c, a, EdgeKind::Sequential)
        .unwrap_err();
    assert_eq!(err, StoryError::CycleViolation { from: c, to: a });

    // The failed call left nothing behind.
    assert_eq!(harness.board.graph().edges(), edges_before.as_slice());
    assert_eq!(harness.board.metadata().revision(), revision_before);
    assert_path(&harness, &[a, b, c]);
}

#[test]
fn qa_cycles_in_the_web_are_fine() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    harness.chain(&[a, b]);

    // An alternative back-edge and a branch loop: allowed, and invisible
    // to the path.
    harness
        .board
        .add_edge(b, a, EdgeKind::Alternative)
        .unwrap();
    harness.branch(b, a);

    assert_path(&harness, &[a, b]);
    assert_eq!(harness.board.graph().edges().len(), 3);
}

#[test]
fn qa_self_loops_never_enter_the_graph() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();

    for kind in [EdgeKind::Sequential, EdgeKind::Branch, EdgeKind::Alternative] {
        let err = harness.board.add_edge(a, a, kind).unwrap_err();
        assert_eq!(err, StoryError::SelfLoop(a));
    }
    assert!(harness.board.graph().edges().is_empty());
}

#[test]
fn qa_reorder_is_all_or_nothing() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    let c = harness.scene();
    harness.chain(&[a, b, c]);

    let ghost = storyboard_core::SceneId::nil();
    let err = harness.board.reorder(&[c, ghost, a]).unwrap_err();
    assert_eq!(err, StoryError::UnknownScene(ghost));
    assert_path(&harness, &[a, b, c]);

    harness.board.reorder(&[c, b, a]).unwrap();
    let path = harness.path_from(c);
    assert_eq!(path.scene_ids(), vec![c, b, a]);
}

#[test]
fn qa_reorder_subset_detaches_the_rest() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    let c = harness.scene();
    harness.chain(&[a, b, c]);

    harness.board.reorder(&[a, c]).unwrap();

    let path = harness.path_from(a);
    assert_eq!(path.scene_ids(), vec![a, c]);
    assert_eq!(path.orphans, vec![b]);
    assert_eq!(harness.board.orphans(Some(a)).unwrap(), vec![b]);
}

#[test]
fn qa_reconverging_branches_linearize_deterministically() {
    // a fans out to b and c; both rejoin at d. No merge marker needed:
    // creation order decides who goes first.
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    let c = harness.scene();
    let d = harness.scene();
    harness.chain(&[a, b, d]);
    harness.chain(&[a, c, d]);

    assert_path(&harness, &[a, b, c, d]);
}

#[test]
fn qa_remove_scene_heals_the_web() {
    let mut harness = StoryHarness::new();
    let a = harness.scene();
    let b = harness.scene();
    let c = harness.scene();
    harness.chain(&[a, b, c]);
    harness.branch(c, a);

    harness.board.remove_scene(b).unwrap();

    // b's edges went with it; a and c are now separate roots.
    assert!(!harness
        .board
        .graph()
        .contains(&SceneEdge::new(a, b, EdgeKind::Sequential)));
    assert!(!harness
        .board
        .graph()
        .contains(&SceneEdge::new(b, c, EdgeKind::Sequential)));
    // The branch between survivors is untouched.
    assert!(harness
        .board
        .graph()
        .contains(&SceneEdge::new(c, a, EdgeKind::Branch)));

    let path = harness.path_from(a);
    assert_eq!(path.scene_ids(), vec![a]);
    assert_eq!(path.orphans, vec![c]);
}

#[test]
fn qa_edges_to_unknown_scenes_are_rejected() {
    let mut board = Storyboard::default();
    let known = board.create_scene();
    let ghost = storyboard_core::SceneId::nil();

    for (from, to) in [(known, ghost), (ghost, known)] {
        let err = board.add_edge(from, to, EdgeKind::Branch).unwrap_err();
        assert_eq!(err, StoryError::UnknownScene(ghost));
    }
    let err = board
        .remove_edge(known, ghost, EdgeKind::Branch)
        .unwrap_err();
    assert_eq!(err, StoryError::UnknownScene(ghost));
}
