//! QA tests for the persisted record shape and the round-trip law.
//!
//! Run with: `cargo test --test qa_persistence`

use storyboard_core::persist::{list_saves, save_path, SavedStoryboard};
use storyboard_core::{
    AnyId, CameraLocation, CharacterPatch, DialogueLine, EdgeKind, RelationKind, SceneElement,
    SceneHeading, Storyboard, StoryTemplate, TimeOfDay, Title, VariantContent,
};

/// A board exercising every serialized corner: headings, dialogue,
/// relationships, templates, multiple revisions.
fn rich_board() -> Storyboard {
    let mut board = Storyboard::from_template(
        Title::new("Scott Pilgrim vs. The World").unwrap(),
        StoryTemplate::Screenplay,
    );
    board.set_summary(Some("A bassist battles seven evil exes.")).unwrap();
    board.add_author("Bryan Lee O'Malley").unwrap();

    let scott = board.create_character("Scott Pilgrim").unwrap();
    let ramona = board.create_character("Ramona Flowers").unwrap();
    board
        .update_character(
            scott,
            CharacterPatch::new()
                .with_backstory("Between jobs, between bands.")
                .with_motivations(["win Ramona over", "beat the exes"])
                .with_arc(["oblivious", "tested", "earns self-respect"]),
        )
        .unwrap();
    board
        .add_relationship(scott, ramona, RelationKind::Romantic)
        .unwrap();
    board
        .add_relationship(ramona, scott, RelationKind::Romantic)
        .unwrap();

    let scenes = board.path(None).unwrap().scene_ids();
    let opening = scenes[0];
    let heading =
        SceneHeading::new(CameraLocation::Interior, "Band Practice", TimeOfDay::Night).unwrap();
    let content = VariantContent::empty()
        .with_heading(heading)
        .with_element(SceneElement::action("The band tunes up.").unwrap())
        .with_element(SceneElement::dialogue(
            Some(scott),
            vec![
                DialogueLine::parenthetical("nervous").unwrap(),
                DialogueLine::text("We are Sex Bob-omb!").unwrap(),
            ],
        ));
    let draft = board.add_variant(opening, content, Some("louder take".into())).unwrap();
    board.set_active_variant(opening, draft).unwrap();

    board
}

#[test]
fn qa_round_trip_law() {
    let saved = SavedStoryboard::new(rich_board());

    let first = saved.to_json().unwrap();
    let reloaded = SavedStoryboard::from_json(&first).unwrap();
    let second = reloaded.to_json().unwrap();

    // Byte-identical, not merely equal.
    assert_eq!(first, second);
}

#[test]
fn qa_reloaded_board_behaves_identically() {
    let board = rich_board();
    let path_before = board.path(None).unwrap();

    let json = SavedStoryboard::new(board.clone()).to_json().unwrap();
    let reloaded = SavedStoryboard::from_json(&json).unwrap().storyboard;

    assert_eq!(reloaded, board);
    assert_eq!(reloaded.path(None).unwrap(), path_before);

    // History is preserved verbatim, entity by entity.
    assert_eq!(
        reloaded.history(AnyId::Storyboard(reloaded.id)).unwrap(),
        board.history(AnyId::Storyboard(board.id)).unwrap()
    );
    for scene in board.scenes() {
        assert_eq!(
            reloaded.history(AnyId::Scene(scene.id)).unwrap(),
            scene.metadata().history()
        );
    }
    for character in board.characters() {
        assert_eq!(
            reloaded.history(AnyId::Character(character.id)).unwrap(),
            character.metadata().history()
        );
    }
}

#[test]
fn qa_mutating_a_reloaded_board_continues_history() {
    let json = SavedStoryboard::new(rich_board()).to_json().unwrap();
    let mut reloaded = SavedStoryboard::from_json(&json).unwrap().storyboard;

    let revision_at_load = reloaded.metadata().revision();
    reloaded.create_scene();

    assert_eq!(reloaded.metadata().revision(), revision_at_load + 1);
    let history = reloaded.metadata().history();
    assert_eq!(history.last().unwrap().summary, "scene created");
}

#[tokio::test]
async fn qa_file_save_load_cycle() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let board = rich_board();
    let path = save_path(dir.path(), board.title().as_str());

    let saved = SavedStoryboard::new(board);
    saved.save_json(&path).await.expect("save");

    let peeked = SavedStoryboard::peek_summary(&path).await.expect("peek");
    assert_eq!(peeked.title, "Scott Pilgrim vs. The World");
    assert_eq!(peeked.scene_count, saved.summary.scene_count);

    let loaded = SavedStoryboard::load_json(&path).await.expect("load");
    assert_eq!(loaded, saved);

    let saves = list_saves(dir.path()).await.expect("list");
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].summary, saved.summary);
}

#[test]
fn qa_graph_edges_survive_round_trip_in_order() {
    let mut board = Storyboard::default();
    let a = board.create_scene();
    let b = board.create_scene();
    let c = board.create_scene();
    board.add_edge(a, b, EdgeKind::Sequential).unwrap();
    board.add_edge(b, c, EdgeKind::Alternative).unwrap();
    board.add_edge(a, c, EdgeKind::Branch).unwrap();

    let json = SavedStoryboard::new(board.clone()).to_json().unwrap();
    let reloaded = SavedStoryboard::from_json(&json).unwrap().storyboard;

    assert_eq!(reloaded.graph().edges(), board.graph().edges());
}
