//! Integration tests for terminal presentation, layout and hit-testing.

use bstviz::application::Session;
use bstviz::cli::commands::{evaluate, evaluate_all, select};
use bstviz::domain::{BstArena, NODE_RADIUS};
use bstviz::infrastructure::{Presenter, TerminalPresenter, TreeRender};
use bstviz::util::testing::{self, RecordingPresenter};

fn plain() {
    colored::control::set_override(false);
}

// ============================================================
// Tree drawing
// ============================================================

#[test]
fn given_empty_tree_when_rendering_then_placeholder_text() {
    testing::init_test_setup();
    plain();
    let mut presenter = TerminalPresenter::new(Vec::new(), 800.0);

    presenter.render(&mut BstArena::new()).unwrap();

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(text.trim_end(), "Empty Tree - Type a command to start");
}

#[test]
fn given_tree_when_rendering_then_every_value_is_drawn() {
    testing::init_test_setup();
    plain();
    let mut tree = BstArena::from_values(&[50, 30, 70, 20]);
    let mut presenter = TerminalPresenter::new(Vec::new(), 800.0);

    presenter.render(&mut tree).unwrap();

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(text.lines().next(), Some("50"));
    for value in ["20", "30", "70"] {
        assert!(text.contains(value), "{value} missing in\n{text}");
    }
    assert_eq!(text, format!("{}\n", tree.to_tree_string()));
}

// ============================================================
// Layout and picking
// ============================================================

#[test]
fn given_rendered_tree_when_picking_node_centre_then_node_found() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[50, 30, 70]);
    tree.layout(800.0);

    let root = tree.pick(400.0, 50.0).and_then(|idx| tree.value_of(idx));
    let left = tree.pick(250.0 + NODE_RADIUS - 1.0, 130.0).and_then(|idx| tree.value_of(idx));

    assert_eq!(root, Some(50));
    assert_eq!(left, Some(30));
    assert_eq!(tree.pick(400.0, 130.0), None);
}

#[test]
fn given_narrow_canvas_when_laying_out_then_spacing_is_quarter_width() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[2, 1, 3]);

    tree.layout(200.0);

    let xs: Vec<f64> = tree.placements().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![100.0, 50.0, 150.0]);
}

#[test]
fn given_node_under_point_when_selecting_then_only_it_is_highlighted_and_redrawn() {
    testing::init_test_setup();
    let mut session = Session::default();
    let mut presenter = RecordingPresenter::new();
    evaluate(&mut session, &mut presenter, "build_tree([50,30,70], T)", false).unwrap();
    evaluate(&mut session, &mut presenter, "lookup(70, T)", false).unwrap();
    let before = presenter.frames.len();

    let first = select(&mut session, &mut presenter, 250.0, 130.0, 800.0).unwrap();
    let second = select(&mut session, &mut presenter, 550.0, 130.0, 800.0).unwrap();

    assert_eq!(first, Some(30));
    assert_eq!(second, Some(70));
    assert_eq!(presenter.frames.len(), before + 2);
    assert_eq!(presenter.frames[before].highlighted, vec![30]);
    let last = presenter.frames.last().unwrap();
    assert_eq!(last.highlighted, vec![70]);
    assert!(last.found.is_empty());
}

#[test]
fn given_empty_point_when_selecting_then_nothing_changes() {
    testing::init_test_setup();
    let mut session = Session::default();
    let mut presenter = RecordingPresenter::new();
    evaluate(&mut session, &mut presenter, "build_tree([50,30,70], T)", false).unwrap();
    select(&mut session, &mut presenter, 250.0, 130.0, 800.0).unwrap();
    let before = presenter.frames.len();

    let selected = select(&mut session, &mut presenter, 400.0, 130.0, 800.0).unwrap();

    assert_eq!(selected, None);
    assert_eq!(presenter.frames.len(), before);
    let tree = session.tree();
    let still = tree.search(30).path.last().copied().unwrap();
    assert!(tree.get_node(still).unwrap().decoration.highlighted);
}

// ============================================================
// Query transcripts through a presenter
// ============================================================

#[test]
fn given_queries_when_evaluating_all_then_transcripts_in_order_and_failures_counted() {
    testing::init_test_setup();
    let mut session = Session::default();
    let mut presenter = RecordingPresenter::new();

    let (failed, total) = evaluate_all(
        &mut session,
        &mut presenter,
        ["build_tree([2,1,3], T)", "foo(1)", "lookup(9, T)", "size(T, N)"],
        false,
    )
    .unwrap();

    assert_eq!((failed, total), (1, 4));
    let queries: Vec<&str> = presenter.transcripts.iter().map(|(q, _)| q.as_str()).collect();
    assert_eq!(
        queries,
        vec!["build_tree([2,1,3], T)", "foo(1)", "lookup(9, T)", "size(T, N)"]
    );
    assert_eq!(presenter.transcripts[3].1, "true.\n\nN = 3");
    // only the build changed the tree; nothing animates with playback off
    assert_eq!(presenter.frames.len(), 1);
}

#[test]
fn given_mutation_when_evaluating_then_tree_rendered_after_transcript() {
    testing::init_test_setup();
    let mut session = Session::default();
    let mut presenter = RecordingPresenter::new();

    let outcome = evaluate(&mut session, &mut presenter, "insert(7, T)", false).unwrap();

    assert!(outcome.is_success());
    assert_eq!(presenter.transcripts.len(), 1);
    assert_eq!(presenter.frames.len(), 1);
    assert_eq!(presenter.frames[0].values, vec![7]);
}

#[test]
fn given_transcript_when_writing_to_terminal_then_body_lines_follow_query() {
    testing::init_test_setup();
    plain();
    let mut session = Session::default();
    let mut presenter = TerminalPresenter::new(Vec::new(), 800.0);

    let outcome = session.execute("lookup(1, T)");
    presenter.transcript("lookup(1, T)", &outcome).unwrap();

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(text, "?- lookup(1, T)\nfalse.\n\nValue 1 not found in tree.\n");
}
