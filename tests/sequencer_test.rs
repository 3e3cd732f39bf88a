//! Integration tests for highlight playback and its cancellation.

use std::time::Duration;

use bstviz::application::{Animation, AnimationKind, Sequencer, Session, Step, Timing};
use bstviz::domain::BstArena;
use bstviz::util::testing::{self, Frame, RecordingPresenter};

fn instant() -> Timing {
    Timing {
        search_step: Duration::ZERO,
        search_hold: Duration::ZERO,
        traversal_step: Duration::ZERO,
        traversal_hold: Duration::ZERO,
    }
}

fn highlighted(tree: &BstArena) -> Vec<i64> {
    tree.preorder()
        .nodes
        .iter()
        .filter_map(|&idx| tree.get_node(idx))
        .filter(|node| node.decoration.highlighted)
        .map(|node| node.value)
        .collect()
}

fn frame(values: &[i64], highlighted: &[i64], found: &[i64]) -> Frame {
    Frame {
        values: values.to_vec(),
        highlighted: highlighted.to_vec(),
        found: found.to_vec(),
    }
}

// ============================================================
// Sequencer stepping
// ============================================================

#[test]
fn given_search_path_when_stepping_then_prefix_grows_and_found_marked_last() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[50, 30, 70, 60]);
    let search = tree.search(60);
    let mut sequencer = Sequencer::new(Timing::default());
    let ticket = sequencer.start(Animation::search_path(search.path, search.found));

    assert_eq!(
        sequencer.step(&ticket, &mut tree),
        Step::Frame { delay: Duration::from_millis(500) }
    );
    assert_eq!(highlighted(&tree), vec![50]);

    sequencer.step(&ticket, &mut tree);
    assert_eq!(highlighted(&tree), vec![50, 70]);

    sequencer.step(&ticket, &mut tree);
    assert_eq!(highlighted(&tree), vec![50, 70, 60]);
    let target = tree.search(60).path.last().copied().expect("index of 60");
    assert!(tree.get_node(target).expect("node").decoration.found);

    assert_eq!(
        sequencer.step(&ticket, &mut tree),
        Step::Hold { delay: Duration::from_millis(2000) }
    );
    assert_eq!(sequencer.step(&ticket, &mut tree), Step::Finished);
    assert!(highlighted(&tree).is_empty());
    assert!(!tree.get_node(target).expect("node").decoration.found);
}

#[test]
fn given_absent_value_path_when_stepping_then_nothing_marked_found() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[50, 30]);
    let search = tree.search(10);
    let mut sequencer = Sequencer::default();
    let ticket = sequencer.start(Animation::search_path(search.path, search.found));

    sequencer.step(&ticket, &mut tree);
    sequencer.step(&ticket, &mut tree);

    assert_eq!(highlighted(&tree), vec![50, 30]);
    assert!(tree
        .preorder()
        .nodes
        .iter()
        .filter_map(|&idx| tree.get_node(idx))
        .all(|node| !node.decoration.found));
}

#[test]
fn given_traversal_when_stepping_then_one_node_at_a_time() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[2, 1, 3]);
    let nodes = tree.inorder().nodes;
    let mut sequencer = Sequencer::default();
    let ticket = sequencer.start(Animation::traversal(nodes));

    let mut seen = Vec::new();
    while let Step::Frame { delay } = sequencer.step(&ticket, &mut tree) {
        assert_eq!(delay, Duration::from_millis(600));
        seen.push(highlighted(&tree));
    }

    assert_eq!(seen, vec![vec![1], vec![2], vec![3]]);
}

#[test]
fn given_superseded_ticket_when_stepping_then_cancelled_without_writes() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[2, 1, 3]);
    let mut sequencer = Sequencer::default();
    let first = sequencer.start(Animation::traversal(tree.inorder().nodes));
    sequencer.step(&first, &mut tree);

    let second = sequencer.start(Animation::traversal(tree.preorder().nodes));
    sequencer.step(&second, &mut tree);
    let before = highlighted(&tree);

    assert_eq!(sequencer.step(&first, &mut tree), Step::Cancelled);
    assert_eq!(highlighted(&tree), before);
    assert!(!sequencer.is_active(&first));
    assert!(sequencer.is_active(&second));
}

#[test]
fn given_cancelled_sequencer_when_stepping_then_cancelled() {
    testing::init_test_setup();
    let mut tree = BstArena::from_values(&[1]);
    let mut sequencer = Sequencer::default();
    let ticket = sequencer.start(Animation::traversal(tree.inorder().nodes));

    sequencer.cancel();

    assert_eq!(sequencer.step(&ticket, &mut tree), Step::Cancelled);
    assert!(highlighted(&tree).is_empty());
}

// ============================================================
// Session playback
// ============================================================

#[test]
fn given_lookup_when_playing_then_frames_follow_search_path() {
    testing::init_test_setup();
    let mut session = Session::new(instant());
    session.execute("build_tree([50,30,70,60], T)");
    let outcome = session.execute("lookup(60, T)");
    let animation = outcome.animation.expect("search path");
    assert_eq!(animation.kind, AnimationKind::SearchPath { found: true });

    let mut presenter = RecordingPresenter::new();
    session
        .play(animation, &mut presenter, true)
        .expect("playback");

    let values = [50, 30, 70, 60];
    assert_eq!(
        presenter.frames,
        vec![
            frame(&values, &[50], &[]),
            frame(&values, &[50, 70], &[]),
            frame(&values, &[50, 70, 60], &[60]),
            frame(&values, &[], &[]),
        ]
    );
}

#[test]
fn given_animation_disabled_when_playing_then_no_frames() {
    testing::init_test_setup();
    let mut session = Session::new(instant());
    session.execute("build_tree([2,1,3], T)");
    let outcome = session.execute("inorder(T, L)");

    let mut presenter = RecordingPresenter::new();
    session
        .play(outcome.animation.expect("traversal"), &mut presenter, false)
        .expect("playback");

    assert!(presenter.frames.is_empty());
    assert!(highlighted(session.tree()).is_empty());
}

#[test]
fn given_running_animation_when_new_query_executes_then_old_ticket_is_stale() {
    testing::init_test_setup();
    let mut session = Session::new(instant());
    session.execute("build_tree([2,1,3], T)");
    let outcome = session.execute("preorder(T, L)");
    let ticket = session.start_animation(outcome.animation.expect("traversal"));
    session.step_animation(&ticket);
    assert_eq!(highlighted(session.tree()), vec![2]);

    session.execute("insert(4, T)");

    assert_eq!(session.step_animation(&ticket), Step::Cancelled);
    assert!(highlighted(session.tree()).is_empty());
    assert_eq!(session.tree().inorder().values, vec![1, 2, 3, 4]);
}
