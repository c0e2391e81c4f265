//! End-to-end console sessions over a registry-resolved subtree.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dcon_core::measure::FixedMetrics;
use dcon_runtime::{Console, ConsoleConfig};
use dcon_widgets::registry::{ConsoleTree, WidgetNode, paths};
use dcon_widgets::{Frame, TreeError};

const ADVANCE: f32 = 10.0;

fn session(config: ConsoleConfig) -> (ConsoleTree, Console) {
    let tree = ConsoleTree::build();
    let registry = tree.registry();
    let console = Console::from_registry(
        &registry,
        Arc::new(FixedMetrics::new(ADVANCE, 18.0)),
        config,
    )
    .expect("canonical registry resolves");
    (tree, console)
}

#[test]
fn typing_markup_text_mirrors_escaped() {
    let (tree, mut console) = session(ConsoleConfig::default());
    console.start();

    tree.input.set_text("hi <bob>");
    assert_eq!(tree.markup.text(), "hi &lt;bob&gt;");
    // Caret sat at the end of the old (empty) text; the host moves it to
    // the end after typing, and the caret frame lands after the raw text.
    tree.input.set_cursor(Some(9));
    assert_eq!(tree.input.cursor(), Some(8));
    assert_eq!(tree.caret.position().x.offset, 8.0 * ADVANCE);
    assert!(!tree.selection.visible());

    console.end();
}

#[test]
fn selecting_a_range_highlights_it() {
    let (tree, mut console) = session(ConsoleConfig::default());
    tree.input.set_text("abcdef");
    console.start();

    tree.input.set_selection_anchor(Some(5));
    tree.input.set_cursor(Some(2));

    assert!(tree.selection.visible());
    assert_eq!(tree.selection.position().x.offset, 2.0 * ADVANCE); // "ab"
    assert_eq!(tree.selection.size().x.offset, 3.0 * ADVANCE); // "cde"
    assert_eq!(tree.selection.size().y.scale, 1.0); // full line height

    console.end();
}

#[test]
fn selection_needs_both_ends() {
    let (tree, mut console) = session(ConsoleConfig::default());
    tree.input.set_text("abcdef");
    console.start();

    tree.input.set_selection_anchor(None);
    tree.input.set_cursor(Some(4));
    assert!(!tree.selection.visible());

    // Losing the caret hides the selection even with a live anchor.
    tree.input.set_selection_anchor(Some(1));
    tree.input.release_focus();
    assert_eq!(tree.input.cursor(), None);
    assert!(!tree.selection.visible());

    console.end();
}

#[test]
fn blink_toggles_while_focused_then_hides() {
    let (tree, mut console) = session(ConsoleConfig {
        blink_interval: Duration::from_millis(20),
        ..ConsoleConfig::default()
    });
    console.start();
    assert!(tree.input.is_focused());
    assert!(tree.caret.visible(), "first flip shows the caret at t = 0");

    let mut last = tree.caret.visible();
    let mut flips = 0;
    for _ in 0..40 {
        thread::sleep(Duration::from_millis(2));
        let now = tree.caret.visible();
        if now != last {
            flips += 1;
            last = now;
        }
    }
    assert!(flips >= 2, "caret should keep blinking (flips = {flips})");

    tree.input.release_focus();
    assert!(!tree.caret.visible());
    thread::sleep(Duration::from_millis(50));
    assert!(!tree.caret.visible(), "no stale loop revives the caret");

    console.end();
}

#[test]
fn start_then_end_leaves_no_connections() {
    let (tree, mut console) = session(ConsoleConfig::default());
    console.start();
    console.end();

    tree.input.set_text("unseen <text>");
    assert_eq!(tree.markup.text(), "");
    assert_eq!(tree.input.text_changed().connection_count(), 0);
    assert_eq!(tree.input.cursor_moved().connection_count(), 0);
    assert_eq!(tree.input.focus_gained().connection_count(), 0);
    assert_eq!(tree.input.focus_lost().connection_count(), 0);
}

#[test]
fn restart_keeps_a_single_connection_set() {
    let (tree, mut console) = session(ConsoleConfig::default());
    console.start();
    console.start();
    console.start();

    assert_eq!(tree.input.text_changed().connection_count(), 1);

    // Exactly one reflection per edit.
    tree.input.set_text("a&b");
    assert_eq!(tree.markup.text(), "a&amp;b");

    console.end();
}

#[test]
fn two_consoles_keep_separate_subscriptions() {
    let (tree_a, mut console_a) = session(ConsoleConfig::default());
    let (tree_b, mut console_b) = session(ConsoleConfig::default());
    console_a.start();
    console_b.start();

    // Ending one console must not tear down the other's connections.
    console_a.end();
    tree_b.input.set_text("<still live>");
    assert_eq!(tree_b.markup.text(), "&lt;still live&gt;");
    assert_eq!(tree_a.input.text_changed().connection_count(), 0);

    console_b.end();
}

#[test]
fn missing_subtree_fails_resolution() {
    let tree = ConsoleTree::build();
    let mut registry = tree.registry();
    registry.insert(paths::INPUT, WidgetNode::Frame(Frame::new()));

    let err = Console::from_registry(
        &registry,
        Arc::new(FixedMetrics::default()),
        ConsoleConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        TreeError::Kind {
            path: paths::INPUT.into(),
            expected: "text box",
            found: "frame",
        }
    );
}

#[test]
fn manual_update_works_without_signals() {
    let (tree, console) = session(ConsoleConfig::default());
    tree.input.set_text("it's \"quoted\"");
    tree.input.set_cursor(Some(4));

    let reflection = console.update();
    assert_eq!(reflection.display, "it&apos;s &quot;quoted&quot;");
    assert_eq!(tree.markup.text(), reflection.display);
    assert_eq!(tree.caret.position().x.offset, 4.0 * ADVANCE);
}
