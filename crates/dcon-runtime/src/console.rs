#![forbid(unsafe_code)]

//! The console component: lifecycle, focus handling, and widget updates.
//!
//! [`Console`] binds a [`ConsoleTree`] to the reflection routine. While
//! started, four connections drive it: text and caret changes re-run the
//! reflection, focus-gained enters the focused phase (immediate update plus
//! a blink loop), focus-lost leaves it (cancel the loop, hide the caret).
//!
//! The focus state machine has exactly those two phases and lives in the
//! input widget's focus flag; the handlers are its transitions. Connection
//! handles are fields of the console instance, so separate consoles never
//! interfere, and [`start`](Console::start) tears down its own previous
//! connections first; starting twice leaks nothing.

use std::sync::{Arc, Mutex};

use dcon_core::measure::TextMeasure;
use dcon_core::signal::SignalHandle;
use dcon_widgets::error::TreeError;
use dcon_widgets::registry::{ConsoleTree, WidgetRegistry};

use crate::blink::BlinkTask;
use crate::config::ConsoleConfig;
use crate::reflect::{InputSnapshot, Reflection, reflect};

/// Applies one reflection pass to the display widgets.
///
/// Shared by the console and its signal handlers; holds only cheap widget
/// handles and the measurer.
struct Mirror {
    tree: ConsoleTree,
    metrics: Arc<dyn TextMeasure>,
}

impl Mirror {
    fn apply(&self) -> Reflection {
        let snapshot = InputSnapshot::of(&self.tree.input);
        let _span = tracing::debug_span!(
            "console.update",
            bytes = snapshot.text.len(),
            has_selection = snapshot.selection_anchor.is_some(),
        )
        .entered();

        let reflection = reflect(
            &snapshot,
            self.metrics.as_ref(),
            self.tree.input.font(),
            self.tree.input.text_size(),
        );

        self.tree.markup.set_text(reflection.display.clone());
        self.tree.caret.set_position(reflection.geometry.caret_position);
        match reflection.geometry.selection {
            Some(sel) => {
                self.tree.selection.set_position(sel.position);
                self.tree.selection.set_size(sel.size);
                self.tree.selection.set_visible(true);
            }
            None => self.tree.selection.set_visible(false),
        }
        reflection
    }
}

/// The four live connections of a started console.
struct Subscriptions {
    text_changed: SignalHandle,
    cursor_moved: SignalHandle,
    focus_gained: SignalHandle,
    focus_lost: SignalHandle,
}

impl Subscriptions {
    fn disconnect(&mut self) {
        self.text_changed.disconnect();
        self.cursor_moved.disconnect();
        self.focus_gained.disconnect();
        self.focus_lost.disconnect();
    }
}

/// A developer-console input line bound to a widget subtree.
pub struct Console {
    mirror: Arc<Mirror>,
    config: ConsoleConfig,
    blink: Arc<Mutex<BlinkTask>>,
    subscriptions: Option<Subscriptions>,
}

impl Console {
    /// Bind a console to an already-resolved subtree.
    pub fn new(tree: ConsoleTree, metrics: Arc<dyn TextMeasure>, config: ConsoleConfig) -> Self {
        Self {
            mirror: Arc::new(Mirror { tree, metrics }),
            config,
            blink: Arc::new(Mutex::new(BlinkTask::new())),
            subscriptions: None,
        }
    }

    /// Resolve the console subtree from a host registry and bind to it.
    pub fn from_registry(
        registry: &WidgetRegistry,
        metrics: Arc<dyn TextMeasure>,
        config: ConsoleConfig,
    ) -> Result<Self, TreeError> {
        Ok(Self::new(
            ConsoleTree::from_registry(registry)?,
            metrics,
            config,
        ))
    }

    /// The bound widgets.
    pub fn tree(&self) -> &ConsoleTree {
        &self.mirror.tree
    }

    /// The active configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Whether the console currently holds its signal connections.
    pub fn is_started(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Connect to the input widget and grab focus.
    ///
    /// Any previous connection set of this instance is torn down first, so
    /// repeated starts hold exactly one set. Grabbing focus synchronously
    /// triggers the initial update; if the input is already focused, the
    /// focused phase is entered directly instead.
    pub fn start(&mut self) {
        self.end();

        let input = &self.mirror.tree.input;
        input.set_font(self.config.font);
        input.set_text_size(self.config.text_size);

        let mirror = Arc::clone(&self.mirror);
        let text_changed = input.text_changed().connect(move |_| {
            mirror.apply();
        });

        let mirror = Arc::clone(&self.mirror);
        let cursor_moved = input.cursor_moved().connect(move |_| {
            mirror.apply();
        });

        let mirror = Arc::clone(&self.mirror);
        let blink = Arc::clone(&self.blink);
        let interval = self.config.blink_interval;
        let focus_gained = input.focus_gained().connect(move |()| {
            mirror.apply();
            start_blink(&blink, &mirror.tree, interval);
        });

        let blink = Arc::clone(&self.blink);
        let caret = self.mirror.tree.caret.clone();
        let focus_lost = input.focus_lost().connect(move |()| {
            tracing::debug!("console focus lost");
            blink.lock().unwrap_or_else(|e| e.into_inner()).cancel();
            caret.set_visible(false);
        });

        self.subscriptions = Some(Subscriptions {
            text_changed,
            cursor_moved,
            focus_gained,
            focus_lost,
        });
        tracing::debug!("console started");

        if input.is_focused() {
            // No focus transition will fire; enter the focused phase here.
            self.mirror.apply();
            start_blink(&self.blink, &self.mirror.tree, self.config.blink_interval);
        } else {
            input.capture_focus();
        }
    }

    /// Recompute and apply the escaped mirror text and caret/selection
    /// geometry from the input's current state.
    pub fn update(&self) -> Reflection {
        self.mirror.apply()
    }

    /// Disconnect from the input widget and stop blinking.
    ///
    /// Safe to call when not started. Focus stays wherever the host put it.
    pub fn end(&mut self) {
        if let Some(mut subscriptions) = self.subscriptions.take() {
            subscriptions.disconnect();
            tracing::debug!("console ended");
        }
        self.blink.lock().unwrap_or_else(|e| e.into_inner()).cancel();
        self.mirror.tree.caret.set_visible(false);
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.end();
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("config", &self.config)
            .field("started", &self.is_started())
            .finish()
    }
}

fn start_blink(blink: &Arc<Mutex<BlinkTask>>, tree: &ConsoleTree, interval: std::time::Duration) {
    let caret = tree.caret.clone();
    let probe = tree.input.clone();
    blink.lock().unwrap_or_else(|e| e.into_inner()).restart(
        interval,
        move || {
            caret.toggle_visible();
        },
        move || probe.is_focused(),
    );
}
