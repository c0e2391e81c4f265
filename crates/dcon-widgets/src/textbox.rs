#![forbid(unsafe_code)]

//! The text-input widget the console reflects.
//!
//! `TextBox` stands in for the host engine's input box: it owns the raw
//! text, the caret slot, and the selection anchor, and exposes one signal
//! per observable change (`text_changed`, `cursor_moved`, `focus_gained`,
//! `focus_lost`). The console never writes this state; it subscribes and
//! mirrors.
//!
//! Caret and anchor positions are grapheme-cluster slots (`None` = no
//! caret / no selection). Mutators clamp slots into range, fire a signal
//! only when the value actually changed, and always release the state lock
//! before emitting so a handler can read the widget freely.
//!
//! Selection-anchor changes carry no signal of their own: interactive
//! selection always moves the caret too, and the host only watches text,
//! caret, and focus.

use std::sync::{Arc, Mutex, MutexGuard};

use dcon_core::geometry::Dim2;
use dcon_core::measure::FontId;
use dcon_core::signal::Signal;
use dcon_core::text_width::grapheme_count;

#[derive(Debug, Clone)]
struct TextBoxState {
    text: String,
    cursor: Option<usize>,
    selection_anchor: Option<usize>,
    focused: bool,
    visible: bool,
    position: Dim2,
    size: Dim2,
    font: FontId,
    text_size: f32,
}

impl Default for TextBoxState {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: None,
            selection_anchor: None,
            focused: false,
            visible: true,
            position: Dim2::default(),
            size: Dim2::default(),
            font: FontId::default(),
            text_size: 14.0,
        }
    }
}

/// A single-line text input with observable state.
#[derive(Debug, Clone, Default)]
pub struct TextBox {
    state: Arc<Mutex<TextBoxState>>,
    text_changed: Signal<String>,
    cursor_moved: Signal<Option<usize>>,
    focus_gained: Signal<()>,
    focus_lost: Signal<()>,
}

impl TextBox {
    /// Create an empty, unfocused text box.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Signals ---

    /// Fires with the new text after every text change.
    pub fn text_changed(&self) -> &Signal<String> {
        &self.text_changed
    }

    /// Fires with the new caret slot after every caret move.
    pub fn cursor_moved(&self) -> &Signal<Option<usize>> {
        &self.cursor_moved
    }

    /// Fires when the box takes input focus.
    pub fn focus_gained(&self) -> &Signal<()> {
        &self.focus_gained
    }

    /// Fires when the box loses input focus.
    pub fn focus_lost(&self) -> &Signal<()> {
        &self.focus_lost
    }

    // --- Value access ---

    /// The raw (unescaped) text.
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Caret slot, `None` while the box shows no caret.
    pub fn cursor(&self) -> Option<usize> {
        self.lock().cursor
    }

    /// Selection anchor slot, `None` while nothing is selected.
    pub fn selection_anchor(&self) -> Option<usize> {
        self.lock().selection_anchor
    }

    /// Whether the box holds input focus.
    pub fn is_focused(&self) -> bool {
        self.lock().focused
    }

    /// One consistent view of text, caret, and anchor.
    pub fn snapshot(&self) -> (String, Option<usize>, Option<usize>) {
        let state = self.lock();
        (state.text.clone(), state.cursor, state.selection_anchor)
    }

    // --- Mutators ---

    /// Replace the text, clamping caret and anchor into the new range.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let (text, fire_cursor) = {
            let mut state = self.lock();
            if state.text == text {
                return;
            }
            state.text = text;
            let max = grapheme_count(&state.text);
            let mut fire_cursor = None;
            if let Some(cursor) = state.cursor
                && cursor > max
            {
                state.cursor = Some(max);
                fire_cursor = Some(state.cursor);
            }
            if let Some(anchor) = state.selection_anchor
                && anchor > max
            {
                state.selection_anchor = Some(max);
            }
            (state.text.clone(), fire_cursor)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(operation = "set_text", "textbox edit");
        self.text_changed.emit(&text);
        if let Some(cursor) = fire_cursor {
            self.cursor_moved.emit(&cursor);
        }
    }

    /// Move the caret. `Some(slot)` clamps into range; `None` hides it.
    pub fn set_cursor(&self, cursor: Option<usize>) {
        let clamped = {
            let mut state = self.lock();
            let clamped = cursor.map(|slot| slot.min(grapheme_count(&state.text)));
            if state.cursor == clamped {
                return;
            }
            state.cursor = clamped;
            clamped
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(operation = "set_cursor", "textbox edit");
        self.cursor_moved.emit(&clamped);
    }

    /// Move the selection anchor. Does not fire a signal.
    pub fn set_selection_anchor(&self, anchor: Option<usize>) {
        let mut state = self.lock();
        state.selection_anchor = anchor.map(|slot| slot.min(grapheme_count(&state.text)));
    }

    /// Insert text at the caret, replacing any selection.
    ///
    /// Line breaks and tabs become spaces, other control characters are
    /// dropped. A hidden caret is treated as end-of-text.
    pub fn insert_text(&self, text: &str) {
        let clean: String = text
            .chars()
            .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if clean.is_empty() {
            return;
        }

        let (text, fire_cursor) = {
            let mut state = self.lock();
            let max = grapheme_count(&state.text);
            let caret = state.cursor.unwrap_or(max).min(max);
            let (start, end) = match state.selection_anchor {
                Some(anchor) => (caret.min(anchor.min(max)), caret.max(anchor.min(max))),
                None => (caret, caret),
            };

            let from = dcon_core::text_width::slot_byte_offset(&state.text, start);
            let to = dcon_core::text_width::slot_byte_offset(&state.text, end);
            state.text.replace_range(from..to, &clean);
            state.selection_anchor = None;
            let new_caret = start + grapheme_count(&clean);
            let moved = state.cursor != Some(new_caret);
            state.cursor = Some(new_caret);

            (state.text.clone(), moved.then_some(state.cursor))
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(operation = "insert_text", "textbox edit");
        self.text_changed.emit(&text);
        if let Some(cursor) = fire_cursor {
            self.cursor_moved.emit(&cursor);
        }
    }

    /// Select the whole text, caret at the end.
    pub fn select_all(&self) {
        let mut fire_cursor = None;
        {
            let mut state = self.lock();
            let max = grapheme_count(&state.text);
            state.selection_anchor = Some(0);
            if state.cursor != Some(max) {
                state.cursor = Some(max);
                fire_cursor = Some(state.cursor);
            }
        }
        if let Some(cursor) = fire_cursor {
            self.cursor_moved.emit(&cursor);
        }
    }

    /// Clear text, selection, and caret position (caret to slot 0).
    pub fn clear(&self) {
        self.set_selection_anchor(None);
        self.set_text("");
        self.set_cursor(Some(0));
    }

    // --- Focus ---

    /// Take input focus, placing the caret at the end if it was hidden.
    ///
    /// Fires `cursor_moved` (if the caret appeared) and then `focus_gained`.
    pub fn capture_focus(&self) {
        let mut fire_cursor = None;
        let gained;
        {
            let mut state = self.lock();
            gained = !state.focused;
            state.focused = true;
            if gained && state.cursor.is_none() {
                state.cursor = Some(grapheme_count(&state.text));
                fire_cursor = Some(state.cursor);
            }
        }
        if !gained {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("textbox focus captured");
        if let Some(cursor) = fire_cursor {
            self.cursor_moved.emit(&cursor);
        }
        self.focus_gained.emit(&());
    }

    /// Release input focus; the caret disappears.
    ///
    /// Fires `focus_lost` and then `cursor_moved`.
    pub fn release_focus(&self) {
        let lost;
        {
            let mut state = self.lock();
            lost = state.focused;
            state.focused = false;
            if lost {
                state.cursor = None;
            }
        }
        if !lost {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("textbox focus released");
        self.focus_lost.emit(&());
        self.cursor_moved.emit(&None);
    }

    // --- Frame properties ---

    /// Whether the box is shown.
    pub fn visible(&self) -> bool {
        self.lock().visible
    }

    /// Show or hide the box.
    pub fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
    }

    /// Container-relative position.
    pub fn position(&self) -> Dim2 {
        self.lock().position
    }

    /// Move the box.
    pub fn set_position(&self, position: Dim2) {
        self.lock().position = position;
    }

    /// Container-relative size.
    pub fn size(&self) -> Dim2 {
        self.lock().size
    }

    /// Resize the box.
    pub fn set_size(&self, size: Dim2) {
        self.lock().size = size;
    }

    /// The font the input renders with.
    pub fn font(&self) -> FontId {
        self.lock().font
    }

    /// Set the render font.
    pub fn set_font(&self, font: FontId) {
        self.lock().font = font;
    }

    /// The text size the input renders at.
    pub fn text_size(&self) -> f32 {
        self.lock().text_size
    }

    /// Set the render text size.
    pub fn set_text_size(&self, text_size: f32) {
        self.lock().text_size = text_size;
    }

    fn lock(&self) -> MutexGuard<'_, TextBoxState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
