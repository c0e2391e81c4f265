#![forbid(unsafe_code)]

//! Retained scene nodes.
//!
//! Nodes are cheap cloneable handles over shared state, so the same caret
//! frame can be held by the console, the blink task's thread, and the host
//! embedding at once. Every accessor takes the state lock for the duration
//! of one read or write; nothing is held across calls.

use std::sync::{Arc, Mutex};

use dcon_core::geometry::{Dim2, Point};

#[derive(Debug, Clone)]
struct FrameState {
    visible: bool,
    position: Dim2,
    size: Dim2,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            visible: true,
            position: Dim2::default(),
            size: Dim2::default(),
        }
    }
}

/// A plain container panel: visibility, position, and size.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    state: Arc<Mutex<FrameState>>,
}

impl Frame {
    /// Create a visible frame at the default position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the frame is currently shown.
    pub fn visible(&self) -> bool {
        self.lock().visible
    }

    /// Show or hide the frame.
    pub fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
    }

    /// Flip visibility, returning the new value.
    pub fn toggle_visible(&self) -> bool {
        let mut state = self.lock();
        state.visible = !state.visible;
        state.visible
    }

    /// Container-relative position.
    pub fn position(&self) -> Dim2 {
        self.lock().position
    }

    /// Move the frame.
    pub fn set_position(&self, position: Dim2) {
        self.lock().position = position;
    }

    /// Container-relative size.
    pub fn size(&self) -> Dim2 {
        self.lock().size
    }

    /// Resize the frame.
    pub fn set_size(&self, size: Dim2) {
        self.lock().size = size;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FrameState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A scrollable panel; hosts the console's output log lines.
///
/// Reflection never touches it, but the console subtree carries it so the
/// host can scroll output past the command line.
#[derive(Debug, Clone, Default)]
pub struct ScrollFrame {
    frame: Frame,
    canvas_offset: Arc<Mutex<Point>>,
}

impl ScrollFrame {
    /// Create an unscrolled, visible panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying frame properties.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Current scroll offset of the canvas.
    pub fn canvas_offset(&self) -> Point {
        *self
            .canvas_offset
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Scroll the canvas.
    pub fn set_canvas_offset(&self, offset: Point) {
        *self
            .canvas_offset
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = offset;
    }
}

#[derive(Debug, Clone, Default)]
struct LabelState {
    base: FrameState,
    text: String,
}

/// A text display node; the console's markup mirror.
#[derive(Debug, Clone, Default)]
pub struct Label {
    state: Arc<Mutex<LabelState>>,
}

impl Label {
    /// Create an empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed text.
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Replace the displayed text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().text = text.into();
    }

    /// Whether the label is shown.
    pub fn visible(&self) -> bool {
        self.lock().base.visible
    }

    /// Show or hide the label.
    pub fn set_visible(&self, visible: bool) {
        self.lock().base.visible = visible;
    }

    /// Container-relative position.
    pub fn position(&self) -> Dim2 {
        self.lock().base.position
    }

    /// Move the label.
    pub fn set_position(&self, position: Dim2) {
        self.lock().base.position = position;
    }

    /// Container-relative size.
    pub fn size(&self) -> Dim2 {
        self.lock().base.size
    }

    /// Resize the label.
    pub fn set_size(&self, size: Dim2) {
        self.lock().base.size = size;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LabelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
