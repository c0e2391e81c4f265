#![forbid(unsafe_code)]

//! Named widget lookup and the console subtree.
//!
//! Hosts register their scene nodes by path; [`ConsoleTree::from_registry`]
//! resolves the eight nodes the console binds to and fails fast with a
//! [`TreeError`] naming the first path that is absent or of the wrong
//! kind. Hosts without an existing tree use [`ConsoleTree::build`] to get
//! the canonical subtree ready-made.

use ahash::AHashMap;

use dcon_core::geometry::Dim2;

use crate::error::TreeError;
use crate::node::{Frame, Label, ScrollFrame};
use crate::textbox::TextBox;

/// Canonical paths of the console subtree.
pub mod paths {
    /// The console's main panel.
    pub const MAIN: &str = "console/main";
    /// Scrollable output log panel.
    pub const OUTPUT: &str = "console/main/output";
    /// The command-line row holding input and overlays.
    pub const COMMAND_LINE: &str = "console/main/command_line";
    /// The text-input box.
    pub const INPUT: &str = "console/main/command_line/input";
    /// The markup mirror rendered over the input.
    pub const MARKUP: &str = "console/main/command_line/input/markup";
    /// The caret frame.
    pub const CARET: &str = "console/main/command_line/caret";
    /// The selection highlight frame.
    pub const SELECTION: &str = "console/main/command_line/selection";
    /// The (unpopulated) suggestion dropdown container.
    pub const DROPDOWN: &str = "console/main/command_line/dropdown";
}

/// A node stored in a [`WidgetRegistry`].
#[derive(Debug, Clone)]
pub enum WidgetNode {
    /// A plain container panel.
    Frame(Frame),
    /// A scrollable panel.
    Scroll(ScrollFrame),
    /// A text display node.
    Label(Label),
    /// A text-input box.
    TextBox(TextBox),
}

impl WidgetNode {
    /// Human-readable node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frame(_) => "frame",
            Self::Scroll(_) => "scroll frame",
            Self::Label(_) => "label",
            Self::TextBox(_) => "text box",
        }
    }
}

/// Path-addressed widget storage, the stand-in for the host's named
/// scene tree.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    nodes: AHashMap<String, WidgetNode>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` at `path`, replacing any previous occupant.
    pub fn insert(&mut self, path: impl Into<String>, node: WidgetNode) {
        self.nodes.insert(path.into(), node);
    }

    /// Look up a node by path.
    pub fn get(&self, path: &str) -> Option<&WidgetNode> {
        self.nodes.get(path)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a frame at `path`.
    pub fn frame(&self, path: &str) -> Result<Frame, TreeError> {
        match self.get(path) {
            Some(WidgetNode::Frame(frame)) => Ok(frame.clone()),
            Some(node) => Err(TreeError::Kind {
                path: path.into(),
                expected: "frame",
                found: node.kind(),
            }),
            None => Err(TreeError::Missing { path: path.into() }),
        }
    }

    /// Resolve a scroll frame at `path`.
    pub fn scroll(&self, path: &str) -> Result<ScrollFrame, TreeError> {
        match self.get(path) {
            Some(WidgetNode::Scroll(scroll)) => Ok(scroll.clone()),
            Some(node) => Err(TreeError::Kind {
                path: path.into(),
                expected: "scroll frame",
                found: node.kind(),
            }),
            None => Err(TreeError::Missing { path: path.into() }),
        }
    }

    /// Resolve a label at `path`.
    pub fn label(&self, path: &str) -> Result<Label, TreeError> {
        match self.get(path) {
            Some(WidgetNode::Label(label)) => Ok(label.clone()),
            Some(node) => Err(TreeError::Kind {
                path: path.into(),
                expected: "label",
                found: node.kind(),
            }),
            None => Err(TreeError::Missing { path: path.into() }),
        }
    }

    /// Resolve a text box at `path`.
    pub fn text_box(&self, path: &str) -> Result<TextBox, TreeError> {
        match self.get(path) {
            Some(WidgetNode::TextBox(input)) => Ok(input.clone()),
            Some(node) => Err(TreeError::Kind {
                path: path.into(),
                expected: "text box",
                found: node.kind(),
            }),
            None => Err(TreeError::Missing { path: path.into() }),
        }
    }
}

/// The console's bound widgets.
///
/// The output panel and dropdown container are part of the subtree but the
/// reflection logic never touches them; they are resolved so the whole
/// console surface lives or fails together.
#[derive(Debug, Clone)]
pub struct ConsoleTree {
    /// The console's main panel.
    pub main: Frame,
    /// The command-line row.
    pub command_line: Frame,
    /// The text-input box being reflected.
    pub input: TextBox,
    /// The markup mirror label.
    pub markup: Label,
    /// The caret frame.
    pub caret: Frame,
    /// The selection highlight frame.
    pub selection: Frame,
    /// The suggestion dropdown container.
    pub dropdown: Frame,
    /// The output log panel.
    pub output: ScrollFrame,
}

impl ConsoleTree {
    /// Resolve the console subtree from a host registry.
    pub fn from_registry(registry: &WidgetRegistry) -> Result<Self, TreeError> {
        Ok(Self {
            main: registry.frame(paths::MAIN)?,
            command_line: registry.frame(paths::COMMAND_LINE)?,
            input: registry.text_box(paths::INPUT)?,
            markup: registry.label(paths::MARKUP)?,
            caret: registry.frame(paths::CARET)?,
            selection: registry.frame(paths::SELECTION)?,
            dropdown: registry.frame(paths::DROPDOWN)?,
            output: registry.scroll(paths::OUTPUT)?,
        })
    }

    /// Construct the canonical subtree with overlays hidden.
    pub fn build() -> Self {
        let caret = Frame::new();
        caret.set_visible(false);
        // A thin full-height bar hugging the text baseline.
        caret.set_size(Dim2::new(0.0, 2.0, 1.0, 0.0));

        let selection = Frame::new();
        selection.set_visible(false);

        let dropdown = Frame::new();
        dropdown.set_visible(false);

        Self {
            main: Frame::new(),
            command_line: Frame::new(),
            input: TextBox::new(),
            markup: Label::new(),
            caret,
            selection,
            dropdown,
            output: ScrollFrame::new(),
        }
    }

    /// Register every node of this subtree at its canonical path.
    pub fn registry(&self) -> WidgetRegistry {
        let mut registry = WidgetRegistry::new();
        registry.insert(paths::MAIN, WidgetNode::Frame(self.main.clone()));
        registry.insert(
            paths::COMMAND_LINE,
            WidgetNode::Frame(self.command_line.clone()),
        );
        registry.insert(paths::INPUT, WidgetNode::TextBox(self.input.clone()));
        registry.insert(paths::MARKUP, WidgetNode::Label(self.markup.clone()));
        registry.insert(paths::CARET, WidgetNode::Frame(self.caret.clone()));
        registry.insert(paths::SELECTION, WidgetNode::Frame(self.selection.clone()));
        registry.insert(paths::DROPDOWN, WidgetNode::Frame(self.dropdown.clone()));
        registry.insert(paths::OUTPUT, WidgetNode::Scroll(self.output.clone()));
        registry
    }
}

impl Default for ConsoleTree {
    fn default() -> Self {
        Self::build()
    }
}
