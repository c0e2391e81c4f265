#![forbid(unsafe_code)]

//! Scene-tree widgets for the dcon console.
//!
//! Frames, labels, and the observable [`TextBox`] the console reflects,
//! plus rich-text escaping and the path registry that binds a console to
//! its host subtree.

pub mod error;
pub mod markup;
pub mod node;
pub mod registry;
pub mod textbox;

pub use error::TreeError;
pub use node::{Frame, Label, ScrollFrame};
pub use registry::{ConsoleTree, WidgetNode, WidgetRegistry};
pub use textbox::TextBox;
