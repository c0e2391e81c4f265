#![forbid(unsafe_code)]

//! dcon public facade.
//!
//! Re-exports the stable surface of the core, widget, and runtime crates,
//! plus a lightweight prelude for day-to-day usage.
//!
//! ```
//! use dcon::prelude::*;
//! use std::sync::Arc;
//!
//! let tree = ConsoleTree::build();
//! let mut console = Console::new(
//!     tree.clone(),
//!     Arc::new(MonoMetrics::default()),
//!     ConsoleConfig::default(),
//! );
//! console.start();
//! tree.input.insert_text("spawn <enemy>");
//! assert_eq!(tree.markup.text(), "spawn &lt;enemy&gt;");
//! console.end();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dcon_core::geometry::{Dim, Dim2, Extent, Point};
pub use dcon_core::measure::{FixedMetrics, FontId, MonoMetrics, TextMeasure};
pub use dcon_core::signal::{Signal, SignalHandle};
pub use dcon_core::text_width;

// --- Widget re-exports -----------------------------------------------------

pub use dcon_widgets::error::TreeError;
pub use dcon_widgets::markup;
pub use dcon_widgets::node::{Frame, Label, ScrollFrame};
pub use dcon_widgets::registry::{ConsoleTree, WidgetNode, WidgetRegistry, paths};
pub use dcon_widgets::textbox::TextBox;

// --- Runtime re-exports ----------------------------------------------------

pub use dcon_runtime::blink::{BLINK_INTERVAL, BlinkTask};
pub use dcon_runtime::cancel::{CancelSource, CancelToken};
pub use dcon_runtime::config::{ConfigError, ConsoleConfig};
pub use dcon_runtime::console::Console;
pub use dcon_runtime::reflect::{Geometry, InputSnapshot, Reflection, SelectionGeometry, reflect};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dcon hosts.
#[derive(Debug)]
pub enum Error {
    /// The console subtree could not be resolved.
    Tree(TreeError),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<TreeError> for Error {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for dcon APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Console, ConsoleConfig, ConsoleTree, Error, FixedMetrics, FontId, MonoMetrics, Result,
        TextBox, TextMeasure, WidgetRegistry,
    };
}
