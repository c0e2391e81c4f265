#![forbid(unsafe_code)]

//! Runtime layer of the dcon console: the reflection routine, the caret
//! blink task, and the [`Console`] component that wires both to a widget
//! subtree's signals.

pub mod blink;
pub mod cancel;
pub mod config;
pub mod console;
pub mod reflect;

pub use blink::{BLINK_INTERVAL, BlinkTask};
pub use cancel::{CancelSource, CancelToken};
pub use config::{ConfigError, ConsoleConfig};
pub use console::Console;
pub use reflect::{Geometry, InputSnapshot, Reflection, SelectionGeometry, reflect};
