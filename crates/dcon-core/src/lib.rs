#![forbid(unsafe_code)]

//! Core primitives for the dcon developer console.
//!
//! This crate carries the pieces the widget and runtime layers share:
//! pixel-space geometry with container-relative dimensions, grapheme-cluster
//! arithmetic for caret slots, the text-measurement service trait, and the
//! signal/slot type widgets expose their state changes through.

pub mod geometry;
pub mod measure;
pub mod signal;
pub mod text_width;

pub use geometry::{Dim, Dim2, Extent, Point};
pub use measure::{FixedMetrics, FontId, MonoMetrics, TextMeasure};
pub use signal::{Signal, SignalHandle};
