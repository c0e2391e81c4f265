#![forbid(unsafe_code)]

//! The input reflection routine.
//!
//! [`reflect`] turns one snapshot of the input widget (raw text, caret
//! slot, selection anchor) into everything the display side needs: the
//! markup-escaped mirror text, the caret's horizontal anchor, and the
//! selection highlight's offset and extent. It is pure: the same snapshot
//! and measurer always produce the same [`Reflection`], and nothing is
//! mutated. Applying the result to widgets is the console's job.
//!
//! Caret and anchor slots past the end of the text are clamped, not
//! rejected; hosts hand over whatever their input box reports.

use dcon_core::geometry::{Dim2, Extent};
use dcon_core::measure::{FontId, TextMeasure};
use dcon_core::text_width::{grapheme_count, prefix, slice};
use dcon_widgets::TextBox;
use dcon_widgets::markup::escape;

/// One consistent reading of the input widget's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// The raw, unescaped text.
    pub text: String,
    /// Caret slot; `None` when the widget shows no caret.
    pub cursor: Option<usize>,
    /// Selection anchor slot; `None` when nothing is selected.
    pub selection_anchor: Option<usize>,
}

impl InputSnapshot {
    /// Snapshot a text box under a single state lock.
    pub fn of(input: &TextBox) -> Self {
        let (text, cursor, selection_anchor) = input.snapshot();
        Self {
            text,
            cursor,
            selection_anchor,
        }
    }
}

/// Placement of the selection highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionGeometry {
    /// Highlight position: pixel offset on x, vertically centered.
    pub position: Dim2,
    /// Highlight size: measured width, full container height.
    pub size: Dim2,
}

/// Display geometry derived from an [`InputSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Caret anchor: pixel offset of the text before the caret on x,
    /// bottom-anchored on y. Offset 0 when the caret slot is `None` (the
    /// caret is hidden by focus handling in that case, not by geometry).
    pub caret_position: Dim2,
    /// Selection placement, or `None` when either slot is absent and the
    /// highlight must be hidden.
    pub selection: Option<SelectionGeometry>,
}

/// The full output of one reflection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    /// Markup-escaped copy of the raw text, for the mirror label.
    pub display: String,
    /// Caret and selection placement.
    pub geometry: Geometry,
}

/// Compute the escaped mirror text and caret/selection geometry for one
/// input snapshot, measuring with `metrics` at `text_size` in `font`.
pub fn reflect(
    snapshot: &InputSnapshot,
    metrics: &dyn TextMeasure,
    font: FontId,
    text_size: f32,
) -> Reflection {
    let text = snapshot.text.as_str();
    let count = grapheme_count(text);
    let measure = |piece: &str| metrics.measure(piece, text_size, font, Extent::MAX).width;

    let display = escape(text).into_owned();

    let caret_slot = snapshot.cursor.map(|slot| slot.min(count));
    let caret_px = caret_slot.map_or(0.0, |slot| measure(prefix(text, slot)));
    let caret_position = Dim2::new(0.0, caret_px, 1.0, 0.0);

    let selection = match (caret_slot, snapshot.selection_anchor) {
        (Some(caret), Some(anchor)) => {
            let anchor = anchor.min(count);
            let start = caret.min(anchor);
            let end = caret.max(anchor);
            let offset_px = measure(prefix(text, start));
            let width_px = measure(slice(text, start, end));
            Some(SelectionGeometry {
                position: Dim2::new(0.0, offset_px, 0.5, 0.0),
                size: Dim2::new(0.0, width_px, 1.0, 0.0),
            })
        }
        _ => None,
    };

    Reflection {
        display,
        geometry: Geometry {
            caret_position,
            selection,
        },
    }
}
