#![forbid(unsafe_code)]

//! Grapheme-cluster helpers for caret arithmetic.
//!
//! Caret and selection positions are counted in grapheme clusters, not bytes
//! or code points: slot `n` sits after the first `n` clusters, so slot 0 is
//! before the first character and slot `grapheme_count(text)` is after the
//! last. CJK clusters occupy two width units, everything printable else one.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Number of grapheme clusters in `text`.
///
/// # Example
/// ```
/// use dcon_core::text_width::grapheme_count;
///
/// assert_eq!(grapheme_count("hello"), 5);
/// assert_eq!(grapheme_count("e\u{0301}"), 1); // e + combining acute
/// ```
#[inline]
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of caret slot `slot` in `text`.
///
/// Slots past the end resolve to `text.len()`.
#[must_use]
pub fn slot_byte_offset(text: &str, slot: usize) -> usize {
    text.grapheme_indices(true)
        .nth(slot)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// The substring before caret slot `slot` (the first `slot` clusters).
#[must_use]
pub fn prefix(text: &str, slot: usize) -> &str {
    &text[..slot_byte_offset(text, slot)]
}

/// The substring between caret slots `start` and `end`.
///
/// Returns the empty string when `start >= end`.
#[must_use]
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = slot_byte_offset(text, start);
    let to = slot_byte_offset(text, end);
    &text[from..to]
}

/// Display width of a single grapheme cluster in cell units.
///
/// Zero-width clusters (combining marks standing alone) still occupy one
/// unit so the caret never lands on a zero-advance glyph.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme).max(1)
}

/// Display width of `text` in cell units, accumulated per cluster.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_ascii() {
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("abc"), 3);
    }

    #[test]
    fn count_combining_mark_is_one_cluster() {
        assert_eq!(grapheme_count("e\u{0301}x"), 2);
    }

    #[test]
    fn slot_offset_clamps_past_end() {
        assert_eq!(slot_byte_offset("ab", 0), 0);
        assert_eq!(slot_byte_offset("ab", 1), 1);
        assert_eq!(slot_byte_offset("ab", 2), 2);
        assert_eq!(slot_byte_offset("ab", 99), 2);
    }

    #[test]
    fn slot_offset_is_cluster_aligned() {
        let s = "e\u{0301}b"; // 3 bytes of cluster, then 'b'
        assert_eq!(slot_byte_offset(s, 1), 3);
    }

    #[test]
    fn prefix_of_slot() {
        assert_eq!(prefix("abcdef", 0), "");
        assert_eq!(prefix("abcdef", 2), "ab");
        assert_eq!(prefix("abcdef", 10), "abcdef");
    }

    #[test]
    fn slice_between_slots() {
        assert_eq!(slice("abcdef", 2, 5), "cde");
        assert_eq!(slice("abcdef", 5, 2), "");
        assert_eq!(slice("abcdef", 3, 3), "");
        assert_eq!(slice("abcdef", 4, 99), "ef");
    }

    #[test]
    fn width_cjk_is_double() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("a你b"), 4);
    }

    #[test]
    fn width_lone_combining_mark_is_one() {
        assert_eq!(grapheme_width("\u{0301}"), 1);
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            // prefix + slice + suffix partition the string at any two slots.
            #[test]
            fn slots_partition_text(text in ".{0,40}", a in 0usize..48, b in 0usize..48) {
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                let head = prefix(&text, start);
                let mid = slice(&text, start, end);
                let tail = &text[slot_byte_offset(&text, end)..];
                prop_assert_eq!(format!("{head}{mid}{tail}"), text);
            }

            #[test]
            fn width_is_additive_over_slots(text in ".{0,40}", cut in 0usize..48) {
                let head = prefix(&text, cut);
                let tail = &text[slot_byte_offset(&text, cut)..];
                prop_assert_eq!(
                    display_width(head) + display_width(tail),
                    display_width(&text)
                );
            }
        }
    }
}
