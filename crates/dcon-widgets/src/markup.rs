#![forbid(unsafe_code)]

//! Rich-text escaping for the input mirror.
//!
//! The display label renders markup, so the raw input has to be encoded
//! before it is mirrored or a typed `<` would open a tag. Five characters
//! are reserved; everything else passes through untouched.
//!
//! [`escape`] makes exactly one pass over its input and never re-scans what
//! it produced, so each raw `&` becomes `&amp;` exactly once per call. Text
//! that already contains an entity-shaped sequence gets its ampersand
//! encoded again (`&lt;` → `&amp;lt;`): the table applies to the raw
//! string, not to a markup document.

use std::borrow::Cow;

/// The reserved characters and their markup-safe encodings.
pub const ESCAPE_FORMS: [(char, &str); 5] = [
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
    ('&', "&amp;"),
];

/// Whether `c` must be encoded before display.
#[inline]
#[must_use]
pub fn is_reserved(c: char) -> bool {
    matches!(c, '<' | '>' | '"' | '\'' | '&')
}

/// The table entry for `c`, or `None` for unreserved characters.
#[must_use]
pub fn escaped_form(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        '&' => Some("&amp;"),
        _ => None,
    }
}

/// Encode the reserved characters in `raw` for markup display.
///
/// Borrows when nothing needs encoding.
///
/// # Example
/// ```
/// use dcon_widgets::markup::escape;
///
/// assert_eq!(escape("hi <bob>"), "hi &lt;bob&gt;");
/// assert_eq!(escape("plain"), "plain");
/// ```
#[must_use]
pub fn escape(raw: &str) -> Cow<'_, str> {
    let Some(first) = raw.find(is_reserved) else {
        return Cow::Borrowed(raw);
    };

    let mut out = String::with_capacity(raw.len() + 8);
    out.push_str(&raw[..first]);
    for c in raw[first..].chars() {
        match escaped_form(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_borrows() {
        assert!(matches!(escape("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn each_reserved_char_maps_to_its_entry() {
        for (c, entity) in ESCAPE_FORMS {
            assert_eq!(escape(&c.to_string()), entity);
        }
    }

    #[test]
    fn mixed_text() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape(r#"say "hi" & don't"#), "say &quot;hi&quot; &amp; don&apos;t");
    }

    #[test]
    fn reserved_char_at_start_and_end() {
        assert_eq!(escape("<x>"), "&lt;x&gt;");
        assert_eq!(escape("&"), "&amp;");
    }

    #[test]
    fn entity_shaped_input_is_reencoded() {
        // One pass over the raw string: the ampersand of an already-encoded
        // sequence is itself reserved.
        assert_eq!(escape("&lt;"), "&amp;lt;");
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn output_is_not_rescanned() {
        // The '<' produced inside "&lt;" stays literal-free: entities are
        // pushed wholesale, never fed back through the table.
        let out = escape("<<<");
        assert_eq!(out, "&lt;&lt;&lt;");
        assert_eq!(out.matches('&').count(), 3);
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            // Identity off the reserved set.
            #[test]
            fn unreserved_passes_through(text in "[^<>\"'&]{0,60}") {
                let escaped = escape(&text);
                prop_assert_eq!(escaped.as_ref(), text.as_str());
            }

            // The output contains a reserved character only as the leading
            // ampersand of an inserted entity.
            #[test]
            fn output_has_no_bare_reserved_chars(text in ".{0,60}") {
                let out = escape(&text);
                let mut stripped = out.as_ref().to_owned();
                for (_, entity) in ESCAPE_FORMS {
                    stripped = stripped.replace(entity, "");
                }
                prop_assert!(!stripped.contains(is_reserved), "residue in {stripped:?}");
            }

            // One entity per reserved input character.
            #[test]
            fn entity_count_matches_input(text in ".{0,60}") {
                let reserved_in = text.chars().filter(|c| is_reserved(*c)).count();
                let amps_out = escape(&text).matches('&').count();
                prop_assert_eq!(amps_out, reserved_in);
            }
        }
    }
}
