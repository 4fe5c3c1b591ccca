//! Toggling inline and block markup around the caret or selection.
//!
//! The buffer is scanned fresh on every call. Whether the caret is "inside" a
//! tag is decided by counting openers and closers in the prefix before it, so
//! the answer is only reliable while every tag of that name is well-formed.
//! Text the user types that looks like a tag is counted too.

use super::selection::{Selection, byte_to_char, char_to_byte};
use super::tags::{Alignment, BLOCK_TAG, InlineTag, close_tag, open_tag, pattern_for};

/// Result of an editor operation: the new buffer and where the selection goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

impl Edit {
    fn unchanged(buffer: &str, selection: Selection) -> Self {
        Self {
            text: buffer.to_owned(),
            selection,
        }
    }
}

/// Whether the caret sits inside exactly one unclosed `tag`.
pub fn is_inside_single_tag(buffer: &str, tag: &str, caret: usize) -> bool {
    let pattern = pattern_for(tag);
    let prefix = &buffer[..char_to_byte(buffer, caret)];
    pattern.open_count(prefix) == pattern.close_count(prefix) + 1
}

/// Selection-aware variant of [`is_inside_single_tag`].
///
/// A non-empty selection is never inside.
pub fn selection_inside_tag(buffer: &str, tag: &str, selection: Selection) -> bool {
    selection.is_caret() && is_inside_single_tag(buffer, tag, selection.start)
}

/// Remove the open/close pair of `tag` surrounding the caret.
///
/// The opener is the last one ending at or before the caret; the closer is
/// the first one starting at or after it. Returns `None` when either is
/// missing.
pub fn remove_nearest_enclosing_tag(buffer: &str, tag: &str, caret: usize) -> Option<Edit> {
    let pattern = pattern_for(tag);
    let split = char_to_byte(buffer, caret);
    let (prefix, suffix) = buffer.split_at(split);

    let open = pattern.last_open(prefix)?;
    let close = pattern.first_close(suffix)?;

    let mut text = String::with_capacity(buffer.len());
    text.push_str(&prefix[..open.start]);
    text.push_str(&prefix[open.end..]);
    text.push_str(&suffix[..close.start]);
    text.push_str(&suffix[close.end..]);

    Some(Edit {
        text,
        selection: Selection::caret(byte_to_char(buffer, open.start)),
    })
}

/// Toggle an inline tag at the selection.
pub fn toggle_inline(buffer: &str, tag: InlineTag, selection: Selection) -> Edit {
    toggle_named(buffer, tag.name(), selection)
}

/// Toggle an inline tag given by name.
pub fn toggle_named(buffer: &str, tag: &str, selection: Selection) -> Edit {
    if selection_inside_tag(buffer, tag, selection) {
        return remove_nearest_enclosing_tag(buffer, tag, selection.start)
            .unwrap_or_else(|| Edit::unchanged(buffer, selection));
    }
    wrap(buffer, &open_tag(tag), &close_tag(tag), selection)
}

/// Toggle an aligned block wrapper at the selection.
///
/// Being inside any `div` removes the nearest one, whatever its alignment.
pub fn toggle_block(buffer: &str, alignment: Alignment, selection: Selection) -> Edit {
    if selection_inside_tag(buffer, BLOCK_TAG, selection) {
        return remove_nearest_enclosing_tag(buffer, BLOCK_TAG, selection.start)
            .unwrap_or_else(|| Edit::unchanged(buffer, selection));
    }
    wrap(buffer, &alignment.open_tag(), &close_tag(BLOCK_TAG), selection)
}

/// Insert `open` before the selection and `close` after it.
///
/// The returned selection covers the wrapped text; for a caret it is a caret
/// between the two tags.
fn wrap(buffer: &str, open: &str, close: &str, selection: Selection) -> Edit {
    let start = char_to_byte(buffer, selection.start);
    let end = char_to_byte(buffer, selection.end);

    let mut text = String::with_capacity(buffer.len() + open.len() + close.len());
    text.push_str(&buffer[..start]);
    text.push_str(open);
    text.push_str(&buffer[start..end]);
    text.push_str(close);
    text.push_str(&buffer[end..]);

    let shift = open.chars().count();
    let selection = Selection::new(
        byte_to_char(buffer, start) + shift,
        byte_to_char(buffer, end) + shift,
    );
    Edit { text, selection }
}

/// Inline tags the caret currently sits inside, for toolbar state.
pub fn active_inline_tags(buffer: &str, selection: Selection) -> Vec<InlineTag> {
    InlineTag::ALL
        .into_iter()
        .filter(|tag| selection_inside_tag(buffer, tag.name(), selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Detection ---

    #[test]
    fn test_inside_after_open_tag() {
        assert!(is_inside_single_tag("a<b>bold", "b", 8));
    }

    #[test]
    fn test_not_inside_after_close_tag() {
        assert!(!is_inside_single_tag("a<b>bold</b>c", "b", 13));
    }

    #[test]
    fn test_not_inside_when_nested_twice() {
        assert!(!is_inside_single_tag("<b><b>x", "b", 7));
    }

    #[test]
    fn test_caret_inside_the_open_tag_text_is_not_inside() {
        // Prefix is "<b", which is not a complete opener.
        assert!(!is_inside_single_tag("<b>x</b>", "b", 2));
    }

    #[test]
    fn test_block_detection_ignores_alignment() {
        let buf = "<div style=\"text-align: right\">x";
        assert!(is_inside_single_tag(buf, "div", buf.chars().count()));
    }

    #[test]
    fn test_non_empty_selection_is_never_inside() {
        assert!(!selection_inside_tag("<b>abc</b>", "b", Selection::new(3, 5)));
    }

    #[test]
    fn test_literal_typed_tag_fools_detector() {
        // Documented limitation: typed markup counts like inserted markup.
        assert!(is_inside_single_tag("x <i> y", "i", 7));
    }

    // --- Removal ---

    #[test]
    fn test_remove_when_nothing_open_is_none() {
        assert_eq!(remove_nearest_enclosing_tag("plain text", "b", 0), None);
    }

    #[test]
    fn test_remove_keeps_inner_text() {
        let edit = remove_nearest_enclosing_tag("a<b>bold</b>c", "b", 6).unwrap();
        assert_eq!(edit.text, "aboldc");
        assert_eq!(edit.selection, Selection::caret(1));
    }

    #[test]
    fn test_remove_ignores_close_before_caret() {
        // "</b>" ends before the caret, so there is no eligible closer.
        assert_eq!(remove_nearest_enclosing_tag("<b>x</b>y", "b", 9), None);
    }

    #[test]
    fn test_remove_close_starting_at_caret_is_eligible() {
        let edit = remove_nearest_enclosing_tag("<u>x</u>", "u", 4).unwrap();
        assert_eq!(edit.text, "x");
    }

    #[test]
    fn test_remove_aligned_div() {
        let buf = "<div style=\"text-align: center\">hi</div>";
        let caret = buf.find("hi").unwrap() + 1;
        let edit = remove_nearest_enclosing_tag(buf, "div", caret).unwrap();
        assert_eq!(edit.text, "hi");
        assert_eq!(edit.selection, Selection::caret(0));
    }

    // --- Toggle inline ---

    #[test]
    fn test_wrap_selection_exact_layout() {
        let edit = toggle_inline("hello world", InlineTag::Bold, Selection::new(6, 11));
        assert_eq!(edit.text, "hello <b>world</b>");
        assert_eq!(edit.selection, Selection::new(9, 14));
    }

    #[test]
    fn test_wrap_caret_places_caret_between_tags() {
        let edit = toggle_inline("ab", InlineTag::Italic, Selection::caret(1));
        assert_eq!(edit.text, "a<i></i>b");
        assert_eq!(edit.selection, Selection::caret(4));
    }

    #[test]
    fn test_toggle_inline_removes_when_inside() {
        let edit = toggle_inline("a<u>xy</u>b", InlineTag::Underline, Selection::caret(5));
        assert_eq!(edit.text, "axyb");
        assert_eq!(edit.selection, Selection::caret(1));
    }

    #[test]
    fn test_toggle_inside_without_closer_is_noop() {
        let edit = toggle_inline("<b>open", InlineTag::Bold, Selection::caret(7));
        assert_eq!(edit.text, "<b>open");
        assert_eq!(edit.selection, Selection::caret(7));
    }

    #[test]
    fn test_wrap_multibyte_offsets() {
        let edit = toggle_inline("café au lait", InlineTag::Bold, Selection::new(0, 4));
        assert_eq!(edit.text, "<b>café</b> au lait");
        assert_eq!(edit.selection, Selection::new(3, 7));
    }

    #[test]
    fn test_toggle_named_accepts_arbitrary_tags() {
        let edit = toggle_named("x", "s", Selection::new(0, 1));
        assert_eq!(edit.text, "<s>x</s>");
    }

    // --- Toggle block ---

    #[test]
    fn test_block_on_caret_inserts_empty_div() {
        let edit = toggle_block("ab", Alignment::Right, Selection::caret(1));
        let open = "<div style=\"text-align: right\">";
        assert_eq!(edit.text, format!("a{open}</div>b"));
        assert_eq!(
            edit.selection,
            Selection::caret(1 + open.chars().count())
        );
    }

    #[test]
    fn test_block_wraps_selection() {
        let edit = toggle_block("title", Alignment::Center, Selection::new(0, 5));
        assert_eq!(
            edit.text,
            "<div style=\"text-align: center\">title</div>"
        );
        assert_eq!(edit.selection, Selection::new(32, 37));
    }

    #[test]
    fn test_block_removes_div_of_other_alignment() {
        let buf = "<div style=\"text-align: left\">t</div>";
        let caret = buf.find(">t<").map(|i| i + 2).unwrap();
        let edit = toggle_block(buf, Alignment::Right, Selection::caret(caret));
        assert_eq!(edit.text, "t");
    }

    #[test]
    fn test_active_inline_tags() {
        let buf = "<b><i>x";
        let active = active_inline_tags(buf, Selection::caret(7));
        assert_eq!(active, vec![InlineTag::Bold, InlineTag::Italic]);
    }

    // --- Properties ---

    fn tag_strategy() -> impl Strategy<Value = InlineTag> {
        prop_oneof![
            Just(InlineTag::Bold),
            Just(InlineTag::Italic),
            Just(InlineTag::Underline),
        ]
    }

    proptest! {
        #[test]
        fn prop_detector_matches_count_difference(
            text in "[biuxyz<>/]{0,40}",
            tag in tag_strategy(),
            caret_seed in 0usize..64,
        ) {
            let caret = caret_seed % (text.chars().count() + 1);
            let prefix: String = text.chars().take(caret).collect();
            let opens = prefix.matches(&format!("<{}>", tag.name())).count();
            let closes = prefix.matches(&format!("</{}>", tag.name())).count();
            prop_assert_eq!(
                is_inside_single_tag(&text, tag.name(), caret),
                opens == closes + 1
            );
        }

        #[test]
        fn prop_toggle_twice_at_caret_is_identity(
            text in "[a-z ]{0,30}",
            tag in tag_strategy(),
            caret_seed in 0usize..64,
        ) {
            let caret = caret_seed % (text.chars().count() + 1);
            let first = toggle_inline(&text, tag, Selection::caret(caret));
            let second = toggle_inline(&first.text, tag, first.selection);
            prop_assert_eq!(second.text, text);
            prop_assert_eq!(second.selection, Selection::caret(caret));
        }

        #[test]
        fn prop_wrap_then_unwrap_selection_restores_text(
            text in "[a-z ]{1,30}",
            tag in tag_strategy(),
            a in 0usize..64,
            b in 0usize..64,
        ) {
            let len = text.chars().count() + 1;
            let sel = Selection::new(a % len, b % len);
            let wrapped = toggle_inline(&text, tag, sel);
            // The wrapped selection's start sits just inside the new opener.
            let caret = Selection::caret(wrapped.selection.start);
            let unwrapped = toggle_inline(&wrapped.text, tag, caret);
            prop_assert_eq!(unwrapped.text, text);
        }

        #[test]
        fn prop_wrap_layout(
            text in "[a-z ]{0,30}",
            tag in tag_strategy(),
            a in 0usize..64,
            b in 0usize..64,
        ) {
            let len = text.chars().count() + 1;
            let sel = Selection::new(a % len, b % len);
            prop_assume!(!sel.is_caret());
            let edit = toggle_inline(&text, tag, sel);
            let before: String = text.chars().take(sel.start).collect();
            let mid: String = text.chars().skip(sel.start).take(sel.len()).collect();
            let after: String = text.chars().skip(sel.end).collect();
            let name = tag.name();
            prop_assert_eq!(edit.text, format!("{before}<{name}>{mid}</{name}>{after}"));
            prop_assert_eq!(edit.selection, Selection::new(sel.start + 3, sel.end + 3));
        }
    }
}
