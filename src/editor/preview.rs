//! Display-only renderings of the buffer.
//!
//! Nothing here mutates the buffer; both views are recomputed from the
//! current text on every change.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::selection::byte_to_char;

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static tag pattern is valid"));

/// The buffer with all markup stripped, whitespace preserved.
pub fn clean_preview(buffer: &str) -> String {
    ANY_TAG.replace_all(buffer, "").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Tag,
    Text,
}

/// A run of the highlighted edit view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    /// Char range of this run in the buffer.
    pub chars: Range<usize>,
}

/// Split the buffer into alternating tag and text runs.
pub fn highlight_segments(buffer: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    let mut push = |kind, bytes: Range<usize>| {
        if bytes.is_empty() {
            return;
        }
        let chars = byte_to_char(buffer, bytes.start)..byte_to_char(buffer, bytes.end);
        segments.push(Segment {
            kind,
            text: &buffer[bytes],
            chars,
        });
    };
    for m in ANY_TAG.find_iter(buffer) {
        push(SegmentKind::Text, last..m.start());
        push(SegmentKind::Tag, m.range());
        last = m.end();
    }
    push(SegmentKind::Text, last..buffer.len());
    segments
}
