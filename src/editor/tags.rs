//! Tag vocabulary and the patterns used to count tags in the buffer.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Tag name of the block alignment wrapper.
pub const BLOCK_TAG: &str = "div";

/// Inline formatting tags offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTag {
    Bold,
    Italic,
    Underline,
}

impl InlineTag {
    pub const ALL: [Self; 3] = [Self::Bold, Self::Italic, Self::Underline];

    /// The short tag name written into the buffer.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
        }
    }
}

/// Alignment carried by the block wrapper's inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// The open tag for a block wrapper with this alignment.
    pub fn open_tag(self) -> String {
        format!("<{BLOCK_TAG} style=\"text-align: {}\">", self.as_str())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open tag without attributes, e.g. `<b>`.
pub fn open_tag(name: &str) -> String {
    format!("<{name}>")
}

/// Close tag, e.g. `</b>`.
pub fn close_tag(name: &str) -> String {
    format!("</{name}>")
}

/// Compiled open/close patterns for one tag name.
///
/// The open pattern accepts the bare tag and the tag followed by attributes,
/// so `<div style="text-align: right">` counts as a `div` opener while `<br>`
/// never counts as a `b` opener.
#[derive(Debug, Clone)]
pub struct TagPattern {
    open: Regex,
    close: Regex,
}

impl TagPattern {
    pub fn new(name: &str) -> Self {
        let name = regex::escape(name);
        Self {
            open: Regex::new(&format!(r"<{name}(?:\s[^>]*)?>"))
                .expect("escaped tag name forms a valid pattern"),
            close: Regex::new(&format!(r"</{name}\s*>"))
                .expect("escaped tag name forms a valid pattern"),
        }
    }

    pub fn open_count(&self, haystack: &str) -> usize {
        self.open.find_iter(haystack).count()
    }

    pub fn close_count(&self, haystack: &str) -> usize {
        self.close.find_iter(haystack).count()
    }

    /// Byte range of the last open tag that lies entirely within `haystack`.
    pub fn last_open(&self, haystack: &str) -> Option<std::ops::Range<usize>> {
        self.open.find_iter(haystack).last().map(|m| m.range())
    }

    /// Byte range of the first close tag in `haystack`.
    pub fn first_close(&self, haystack: &str) -> Option<std::ops::Range<usize>> {
        self.close.find(haystack).map(|m| m.range())
    }
}

static KNOWN_PATTERNS: LazyLock<[(&'static str, TagPattern); 4]> = LazyLock::new(|| {
    [
        ("b", TagPattern::new("b")),
        ("i", TagPattern::new("i")),
        ("u", TagPattern::new("u")),
        (BLOCK_TAG, TagPattern::new(BLOCK_TAG)),
    ]
});

/// Patterns for `name`, served from a static table for the toolbar's tags.
pub fn pattern_for(name: &str) -> Cow<'static, TagPattern> {
    KNOWN_PATTERNS
        .iter()
        .find(|(known, _)| *known == name)
        .map_or_else(|| Cow::Owned(TagPattern::new(name)), |(_, p)| Cow::Borrowed(p))
}
