//! The tag toggle editor.
//!
//! The message body is a flat string with pseudo-HTML markup typed into it.
//! There is no document tree: every operation rescans the text. The pieces:
//! - [`buffer`]: rope-backed text with a char-offset selection
//! - [`toggle`]: wrapping and unwrapping tags around the selection
//! - [`preview`]: clean and highlighted display renderings
//! - [`surface`]: the input-surface boundary and deferred selection restore

mod buffer;
mod preview;
mod selection;
mod surface;
mod tags;
mod toggle;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use preview::{Segment, SegmentKind, clean_preview, highlight_segments};
pub use selection::{Selection, byte_to_char, char_to_byte};
pub use surface::{InputSurface, PendingSelections, ToolbarAction, apply_toolbar_action};
pub use tags::{Alignment, BLOCK_TAG, InlineTag, TagPattern, close_tag, open_tag, pattern_for};
pub use toggle::{
    Edit, active_inline_tags, is_inside_single_tag, remove_nearest_enclosing_tag,
    selection_inside_tag, toggle_block, toggle_inline, toggle_named,
};
