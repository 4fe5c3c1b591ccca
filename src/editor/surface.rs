//! The boundary between the tag editor and whatever text input hosts it.
//!
//! Toolbar actions run in two phases. First the new text is written to the
//! surface. Then a selection restore is queued with its offsets captured by
//! value; the host applies it once the new text has been rendered. Setting a
//! selection on content that has not been re-rendered yet would target stale
//! offsets.

use super::selection::Selection;
use super::tags::{Alignment, InlineTag};
use super::toggle::{Edit, toggle_block, toggle_inline};

/// A text input the editor can read from and write to.
pub trait InputSurface {
    /// Current text value.
    fn value(&self) -> String;

    /// Current selection.
    fn selection(&self) -> Selection;

    /// Replace the text value.
    fn set_value(&mut self, value: String);

    /// Ask for `selection` to be applied after the next content update.
    fn restore_selection_after_render(&mut self, selection: Selection);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Inline(InlineTag),
    Align(Alignment),
}

impl ToolbarAction {
    /// Compute the edit this action makes on `text` at `selection`.
    pub fn edit(self, text: &str, selection: Selection) -> Edit {
        match self {
            Self::Inline(tag) => toggle_inline(text, tag, selection),
            Self::Align(alignment) => toggle_block(text, alignment, selection),
        }
    }
}

/// Apply a toolbar action to a surface.
///
/// Returns `false` when the action left the text unchanged, in which case
/// nothing is written and no selection restore is queued.
pub fn apply_toolbar_action(surface: &mut impl InputSurface, action: ToolbarAction) -> bool {
    let value = surface.value();
    let edit = action.edit(&value, surface.selection());
    if edit.text == value {
        return false;
    }
    surface.set_value(edit.text);
    surface.restore_selection_after_render(edit.selection);
    true
}

/// Selection restores waiting for the next render, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSelections {
    queue: Vec<Selection>,
}

impl PendingSelections {
    pub fn push(&mut self, selection: Selection) {
        self.queue.push(selection);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued restore in the order they were scheduled.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Selection> {
        self.queue.drain(..)
    }
}
