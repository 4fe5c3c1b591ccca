//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Theming and colors
//! - the form layout shared by rendering and mouse hit-testing

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{render, styled_lines};

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows taken by the bordered email field.
pub const EMAIL_FIELD_HEIGHT: u16 = 3;
/// Rows below the editor panes: errors, toast, status.
const FOOTER_HEIGHT: u16 = 3;
const TOOLBAR_HEIGHT: u16 = 1;

/// Where each part of the form is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub email: Rect,
    pub toolbar: Rect,
    pub editor: Rect,
    pub preview: Rect,
    pub errors: Rect,
    pub toast: Rect,
    pub status: Rect,
}

impl FormLayout {
    pub fn new(area: Rect) -> Self {
        let [email, toolbar, body, errors, toast, status] = Layout::vertical([
            Constraint::Length(EMAIL_FIELD_HEIGHT),
            Constraint::Length(TOOLBAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [editor, preview] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body);
        Self {
            email,
            toolbar,
            editor,
            preview,
            errors,
            toast,
            status,
        }
    }
}

/// Area inside a bordered block.
pub const fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

/// Text rows inside the message editor for a terminal of `height` rows.
pub const fn editor_pane_height(height: u16) -> u16 {
    height
        .saturating_sub(EMAIL_FIELD_HEIGHT + TOOLBAR_HEIGHT + FOOTER_HEIGHT)
        .saturating_sub(2)
}

#[cfg(test)]
mod tests;
