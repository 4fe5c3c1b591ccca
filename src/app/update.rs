use crate::app::Model;
use crate::app::model::Field;
use crate::editor::{Direction, ToolbarAction, apply_toolbar_action};
use crate::form::{Delivery, validate};
use crate::notify::Severity;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Focus
    /// Move focus to the next field (Tab)
    FocusNext,
    /// Move focus to the previous field (Shift+Tab)
    FocusPrev,
    /// Focus a specific field (mouse click)
    Focus(Field),

    // Editing the focused field
    /// Insert a character, replacing the selection
    InsertChar(char),
    /// Insert pasted text, replacing the selection
    InsertText(String),
    /// Insert a line break (Enter, message only)
    SplitLine,
    /// Delete the selection or the char before the caret (Backspace)
    DeleteBack,
    /// Delete the selection or the char at the caret (Delete)
    DeleteForward,
    /// Move the caret; `true` extends the selection
    MoveCursor(Direction, bool),
    /// Move to beginning of line (Home)
    MoveHome(bool),
    /// Move to end of line (End)
    MoveEnd(bool),
    /// Move one word left (Ctrl+Left)
    MoveWordLeft(bool),
    /// Move one word right (Ctrl+Right)
    MoveWordRight(bool),
    /// Move to start of field (Ctrl+Home)
    MoveToStart(bool),
    /// Move to end of field (Ctrl+End)
    MoveToEnd(bool),
    /// Place the message caret at (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    /// Select the whole focused field (Ctrl+A)
    SelectAll,
    /// Scroll the message editor up by n lines
    ScrollUp(usize),
    /// Scroll the message editor down by n lines
    ScrollDown(usize),

    // Toolbar
    /// Toggle an inline tag or alignment block around the message selection
    Toolbar(ToolbarAction),
    /// Increase the submission font size by one px
    FontSizeUp,
    /// Decrease the submission font size by one px
    FontSizeDown,

    // Form
    /// Validate and, if the form passes, queue it for delivery
    Submit,
    /// The queued delivery finished
    Delivered(Delivery),

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Delivery itself happens in the event loop once `submitting` is set.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    // A restore still queued here was never drawn; settle it so this message
    // starts from the selection the toolbar action left behind.
    model.flush_pending_selections();

    match msg {
        Message::FocusNext | Message::FocusPrev => {
            model.focus = model.focus.next();
        }
        Message::Focus(field) => {
            model.focus = field;
        }

        Message::InsertChar(ch) => {
            model.focused_buffer_mut().insert_char(ch);
            after_edit(&mut model);
        }
        Message::InsertText(text) => {
            model.focused_buffer_mut().insert_str(&text);
            after_edit(&mut model);
        }
        Message::SplitLine => {
            if model.focus == Field::Message {
                model.message.split_line();
                after_edit(&mut model);
            }
        }
        Message::DeleteBack => {
            if model.focused_buffer_mut().delete_back() {
                after_edit(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.focused_buffer_mut().delete_forward() {
                after_edit(&mut model);
            }
        }
        Message::MoveCursor(dir, extend) => {
            model.focused_buffer_mut().move_cursor(dir, extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveHome(extend) => {
            model.focused_buffer_mut().move_home(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveEnd(extend) => {
            model.focused_buffer_mut().move_end(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveWordLeft(extend) => {
            model.focused_buffer_mut().move_word_left(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveWordRight(extend) => {
            model.focused_buffer_mut().move_word_right(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveToStart(extend) => {
            model.focused_buffer_mut().move_to_start(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveToEnd(extend) => {
            model.focused_buffer_mut().move_to_end(extend);
            ensure_caret_visible(&mut model);
        }
        Message::MoveTo(line, col) => {
            model.focus = Field::Message;
            model.message.move_to(line, col);
            ensure_caret_visible(&mut model);
        }
        Message::SelectAll => {
            model.focused_buffer_mut().select_all();
        }
        Message::ScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            let max = model.message.line_count().saturating_sub(1);
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }

        Message::Toolbar(action) => {
            // Toolbar buttons always act on the message, like clicking them
            // would, and hand focus back to it.
            model.focus = Field::Message;
            if apply_toolbar_action(&mut model.message, action) {
                model.errors.message = None;
            }
        }
        Message::FontSizeUp => {
            model.font_size = model.font_size.increased();
        }
        Message::FontSizeDown => {
            model.font_size = model.font_size.decreased();
        }

        Message::Submit => {
            if !model.submitting {
                model.errors = validate(&model.email.text(), &model.message.text());
                model.submitting = model.errors.is_empty();
            }
        }
        Message::Delivered(delivery) => {
            model.submitting = false;
            if delivery == Delivery::Sent {
                model.reset_form();
            }
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Resize(width, height) => {
            model.size = (width, height);
            ensure_caret_visible(&mut model);
        }
        Message::Redraw => {}

        Message::Quit => {
            if model.has_unsent_content() && !model.quit_confirmed {
                model.show_toast(
                    Severity::Warning,
                    "Unsent message! Press Esc again to quit, or Ctrl+S to send",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn after_edit(model: &mut Model) {
    model.clear_focused_error();
    ensure_caret_visible(model);
}

/// Ensure the message caret line is visible in the editor pane.
fn ensure_caret_visible(model: &mut Model) {
    let caret_line = model.message.cursor().line;
    let visible_height = model.editor_viewport_height();
    if visible_height == 0 {
        model.editor_scroll_offset = caret_line;
        return;
    }

    if caret_line < model.editor_scroll_offset {
        model.editor_scroll_offset = caret_line;
    } else if caret_line >= model.editor_scroll_offset + visible_height {
        model.editor_scroll_offset = caret_line + 1 - visible_height;
    }
}
