use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Field, Message, Model};
use crate::editor::{Alignment, Direction, InlineTag, ToolbarAction};
use crate::ui::{FormLayout, inner};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) if !model.help_visible => Some(Message::InsertText(text)),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if alt {
            return match key.code {
                KeyCode::Char('b' | 'B') => Some(Message::Toolbar(ToolbarAction::Inline(
                    InlineTag::Bold,
                ))),
                KeyCode::Char('i' | 'I') => Some(Message::Toolbar(ToolbarAction::Inline(
                    InlineTag::Italic,
                ))),
                KeyCode::Char('u' | 'U') => Some(Message::Toolbar(ToolbarAction::Inline(
                    InlineTag::Underline,
                ))),
                KeyCode::Char('l' | 'L') => {
                    Some(Message::Toolbar(ToolbarAction::Align(Alignment::Left)))
                }
                KeyCode::Char('e' | 'E') => {
                    Some(Message::Toolbar(ToolbarAction::Align(Alignment::Center)))
                }
                KeyCode::Char('r' | 'R') => {
                    Some(Message::Toolbar(ToolbarAction::Align(Alignment::Right)))
                }
                KeyCode::Char('=' | '+') => Some(Message::FontSizeUp),
                KeyCode::Char('-' | '_') => Some(Message::FontSizeDown),
                _ => None,
            };
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('s') => Some(Message::Submit),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::Char('a') => Some(Message::SelectAll),
                KeyCode::Left => Some(Message::MoveWordLeft(shift)),
                KeyCode::Right => Some(Message::MoveWordRight(shift)),
                KeyCode::Home => Some(Message::MoveToStart(shift)),
                KeyCode::End => Some(Message::MoveToEnd(shift)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Tab => Some(Message::FocusNext),
            KeyCode::BackTab => Some(Message::FocusPrev),
            KeyCode::Enter => match model.focus {
                Field::Email => Some(Message::FocusNext),
                Field::Message => Some(Message::SplitLine),
            },
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
            KeyCode::Home => Some(Message::MoveHome(shift)),
            KeyCode::End => Some(Message::MoveEnd(shift)),
            KeyCode::PageUp => Some(Message::ScrollUp(model.editor_viewport_height().max(1))),
            KeyCode::PageDown => Some(Message::ScrollDown(model.editor_viewport_height().max(1))),
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        let layout = FormLayout::new(Rect::new(0, 0, model.size.0, model.size.1));
        let editor = inner(layout.editor);

        match mouse.kind {
            MouseEventKind::ScrollDown if point_in_rect(mouse.column, mouse.row, layout.editor) => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if point_in_rect(mouse.column, mouse.row, layout.editor) => {
                Some(Message::ScrollUp(3))
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, layout.email) {
                    Some(Message::Focus(Field::Email))
                } else if point_in_rect(mouse.column, mouse.row, editor) {
                    let line = usize::from(mouse.row - editor.y) + model.editor_scroll_offset;
                    let col = usize::from(mouse.column - editor.x);
                    Some(Message::MoveTo(line, col))
                } else if point_in_rect(mouse.column, mouse.row, layout.editor) {
                    Some(Message::Focus(Field::Message))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
