use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::form::submission_body;
use crate::relay::{MAX_MESSAGE_CHARS, message_length};

use super::style::toast_style;

pub fn render_error_line(model: &Model, frame: &mut Frame, area: Rect) {
    let errors: Vec<&str> = [model.errors.email, model.errors.message]
        .into_iter()
        .flatten()
        .collect();
    if errors.is_empty() {
        return;
    }
    let line = Paragraph::new(format!(" {}", errors.join("  \u{00b7}  "))).style(model.theme.error);
    frame.render_widget(line, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let body_chars = message_length(&submission_body(&model.message.text(), model.font_size));
    let state = if model.submitting {
        "  Sending..."
    } else {
        ""
    };
    let dry_run = if model.dry_run { "  [dry run]" } else { "" };
    let status = format!(
        " mailform  {body_chars}/{MAX_MESSAGE_CHARS}  {}px{dry_run}{state}  Ctrl+S:send  F1:help",
        model.font_size.px()
    );
    let status_bar = Paragraph::new(status).style(model.theme.status_style());
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, severity)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = toast_style(severity);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
