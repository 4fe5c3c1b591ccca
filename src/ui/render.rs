use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{Field, Model};
use crate::editor::{
    Alignment as TextAlignment, EditorBuffer, InlineTag, Selection, active_inline_tags,
    clean_preview, highlight_segments,
};

use super::style::{Theme, inline_tag_modifier};
use super::{FormLayout, inner, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = FormLayout::new(area);

    render_email_field(model, frame, layout.email);
    render_toolbar(model, frame, layout.toolbar);
    render_editor(model, frame, layout.editor);
    render_preview(model, frame, layout.preview);
    status::render_error_line(model, frame, layout.errors);
    status::render_toast_bar(model, frame, layout.toast);
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn field_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border
        } else {
            theme.border
        })
}

fn render_email_field(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Field::Email;
    let buffer = &model.email;
    let lines = styled_lines(
        &buffer.text(),
        focused.then(|| buffer.selection()),
        focused.then(|| buffer.caret()),
        &model.theme,
    );
    // Scroll horizontally so the caret stays in view.
    let width = usize::from(inner(area).width);
    let scroll_x = if width == 0 {
        0
    } else {
        buffer.caret().saturating_sub(width.saturating_sub(1))
    };
    let field = Paragraph::new(lines)
        .block(field_block(" To ", focused, &model.theme))
        .scroll((0, u16::try_from(scroll_x).unwrap_or(u16::MAX)));
    frame.render_widget(field, area);
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let active = active_inline_tags(&model.message.text(), model.message.selection());
    let mut spans = vec![Span::raw(" ")];
    for tag in InlineTag::ALL {
        let style = theme
            .button_style(active.contains(&tag))
            .add_modifier(inline_tag_modifier(tag));
        spans.push(Span::styled(format!(" {} ", tag.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("\u{2502} ", theme.border));
    for alignment in [
        TextAlignment::Left,
        TextAlignment::Center,
        TextAlignment::Right,
    ] {
        spans.push(Span::styled(format!("{alignment}"), theme.button));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("\u{2502} ", theme.border));
    spans.push(Span::styled(
        format!("Size {}px", model.font_size.px()),
        theme.button,
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Field::Message;
    let buffer: &EditorBuffer = &model.message;
    let visible = usize::from(inner(area).height);
    let lines: Vec<Line<'static>> = styled_lines(
        &buffer.text(),
        focused.then(|| buffer.selection()),
        focused.then(|| buffer.caret()),
        &model.theme,
    )
    .into_iter()
    .skip(model.editor_scroll_offset)
    .take(visible)
    .collect();
    let editor = Paragraph::new(lines).block(field_block(" Message ", focused, &model.theme));
    frame.render_widget(editor, area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let preview = Paragraph::new(clean_preview(&model.message.text()))
        .wrap(Wrap { trim: false })
        .block(field_block(" Preview ", false, &model.theme));
    frame.render_widget(preview, area);
}

/// Split `text` into display lines with markup, selection and caret styled.
///
/// `selection` and `caret` are only drawn when given, so an unfocused field
/// renders plain. A caret past the last char of a line is drawn as a styled
/// space.
pub fn styled_lines(
    text: &str,
    selection: Option<Selection>,
    caret: Option<usize>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    for segment in highlight_segments(text) {
        let base = theme.segment(segment.kind);
        for (idx, ch) in (segment.chars.start..).zip(segment.text.chars()) {
            let is_caret = caret == Some(idx);
            if ch == '\n' {
                if is_caret {
                    builder.push(' ', theme.caret);
                }
                builder.break_line();
                continue;
            }
            let style = if is_caret {
                theme.caret
            } else if selection.is_some_and(|sel| idx >= sel.start && idx < sel.end) {
                theme.selection
            } else {
                base
            };
            builder.push(ch, style);
        }
    }
    if caret.is_some_and(|c| c >= text.chars().count()) {
        builder.push(' ', theme.caret);
    }
    builder.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    run: String,
    run_style: Style,
}

impl LineBuilder {
    fn push(&mut self, ch: char, style: Style) {
        if !self.run.is_empty() && style != self.run_style {
            self.flush_run();
        }
        self.run_style = style;
        self.run.push(ch);
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            self.spans
                .push(Span::styled(std::mem::take(&mut self.run), self.run_style));
        }
    }

    fn break_line(&mut self) {
        self.flush_run();
        self.lines
            .push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        self.lines
    }
}
