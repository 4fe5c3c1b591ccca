use super::*;
use crate::app::{Field, Model};
use crate::editor::{EditorBuffer, Selection};
use crate::form::{EMAIL_INVALID, FontSize};
use crate::notify::Severity;
use crate::ui::style::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::text::Line;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn screen(model: &Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn test_layout_stacks_fields_and_splits_panes() {
    let layout = FormLayout::new(Rect::new(0, 0, 80, 24));
    assert_eq!(layout.email, Rect::new(0, 0, 80, 3));
    assert_eq!(layout.toolbar.y, 3);
    assert_eq!(layout.editor.y, 4);
    assert_eq!(layout.editor.width + layout.preview.width, 80);
    assert_eq!(layout.status.y, 23);
    assert_eq!(inner(layout.editor).height, editor_pane_height(24));
}

#[test]
fn test_tiny_terminal_has_no_editor_rows() {
    assert_eq!(editor_pane_height(5), 0);
}

#[test]
fn test_render_shows_markup_in_editor_and_clean_preview() {
    let mut model = Model::new((80, 24));
    model.message = EditorBuffer::from_text("<b>Hi</b> there");
    let content = screen(&model);
    assert!(content.contains("<b>Hi</b> there"));
    assert!(content.contains("Hi there"));
    assert!(content.contains("Preview"));
}

#[test]
fn test_status_bar_shows_sending_and_dry_run() {
    let mut model = Model::new((80, 24));
    model.submitting = true;
    model.dry_run = true;
    let content = screen(&model);
    assert!(content.contains("Sending..."));
    assert!(content.contains("[dry run]"));
}

#[test]
fn test_status_bar_counts_wrapped_body() {
    let mut model = Model::new((80, 24));
    model.message = EditorBuffer::from_text("hi");
    model.font_size = FontSize::clamped(14);
    let body = "<span style=\"font-size: 14px\">hi</span>".chars().count();
    assert!(screen(&model).contains(&format!("{body}/1000")));
}

#[test]
fn test_field_errors_are_rendered() {
    let mut model = Model::new((80, 24));
    model.errors.email = Some(EMAIL_INVALID);
    assert!(screen(&model).contains(EMAIL_INVALID));
}

#[test]
fn test_toast_renders_with_severity_prefix() {
    let mut model = Model::new((80, 24));
    model.show_toast(Severity::Success, "Email sent successfully!");
    assert!(screen(&model).contains("[ok] Email sent successfully!"));
}

#[test]
fn test_help_overlay_lists_toolbar_keys() {
    let mut model = Model::new((80, 24));
    model.help_visible = true;
    let content = screen(&model);
    assert!(content.contains("Help"));
    assert!(content.contains("Alt+B"));
}

#[test]
fn test_toolbar_shows_font_size() {
    let mut model = Model::new((80, 24));
    model.font_size = FontSize::clamped(22);
    assert!(screen(&model).contains("Size 22px"));
}

#[test]
fn test_unfocused_email_has_no_caret_cell() {
    let theme = Theme::dark();
    let lines = styled_lines("ab", None, None, &theme);
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), "ab");
}

#[test]
fn test_caret_at_end_adds_a_cell() {
    let theme = Theme::dark();
    let lines = styled_lines("ab", Some(Selection::caret(2)), Some(2), &theme);
    assert_eq!(line_text(&lines[0]), "ab ");
    let last = lines[0].spans.last().unwrap();
    assert_eq!(last.style, theme.caret);
}

#[test]
fn test_lines_split_on_newlines_with_caret_before_break() {
    let theme = Theme::dark();
    let lines = styled_lines("a\nb", Some(Selection::caret(1)), Some(1), &theme);
    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(&lines[0]), "a ");
    assert_eq!(line_text(&lines[1]), "b");
}

#[test]
fn test_tags_selection_and_text_get_their_styles() {
    let theme = Theme::dark();
    let lines = styled_lines("<b>xy</b>", Some(Selection::new(3, 4)), Some(4), &theme);
    let spans = &lines[0].spans;
    assert_eq!(spans[0].content, "<b>");
    assert_eq!(spans[0].style, theme.tag);
    assert_eq!(spans[1].content, "x");
    assert_eq!(spans[1].style, theme.selection);
    assert_eq!(spans[2].content, "y");
    assert_eq!(spans[2].style, theme.caret);
    assert_eq!(spans[3].content, "</b>");
}

#[test]
fn test_focus_moves_border_highlight() {
    let mut model = Model::new((80, 24));
    model.focus = Field::Email;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let corner = terminal.backend().buffer()[(0, 0)].style();
    assert_eq!(corner.fg, model.theme.focused_border.fg);
}
