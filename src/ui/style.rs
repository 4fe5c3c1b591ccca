//! Theming and color definitions.
//!
//! Uses ANSI and 256-color indexes so the palette follows the terminal's own.

use ratatui::style::{Color, Modifier, Style};

use crate::editor::{InlineTag, SegmentKind};
use crate::notify::Severity;

/// Theme configuration for the entire application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Markup runs in the edit view
    pub tag: Style,
    /// Plain text runs in the edit view
    pub text: Style,
    /// Selected text in the focused field
    pub selection: Style,
    /// The caret cell
    pub caret: Style,
    /// Border of the focused field
    pub focused_border: Style,
    /// Border of unfocused fields and panes
    pub border: Style,
    /// Toolbar button whose tag encloses the caret
    pub button_active: Style,
    /// Toolbar button otherwise
    pub button: Style,
    /// Field error lines
    pub error: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tag: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::DIM),
            text: Style::default(),
            selection: Style::default().bg(Color::Indexed(24)).fg(Color::White),
            caret: Style::default().add_modifier(Modifier::REVERSED),
            focused_border: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::Indexed(240)),
            button_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::Indexed(250)),
            error: Style::default().fg(Color::Red),
            status_bg: Color::Indexed(236), // Dark gray that works on both
            status_fg: Color::Indexed(252), // Light gray
        }
    }
}

impl Theme {
    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self::default()
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            tag: Style::default().fg(Color::Indexed(244)),
            selection: Style::default().bg(Color::Indexed(153)).fg(Color::Black),
            focused_border: Style::default().fg(Color::Indexed(25)), // Darker blue
            border: Style::default().fg(Color::Indexed(248)),
            button_active: Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            button: Style::default().fg(Color::Indexed(238)),
            error: Style::default().fg(Color::Indexed(124)), // Darker red
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(236),
            ..Self::default()
        }
    }

    /// Style for a run of the highlighted edit view.
    pub fn segment(&self, kind: SegmentKind) -> Style {
        match kind {
            SegmentKind::Tag => self.tag,
            SegmentKind::Text => self.text,
        }
    }

    pub fn button_style(&self, active: bool) -> Style {
        if active { self.button_active } else { self.button }
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}

/// How an inline tag's label is drawn on its toolbar button.
pub fn inline_tag_modifier(tag: InlineTag) -> Modifier {
    match tag {
        InlineTag::Bold => Modifier::BOLD,
        InlineTag::Italic => Modifier::ITALIC,
        InlineTag::Underline => Modifier::UNDERLINED,
    }
}

/// Prefix and bar style for a notification.
pub fn toast_style(severity: Severity) -> (&'static str, Style) {
    match severity {
        Severity::Success => (
            "[ok]",
            Style::default().bg(Color::Green).fg(Color::Black),
        ),
        Severity::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        Severity::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        Severity::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
