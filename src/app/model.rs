use std::path::PathBuf;
use std::time::Instant;

use crate::editor::EditorBuffer;
use crate::form::{FieldErrors, FontSize};
use crate::notify::{NOTIFICATION_DURATION, NotificationSink, Severity};
use crate::ui::style::Theme;

/// Which input receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    Email,
    #[default]
    Message,
}

impl Field {
    pub const fn next(self) -> Self {
        match self {
            Self::Email => Self::Message,
            Self::Message => Self::Email,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    severity: Severity,
    message: String,
    expires_at: Instant,
}

/// Holds the one notification on screen.
///
/// A newer notification replaces the current one.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    toast: Option<Toast>,
}

impl Toaster {
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.toast = Some(Toast {
            severity,
            message: message.into(),
            expires_at: Instant::now() + NOTIFICATION_DURATION,
        });
    }

    /// Drop the notification if it has expired. Returns `true` if one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active(&self) -> Option<(&str, Severity)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.severity))
    }
}

impl NotificationSink for Toaster {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.show(severity, message);
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Recipient address field
    pub email: EditorBuffer,
    /// Message body with inline markup
    pub message: EditorBuffer,
    /// Field receiving keystrokes
    pub focus: Field,
    /// Font size applied at submission
    pub font_size: FontSize,
    /// Errors from the last validation
    pub errors: FieldErrors,
    /// A validated submission is waiting to be delivered
    pub submitting: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Current notification
    pub toaster: Toaster,
    /// Line index of the first visible line of the message editor
    pub editor_scroll_offset: usize,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Set after first quit attempt with a filled-in form; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Submissions are logged instead of mailed
    pub dry_run: bool,
    pub theme: Theme,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("focus", &self.focus)
            .field("font_size", &self.font_size)
            .field("errors", &self.errors)
            .field("submitting", &self.submitting)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}

impl Model {
    /// Create a new model with an empty form.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self {
            email: EditorBuffer::single_line(),
            message: EditorBuffer::empty(),
            focus: Field::default(),
            font_size: FontSize::default(),
            errors: FieldErrors::default(),
            submitting: false,
            help_visible: false,
            toaster: Toaster::default(),
            editor_scroll_offset: 0,
            size: terminal_size,
            quit_confirmed: false,
            should_quit: false,
            dry_run: false,
            theme: Theme::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Prefill the recipient, leaving focus on the message.
    #[must_use]
    pub fn with_recipient(mut self, email: &str) -> Self {
        self.email.replace_text(email);
        self.email.move_to_end(false);
        self.email.mark_clean();
        self
    }

    pub fn focused_buffer(&self) -> &EditorBuffer {
        match self.focus {
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn focused_buffer_mut(&mut self) -> &mut EditorBuffer {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Clear the error attached to the focused field.
    pub(super) const fn clear_focused_error(&mut self) {
        match self.focus {
            Field::Email => self.errors.email = None,
            Field::Message => self.errors.message = None,
        }
    }

    /// Whether quitting would throw away typed content.
    pub fn has_unsent_content(&self) -> bool {
        self.email.is_dirty() || self.message.is_dirty()
    }

    /// Both fields back to empty, as after a successful send.
    pub fn reset_form(&mut self) {
        self.email.reset();
        self.message.reset();
        self.errors = FieldErrors::default();
        self.editor_scroll_offset = 0;
    }

    /// Apply selection restores queued by toolbar actions. Call after a draw.
    pub fn flush_pending_selections(&mut self) -> bool {
        let email = self.email.apply_pending_selections();
        let message = self.message.apply_pending_selections();
        email || message
    }

    pub fn show_toast(&mut self, severity: Severity, message: impl Into<String>) {
        self.toaster.show(severity, message);
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        self.toaster.expire(now)
    }

    pub fn active_toast(&self) -> Option<(&str, Severity)> {
        self.toaster.active()
    }

    /// Rows available to the message editor pane, borders excluded.
    pub fn editor_viewport_height(&self) -> usize {
        usize::from(crate::ui::editor_pane_height(self.size.1))
    }
}
