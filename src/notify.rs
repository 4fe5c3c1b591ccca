//! Transient user feedback.
//!
//! Code that needs to tell the user something takes a [`NotificationSink`]
//! rather than reaching for UI state, so it can run without a terminal.

use std::fmt;
use std::time::Duration;

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives fire-and-forget notifications.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);
}

impl<F> NotificationSink for F
where
    F: FnMut(&str, Severity),
{
    fn notify(&mut self, message: &str, severity: Severity) {
        self(message, severity);
    }
}
