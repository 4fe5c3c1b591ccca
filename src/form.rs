//! Form validation and submission.
//!
//! Local validation decides whether a submission may leave at all. Delivery
//! wraps the message body in its font-size span, hands it to a [`Relay`] and
//! reports the outcome through a [`NotificationSink`].

use crate::notify::{NotificationSink, Severity};
use crate::relay::{Relay, SendEmailRequest, is_valid_email};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Enter a valid email";
pub const MESSAGE_REQUIRED: &str = "Message is required";

pub const SENT_NOTICE: &str = "Email sent successfully!";
pub const RELAY_FAILED_NOTICE: &str = "Failed to send email. Please try again.";
pub const UNEXPECTED_NOTICE: &str = "An unexpected error occurred";

/// Font size applied to the whole message at submission, in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: u8 = 10;
    pub const MAX: u8 = 48;
    pub const DEFAULT: Self = Self(14);

    /// `None` when `px` is outside `MIN..=MAX`.
    pub fn new(px: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&px).then_some(Self(px))
    }

    /// Clamp `px` into range.
    pub fn clamped(px: u8) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub const fn px(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn increased(self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn decreased(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Wrap the whole message in a span carrying the font size.
pub fn submission_body(message: &str, font_size: FontSize) -> String {
    format!(
        "<span style=\"font-size: {}px\">{message}</span>",
        font_size.px()
    )
}

/// Per-field validation errors. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.message.is_none()
    }
}

/// Check the fields before anything is sent.
pub fn validate(email: &str, message: &str) -> FieldErrors {
    let email = if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    };
    let message = message.is_empty().then_some(MESSAGE_REQUIRED);
    FieldErrors { email, message }
}

/// What happened to a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The relay accepted the message; the form should be cleared.
    Sent,
    /// The relay refused or could not be reached; keep the form for a retry.
    Failed,
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(FieldErrors),
    Delivered(Delivery),
}

/// Send an already validated form through `relay`.
pub fn deliver(
    email: &str,
    message: &str,
    font_size: FontSize,
    relay: &dyn Relay,
    sink: &mut dyn NotificationSink,
) -> Delivery {
    let request = SendEmailRequest {
        email: email.to_string(),
        message: submission_body(message, font_size),
    };
    match relay.send(&request) {
        Ok(reply) if reply.delivered() => {
            tracing::info!(status = reply.status, "submission delivered");
            sink.notify(SENT_NOTICE, Severity::Success);
            Delivery::Sent
        }
        Ok(reply) => {
            tracing::warn!(status = reply.status, error = ?reply.body.error, "relay refused submission");
            let text = reply.body.error.as_deref().unwrap_or(RELAY_FAILED_NOTICE);
            sink.notify(text, Severity::Error);
            Delivery::Failed
        }
        Err(err) => {
            tracing::error!(error = %err, "error sending email");
            sink.notify(UNEXPECTED_NOTICE, Severity::Error);
            Delivery::Failed
        }
    }
}

/// Validate, then deliver if the fields pass.
pub fn submit(
    email: &str,
    message: &str,
    font_size: FontSize,
    relay: &dyn Relay,
    sink: &mut dyn NotificationSink,
) -> SubmitOutcome {
    let errors = validate(email, message);
    if !errors.is_empty() {
        return SubmitOutcome::Blocked(errors);
    }
    SubmitOutcome::Delivered(deliver(email, message, font_size, relay, sink))
}
