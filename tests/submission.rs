//! End-to-end submission scenarios against the public API.

use std::cell::RefCell;

use mailform::form::{
    Delivery, EMAIL_INVALID, FieldErrors, FontSize, SENT_NOTICE, SubmitOutcome, UNEXPECTED_NOTICE,
    submit,
};
use mailform::notify::Severity;
use mailform::relay::{ConsoleRelay, Relay, RelayError, RelayReply, SendEmailRequest};

/// Records every request and answers with a fixed reply.
struct RecordingRelay {
    reply: fn() -> Result<RelayReply, RelayError>,
    requests: RefCell<Vec<SendEmailRequest>>,
}

impl RecordingRelay {
    fn new(reply: fn() -> Result<RelayReply, RelayError>) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Relay for RecordingRelay {
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError> {
        self.requests.borrow_mut().push(request.clone());
        (self.reply)()
    }
}

fn run(relay: &dyn Relay, email: &str, message: &str) -> (SubmitOutcome, Vec<(String, Severity)>) {
    let mut notices = Vec::new();
    let mut sink = |text: &str, severity: Severity| notices.push((text.to_string(), severity));
    let outcome = submit(email, message, FontSize::DEFAULT, relay, &mut sink);
    (outcome, notices)
}

#[test]
fn test_valid_form_is_sent_with_font_span() {
    let relay = RecordingRelay::new(|| Ok(RelayReply::sent()));
    let (outcome, notices) = run(&relay, "user@example.com", "Hello <b>world</b>");

    assert_eq!(outcome, SubmitOutcome::Delivered(Delivery::Sent));
    assert_eq!(notices, vec![(SENT_NOTICE.to_string(), Severity::Success)]);
    let requests = relay.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].email, "user@example.com");
    assert_eq!(
        requests[0].message,
        "<span style=\"font-size: 14px\">Hello <b>world</b></span>"
    );
}

#[test]
fn test_invalid_email_blocks_without_network() {
    let relay = RecordingRelay::new(|| Ok(RelayReply::sent()));
    let (outcome, notices) = run(&relay, "bad-email", "hi");

    assert_eq!(
        outcome,
        SubmitOutcome::Blocked(FieldErrors {
            email: Some(EMAIL_INVALID),
            message: None,
        })
    );
    assert!(notices.is_empty());
    assert!(relay.requests.borrow().is_empty());
}

#[test]
fn test_relay_error_body_is_shown_and_form_kept() {
    let relay = RecordingRelay::new(|| Ok(RelayReply::rejected(500, "Failed to send email.")));
    let (outcome, notices) = run(&relay, "user@example.com", "hi");

    assert_eq!(outcome, SubmitOutcome::Delivered(Delivery::Failed));
    assert_eq!(
        notices,
        vec![("Failed to send email.".to_string(), Severity::Error)]
    );
}

#[test]
fn test_unreachable_relay_reports_unexpected_error() {
    let relay = RecordingRelay::new(|| Err(RelayError::MissingConfig("SMTP_HOST")));
    let (outcome, notices) = run(&relay, "user@example.com", "hi");

    assert_eq!(outcome, SubmitOutcome::Delivered(Delivery::Failed));
    assert_eq!(
        notices,
        vec![(UNEXPECTED_NOTICE.to_string(), Severity::Error)]
    );
}

#[test]
fn test_console_relay_enforces_length_cap_after_wrapping() {
    // 970 chars of text plus the 37-char span wrapper exceeds the cap.
    let message = "x".repeat(970);
    let (outcome, notices) = run(&ConsoleRelay, "user@example.com", &message);

    assert_eq!(outcome, SubmitOutcome::Delivered(Delivery::Failed));
    assert_eq!(
        notices[0],
        (
            "Message too long (max 1000 characters)".to_string(),
            Severity::Error
        )
    );
}
