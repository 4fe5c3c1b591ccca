use std::sync::LazyLock;

use regex::Regex;

use super::{RelayReply, SendEmailRequest};

/// Longest message body the relay accepts, in [`message_length`] units.
pub const MAX_MESSAGE_CHARS: usize = 1000;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern is valid"));

/// Loose `local@domain.tld` shape check shared by the form and the relay.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Length of a message as the relay service measures it: UTF-16 code units,
/// so a char outside the Basic Multilingual Plane counts twice.
pub fn message_length(message: &str) -> usize {
    message.encode_utf16().count()
}

/// Relay-side validation. Returns the 400 reply to send back on failure.
///
/// # Errors
/// Returns a rejection reply when a field is missing, the address is
/// malformed, or the message is over [`MAX_MESSAGE_CHARS`].
pub fn check_request(request: &SendEmailRequest) -> Result<(), RelayReply> {
    if request.email.is_empty() || request.message.is_empty() {
        return Err(RelayReply::rejected(400, "Email and message are required."));
    }
    if !is_valid_email(&request.email) {
        return Err(RelayReply::rejected(400, "Invalid email format."));
    }
    if message_length(&request.message) > MAX_MESSAGE_CHARS {
        return Err(RelayReply::rejected(
            400,
            format!("Message too long (max {MAX_MESSAGE_CHARS} characters)"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, message: &str) -> SendEmailRequest {
        SendEmailRequest {
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("no@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("sp ace@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let reply = check_request(&request("", "hi")).unwrap_err();
        assert_eq!(reply.status, 400);
        assert_eq!(
            reply.body.error.as_deref(),
            Some("Email and message are required.")
        );
    }

    #[test]
    fn test_bad_format_rejected() {
        let reply = check_request(&request("bad", "hi")).unwrap_err();
        assert_eq!(reply.body.error.as_deref(), Some("Invalid email format."));
    }

    #[test]
    fn test_length_cap_counts_utf16_units() {
        let at_cap = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(check_request(&request("a@b.co", &at_cap)).is_ok());

        let over = "x".repeat(MAX_MESSAGE_CHARS + 1);
        let reply = check_request(&request("a@b.co", &over)).unwrap_err();
        assert_eq!(
            reply.body.error.as_deref(),
            Some("Message too long (max 1000 characters)")
        );

        // Emoji take two units each, so 501 of them are over the cap.
        let emoji = "😀".repeat(501);
        assert_eq!(message_length(&emoji), 1002);
        assert!(check_request(&request("a@b.co", &emoji)).is_err());
        assert!(check_request(&request("a@b.co", &"😀".repeat(500))).is_ok());
    }
}
