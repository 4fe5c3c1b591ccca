use super::validate::check_request;
use super::{Relay, RelayError, RelayReply, SEND_EMAIL_PATH, SendEmailRequest};

/// A relay that logs the request instead of delivering it.
///
/// Validation still runs, so a dry run rejects the same requests the SMTP
/// relay would.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRelay;

impl Relay for ConsoleRelay {
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError> {
        let body = serde_json::to_string(request)?;
        if let Err(reply) = check_request(request) {
            tracing::info!(path = SEND_EMAIL_PATH, status = reply.status, %body, "dry run rejected");
            return Ok(reply);
        }
        tracing::info!(path = SEND_EMAIL_PATH, %body, "dry run accepted");
        Ok(RelayReply::sent())
    }
}
