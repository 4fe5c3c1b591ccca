//! Relaying a submitted message to an SMTP provider.
//!
//! The wire format is the JSON body of `POST /send-email`:
//! `{ "email": ..., "message": ... }` in, `{ "success": true }` or
//! `{ "success": false, "error": ... }` with a non-2xx status out.
//!
//! Backends:
//! - [`HttpRelay`]: posts the request to a relay service over HTTP
//! - [`SmtpRelay`]: validates and delivers through lettre
//! - [`ConsoleRelay`]: validates and logs the request (dry run)

mod console;
mod http;
mod smtp;
mod validate;

pub use console::ConsoleRelay;
pub use http::HttpRelay;
pub use smtp::{SmtpConfig, SmtpRelay, html_body};
pub use validate::{MAX_MESSAGE_CHARS, check_request, is_valid_email, message_length};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint path the request body is addressed to.
pub const SEND_EMAIL_PATH: &str = "/send-email";

/// Request body accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub email: String,
    pub message: String,
}

/// Response body returned by the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    // Rejections from the service carry only `error`.
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status code plus body, as a relay answers a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub status: u16,
    pub body: RelayResponse,
}

impl RelayReply {
    pub fn sent() -> Self {
        Self {
            status: 200,
            body: RelayResponse {
                success: true,
                message: Some("Email sent successfully.".to_string()),
                error: None,
            },
        }
    }

    pub fn rejected(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: RelayResponse {
                success: false,
                message: None,
                error: Some(error.into()),
            },
        }
    }

    pub const fn is_success_status(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// A 2xx status and a body that says so.
    pub const fn delivered(&self) -> bool {
        self.is_success_status() && self.body.success
    }
}

/// Failures reaching or configuring the relay.
///
/// A relay that answers with an error body is not a `RelayError`; that is a
/// [`RelayReply`] with a non-2xx status.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing required config: {0}")]
    MissingConfig(&'static str),

    #[error("invalid config value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything that can carry a [`SendEmailRequest`] to a mail provider.
pub trait Relay {
    /// Send one request and return the relay's answer.
    ///
    /// # Errors
    /// Returns an error when the relay cannot be reached at all.
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError>;
}

impl<R: Relay + ?Sized> Relay for Box<R> {
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError> {
        (**self).send(request)
    }
}
