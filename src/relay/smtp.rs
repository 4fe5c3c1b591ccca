use std::time::Duration;

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::validate::check_request;
use super::{Relay, RelayError, RelayReply, SendEmailRequest};

const DEFAULT_PORT: u16 = 587;
const SENDER_NAME: &str = "Email Service";
const SUBJECT: &str = "Email Sender sent a message";
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// SMTP connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl SmtpConfig {
    /// Read `SMTP_HOST`, `SMTP_PORT` (default 587), `SMTP_USER` and
    /// `SMTP_PASS` through `lookup`, usually the environment.
    ///
    /// # Errors
    /// Returns an error if a required key is missing or the port is not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let host = lookup("SMTP_HOST").ok_or(RelayError::MissingConfig("SMTP_HOST"))?;
        let port = match lookup("SMTP_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| RelayError::InvalidConfig {
                key: "SMTP_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let user = lookup("SMTP_USER").ok_or(RelayError::MissingConfig("SMTP_USER"))?;
        let pass = lookup("SMTP_PASS").ok_or(RelayError::MissingConfig("SMTP_PASS"))?;
        Ok(Self {
            host,
            port,
            user,
            pass,
        })
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Delivers requests through an SMTP server with STARTTLS.
pub struct SmtpRelay {
    config: SmtpConfig,
    transport: SmtpTransport,
}

impl SmtpRelay {
    /// # Errors
    /// Returns an error if the STARTTLS transport cannot be set up for the host.
    pub fn new(config: SmtpConfig) -> Result<Self, RelayError> {
        let transport = SmtpTransport::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .timeout(Some(SEND_TIMEOUT))
            .build();
        Ok(Self { config, transport })
    }

    /// Build the outgoing message for a validated request.
    ///
    /// # Errors
    /// Returns an error if either address fails to parse or the message cannot be built.
    pub fn compose(&self, request: &SendEmailRequest) -> Result<Message, RelayError> {
        compose(&self.config.user, request)
    }
}

impl std::fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn compose(sender: &str, request: &SendEmailRequest) -> Result<Message, RelayError> {
    let from = Mailbox::new(Some(SENDER_NAME.to_string()), sender.parse()?);
    let to: Mailbox = request.email.parse()?;
    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(SUBJECT)
        .multipart(MultiPart::alternative_plain_html(
            request.message.clone(),
            html_body(&request.message),
        ))?;
    Ok(message)
}

/// The HTML part: the message in a paragraph with newlines as `<br>`.
pub fn html_body(message: &str) -> String {
    format!("<p>{}</p>", message.replace('\n', "<br>"))
}

impl Relay for SmtpRelay {
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError> {
        if let Err(reply) = check_request(request) {
            tracing::info!(status = reply.status, error = ?reply.body.error, "relay rejected request");
            return Ok(reply);
        }

        let outcome = self
            .compose(request)
            .and_then(|message| self.transport.send(&message).map_err(RelayError::from));
        match outcome {
            Ok(_) => {
                tracing::info!(to = %request.email, "email sent");
                Ok(RelayReply::sent())
            }
            Err(err) => {
                tracing::error!(error = %err, "email send error");
                Ok(RelayReply::rejected(500, "Failed to send email."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults_port() {
        let cfg = SmtpConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "me@example.com"),
            ("SMTP_PASS", "secret"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 587);
        assert_eq!(cfg.host, "smtp.example.com");
    }

    #[test]
    fn test_config_missing_host() {
        let err = SmtpConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, RelayError::MissingConfig("SMTP_HOST")));
    }

    #[test]
    fn test_config_bad_port() {
        let err = SmtpConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "h"),
            ("SMTP_PORT", "smtp"),
            ("SMTP_USER", "u"),
            ("SMTP_PASS", "p"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidConfig { key: "SMTP_PORT", .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let cfg = SmtpConfig {
            host: "h".to_string(),
            port: 25,
            user: "u".to_string(),
            pass: "hunter2".to_string(),
        };
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }

    #[test]
    fn test_html_body_converts_newlines() {
        assert_eq!(html_body("a\nb"), "<p>a<br>b</p>");
    }

    #[test]
    fn test_compose_sets_headers_and_parts() {
        let request = SendEmailRequest {
            email: "user@example.com".to_string(),
            message: "line one\nline two".to_string(),
        };
        let message = compose("sender@example.com", &request).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Email Sender sent a message"));
        assert!(raw.contains("user@example.com"));
        assert!(raw.contains("Email Service"));
        assert!(raw.contains("<sender@example.com>"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_compose_rejects_bad_recipient() {
        let request = SendEmailRequest {
            email: "not an address".to_string(),
            message: "x".to_string(),
        };
        assert!(matches!(
            compose("sender@example.com", &request),
            Err(RelayError::Address(_))
        ));
    }
}
