use std::time::Duration;

use reqwest::blocking::Client;

use super::{Relay, RelayError, RelayReply, RelayResponse, SEND_EMAIL_PATH, SendEmailRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Posts requests as JSON to a relay service's `/send-email` endpoint.
///
/// Validation is left to the service; its status and body are passed back
/// unchanged.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    endpoint: String,
    client: Client,
}

impl HttpRelay {
    /// Create a relay for the service at `base_url`, e.g. `http://localhost:4000`.
    ///
    /// A URL that already ends in `/send-email` is used as is.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            endpoint: endpoint_for(base_url),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.ends_with(SEND_EMAIL_PATH) {
        base.to_string()
    } else {
        format!("{base}{SEND_EMAIL_PATH}")
    }
}

impl Relay for HttpRelay {
    fn send(&self, request: &SendEmailRequest) -> Result<RelayReply, RelayError> {
        let response = self.client.post(&self.endpoint).json(request).send()?;
        let status = response.status().as_u16();
        // A body that is not JSON is a broken relay, not a refusal.
        let body: RelayResponse = response.json()?;
        tracing::info!(endpoint = %self.endpoint, status, success = body.success, "relay answered");
        Ok(RelayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Answer one request on a local port; the handle yields the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" {
                    break;
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            head + &String::from_utf8(request_body).unwrap()
        });
        (base, handle)
    }

    fn request() -> SendEmailRequest {
        SendEmailRequest {
            email: "user@example.com".to_string(),
            message: "<span style=\"font-size: 14px\">hi</span>".to_string(),
        }
    }

    #[test]
    fn test_endpoint_appends_path_once() {
        assert_eq!(
            endpoint_for("http://localhost:4000/"),
            "http://localhost:4000/send-email"
        );
        assert_eq!(
            endpoint_for("http://relay.example/send-email"),
            "http://relay.example/send-email"
        );
    }

    #[test]
    fn test_posts_json_and_reads_success() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"success":true,"message":"Email sent successfully."}"#,
        );
        let reply = HttpRelay::new(&base).unwrap().send(&request()).unwrap();
        assert!(reply.delivered());

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /send-email HTTP/1.1"));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(raw.ends_with(&serde_json::to_string(&request()).unwrap()));
    }

    #[test]
    fn test_error_status_keeps_server_text() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"error":"Invalid email format."}"#,
        );
        let reply = HttpRelay::new(&base).unwrap().send(&request()).unwrap();
        server.join().unwrap();

        assert_eq!(reply.status, 400);
        assert!(!reply.delivered());
        assert_eq!(reply.body.error.as_deref(), Some("Invalid email format."));
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        let (base, server) = serve_once("502 Bad Gateway", "<html>upstream down</html>");
        let result = HttpRelay::new(&base).unwrap().send(&request());
        server.join().unwrap();
        assert!(matches!(result, Err(RelayError::Http(_))));
    }

    #[test]
    fn test_unreachable_service_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let result = HttpRelay::new(&base).unwrap().send(&request());
        assert!(matches!(result, Err(RelayError::Http(_))));
    }
}
