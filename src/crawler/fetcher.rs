//! HTTP fetcher for the validator.
//!
//! The engine only needs a narrow contract from HTTP: a status code, the
//! content-type header, the body for HTML pages, and a distinct signal for
//! connection-level failures.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one URL.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered. Any status code lands here, 2xx or not; a non-2xx
    /// status is a normal result, not a failure.
    Response {
        /// HTTP status code
        status: u16,
        /// Content-Type header value, empty when absent
        content_type: String,
        /// Response body; read only for 2xx `text/html` responses, empty
        /// otherwise
        body: String,
    },

    /// Connection-level failure: timeout, refused connection, DNS, TLS.
    Transport {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by one crawl run.
///
/// Certificate validation is disabled so that sites with broken TLS can
/// still be probed for dead links. Redirects follow reqwest's default
/// policy; the status the engine sees is the one at the end of the chain.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("linkscour/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs a GET and classifies the result.
///
/// The body is downloaded only when the response could be expanded (2xx and
/// `text/html`); error responses and binary assets are classified from the
/// status line and headers alone. A failure while reading the body counts
/// as a transport failure.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            let body = if (200..300).contains(&status) && content_type.starts_with("text/html") {
                match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        return FetchOutcome::Transport {
                            error: format!("body read failed: {}", e),
                        }
                    }
                }
            } else {
                String::new()
            };

            FetchOutcome::Response {
                status,
                content_type,
                body,
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            FetchOutcome::Transport { error }
        }
    }
}
