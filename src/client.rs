//! HTTP transport for AlchemyLanguage calls.
//!
//! The dispatcher talks to the network through the [`Transport`] trait so
//! tests and embedders can substitute their own. [`HttpTransport`] is the
//! default, built on a pooled `reqwest` client.

use crate::config::{Config, Credentials};
use crate::error::{AlchemyError, Result};
use crate::params::FormMap;
use reqwest::{Client, header};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Maximum number of error body bytes kept in [`AlchemyError::EndpointError`].
const MAX_ERROR_BODY: usize = 500;

/// Performs one authenticated, form-encoded POST.
pub trait Transport: Send + Sync {
    /// POST `form` to `url` and return the raw response body.
    ///
    /// Connection failures and non-success statuses are errors; the body
    /// of a successful response is returned undecoded.
    fn post(&self, url: &str, form: &FormMap) -> impl Future<Output = Result<String>> + Send;
}

/// `reqwest`-backed transport with connection pooling.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    /// Create a transport from the client configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.request.timeout)
            .user_agent(config.request.user_agent.clone())
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(AlchemyError::HttpRequest)?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &str, form: &FormMap) -> Result<String> {
        let mut request = self.client.post(url).form(form);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        trace!(url, fields = form.len(), "Sending request");

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!(url, status = status.as_u16(), bytes = body.len(), "Received response");
            Ok(body)
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(AlchemyError::EndpointError {
                status: status.as_u16(),
                body: truncate(error_body, MAX_ERROR_BODY),
            })
        }
    }
}

/// Cut `body` to at most `max` bytes on a character boundary.
fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_from_config() {
        let config = Config::new("key");
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short".to_string(), 10), "short");
        assert_eq!(truncate("a".repeat(600), 500).len(), 503);
        // 'é' is two bytes; never split it.
        assert_eq!(truncate("éé".to_string(), 3), "é...");
    }
}
