//! # HTTP Transport
//!
//! Sends every request as `POST {api_url}/bot{token}/{method}` with a JSON body.
//!
//! Failed calls come back with a 4xx/5xx status *and* a JSON error envelope, so the body is
//! parsed regardless of the status code; the envelope decides success or failure. Only a body
//! that is not JSON at all is reported as a [`TransportError`].
use super::{Transport, TransportError};
use crate::config::ClientConfig;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    bot_url: String,
}

// The bot URL embeds the token and must never end up in logs.
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Builds a transport from the client configuration.
    ///
    /// The request timeout covers the configured long-poll wait, so a `getUpdates` call is
    /// never cut short by the transport.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(
            config.request_timeout_secs + u64::from(config.poll_timeout_secs),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::new)?;

        Ok(Self::with_client(client, &config.api_url, &config.token))
    }

    /// Uses an existing `reqwest` client, e.g. one shared with the rest of the application.
    pub fn with_client(client: reqwest::Client, api_url: &str, token: &str) -> Self {
        Self {
            client,
            bot_url: bot_url(api_url, token),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.bot_url, method)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, method: &str, body: Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::new(e.without_url()))?;

        let status = response.status();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.without_url()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            TransportError::new(format!(
                "'{method}' answered with HTTP {status} and a body that is not JSON: {e}"
            ))
        })
    }
}

fn bot_url(api_url: &str, token: &str) -> String {
    format!("{}/bot{}", api_url.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_api_url_and_token() {
        let transport =
            HttpTransport::with_client(reqwest::Client::new(), "https://api.example.org/", "1:x");

        assert_eq!(
            transport.endpoint("getMe"),
            "https://api.example.org/bot1:x/getMe"
        );
    }

    #[test]
    fn debug_output_hides_the_token() {
        let transport = HttpTransport::with_client(reqwest::Client::new(), "http://h", "secret");

        assert!(!format!("{transport:?}").contains("secret"));
    }
}
