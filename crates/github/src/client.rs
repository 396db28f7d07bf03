//! `repository_dispatch` client.

use async_trait::async_trait;
use notification::{DispatchError, DispatchRequest, DispatchResponse, Dispatcher};
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::DispatchConfig;

/// Media type requested from the GitHub REST API.
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("pipeline-relay/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client could not be initialised: {0}")]
    Init(#[from] reqwest::Error),
}

/// Sends dispatch requests to the configured endpoint.
///
/// One POST per call, no retries, and no timeout beyond the `reqwest`
/// defaults. The response status is logged but not interpreted.
#[derive(Debug, Clone)]
pub struct RepositoryDispatchClient {
    http: reqwest::Client,
    config: DispatchConfig,
}

impl RepositoryDispatchClient {
    pub fn new(config: DispatchConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, config))
    }

    /// Creates a client around an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client, config: DispatchConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    fn request_error(&self, err: reqwest::Error) -> DispatchError {
        let url = self.config.url.clone();
        let message = error_chain(&err);
        if err.is_builder() {
            DispatchError::InvalidRequest { url, message }
        } else {
            DispatchError::Transport { url, message }
        }
    }
}

#[async_trait]
impl Dispatcher for RepositoryDispatchClient {
    #[instrument(name = "dispatch", skip_all, fields(event_type = %request.event_type))]
    async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResponse, DispatchError> {
        info!(
            url = %self.config.url,
            body = %serde_json::to_string(request).unwrap_or_default(),
            "Posting dispatch request"
        );

        let response = self
            .http
            .post(&self.config.url)
            .header(ACCEPT, GITHUB_V3_ACCEPT)
            .bearer_auth(self.config.token.expose())
            .json(request)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| self.request_error(err))?;

        let response = DispatchResponse {
            status: status.as_u16(),
            body,
        };
        if response.is_success() {
            info!(status = response.status, body = %response.body, "Dispatch endpoint responded");
        } else {
            warn!(status = response.status, body = %response.body, "Dispatch endpoint responded with non-success status");
        }
        Ok(response)
    }
}

/// Renders an error together with its source chain.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BearerToken;

    #[test]
    fn user_agent_names_the_relay() {
        assert!(USER_AGENT.starts_with("pipeline-relay/"));
    }

    #[test]
    fn client_keeps_config() {
        let config = DispatchConfig::new("https://example.test/dispatches", BearerToken::new("t"));
        let client = RepositoryDispatchClient::new(config.clone()).unwrap();

        assert_eq!(client.config(), &config);
    }

    #[tokio::test]
    async fn malformed_url_is_invalid_request() {
        let config = DispatchConfig::new("not a url", BearerToken::new("t"));
        let client = RepositoryDispatchClient::new(config).unwrap();

        let err = client.dispatch(&DispatchRequest::e2e()).await.unwrap_err();

        assert!(matches!(err, DispatchError::InvalidRequest { ref url, .. } if url == "not a url"));
    }
}
