use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

/// A single reply from the submission endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResponse {
    Success,
    Error { reason: String },
    /// The server is still working; ask again after `retry_after`
    Progress { retry_after: Duration },
    /// A status this client does not know how to handle
    Other { status: String },
}

impl ServerResponse {
    /// The raw status string, used as the result container class
    pub fn status(&self) -> &str {
        match self {
            ServerResponse::Success => "success",
            ServerResponse::Error { .. } => "error",
            ServerResponse::Progress { .. } => "progress",
            ServerResponse::Other { status } => status,
        }
    }
}

/// Wire shape of the endpoint reply: `{"status": "...", "reason": "...", "timeout": 1000}`
#[derive(Debug, Deserialize)]
struct RawResponse {
    status: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    timeout: Option<u64>,
}

impl From<RawResponse> for ServerResponse {
    fn from(raw: RawResponse) -> Self {
        match raw.status.as_str() {
            "success" => ServerResponse::Success,
            "error" => ServerResponse::Error {
                reason: raw.reason.unwrap_or_default(),
            },
            "progress" => ServerResponse::Progress {
                retry_after: Duration::from_millis(raw.timeout.unwrap_or(0)),
            },
            _ => ServerResponse::Other { status: raw.status },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected reply from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a reply body into a [`ServerResponse`]
pub fn parse_response(url: &str, body: &str) -> Result<ServerResponse, SubmitError> {
    let raw: RawResponse = serde_json::from_str(body).map_err(|source| SubmitError::Decode {
        url: url.to_string(),
        source,
    })?;

    Ok(raw.into())
}

/// HTTP side of form submission: one unauthenticated GET per poll
#[derive(Debug, Clone)]
pub struct SubmitClient {
    http: reqwest::Client,
}

impl SubmitClient {
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::ClientBuilder::new()
            .timeout(request_timeout)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http })
    }

    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch the current submission status from `url`
    #[instrument(skip(self), err)]
    pub async fn fetch_status(&self, url: &str) -> Result<ServerResponse, SubmitError> {
        let transport = |source| SubmitError::Transport {
            url: url.to_string(),
            source,
        };

        let body = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;

        let response = parse_response(url, &body)?;
        debug!(status = response.status(), "Received submission status");

        Ok(response)
    }
}
