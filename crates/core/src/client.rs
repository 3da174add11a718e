//! Remote summarization service client.
//! Single `POST /api/summarize`, no retries, no request timeout.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    classify::GENERIC_FAILURE,
    error::ClientError,
    settings::Settings,
    types::{SummaryType, VideoInfo},
};

/// JSON body sent to the summarization service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeBody {
    pub transcript: String,
    pub video_info: VideoInfo,
    pub summary_type: SummaryType,
    pub language: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    success: bool,
    summary: Option<String>,
    error: Option<String>,
}

#[async_trait]
pub trait SummarizationClient: Send + Sync {
    async fn summarize(&self, body: &SummarizeBody) -> Result<String, ClientError>;
}

pub struct HttpSummarizationClient {
    http: reqwest::Client,
    url: String,
}

impl HttpSummarizationClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(http: reqwest::Client, settings: &Settings) -> Self {
        Self {
            http,
            url: settings.summarize_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SummarizationClient for HttpSummarizationClient {
    async fn summarize(&self, body: &SummarizeBody) -> Result<String, ClientError> {
        let transport = |source| ClientError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        debug!(status = status.as_u16(), bytes = text.len(), "summarize response");

        interpret_response(status, &text)
    }
}

/// Turn a raw status + body into a summary or a rejection message.
///
/// Non-2xx: body `error` if the body carries one, else `HTTP <status>: <reason>`.
/// 2xx with `success: false`: body `error`, else the generic failure message.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, ClientError> {
    if !status.is_success() {
        let message = serde_json::from_str::<SummarizeResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });
        return Err(ClientError::Rejected(message));
    }

    let parsed: SummarizeResponse = serde_json::from_str(body)?;
    match parsed {
        SummarizeResponse {
            success: true,
            summary: Some(summary),
            ..
        } => Ok(summary),
        SummarizeResponse { error, .. } => Err(ClientError::Rejected(
            error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        )),
    }
}
