use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::{
    cache::{SummaryCache, SummaryStore},
    chunk::chunk,
    classify::classify,
    client::{SummarizationClient, SummarizeBody},
    error::{SummaryError, SummaryResult},
    settings::Settings,
    types::{CacheKey, Summary, SummaryRequest},
};

pub const NO_TRANSCRIPT: &str = "No transcript available";
pub const NO_VIDEO_INFO: &str = "Video information not available";

/// Mediates between the presentation layer, the summary cache and the remote service.
pub struct RequestDispatcher {
    client: Arc<dyn SummarizationClient>,
    store: Box<dyn SummaryStore>,
    max_transcript_chars: usize,
}

impl RequestDispatcher {
    pub fn new(
        client: Arc<dyn SummarizationClient>,
        store: Box<dyn SummaryStore>,
        settings: &Settings,
    ) -> Self {
        Self {
            client,
            store,
            max_transcript_chars: settings.max_transcript_chars,
        }
    }

    /// Dispatcher backed by an in-memory [`SummaryCache`] sized from `settings`.
    pub fn with_memory_cache(client: Arc<dyn SummarizationClient>, settings: &Settings) -> Self {
        let cache = SummaryCache::new(settings.cache_capacity, settings.cache_ttl);
        Self::new(client, Box::new(cache), settings)
    }

    pub fn store(&self) -> &dyn SummaryStore {
        &*self.store
    }

    /// Summarize one transcript. Failures come back as [`SummaryError`] values and never
    /// touch the cache.
    pub async fn summarize(
        &mut self,
        request: SummaryRequest,
        cancel: &CancellationToken,
    ) -> SummaryResult {
        let request_id = Uuid::new_v4();
        let span = info_span!("summarize", %request_id);
        self.dispatch(request, cancel).instrument(span).await
    }

    async fn dispatch(
        &mut self,
        request: SummaryRequest,
        cancel: &CancellationToken,
    ) -> SummaryResult {
        let SummaryRequest {
            transcript,
            video_info,
            summary_type,
            language,
        } = request;

        if transcript.trim().is_empty() {
            return Err(SummaryError::validation(NO_TRANSCRIPT));
        }
        let Some(video_info) = video_info.filter(|v| !v.title.trim().is_empty()) else {
            return Err(SummaryError::validation(NO_VIDEO_INFO));
        };

        let key = CacheKey::new(&video_info.video_id, summary_type, &language);
        if let Some(summary) = self.store.get(&key) {
            info!(key = %key, "cache hit");
            return Ok(Summary {
                summary,
                cached: true,
                processing_time_ms: None,
            });
        }

        if cancel.is_cancelled() {
            return Err(SummaryError::cancelled());
        }

        let original_chars = transcript.chars().count();
        let transcript = if original_chars > self.max_transcript_chars {
            let reduced = chunk(&transcript, self.max_transcript_chars);
            warn!(
                original_chars,
                sent_chars = reduced.chars().count(),
                "transcript exceeds limit, only the first chunk is summarized"
            );
            reduced
        } else {
            transcript
        };

        let body = SummarizeBody {
            transcript,
            video_info,
            summary_type,
            language,
        };

        let started = Instant::now();
        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                info!("request cancelled while awaiting the summarization service");
                return Err(SummaryError::cancelled());
            }
            outcome = self.client.summarize(&body) => outcome,
        };
        let processing_time_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(summary) => {
                info!(key = %key, processing_time_ms, "summary generated");
                self.store.put(key, summary.clone());
                Ok(Summary {
                    summary,
                    cached: false,
                    processing_time_ms: Some(processing_time_ms),
                })
            }
            Err(e) => {
                warn!("summarization failed: {e}");
                Err(classify(&e.to_string()))
            }
        }
    }
}
