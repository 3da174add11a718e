//! Page data source seam.
//!
//! Extraction from the live page (selectors, caption tracks) lives outside
//! this crate; here we only define the contract and the timed,
//! cancellable round trip the presentation layer uses.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{error::PageError, types::VideoInfo};

#[async_trait]
pub trait PageDataSource: Send + Sync {
    async fn video_info(&self) -> Result<VideoInfo, PageError>;

    /// `None` when the video has no captions.
    async fn transcript(&self) -> Result<Option<String>, PageError>;

    /// Display string such as `"12:34"`.
    async fn duration(&self) -> Result<Option<String>, PageError> {
        Ok(None)
    }
}

/// One immutable extraction of a page. A new video means a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub video_info: VideoInfo,
    pub transcript: Option<String>,
    pub duration: Option<String>,
}

/// Source over data that was already extracted.
#[derive(Debug, Clone)]
pub struct StaticPageSource {
    snapshot: PageSnapshot,
}

impl StaticPageSource {
    pub fn new(snapshot: PageSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl PageDataSource for StaticPageSource {
    async fn video_info(&self) -> Result<VideoInfo, PageError> {
        if self.snapshot.video_info.video_id.is_empty() {
            return Err(PageError::NoVideo);
        }
        Ok(self.snapshot.video_info.clone())
    }

    async fn transcript(&self) -> Result<Option<String>, PageError> {
        Ok(self.snapshot.transcript.clone())
    }

    async fn duration(&self) -> Result<Option<String>, PageError> {
        Ok(self.snapshot.duration.clone())
    }
}

/// Fetch video info (bounded by `info_timeout`), then transcript and duration.
///
/// Every step races `cancel`. A failing duration lookup is not fatal.
pub async fn load_page(
    source: &dyn PageDataSource,
    info_timeout: Duration,
    cancel: &CancellationToken,
) -> Result<PageSnapshot, PageError> {
    let video_info = tokio::select! {
        _ = cancel.cancelled() => return Err(PageError::Cancelled),
        info = tokio::time::timeout(info_timeout, source.video_info()) => {
            info.map_err(|_| PageError::Timeout)??
        }
    };
    debug!(video_id = %video_info.video_id, title = %video_info.title, "loaded video info");

    let transcript = tokio::select! {
        _ = cancel.cancelled() => return Err(PageError::Cancelled),
        transcript = source.transcript() => transcript?,
    };

    let duration = tokio::select! {
        _ = cancel.cancelled() => return Err(PageError::Cancelled),
        duration = source.duration() => duration.unwrap_or_else(|e| {
            warn!("could not read video duration: {e}");
            None
        }),
    };

    Ok(PageSnapshot {
        video_info,
        transcript,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PageSnapshot {
        PageSnapshot {
            video_info: VideoInfo {
                video_id: "abc123".into(),
                title: "T".into(),
                channel: Some("Channel".into()),
                url: "https://www.youtube.com/watch?v=abc123".into(),
            },
            transcript: Some("Hello there. This is a test.".into()),
            duration: Some("1:02".into()),
        }
    }

    struct StalledSource;

    #[async_trait]
    impl PageDataSource for StalledSource {
        async fn video_info(&self) -> Result<VideoInfo, PageError> {
            std::future::pending().await
        }

        async fn transcript(&self) -> Result<Option<String>, PageError> {
            Ok(None)
        }
    }

    struct BrokenDuration;

    #[async_trait]
    impl PageDataSource for BrokenDuration {
        async fn video_info(&self) -> Result<VideoInfo, PageError> {
            Ok(snapshot().video_info)
        }

        async fn transcript(&self) -> Result<Option<String>, PageError> {
            Ok(None)
        }

        async fn duration(&self) -> Result<Option<String>, PageError> {
            Err(PageError::Unavailable {
                reason: "player not ready".into(),
            })
        }
    }

    #[tokio::test]
    async fn static_source_round_trips_snapshot() {
        let source = StaticPageSource::new(snapshot());
        let page = load_page(&source, Duration::from_secs(5), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(page, snapshot());
    }

    #[tokio::test]
    async fn missing_video_id_is_no_video() {
        let mut snap = snapshot();
        snap.video_info.video_id.clear();
        let source = StaticPageSource::new(snap);
        let err = load_page(&source, Duration::from_secs(5), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, PageError::NoVideo);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_video_info_times_out() {
        let err = load_page(&StalledSource, Duration::from_secs(5), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, PageError::Timeout);
        assert!(err.to_string().starts_with("Page is still loading"));
    }

    #[tokio::test]
    async fn cancelled_token_stops_page_load() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = load_page(&StalledSource, Duration::from_secs(5), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, PageError::Cancelled);
    }

    #[tokio::test]
    async fn duration_failure_is_not_fatal() {
        let page = load_page(&BrokenDuration, Duration::from_secs(5), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(page.duration, None);
        assert_eq!(page.video_info.video_id, "abc123");
    }
}
