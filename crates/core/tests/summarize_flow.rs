use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use recap_core::{
    CancellationToken, ClientError, ErrorKind, PageSnapshot, RequestDispatcher, Settings,
    StaticPageSource, SummarizationClient, SummarizeBody, SummaryRequest, SummaryType, VideoInfo,
    load_page,
};

struct KeyPointsService {
    calls: AtomicUsize,
}

#[async_trait]
impl SummarizationClient for KeyPointsService {
    async fn summarize(&self, body: &SummarizeBody) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(body.summary_type, SummaryType::KeyPoints);
        Ok("- point one\n- point two".to_string())
    }
}

struct OfflineService;

#[async_trait]
impl SummarizationClient for OfflineService {
    async fn summarize(&self, _body: &SummarizeBody) -> Result<String, ClientError> {
        Err(ClientError::Rejected("failed to fetch".to_string()))
    }
}

fn page() -> PageSnapshot {
    PageSnapshot {
        video_info: VideoInfo {
            video_id: "abc123".into(),
            title: "T".into(),
            channel: None,
            url: "https://www.youtube.com/watch?v=abc123".into(),
        },
        transcript: Some("Hello there. This is a test.".into()),
        duration: None,
    }
}

#[tokio::test]
async fn page_to_summary_and_back_from_cache() {
    let service = Arc::new(KeyPointsService {
        calls: AtomicUsize::new(0),
    });
    let mut dispatcher = RequestDispatcher::with_memory_cache(service.clone(), &Settings::default());
    let cancel = CancellationToken::new();

    let source = StaticPageSource::new(page());
    let snapshot = load_page(&source, Duration::from_secs(5), &cancel)
        .await
        .unwrap();

    let request = SummaryRequest::new(snapshot.transcript.unwrap(), snapshot.video_info)
        .with_summary_type(SummaryType::KeyPoints)
        .with_language("en");

    let first = dispatcher.summarize(request.clone(), &cancel).await.unwrap();
    assert_eq!(first.summary, "- point one\n- point two");
    assert!(!first.cached);
    assert!(first.processing_time_ms.is_some());

    let second = dispatcher.summarize(request, &cancel).await.unwrap();
    assert_eq!(second.summary, first.summary);
    assert!(second.cached);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn offline_service_is_reported_as_connectivity() {
    let mut dispatcher =
        RequestDispatcher::with_memory_cache(Arc::new(OfflineService), &Settings::default());

    let request = SummaryRequest::new("Hello there.", page().video_info);
    let err = dispatcher
        .summarize(request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Connectivity);
    assert!(err.message.contains("check your internet connection"));
    assert!(dispatcher.store().is_empty());
}

#[tokio::test]
async fn result_serializes_to_extension_message_shape() {
    let service = Arc::new(KeyPointsService {
        calls: AtomicUsize::new(0),
    });
    let mut dispatcher = RequestDispatcher::with_memory_cache(service, &Settings::default());
    let request = SummaryRequest::new("Hello there.", page().video_info)
        .with_summary_type(SummaryType::KeyPoints);

    let summary = dispatcher
        .summarize(request, &CancellationToken::new())
        .await
        .unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["summary"], "- point one\n- point two");
    assert_eq!(value["cached"], false);
    assert!(value["processingTime"].is_u64());
}
