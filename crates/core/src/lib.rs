//! Recap Core Library
//!
//! Request dispatch and caching between a presentation layer, a page data
//! source and a remote transcript summarization service.

pub mod cache;
pub mod chunk;
pub mod classify;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod page;
pub mod settings;
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{SummaryCache, SummaryStore};
pub use client::{HttpSummarizationClient, SummarizationClient, SummarizeBody};
pub use dispatcher::RequestDispatcher;
pub use error::{ClientError, ErrorKind, PageError, SettingsError, SummaryError, SummaryResult};
pub use format::{
    Guidance, format_error_readable, format_processing_time, format_summary_readable,
};
pub use page::{PageDataSource, PageSnapshot, StaticPageSource, load_page};
pub use settings::Settings;
pub use tokio_util::sync::CancellationToken;
pub use types::{
    CacheKey, Language, SUPPORTED_LANGUAGES, Summary, SummaryRequest, SummaryType, VideoInfo,
    language_name,
};
