use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";

/// A summary language offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Español (Spanish)" },
    Language { code: "fr", name: "Français (French)" },
    Language { code: "de", name: "Deutsch (German)" },
    Language { code: "pt", name: "Português (Portuguese)" },
    Language { code: "ru", name: "Русский (Russian)" },
    Language { code: "ja", name: "日本語 (Japanese)" },
    Language { code: "ko", name: "한국어 (Korean)" },
    Language { code: "zh", name: "中文 (Chinese)" },
    Language { code: "hi", name: "हिंदी (Hindi)" },
    Language { code: "ar", name: "العربية (Arabic)" },
    Language { code: "it", name: "Italiano (Italian)" },
    Language { code: "nl", name: "Nederlands (Dutch)" },
    Language { code: "tr", name: "Türkçe (Turkish)" },
    Language { code: "vi", name: "Tiếng Việt (Vietnamese)" },
];

/// Display name for a supported language code
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|language| language.code == code)
        .map(|language| language.name)
}

/// Metadata scraped from the watch page for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub channel: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    #[default]
    Detailed,
    KeyPoints,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Detailed => "detailed",
            SummaryType::KeyPoints => "key-points",
        }
    }

    /// Header shown above a rendered summary
    pub fn heading(&self) -> &'static str {
        match self {
            SummaryType::Detailed => "Video Summary",
            SummaryType::KeyPoints => "Key Points",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub transcript: String,
    pub video_info: Option<VideoInfo>,
    pub summary_type: SummaryType,
    pub language: String,
}

impl SummaryRequest {
    pub fn new(transcript: impl Into<String>, video_info: VideoInfo) -> Self {
        Self {
            transcript: transcript.into(),
            video_info: Some(video_info),
            summary_type: SummaryType::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_summary_type(mut self, summary_type: SummaryType) -> Self {
        self.summary_type = summary_type;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Fingerprint of a request: `(video_id, summary_type, language)`.
///
/// The transcript never participates, it is assumed stable per video.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(video_id: &str, summary_type: SummaryType, language: &str) -> Self {
        Self(format!("{}_{}_{}", video_id, summary_type, language))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful outcome of a summarize call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub summary: String,
    pub cached: bool,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_type_uses_extension_wire_names() {
        assert_eq!(
            serde_json::to_string(&SummaryType::KeyPoints).unwrap(),
            "\"key-points\""
        );
        let parsed: SummaryType = serde_json::from_str("\"detailed\"").unwrap();
        assert_eq!(parsed, SummaryType::Detailed);
    }

    #[test]
    fn language_list_covers_offered_languages() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 15);
        assert_eq!(SUPPORTED_LANGUAGES[0].code, DEFAULT_LANGUAGE);
        assert_eq!(language_name("de"), Some("Deutsch (German)"));
        assert_eq!(language_name("uk"), None);
    }

    #[test]
    fn cache_key_ignores_transcript_and_separates_fields() {
        let a = CacheKey::new("abc123", SummaryType::KeyPoints, "en");
        let b = CacheKey::new("abc123", SummaryType::KeyPoints, "en");
        let c = CacheKey::new("abc123", SummaryType::Detailed, "en");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "abc123_key-points_en");
    }

    #[test]
    fn video_info_serializes_camel_case() {
        let info = VideoInfo {
            video_id: "abc123".into(),
            title: "T".into(),
            channel: None,
            url: "https://www.youtube.com/watch?v=abc123".into(),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["videoId"], "abc123");
        assert!(value["channel"].is_null());
    }

    #[test]
    fn request_defaults_to_detailed_english() {
        let info = VideoInfo {
            video_id: "x".into(),
            title: "T".into(),
            channel: None,
            url: String::new(),
        };
        let req = SummaryRequest::new("Hello.", info);
        assert_eq!(req.summary_type, SummaryType::Detailed);
        assert_eq!(req.language, "en");
    }
}
