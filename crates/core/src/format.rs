use crate::{
    error::{ErrorKind, SummaryError},
    page::PageSnapshot,
    types::{Summary, SummaryType},
};

/// Format a processing time as whole seconds, e.g. `12s`
pub fn format_processing_time(ms: u64) -> String {
    format!("{}s", (ms as f64 / 1000.0).round() as u64)
}

/// Title line for a video: `Title · Channel · 12:34`
pub fn format_video_line(page: &PageSnapshot) -> String {
    let info = &page.video_info;
    let mut line = info.title.clone();
    line.push_str(" · ");
    line.push_str(info.channel.as_deref().unwrap_or("Unknown Channel"));
    if let Some(duration) = &page.duration {
        line.push_str(" · ");
        line.push_str(duration);
    }
    line
}

/// Format a summary as human-readable markdown
pub fn format_summary_readable(summary_type: SummaryType, summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}", summary_type.heading()));
    if summary.cached {
        output.push_str(" (cached)");
    }
    if let Some(ms) = summary.processing_time_ms.filter(|ms| *ms > 0) {
        output.push_str(&format!(" [{}]", format_processing_time(ms)));
    }
    output.push_str("\n\n");

    output.push_str(summary.summary.trim_end());
    output.push('\n');

    output
}

pub const MIN_TRANSCRIPT_CHARS: usize = 50;
pub const NO_CAPTIONS: &str =
    "Could not extract transcript. Make sure the video has captions available.";
pub const TRANSCRIPT_TOO_SHORT: &str =
    "Video transcript too short to summarize. Try a longer video with more speech content.";

/// What to tell the user when a request fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub title: &'static str,
    /// Replaces the raw error message when set
    pub message: Option<&'static str>,
    pub actions: &'static [&'static str],
}

/// Guidance for specific failure messages, checked before the per-kind fallback.
static MESSAGE_GUIDANCE: &[(&str, Guidance)] = &[
    (
        crate::dispatcher::NO_TRANSCRIPT,
        Guidance {
            title: "No Captions Found",
            message: Some("This video doesn't have captions available."),
            actions: &["Try a different video", "Check if captions are enabled"],
        },
    ),
    (
        "Could not extract transcript",
        Guidance {
            title: "Transcript Extraction Failed",
            message: Some("Unable to access video captions."),
            actions: &[
                "Refresh the page",
                "Check if video is public",
                "Try again in a moment",
            ],
        },
    ),
    (
        NO_CAPTIONS,
        Guidance {
            title: "No Transcript Available",
            message: Some("This video has no captions or subtitles."),
            actions: &[
                "Try videos with auto-generated captions",
                "Look for videos with CC (closed captions)",
                "Educational/talk videos usually work best",
            ],
        },
    ),
    (
        TRANSCRIPT_TOO_SHORT,
        Guidance {
            title: "Video Too Short",
            message: Some("This video has very little spoken content."),
            actions: &[
                "Try videos longer than 2-3 minutes",
                "Choose videos with continuous speech",
                "Avoid music videos or silent content",
            ],
        },
    ),
    (
        "Failed to generate summary. Please try again.",
        Guidance {
            title: "Generation Failed",
            message: Some("This video cannot be summarized."),
            actions: &[
                "Check if video has captions/subtitles",
                "Try a different video with speech content",
                "Avoid music videos or very short clips",
            ],
        },
    ),
];

const GENERIC_GUIDANCE: Guidance = Guidance {
    title: "Error",
    message: None,
    actions: &["Try again", "Refresh the page"],
};

impl ErrorKind {
    pub fn guidance(&self) -> Guidance {
        match self {
            ErrorKind::Validation | ErrorKind::Unknown => GENERIC_GUIDANCE,
            ErrorKind::Connectivity => Guidance {
                title: "Connection Error",
                message: None,
                actions: &["Check your internet connection", "Try again in a moment"],
            },
            ErrorKind::RateLimited => Guidance {
                title: "High Traffic",
                message: Some("Our servers are experiencing high demand."),
                actions: &["Wait 30 seconds and try again", "Try during off-peak hours"],
            },
            ErrorKind::ServiceUnavailable => Guidance {
                title: "Server Temporarily Down",
                message: Some("The summarization service is temporarily unavailable."),
                actions: &[
                    "Wait a few minutes and try again",
                    "Check your internet connection",
                ],
            },
            ErrorKind::QuotaExceeded => Guidance {
                title: "Quota Exceeded",
                message: None,
                actions: &["Wait until the quota resets", "Try again later today"],
            },
            ErrorKind::Cancelled => Guidance {
                title: "Cancelled",
                message: None,
                actions: &["Run the command again to retry"],
            },
        }
    }
}

impl SummaryError {
    /// Exact-message guidance first, then the guidance for the error kind
    pub fn guidance(&self) -> Guidance {
        MESSAGE_GUIDANCE
            .iter()
            .find(|(message, _)| *message == self.message)
            .map(|(_, guidance)| guidance.clone())
            .unwrap_or_else(|| self.kind.guidance())
    }
}

/// Format a failed request with its guidance as markdown
pub fn format_error_readable(error: &SummaryError) -> String {
    let guidance = error.guidance();
    let mut output = String::new();

    output.push_str(&format!("## {}\n\n", guidance.title));
    output.push_str(&format!(
        "{}\n\n",
        guidance.message.unwrap_or(&error.message)
    ));
    output.push_str("Try these solutions:\n");
    for action in guidance.actions {
        output.push_str(&format!("• {}\n", action));
    }

    output
}
