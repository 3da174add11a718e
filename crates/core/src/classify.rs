//! Maps a raw failure message onto an [`ErrorKind`] and a user-facing message.
//!
//! Rules are plain case-sensitive substring checks evaluated in order; the
//! first match wins.

use crate::error::{ErrorKind, SummaryError};

pub const GENERIC_FAILURE: &str = "Failed to generate summary";

pub struct Rule {
    pub pattern: &'static str,
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl Rule {
    pub fn matches(&self, raw: &str) -> bool {
        raw.contains(self.pattern)
    }
}

pub static RULES: &[Rule] = &[
    Rule {
        pattern: "fetch",
        kind: ErrorKind::Connectivity,
        message: "Unable to connect to summarization service. Please check your internet connection.",
    },
    Rule {
        pattern: "429",
        kind: ErrorKind::RateLimited,
        message: "Service is busy. Please try again in a moment.",
    },
    Rule {
        pattern: "500",
        kind: ErrorKind::ServiceUnavailable,
        message: "Service temporarily unavailable. Please try again later.",
    },
    Rule {
        pattern: "quota",
        kind: ErrorKind::QuotaExceeded,
        message: "Service quota exceeded. Please wait for the quota to reset and try again.",
    },
];

pub fn classify(raw: &str) -> SummaryError {
    classify_with(RULES, raw)
}

pub fn classify_with(rules: &[Rule], raw: &str) -> SummaryError {
    if let Some(rule) = rules.iter().find(|rule| rule.matches(raw)) {
        return SummaryError::new(rule.kind, rule.message);
    }

    if raw.is_empty() {
        SummaryError::new(ErrorKind::Unknown, GENERIC_FAILURE)
    } else {
        SummaryError::new(ErrorKind::Unknown, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_is_connectivity() {
        assert_eq!(classify("failed to fetch").kind, ErrorKind::Connectivity);
    }

    #[test]
    fn rate_limit_message_is_rate_limited() {
        let err = classify("Rate limit exceeded (429)");
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.message, "Service is busy. Please try again in a moment.");
    }

    #[test]
    fn server_error_is_service_unavailable() {
        let err = classify("HTTP 500: Internal Server Error");
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn quota_message_is_quota_exceeded() {
        assert_eq!(classify("quota exhausted").kind, ErrorKind::QuotaExceeded);
    }

    #[test]
    fn first_matching_rule_wins() {
        // both "fetch" and "429" present; "fetch" is earlier in the table
        assert_eq!(
            classify("could not fetch: 429").kind,
            ErrorKind::Connectivity
        );
        assert_eq!(classify("429 quota").kind, ErrorKind::RateLimited);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let err = classify("Quota exhausted");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, "Quota exhausted");
    }

    #[test]
    fn unmatched_message_passes_through() {
        let err = classify("HTTP 502: Bad Gateway");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn empty_message_gets_generic_fallback() {
        let err = classify("");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, GENERIC_FAILURE);
    }

    #[test]
    fn custom_table_is_respected() {
        let rules = [Rule {
            pattern: "teapot",
            kind: ErrorKind::ServiceUnavailable,
            message: "brewing",
        }];
        assert_eq!(
            classify_with(&rules, "I'm a teapot").kind,
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(classify_with(&rules, "fetch").kind, ErrorKind::Unknown);
    }
}
