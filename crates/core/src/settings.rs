use std::{str::FromStr, time::Duration};

use crate::{cache, error::SettingsError};

pub const DEFAULT_API_URL: &str = "https://youtube-summarizer-api-production.up.railway.app";
pub const DEFAULT_MAX_TRANSCRIPT_CHARS: usize = 50_000;
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(5);

pub const API_URL_ENV: &str = "RECAP_API_URL";
pub const CACHE_CAPACITY_ENV: &str = "RECAP_CACHE_CAPACITY";
pub const CACHE_TTL_ENV: &str = "RECAP_CACHE_TTL_SECS";
pub const MAX_TRANSCRIPT_ENV: &str = "RECAP_MAX_TRANSCRIPT_CHARS";
pub const PAGE_TIMEOUT_ENV: &str = "RECAP_PAGE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    /// Transcripts longer than this (in characters) are chunked before sending
    pub max_transcript_chars: usize,
    pub page_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_capacity: cache::DEFAULT_CAPACITY,
            cache_ttl: cache::DEFAULT_TTL,
            max_transcript_chars: DEFAULT_MAX_TRANSCRIPT_CHARS,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup(API_URL_ENV)
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let cache_capacity = parse_positive(&lookup, CACHE_CAPACITY_ENV)?
            .unwrap_or(defaults.cache_capacity);
        let cache_ttl = parse_positive::<u64, _>(&lookup, CACHE_TTL_ENV)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let max_transcript_chars = parse_positive(&lookup, MAX_TRANSCRIPT_ENV)?
            .unwrap_or(defaults.max_transcript_chars);
        let page_timeout = parse_positive::<u64, _>(&lookup, PAGE_TIMEOUT_ENV)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.page_timeout);

        Ok(Self {
            api_url,
            cache_capacity,
            cache_ttl,
            max_transcript_chars,
            page_timeout,
        })
    }

    pub fn summarize_url(&self) -> String {
        format!("{}/api/summarize", self.api_url)
    }
}

fn parse_positive<T, F>(lookup: &F, env_var: &'static str) -> Result<Option<T>, SettingsError>
where
    T: FromStr + PartialOrd + Default,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(env_var) else {
        return Ok(None);
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(SettingsError::Invalid {
            env_var,
            value: raw,
        }),
    }
}
