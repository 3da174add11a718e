use std::{
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{
    Parser, ValueEnum,
    builder::{PossibleValue, PossibleValuesParser},
};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use recap_core::{
    CancellationToken, HttpSummarizationClient, PageError, PageSnapshot, RequestDispatcher,
    SUPPORTED_LANGUAGES, Settings, StaticPageSource, SummaryError, SummaryRequest, SummaryResult,
    SummaryType, VideoInfo,
    format::{MIN_TRANSCRIPT_CHARS, NO_CAPTIONS, TRANSCRIPT_TOO_SHORT, format_video_line},
    format_error_readable, format_summary_readable, load_page,
    types::DEFAULT_LANGUAGE,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for SummaryType (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliSummaryType {
    #[default]
    Detailed,
    KeyPoints,
}

impl From<CliSummaryType> for SummaryType {
    fn from(cli: CliSummaryType) -> Self {
        match cli {
            CliSummaryType::Detailed => SummaryType::Detailed,
            CliSummaryType::KeyPoints => SummaryType::KeyPoints,
        }
    }
}

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Summarize a YouTube transcript with the recap summarization service")]
struct Cli {
    /// Transcript file ("-" reads stdin)
    transcript: PathBuf,

    /// Video id, e.g. "dQw4w9WgXcQ"
    #[arg(long)]
    video_id: String,

    /// Video title
    #[arg(long)]
    title: String,

    /// Channel name
    #[arg(long)]
    channel: Option<String>,

    /// Watch page URL. Defaults to the youtube.com URL for the video id.
    #[arg(long)]
    url: Option<String>,

    /// Video duration as shown by the player, e.g. "12:34"
    #[arg(long)]
    duration: Option<String>,

    /// Summary type. Repeat to request several types in one run.
    #[arg(short = 't', long = "type", default_value = "detailed")]
    summary_types: Vec<CliSummaryType>,

    /// Summary language. Repeat to request several languages in one run.
    #[arg(
        short = 'l',
        long = "lang",
        default_value = DEFAULT_LANGUAGE,
        value_parser = language_parser()
    )]
    langs: Vec<String>,

    /// Print the result as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn language_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(
        SUPPORTED_LANGUAGES
            .iter()
            .map(|language| PossibleValue::new(language.code).help(language.name)),
    )
}

/// Every (type, language) pair to request, languages outermost, in argument order.
/// Repeats are kept; they are answered from the cache.
fn selections(types: &[CliSummaryType], langs: &[String]) -> Vec<(SummaryType, String)> {
    langs
        .iter()
        .flat_map(|lang| types.iter().map(move |t| (SummaryType::from(*t), lang.clone())))
        .collect()
}

/// Result in the extension's message shape
#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutput<'a> {
    Success(&'a recap_core::Summary),
    Failure {
        error: &'a str,
        kind: recap_core::ErrorKind,
    },
}

/// One entry of the JSON array printed when several selections were requested
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry<'a> {
    summary_type: SummaryType,
    language: &'a str,
    #[serde(flatten)]
    result: JsonOutput<'a>,
}

impl<'a> From<&'a SummaryResult> for JsonOutput<'a> {
    fn from(result: &'a SummaryResult) -> Self {
        match result {
            Ok(summary) => JsonOutput::Success(summary),
            Err(e) => JsonOutput::Failure {
                error: &e.message,
                kind: e.kind,
            },
        }
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn read_transcript(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read transcript from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))
}

/// Checks the UI performs before a request is dispatched
fn check_transcript(transcript: Option<&str>) -> Result<&str, SummaryError> {
    let transcript = transcript
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SummaryError::validation(NO_CAPTIONS))?;
    if transcript.chars().count() < MIN_TRANSCRIPT_CHARS {
        return Err(SummaryError::validation(TRANSCRIPT_TOO_SHORT));
    }
    Ok(transcript)
}

/// A finished request with the options it was made with
struct Outcome {
    summary_type: SummaryType,
    language: String,
    result: SummaryResult,
}

/// Send every selection through one dispatcher, so repeats hit its cache.
async fn run_selections(
    dispatcher: &mut RequestDispatcher,
    base: &SummaryRequest,
    selections: Vec<(SummaryType, String)>,
    cancel: &CancellationToken,
    show_progress: bool,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(selections.len());

    for (summary_type, language) in selections {
        let request = base
            .clone()
            .with_summary_type(summary_type)
            .with_language(language.clone());

        let started = Instant::now();
        let spinner = show_progress.then(|| {
            create_spinner(&format!(
                "Generating {} summary ({})...",
                summary_type, language
            ))
        });
        let result = dispatcher.summarize(request, cancel).await;

        if let Some(spinner) = spinner {
            let (mark, status) = match &result {
                Ok(summary) if summary.cached => (style("✓").green().bold(), "loaded from cache"),
                Ok(_) => (style("✓").green().bold(), "generated"),
                Err(_) => (style("✗").red().bold(), "failed"),
            };
            spinner.finish_with_message(format!(
                "{} Summary {} {}",
                mark,
                status,
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));
        }

        outcomes.push(Outcome {
            summary_type,
            language,
            result,
        });
    }

    outcomes
}

fn print_json(outcomes: &[Outcome]) -> Result<()> {
    let json = match outcomes {
        [single] => serde_json::to_string_pretty(&JsonOutput::from(&single.result))?,
        _ => {
            let entries: Vec<JsonEntry> = outcomes
                .iter()
                .map(|o| JsonEntry {
                    summary_type: o.summary_type,
                    language: &o.language,
                    result: JsonOutput::from(&o.result),
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    println!("{}", json);
    Ok(())
}

fn print_error(title: &str, message: &str) {
    eprintln!(
        "{} {} {}",
        style("✗").red().bold(),
        style(title).red().bold(),
        message
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let transcript = read_transcript(&cli.transcript)?;
    let url = cli
        .url
        .clone()
        .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", cli.video_id));
    let source = StaticPageSource::new(PageSnapshot {
        video_info: VideoInfo {
            video_id: cli.video_id.clone(),
            title: cli.title.clone(),
            channel: cli.channel.clone(),
            url,
        },
        transcript: Some(transcript),
        duration: cli.duration.clone(),
    });

    // Ctrl-C cancels whatever is in flight
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("recap").cyan().bold(),
            style("Video Summarizer").dim()
        );
    }

    let page = match load_page(&source, settings.page_timeout, &cancel).await {
        Ok(page) => page,
        Err(e) => {
            let title = match e {
                PageError::Timeout => "Loading...",
                PageError::NoVideo => "Video Detection Failed",
                PageError::Cancelled => "Cancelled",
                PageError::Unavailable { .. } => "Connection Error",
            };
            print_error(title, &e.to_string());
            std::process::exit(1);
        }
    };

    let transcript = match check_transcript(page.transcript.as_deref()) {
        Ok(t) => t.to_string(),
        Err(e) => {
            if cli.json {
                let failed: SummaryResult = Err(e);
                println!("{}", serde_json::to_string_pretty(&JsonOutput::from(&failed))?);
            } else {
                eprintln!("{}", format_error_readable(&e));
            }
            std::process::exit(1);
        }
    };

    if !cli.json {
        println!("{} {}", style("✓").green().bold(), format_video_line(&page));
        println!("{}", style("─".repeat(60)).dim());
    }

    let base = SummaryRequest::new(transcript, page.video_info);
    let pairs = selections(&cli.summary_types, &cli.langs);
    let several = pairs.len() > 1;

    let client = Arc::new(HttpSummarizationClient::new(&settings));
    let mut dispatcher = RequestDispatcher::with_memory_cache(client, &settings);
    let outcomes = run_selections(&mut dispatcher, &base, pairs, &cancel, !cli.json).await;

    if cli.json {
        print_json(&outcomes)?;
    } else {
        for outcome in &outcomes {
            println!();
            if several {
                println!(
                    "{}",
                    style(format!("{} · {}", outcome.summary_type, outcome.language)).dim()
                );
            }
            match &outcome.result {
                Ok(summary) => {
                    println!("{}", format_summary_readable(outcome.summary_type, summary))
                }
                Err(e) => eprintln!("{}", format_error_readable(e)),
            }
        }
    }

    if outcomes.iter().any(|o| o.result.is_err()) {
        std::process::exit(1);
    }
    Ok(())
}
