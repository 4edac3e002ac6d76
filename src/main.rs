use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use eyre::{Result, WrapErr, bail};
use log::{debug, info, warn};

use ytclip::config::Config;
use ytclip::prompts::{self, CustomClipRequest};
use ytclip::youtube::{CaptionFetcher, YouTubeClient};
use ytclip::{TimeWindow, Transcript, format_seconds_to_timestamp, output, window_transcript};

mod cli;

use cli::{Cli, OutputFormat, PromptKind};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytclip.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytclip")
        .join("logs")
}

fn build_after_help() -> String {
    let log_path = log_dir().join("ytclip.log");
    let config_path = ytclip::config::config_path();

    format!(
        "\nTIMESTAMPS:\n  --start/--end accept SS, M:SS or H:MM:SS; both 0 (or omitted) keeps the whole transcript.\n\nConfig is read from: {}\nLogs are written to: {}",
        config_path.display(),
        log_path.display()
    )
}

/// Retry an async operation with exponential backoff
async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    debug!("Attempt {} failed: {e}, retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| eyre::eyre!("no attempts made")))
}

/// Settings resolved from CLI flags over config file values
struct Settings {
    format: OutputFormat,
    lang: String,
    window: TimeWindow,
    num_clips: u32,
    max_clip_minutes: u32,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let format = match (cli.format, config.default_format.as_deref()) {
            (Some(f), _) => f,
            (None, Some(name)) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
                warn!("Ignoring unknown default_format in config: {name}");
                OutputFormat::Timestamped
            }),
            (None, None) => OutputFormat::Timestamped,
        };

        let window = TimeWindow::parse(cli.start.as_deref(), cli.end.as_deref())
            .wrap_err("invalid --start/--end boundary")?;
        if window.start > window.end {
            bail!("--start must not be after --end");
        }

        Ok(Self {
            format,
            lang: cli.lang.clone().unwrap_or_else(|| config.lang().to_string()),
            window,
            num_clips: cli.num_clips.unwrap_or_else(|| config.num_clips()),
            max_clip_minutes: cli.max_clip_minutes.unwrap_or_else(|| config.max_clip_minutes()),
        })
    }
}

fn build_prompt(kind: PromptKind, cli: &Cli, settings: &Settings, transcript: &str) -> Result<String> {
    let prompt = match kind {
        PromptKind::Segment => prompts::segment_clips_prompt(
            &cli.instructions,
            settings.max_clip_minutes,
            settings.num_clips,
            transcript,
        ),
        PromptKind::Find => {
            let request = CustomClipRequest {
                instructions: cli.instructions.clone(),
                find_mode: true,
                ..Default::default()
            };
            prompts::custom_clip_prompt(&request, transcript)
        }
        PromptKind::Clip => {
            if settings.window.is_unbounded() || cli.end.is_none() {
                bail!("--prompt clip needs a --start/--end range");
            }
            let request = CustomClipRequest {
                start_time: format_seconds_to_timestamp(settings.window.start as f64),
                end_time: format_seconds_to_timestamp(settings.window.end as f64),
                instructions: cli.instructions.clone(),
                find_mode: false,
            };
            prompts::custom_clip_prompt(&request, transcript)
        }
    };
    Ok(prompt)
}

fn emit(cli: &Cli, rendered: &str) -> Result<()> {
    if let Some(ref path) = cli.output {
        std::fs::write(path, rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }
    Ok(())
}

/// Window transcript text read from a file, then render or prompt-wrap it
fn render_transcript_file(cli: &Cli, settings: &Settings, text: &str) -> Result<String> {
    let windowed = window_transcript(text, settings.window.start, settings.window.end);
    match cli.prompt {
        Some(kind) => build_prompt(kind, cli, settings, &windowed),
        None => match settings.format {
            OutputFormat::Timestamped => Ok(windowed),
            OutputFormat::Plain => Ok(output::strip_timestamps(&windowed)),
            OutputFormat::Json | OutputFormat::Srt => {
                bail!("json and srt output need fetched captions, not a transcript file")
            }
        },
    }
}

/// Window fetched captions by segment, then render or prompt-wrap them
fn render_fetched(cli: &Cli, settings: &Settings, transcript: &Transcript) -> Result<String> {
    let windowed = transcript.window(settings.window);
    match cli.prompt {
        Some(kind) => build_prompt(kind, cli, settings, &output::render_timestamped(&windowed)),
        None => match settings.format {
            OutputFormat::Timestamped => Ok(output::render_timestamped(&windowed)),
            OutputFormat::Plain => Ok(output::render_plain(&windowed)),
            OutputFormat::Json => output::render_json(&windowed),
            OutputFormat::Srt => Ok(output::render_srt(&windowed)),
        },
    }
}

fn describe_window(window: &TimeWindow) -> String {
    let end = if window.end == u64::MAX {
        "end".to_string()
    } else {
        format_seconds_to_timestamp(window.end as f64)
    };
    format!("{} - {end}", format_seconds_to_timestamp(window.start as f64))
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    });

    let settings = Settings::resolve(&cli, &config)?;

    if cli.verbose {
        let config_path = ytclip::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        if !settings.window.is_unbounded() {
            eprintln!("Window: {}", describe_window(&settings.window));
        }
    }

    if let Some(ref path) = cli.transcript_file {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read transcript file {}", path.display()))?;
        debug!("Read {} bytes of transcript from {}", text.len(), path.display());
        return emit(&cli, &render_transcript_file(&cli, &settings, &text)?);
    }

    let client = YouTubeClient::new(reqwest::Client::new());

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: ytclip <URL>\n       echo <URL> | ytclip");
    }

    for url_input in &urls {
        let url_input = url_input.trim().to_string();
        if url_input.is_empty() {
            continue;
        }

        let video_id = ytclip::extract_video_id(&url_input)
            .ok_or_else(|| eyre::eyre!("could not extract video ID from: {url_input}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  <11-character video ID>"))?;
        info!("Fetching captions for {video_id}");

        let transcript = retry(3, || {
            let client = &client;
            let video_id = &video_id;
            let lang = &settings.lang;
            async move { client.fetch_captions(video_id, lang).await }
        })
        .await
        .wrap_err_with(|| format!("caption extraction failed for {video_id}"))?;

        if cli.verbose {
            let duration = transcript
                .duration_seconds
                .map(|d| format_seconds_to_timestamp(d as f64))
                .unwrap_or_else(|| "unknown".to_string());
            eprintln!(
                "Video: {} ({})\nAuthor: {}\nDuration: {duration}\nThumbnail: {}\nLanguage: {}\nSegments: {}",
                transcript.title,
                transcript.video_id,
                transcript.author,
                transcript.thumbnail_url.as_deref().unwrap_or("none"),
                transcript.language,
                transcript.segments.len(),
            );
        }

        emit(&cli, &render_fetched(&cli, &settings, &transcript)?)?;
    }

    Ok(())
}
