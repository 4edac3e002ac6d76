pub mod config;
pub mod output;
pub mod prompts;
pub mod time;
pub mod transcript;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use time::{TimeError, format_seconds_to_timestamp, parse_timestamp_to_seconds};
pub use transcript::{Line, TimeWindow, classify_line, window_transcript};

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Complete transcript for a video
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub duration_seconds: Option<u64>,
    pub thumbnail_url: Option<String>,
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Keep segments whose whole-second start falls inside the window.
    pub fn window(&self, window: TimeWindow) -> Transcript {
        if window.is_unbounded() {
            return self.clone();
        }
        Transcript {
            segments: self
                .segments
                .iter()
                .filter(|s| window.contains(s.start.round() as u64))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^
        (?:
            (?:https?://|//)
            (?:
                (?:
                    (?:
                        (?:\w+\.)?youtube(?:-nocookie|kids)?\.com
                        | (?:www\.)?deturl\.com/www\.youtube\.com
                        | (?:www\.)?pwnyoutube\.com
                        | (?:www\.)?hooktube\.com
                        | (?:www\.)?yourepeat\.com
                        | tube\.majestyc\.net
                        | youtube\.googleapis\.com
                    )/
                    (?:.*?\#/)?
                    (?:
                        (?:v|embed|e|shorts|live)/
                        | (?:
                            (?:(?:watch|movie)(?:_popup)?(?:\.php)?/?)?
                            (?:\?|\#!?)
                            (?:.*?[&;])?
                            v=
                        )
                    )
                )
                | (?:youtu\.be|vid\.plus|zwearz\.com/watch)/
                | (?:www\.)?cleanvideosearch\.com/media/action/yt/watch\?videoId=
            )
        )?
        ([0-9a-z_-]{11})
        (?:.+)?
        (?:\#|$)
        ",
    )
    .expect("youtube url pattern")
});

// playlist and stream placeholders that look like IDs after a path segment
const PLACEHOLDER_IDS: [&str; 2] = ["videoseries", "live_stream"];
const ID_PATHS: [&str; 5] = ["/v/", "/embed/", "/e/", "/shorts/", "/live/"];

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    let caps = YOUTUBE_URL.captures(input)?;
    let id = caps.get(1)?;

    let prefix = input[..id.start()].to_ascii_lowercase();
    let is_placeholder = PLACEHOLDER_IDS.iter().any(|p| id.as_str().eq_ignore_ascii_case(p));
    if is_placeholder && ID_PATHS.iter().any(|p| prefix.ends_with(p)) {
        return None;
    }

    Some(id.as_str().to_string())
}

pub fn is_valid_youtube_url(input: &str) -> bool {
    extract_video_id(input).is_some()
}
