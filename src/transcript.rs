use std::sync::LazyLock;

use regex::Regex;

use crate::time::{TimeError, parse_timestamp_to_seconds};

// M:SS, MM:SS and H:MM:SS; minutes are unbounded so caption text past the hour (75:03) still matches
static TIMESTAMP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+:)?\d+:\d{2}$").expect("timestamp line pattern"));

/// One classified line of transcript text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Timestamp { text: &'a str, seconds: u64 },
    Text(&'a str),
    Blank,
}

/// Classify a single transcript line; surrounding whitespace is ignored.
pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if TIMESTAMP_LINE.is_match(line) {
        // a digit run too long for u64 degrades to text
        if let Ok(seconds) = parse_timestamp_to_seconds(line) {
            return Line::Timestamp { text: line, seconds };
        }
    }
    Line::Text(line)
}

/// Inclusive `[start, end]` range in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

impl TimeWindow {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Build a window from clock strings; a missing bound defaults to 0 (start) or unbounded (end).
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, TimeError> {
        let start = start.map(parse_timestamp_to_seconds).transpose()?.unwrap_or(0);
        let end = match end {
            Some(e) => parse_timestamp_to_seconds(e)?,
            None if start == 0 => 0,
            None => u64::MAX,
        };
        Ok(Self { start, end })
    }

    /// 0-0 means the caller asked for no windowing
    pub fn is_unbounded(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn contains(&self, seconds: u64) -> bool {
        self.start <= seconds && seconds <= self.end
    }
}

/// Keep only the lines of `transcript` whose effective timestamp is in `[start_seconds, end_seconds]`.
///
/// Text lines take the time of the nearest preceding timestamp line (0 before the first one).
/// Blank lines are always dropped and retained lines come back trimmed and newline-joined.
/// An empty transcript or a 0-0 window returns the input unchanged.
pub fn window_transcript(transcript: &str, start_seconds: u64, end_seconds: u64) -> String {
    let window = TimeWindow::new(start_seconds, end_seconds);
    if transcript.is_empty() || window.is_unbounded() {
        return transcript.to_string();
    }

    let mut current_time = 0;
    let mut kept = Vec::new();
    for line in transcript.lines() {
        let line = match classify_line(line) {
            Line::Blank => continue,
            Line::Timestamp { text, seconds } => {
                current_time = seconds;
                text
            }
            Line::Text(text) => text,
        };
        if window.contains(current_time) {
            kept.push(line);
        }
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0:00\nHello\n0:05\nWorld\n0:10\nEnd";

    #[test]
    fn test_classify_timestamp() {
        assert_eq!(classify_line("0:05"), Line::Timestamp { text: "0:05", seconds: 5 });
        assert_eq!(classify_line("12:34"), Line::Timestamp { text: "12:34", seconds: 754 });
        assert_eq!(classify_line("  1:00 "), Line::Timestamp { text: "1:00", seconds: 60 });
    }

    #[test]
    fn test_classify_hour_and_long_minute_forms() {
        assert_eq!(classify_line("1:02:03"), Line::Timestamp { text: "1:02:03", seconds: 3723 });
        assert_eq!(classify_line("75:03"), Line::Timestamp { text: "75:03", seconds: 4503 });
        assert_eq!(classify_line("120:00"), Line::Timestamp { text: "120:00", seconds: 7200 });
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify_line("Hello there"), Line::Text("Hello there"));
        assert_eq!(classify_line("0:5"), Line::Text("0:5"));
        assert_eq!(classify_line("at 1:05 we start"), Line::Text("at 1:05 we start"));
        assert_eq!(classify_line("1:05."), Line::Text("1:05."));
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify_line(""), Line::Blank);
        assert_eq!(classify_line("   \t"), Line::Blank);
    }

    #[test]
    fn test_window_single_point() {
        assert_eq!(window_transcript(SAMPLE, 5, 5), "0:05\nWorld");
    }

    #[test]
    fn test_window_inclusive_bounds() {
        assert_eq!(window_transcript(SAMPLE, 5, 10), "0:05\nWorld\n0:10\nEnd");
        assert_eq!(window_transcript(SAMPLE, 1, 9), "0:05\nWorld");
    }

    #[test]
    fn test_window_zero_zero_passes_through() {
        let raw = "  0:00\n\nHello  \n";
        assert_eq!(window_transcript(raw, 0, 0), raw);
    }

    #[test]
    fn test_window_empty_transcript() {
        assert_eq!(window_transcript("", 5, 10), "");
    }

    #[test]
    fn test_window_out_of_range() {
        assert_eq!(window_transcript(SAMPLE, 1_000_000, 1_000_001), "");
    }

    #[test]
    fn test_window_inverted_bounds() {
        assert_eq!(window_transcript(SAMPLE, 10, 5), "");
    }

    #[test]
    fn test_window_text_before_first_timestamp() {
        let t = "Intro words\n0:05\nLater";
        assert_eq!(window_transcript(t, 0, 1), "Intro words");
        assert_eq!(window_transcript(t, 5, 5), "0:05\nLater");
    }

    #[test]
    fn test_window_drops_blank_lines() {
        let t = "0:00\n\nHello\n   \n0:05\n\nWorld\n";
        assert_eq!(window_transcript(t, 0, 5), "0:00\nHello\n0:05\nWorld");
    }

    #[test]
    fn test_window_malformed_timestamp_inherits_time() {
        let t = "0:05\nWorld\n0:7\nStill five";
        assert_eq!(window_transcript(t, 5, 5), "0:05\nWorld\n0:7\nStill five");
    }

    #[test]
    fn test_window_handles_crlf() {
        let t = "0:00\r\nHello\r\n0:05\r\nWorld";
        assert_eq!(window_transcript(t, 5, 5), "0:05\nWorld");
    }

    #[test]
    fn test_window_past_the_hour() {
        let t = "59:58\nBefore\n1:00:02\nAfter";
        assert_eq!(window_transcript(t, 3600, 3700), "1:00:02\nAfter");
    }

    #[test]
    fn test_time_window_parse() {
        let w = TimeWindow::parse(Some("1:00"), Some("2:30")).unwrap();
        assert_eq!(w, TimeWindow::new(60, 150));
        assert!(w.contains(60));
        assert!(w.contains(150));
        assert!(!w.contains(151));
    }

    #[test]
    fn test_time_window_parse_defaults() {
        assert!(TimeWindow::parse(None, None).unwrap().is_unbounded());
        assert_eq!(TimeWindow::parse(Some("1:00"), None).unwrap(), TimeWindow::new(60, u64::MAX));
        assert_eq!(TimeWindow::parse(None, Some("0:30")).unwrap(), TimeWindow::new(0, 30));
    }

    #[test]
    fn test_time_window_parse_invalid() {
        let err = TimeWindow::parse(Some("abc"), Some("1:00")).unwrap_err();
        assert!(matches!(err, TimeError::InvalidTimestampFormat { .. }));
    }
}
