use eyre::Result;

use crate::Transcript;
use crate::time::format_caption_timestamp;
use crate::transcript::{Line, classify_line};

/// Render transcript as alternating `M:SS` and text lines, the format the windower reads
pub fn render_timestamped(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| format!("{}\n{}", format_caption_timestamp(s.start), s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render transcript as plain text (one segment per line, no timestamps)
pub fn render_plain(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip timestamp lines from already-windowed transcript text
pub fn strip_timestamps(text: &str) -> String {
    text.lines()
        .filter_map(|l| match classify_line(l) {
            Line::Text(t) => Some(t),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(transcript: &Transcript) -> Result<String> {
    Ok(serde_json::to_string_pretty(transcript)?)
}

pub fn render_srt(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                srt_timestamp(s.start),
                srt_timestamp(s.start + s.duration),
                s.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn srt_timestamp(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let h = millis / 3_600_000;
    let m = (millis % 3_600_000) / 60_000;
    let s = (millis % 60_000) / 1000;
    let ms = millis % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Segment;
    use crate::transcript::window_transcript;

    fn sample_transcript() -> Transcript {
        Transcript {
            video_id: "test123".to_string(),
            title: "Test Video".to_string(),
            author: String::new(),
            duration_seconds: None,
            thumbnail_url: None,
            language: "en".to_string(),
            segments: vec![
                Segment {
                    text: "Hello world".to_string(),
                    start: 0.0,
                    duration: 1.5,
                },
                Segment {
                    text: "This is a test".to_string(),
                    start: 65.25,
                    duration: 2.0,
                },
            ],
        }
    }

    #[test]
    fn test_render_timestamped() {
        let t = sample_transcript();
        assert_eq!(render_timestamped(&t), "0:00\nHello world\n1:05\nThis is a test");
    }

    #[test]
    fn test_render_timestamped_after_segment_window() {
        let mut t = sample_transcript();
        t.segments[1].text = "10:30".to_string();
        let text = render_timestamped(&t.window(crate::TimeWindow::new(60, 120)));
        assert_eq!(text, "1:05\n10:30");
    }

    #[test]
    fn test_render_json_includes_metadata() {
        let mut t = sample_transcript();
        t.author = "Some Channel".to_string();
        t.duration_seconds = Some(213);
        t.thumbnail_url = Some("https://i.ytimg.com/vi/test123/maxresdefault.jpg".to_string());
        let json: serde_json::Value = serde_json::from_str(&render_json(&t).unwrap()).unwrap();
        assert_eq!(json["author"], "Some Channel");
        assert_eq!(json["duration_seconds"], 213);
        assert_eq!(json["thumbnail_url"], "https://i.ytimg.com/vi/test123/maxresdefault.jpg");
    }

    #[test]
    fn test_render_timestamped_feeds_window() {
        let t = sample_transcript();
        let text = render_timestamped(&t);
        assert_eq!(window_transcript(&text, 60, 120), "1:05\nThis is a test");
    }

    #[test]
    fn test_render_plain() {
        let t = sample_transcript();
        assert_eq!(render_plain(&t), "Hello world\nThis is a test");
    }

    #[test]
    fn test_render_plain_empty() {
        let t = Transcript {
            video_id: "empty".to_string(),
            title: "Empty".to_string(),
            author: String::new(),
            duration_seconds: None,
            thumbnail_url: None,
            language: "en".to_string(),
            segments: vec![],
        };
        assert_eq!(render_plain(&t), "");
        assert_eq!(render_timestamped(&t), "");
        assert_eq!(render_srt(&t), "");
    }

    #[test]
    fn test_strip_timestamps() {
        assert_eq!(strip_timestamps("0:00\nHello\n\n0:05\nWorld"), "Hello\nWorld");
    }

    #[test]
    fn test_render_json() {
        let t = sample_transcript();
        let json: serde_json::Value = serde_json::from_str(&render_json(&t).unwrap()).unwrap();
        assert_eq!(json["video_id"], "test123");
        assert_eq!(json["segments"][1]["text"], "This is a test");
    }

    #[test]
    fn test_render_srt() {
        let t = sample_transcript();
        let srt = render_srt(&t);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,500\nHello world\n\n2\n00:01:05,250 --> 00:01:07,250\nThis is a test\n"
        );
    }

    #[test]
    fn test_srt_timestamp_hours() {
        assert_eq!(srt_timestamp(3723.004), "01:02:03,004");
    }
}
