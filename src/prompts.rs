//! Prompt builders for the clip-segmentation agent, plus the clip records it answers with.

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::time::{TimeError, parse_timestamp_to_seconds};

const EXAMPLE_CLIP: &str = r#"  {
    "start_time": "00:12:05",
    "end_time": "00:13:30",
    "quotes": [
      "If you're not building for yourself, you're building for regret.",
      "Trends come and go, but your values stay.",
      "Burnout is the cost of chasing someone else's dream."
    ],
    "caption": "OpenAI CEO fires shots @elonmusk"
  }"#;

const SECOND_EXAMPLE_CLIP: &str = r#"  {
    "start_time": "00:20:10",
    "end_time": "00:21:55",
    "quotes": [
      "I never thought I'd see the day when AI could write poetry.",
      "Machines are learning to feel, or at least to fake it.",
      "The future is weirder than we imagined."
    ],
    "caption": "AI is getting emotional"
  }"#;

const SINGLE_CLIP_GUIDELINES: &str = "\
Guidelines:
- Only return one segment.
- The 'quotes' field should be a list of the most impactful lines from the segment.
- The 'caption' should be a concise, tweet-style summary that entices viewers to watch the clip.
- Do not include any explanation or extra text, only the JSON array as shown above.";

/// One clip as returned by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub caption: String,
}

impl Clip {
    pub fn duration_seconds(&self) -> Result<u64, TimeError> {
        let start = parse_timestamp_to_seconds(&self.start_time)?;
        let end = parse_timestamp_to_seconds(&self.end_time)?;
        Ok(end.saturating_sub(start))
    }
}

/// Parse the agent's clip list, tolerating a surrounding ```json fence.
pub fn parse_clips(text: &str) -> Result<Vec<Clip>> {
    let body = text.trim();
    let body = body
        .strip_prefix("```json")
        .or_else(|| body.strip_prefix("```"))
        .and_then(|b| b.trim_end().strip_suffix("```"))
        .unwrap_or(body)
        .trim();
    serde_json::from_str(body).wrap_err("agent response is not a JSON array of clips")
}

fn user_instructions(instructions: &str, closing: &str) -> String {
    let instructions = instructions.trim();
    if instructions.is_empty() {
        return String::new();
    }
    format!("USER SPECIFIC INSTRUCTIONS:\n{instructions}\n{closing}\n")
}

/// Prompt asking the agent to cut a whole transcript into roughly `num_clips` clips.
pub fn segment_clips_prompt(instructions: &str, max_clip_minutes: u32, num_clips: u32, transcript: &str) -> String {
    let instructions = user_instructions(
        instructions,
        "Please consider these instructions while selecting and generating clips, but still maintain the core requirements below.",
    );

    format!(
        r#"
You are an AI assistant that turns long-form YouTube videos (podcasts, interviews, commentary) into engaging clips that still carry real substance.

Your goal is to find segments that offer in-depth insight, detailed explanation or a complete discussion, suitable for sharing on social media without losing context.

{instructions}
Your responsibilities:

1. Transcript Understanding
   - Read the transcript in full. Timestamps are on their own lines and apply to the text that follows them.
   - Normalise punctuation and speaker turns in your head before judging content.

2. Segment Analysis & Clip Selection
   - Pick segments of at most {max_clip_minutes} minutes that stand on their own. Prefer parts where:
     - the host or guest explores a topic in detail or offers a distinctive perspective;
     - a story or anecdote with a clear lesson is told;
     - a discussion covers several sides of one subject.
   - Prefer depth and substance over brevity, while keeping an eye on shareability.

3. Output Format
   - Return a JSON array. For each clip provide:
     - start_time and end_time in [HOUR]:[MIN]:[SEC] format (e.g. 00:30:00 means 30 minutes), at most {max_clip_minutes} minutes apart
     - quotes: every standout line that captures the essence of the clip
     - caption: a tweet-style summary that makes people want to watch

Aim for about {num_clips} clips; do not go far above or below {num_clips}.

Example Output:
[
{EXAMPLE_CLIP}
]

Tone:
- Clear, direct statements over hype.
- Conversational and accessible; avoid jargon unless the topic needs it.

Here is the transcript:
{transcript}
"#
    )
}

/// Prompt asking the agent to rewrite only the captions of an existing clip list.
pub fn refine_captions_prompt(clips_json: &str) -> String {
    format!(
        r#"
You are an expert content editor. You will receive a list of video clips (each with start_time, end_time, quotes and caption). Rewrite each caption to maximise the value delivered per word.

Make every caption dense, insightful and clear: actionable takeaways, key lessons or distinctive perspectives.

Avoid personal, emotional or conversational language, filler and generic phrasing. Do not change the quotes or the timing; only the caption field changes. Return the list in the same JSON structure.

Example Input:
[
{EXAMPLE_CLIP},
{SECOND_EXAMPLE_CLIP}
]

Here is the list of clips:
{clips_json}
"#
    )
}

/// Parameters for a single custom clip
#[derive(Debug, Clone, Default)]
pub struct CustomClipRequest {
    pub start_time: String,
    pub end_time: String,
    pub instructions: String,
    /// Search the whole transcript for the best clip instead of clipping `start_time..end_time`
    pub find_mode: bool,
}

/// Prompt for exactly one clip, either found by the agent or pinned to a time range.
pub fn custom_clip_prompt(request: &CustomClipRequest, transcript: &str) -> String {
    let instructions = user_instructions(
        &request.instructions,
        "Please consider these instructions while generating the clip, but still maintain the core requirements above.",
    );

    if request.find_mode {
        format!(
            r#"
You are an AI assistant that finds the single most valuable segment of a YouTube video transcript. Analyse the whole transcript and choose the best segment for a clip, ideally between 1 and 2 minutes long. Use the user's instructions as guidance.

Your output should be a JSON array holding exactly one clip (times in HH:MM:SS):

[
{EXAMPLE_CLIP}
]

{SINGLE_CLIP_GUIDELINES}
- The segment should be between 1 and 2 minutes long if possible.

{instructions}
Here is the transcript:
{transcript}"#
        )
    } else {
        let start = &request.start_time;
        let end = &request.end_time;
        format!(
            r#"
You are an AI assistant that creates engaging clips from specific segments of YouTube videos.

The transcript below covers the range {start} to {end}. Create ONE clip that captures the essence of this segment.

Your output should be a JSON array holding exactly one clip:

[
  {{
    "start_time": "{start}",
    "end_time": "{end}",
    "quotes": ["..."],
    "caption": "..."
  }}
]

{SINGLE_CLIP_GUIDELINES}
- The clip must match the provided time range.

{instructions}
Here is the transcript segment:
{transcript}"#
        )
    }
}
