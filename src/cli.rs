use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Timestamped,
    Plain,
    Json,
    Srt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PromptKind {
    /// Cut the transcript into several clips
    Segment,
    /// Find the single best clip
    Find,
    /// One clip for the --start/--end range
    Clip,
}

#[derive(Parser)]
#[command(
    name = "ytclip",
    about = "YouTube transcript windowing and clip prompt builder",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Read an already formatted transcript instead of fetching captions
    #[arg(short, long, conflicts_with = "url")]
    pub transcript_file: Option<PathBuf>,

    /// Window start (M:SS or H:MM:SS)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (M:SS or H:MM:SS)
    #[arg(long)]
    pub end: Option<String>,

    /// Output format [default: timestamped, or default_format from config]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Preferred caption language [default: en, or default_lang from config]
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Wrap the transcript in an agent prompt instead of printing it
    #[arg(short, long, value_enum)]
    pub prompt: Option<PromptKind>,

    /// Extra instructions for the agent prompt
    #[arg(short, long, default_value = "")]
    pub instructions: String,

    /// Target number of clips for the segment prompt
    #[arg(long)]
    pub num_clips: Option<u32>,

    /// Maximum clip length in minutes for the segment prompt
    #[arg(long)]
    pub max_clip_minutes: Option<u32>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show video metadata and the applied window
    #[arg(short, long)]
    pub verbose: bool,
}
