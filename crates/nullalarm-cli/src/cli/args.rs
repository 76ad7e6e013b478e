use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nullalarm",
    version,
    about = "Stage a very convincing NullPointerException in your terminal",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the crash animation (default)
    Run(RunArgs),
    /// Print generated stack traces and their causes without animation
    Trace(TraceArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Seed for trace selection (random when omitted)
    #[arg(long, env = "NULLALARM_SEED")]
    pub seed: Option<u64>,

    /// Sound file to play; repeat to give fallbacks.
    /// Default: audio.mp3, audio.wav, sound.mp3, sound.wav
    #[arg(long = "audio", value_name = "PATH")]
    pub audio: Vec<PathBuf>,

    /// Skip sound entirely
    #[arg(long)]
    pub no_audio: bool,

    /// Playback speed multiplier (2.0 = twice as fast)
    #[arg(long, default_value_t = 1.0, env = "NULLALARM_SPEED")]
    pub speed: f64,

    /// Render every frame immediately, no delays
    #[arg(long)]
    pub instant: bool,

    /// Disable ANSI colors (also disabled by any non-empty NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Seconds counted down before exit
    #[arg(long, default_value_t = 5)]
    pub countdown: u32,
}

impl RunArgs {
    pub fn color_enabled(&self) -> bool {
        !self.no_color && !no_color_requested(std::env::var_os("NO_COLOR").as_deref())
    }
}

/// no-color.org: present and non-empty means off, whatever the value.
pub fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TraceArgs {
    /// Seed for trace selection (random when omitted)
    #[arg(long, env = "NULLALARM_SEED")]
    pub seed: Option<u64>,

    /// Number of traces to generate
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
