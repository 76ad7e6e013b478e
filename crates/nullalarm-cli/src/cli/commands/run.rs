use crate::audio::{self, Playback};
use crate::cli::args::RunArgs;
use crate::exit_codes::{CONFIG_ERROR, INTERRUPTED, SUCCESS};
use crate::render::animation;
use crate::render::clock::{speed_is_valid, MIN_SPEED};
use crate::render::terminal::{self, TerminalSize};
use crate::render::{
    Clock, Incident, InstantClock, InterruptFlag, Palette, RenderError, RenderResult, Screen,
    ThreadClock, Tone,
};
use anyhow::{Context, Result};
use nullalarm_core::seeded_rng;
use std::io::{self, Write};
use std::path::Path;

pub async fn run(args: RunArgs) -> Result<i32> {
    if !speed_is_valid(args.speed) {
        eprintln!("Config error: --speed must be a number of at least {MIN_SPEED}");
        return Ok(CONFIG_ERROR);
    }

    let interrupt = InterruptFlag::default();
    {
        let interrupt = interrupt.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("ctrl-c received");
                interrupt.raise();
            }
        });
    }

    tokio::task::spawn_blocking(move || perform(&args, interrupt))
        .await
        .context("animation task failed")?
}

fn perform(args: &RunArgs, interrupt: InterruptFlag) -> Result<i32> {
    let size = terminal::detect();
    let clock: Box<dyn Clock> = if args.instant {
        Box::new(InstantClock::with_interrupt(interrupt))
    } else {
        Box::new(ThreadClock::new(args.speed, interrupt))
    };

    let stdout = io::stdout();
    let mut screen = Screen::new(
        stdout.lock(),
        Palette::new(args.color_enabled()),
        size.width(),
        clock,
    );

    let cwd = std::env::current_dir().context("resolving working directory")?;
    play(&mut screen, args, size, &cwd)
}

/// Drive the full script on `screen`, then always stop audio and shut down.
pub fn play<W: Write, C: Clock>(
    screen: &mut Screen<W, C>,
    args: &RunArgs,
    size: TerminalSize,
    audio_dir: &Path,
) -> Result<i32> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, %size, "starting crash animation");
    let incident = Incident::generate(&mut seeded_rng(Some(seed)));

    let mut playback = None;
    let outcome = script(screen, args, size, audio_dir, &incident, &mut playback);

    let code = match outcome {
        Ok(()) => SUCCESS,
        Err(RenderError::Interrupted) => {
            animation::interrupted(screen).context("writing to terminal")?;
            INTERRUPTED
        }
        Err(RenderError::Io(e)) => {
            drop(playback);
            return Err(e).context("writing to terminal");
        }
    };

    if let Some(mut p) = playback {
        p.stop();
    }
    animation::shutdown(screen).context("writing to terminal")?;
    Ok(code)
}

fn script<W: Write, C: Clock>(
    screen: &mut Screen<W, C>,
    args: &RunArgs,
    size: TerminalSize,
    audio_dir: &Path,
    incident: &Incident,
    playback: &mut Option<Playback>,
) -> RenderResult {
    animation::intro(screen, size)?;

    if !args.no_audio {
        let candidates = if args.audio.is_empty() {
            audio::default_candidates()
        } else {
            args.audio.clone()
        };
        let (started, notice) = audio::start(audio_dir, &candidates);
        let tone = if notice.is_playing() {
            Tone::Cyan
        } else {
            Tone::Yellow
        };
        screen.line(&notice.to_string(), tone, false)?;
        *playback = started;
    }

    animation::crash(screen, incident)?;
    animation::terminated(screen)?;
    animation::countdown(screen, args.countdown)
}
