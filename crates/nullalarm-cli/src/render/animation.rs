//! The crash script: each function is one scene, paced by the screen's clock.
//!
//! Scenes return `Err(RenderError::Interrupted)` from whichever pause notices
//! Ctrl-C; [`shutdown`] is the only scene that ignores it.

use super::clock::Clock;
use super::error::RenderResult;
use super::layout::banner;
use super::screen::Screen;
use super::style::Tone;
use super::terminal::TerminalSize;
use chrono::Local;
use nullalarm_core::{match_cause, Cause, LineKind, StackTrace, TraceRng, EXCEPTION_HEADER};
use std::io::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const CRITICAL_BANNER: &str = "CRITICAL SYSTEM ERROR";
const NULL_REFERENCE: &str = "NULL REFERENCE DETECTED";
const WARNING_TEXT: &str = "WARNING: Application may crash or behave unexpectedly!";
const ALERT_TEXT: &str = "NULL POINTER EXCEPTION DETECTED!";
const TERMINATED: &str = "PROCESS TERMINATED";
const COMPLETED: &str = "NullPointerException demonstration completed.";
const SHUTDOWN_STEPS: usize = 3;

/// A generated trace together with the cause shown for it.
#[derive(Debug, Clone)]
pub struct Incident {
    pub trace: StackTrace,
    pub cause: Cause,
}

impl Incident {
    pub fn generate<R: TraceRng + ?Sized>(rng: &mut R) -> Self {
        let trace = nullalarm_core::generate(rng);
        let cause = match_cause(&trace, rng);
        Self { trace, cause }
    }
}

pub fn intro<W: Write, C: Clock>(screen: &mut Screen<W, C>, size: TerminalSize) -> RenderResult {
    screen.line(&format!("Terminal: {size}"), Tone::Cyan, false)?;
    screen.pause(1.0)
}

/// Everything from the explosion to the warning flashes.
pub fn crash<W: Write, C: Clock>(screen: &mut Screen<W, C>, incident: &Incident) -> RenderResult {
    explosion(screen)?;
    headline(screen)?;
    blink(screen)?;
    null_reference(screen)?;
    screen.line(
        &format!("Possible Cause: {}", incident.cause),
        Tone::Cyan,
        false,
    )?;
    screen.line(
        &format!("Timestamp: {}", Local::now().format(TIMESTAMP_FORMAT)),
        Tone::Purple,
        false,
    )?;
    screen.blank()?;
    stack_trace(screen, &incident.trace, true)?;
    warnings(screen, incident)
}

fn explosion<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    let w = screen.width();
    screen.blank()?;
    for _ in 0..2 {
        for counts in [[w / 3, w / 2, w / 3], [w / 2, w / 3, w / 2]] {
            for n in counts {
                screen.centered(&banner("* ", n), Tone::Red, true)?;
            }
            screen.pause(0.2)?;
            screen.clear()?;
        }
    }
    Ok(())
}

fn headline<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    screen.blank()?;
    screen.rule('═', Tone::Red, true)?;
    screen.centered(CRITICAL_BANNER, Tone::Red, true)?;
    screen.rule('═', Tone::Red, true)
}

fn blink<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    for _ in 0..4 {
        screen.centered(EXCEPTION_HEADER, Tone::Red, true)?;
        screen.pause(0.4)?;
        screen.centered(EXCEPTION_HEADER, Tone::White, true)?;
        screen.pause(0.4)?;
    }
    Ok(())
}

fn null_reference<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    screen.blank()?;
    screen.centered(NULL_REFERENCE, Tone::Yellow, false)?;
    screen.blank()
}

/// Framed trace listing. With `paced`, each line waits 0.15 s before printing.
pub fn stack_trace<W: Write, C: Clock>(
    screen: &mut Screen<W, C>,
    trace: &StackTrace,
    paced: bool,
) -> RenderResult {
    screen.line("Stack Trace:", Tone::Blue, true)?;
    screen.rule('━', Tone::Blue, false)?;
    for line in trace.iter() {
        if paced {
            screen.pause(0.15)?;
        }
        let kind = LineKind::classify(line);
        let text = if kind.indented() {
            format!("    {line}")
        } else {
            line.to_string()
        };
        screen.line(&text, Tone::for_line(kind), false)?;
    }
    screen.rule('━', Tone::Blue, false)
}

fn warnings<W: Write, C: Clock>(screen: &mut Screen<W, C>, incident: &Incident) -> RenderResult {
    let count = screen.width() / 3;
    screen.blank()?;
    for _ in 0..2 {
        for (unit, text) in [("! ", WARNING_TEXT), ("# ", ALERT_TEXT)] {
            let edge = banner(unit, count);
            screen.centered(&edge, Tone::Red, true)?;
            screen.centered(text, Tone::Red, true)?;
            screen.centered(&edge, Tone::Red, true)?;
            screen.pause(0.5)?;
            screen.clear()?;
        }

        screen.blank()?;
        screen.centered(EXCEPTION_HEADER, Tone::Red, true)?;
        null_reference(screen)?;
        screen.line(
            &format!("Possible Cause: {}", incident.cause),
            Tone::Cyan,
            false,
        )?;
        stack_trace(screen, &incident.trace, false)?;
    }
    Ok(())
}

pub fn terminated<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    screen.blank()?;
    screen.rule('═', Tone::Green, true)?;
    screen.centered(TERMINATED, Tone::Green, true)?;
    screen.rule('═', Tone::Green, true)?;
    screen.blank()
}

pub fn countdown<W: Write, C: Clock>(screen: &mut Screen<W, C>, from: u32) -> RenderResult {
    screen.blank()?;
    screen.line("System will exit in:", Tone::Red, false)?;
    for i in (1..=from).rev() {
        screen.line(&format!("  {i}..."), Tone::Red, true)?;
        screen.pause(1.0)?;
    }
    Ok(())
}

pub fn interrupted<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    screen.blank()?;
    screen.line("Process interrupted by user", Tone::Yellow, false)
}

/// Closing progress bar. Runs to the end, paced, even after an interrupt.
pub fn shutdown<W: Write, C: Clock>(screen: &mut Screen<W, C>) -> RenderResult {
    screen.blank()?;
    screen.line("Alert system shutting down...", Tone::Cyan, false)?;
    for step in 0..SHUTDOWN_STEPS {
        let bar = format!(
            "Shutdown: {}{} ",
            "█".repeat(step + 1),
            "░".repeat(SHUTDOWN_STEPS - 1 - step)
        );
        screen.overwrite(&bar, Tone::Yellow)?;
        screen.hold(0.3)?;
    }
    screen.blank()?;
    screen.line(COMPLETED, Tone::White, true)
}
