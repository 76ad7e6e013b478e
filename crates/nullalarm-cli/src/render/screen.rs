use super::clock::Clock;
use super::error::RenderResult;
use super::layout::{fit_text, separator};
use super::style::{Palette, Tone};
use super::terminal;
use std::io::Write;
use std::time::Duration;

/// Ordered, styled output plus the clock that paces it.
pub struct Screen<W, C> {
    out: W,
    palette: Palette,
    width: usize,
    clock: C,
}

impl<W: Write, C: Clock> Screen<W, C> {
    pub fn new(out: W, palette: Palette, width: usize, clock: C) -> Self {
        Self {
            out,
            palette,
            width,
            clock,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn line(&mut self, text: &str, tone: Tone, bold: bool) -> RenderResult {
        let painted = self.palette.paint(text, tone, bold);
        writeln!(self.out, "{painted}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> RenderResult {
        writeln!(self.out)?;
        Ok(())
    }

    pub fn centered(&mut self, text: &str, tone: Tone, bold: bool) -> RenderResult {
        let fitted = fit_text(text, self.width);
        self.line(&fitted, tone, bold)
    }

    pub fn rule(&mut self, ch: char, tone: Tone, bold: bool) -> RenderResult {
        let sep = separator(self.width, ch);
        self.line(&sep, tone, bold)
    }

    /// Rewrite the current line in place (`\r`, no newline).
    pub fn overwrite(&mut self, text: &str, tone: Tone) -> RenderResult {
        let painted = self.palette.paint(text, tone, false);
        write!(self.out, "\r{painted}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> RenderResult {
        terminal::clear(&mut self.out)?;
        Ok(())
    }

    /// Flush, then wait `secs` on the clock.
    pub fn pause(&mut self, secs: f64) -> RenderResult {
        self.out.flush()?;
        self.clock.sleep(Duration::from_secs_f64(secs))
    }

    /// Flush, then wait `secs` even if Ctrl-C was pressed.
    pub fn hold(&mut self, secs: f64) -> RenderResult {
        self.out.flush()?;
        self.clock.sleep_through(Duration::from_secs_f64(secs));
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
