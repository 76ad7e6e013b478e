use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::fmt;
use std::io::{self, Write};

pub const FALLBACK_SIZE: TerminalSize = TerminalSize { cols: 80, rows: 24 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn width(&self) -> usize {
        usize::from(self.cols)
    }
}

impl fmt::Display for TerminalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Current terminal size, or 80x24 when stdout is not a terminal.
pub fn detect() -> TerminalSize {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => TerminalSize { cols, rows },
        Ok((cols, rows)) => {
            tracing::debug!(cols, rows, "terminal reported zero size, using fallback");
            FALLBACK_SIZE
        }
        Err(e) => {
            tracing::debug!(error = %e, "terminal size unavailable, using fallback");
            FALLBACK_SIZE
        }
    }
}

pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_displays_as_cols_by_rows() {
        assert_eq!(FALLBACK_SIZE.to_string(), "80x24");
        assert_eq!(FALLBACK_SIZE.width(), 80);
    }

    #[test]
    fn clear_emits_escape_sequence() {
        let mut buf = Vec::new();
        clear(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("\u{1b}[2J"));
        assert!(s.contains("\u{1b}[1;1H"));
    }
}
