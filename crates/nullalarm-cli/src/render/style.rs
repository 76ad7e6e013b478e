use crossterm::style::{Color, Stylize};
use nullalarm_core::LineKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Red => Color::Red,
            Tone::Green => Color::Green,
            Tone::Yellow => Color::Yellow,
            Tone::Blue => Color::Blue,
            Tone::Purple => Color::Magenta,
            Tone::Cyan => Color::Cyan,
            Tone::White => Color::White,
        }
    }

    pub fn for_line(kind: LineKind) -> Self {
        match kind {
            LineKind::ExceptionHeader => Tone::Red,
            LineKind::CausedBy => Tone::Purple,
            LineKind::NativeFrame => Tone::Cyan,
            LineKind::Elision => Tone::Yellow,
            LineKind::Frame => Tone::White,
        }
    }
}

/// Turns text into ANSI-styled text, or leaves it alone when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, tone: Tone, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = text.with(tone.color());
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }
}
