//! Terminal rendering for the crash animation: styling, layout, pacing and
//! the scene script itself.

pub mod animation;
pub mod clock;
pub mod error;
pub mod layout;
pub mod screen;
pub mod style;
pub mod terminal;

pub use animation::Incident;
pub use clock::{Clock, InstantClock, InterruptFlag, ThreadClock};
pub use error::{RenderError, RenderResult};
pub use screen::Screen;
pub use style::{Palette, Tone};
