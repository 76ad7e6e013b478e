use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Raised by a [`Clock`](super::clock::Clock) once the user pressed Ctrl-C.
    #[error("interrupted by user")]
    Interrupted,
}

pub type RenderResult<T = ()> = Result<T, RenderError>;
