//! Delays between animation frames.
//!
//! Every pause goes through a [`Clock`] so tests can run the whole script
//! instantly and Ctrl-C can cut a pause short.

use super::error::{RenderError, RenderResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep slice; bounds Ctrl-C latency.
const SLICE: Duration = Duration::from_millis(25);

/// Slowest accepted `--speed`; a 1 s pause becomes at most 100 s.
pub const MIN_SPEED: f64 = 0.01;
const MAX_STRETCH: u32 = 100;

pub fn speed_is_valid(speed: f64) -> bool {
    speed.is_finite() && speed >= MIN_SPEED
}

pub trait Clock {
    /// Wait, returning `Interrupted` as soon as Ctrl-C is noticed.
    fn sleep(&self, duration: Duration) -> RenderResult;

    /// Wait the full duration regardless of Ctrl-C.
    fn sleep_through(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn sleep(&self, duration: Duration) -> RenderResult {
        (**self).sleep(duration)
    }

    fn sleep_through(&self, duration: Duration) {
        (**self).sleep_through(duration)
    }
}

/// Shared Ctrl-C latch. Raised once, never lowered.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> RenderResult {
        if self.is_raised() {
            Err(RenderError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Real-time clock. `speed` divides every delay (2.0 runs twice as fast).
#[derive(Debug, Clone)]
pub struct ThreadClock {
    speed: f64,
    interrupt: InterruptFlag,
}

impl ThreadClock {
    pub fn new(speed: f64, interrupt: InterruptFlag) -> Self {
        Self { speed, interrupt }
    }

    fn scaled(&self, duration: Duration) -> Duration {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return duration;
        }
        Duration::try_from_secs_f64(duration.as_secs_f64() / self.speed)
            .unwrap_or(Duration::MAX)
            .min(duration.saturating_mul(MAX_STRETCH))
    }
}

impl Clock for ThreadClock {
    fn sleep(&self, duration: Duration) -> RenderResult {
        self.interrupt.check()?;
        let deadline = Instant::now() + self.scaled(duration);
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(SLICE.min(deadline - now));
            self.interrupt.check()?;
        }
    }

    fn sleep_through(&self, duration: Duration) {
        std::thread::sleep(self.scaled(duration));
    }
}

/// Never waits. Still reports a raised interrupt so `--instant` runs stop on Ctrl-C.
#[derive(Debug, Clone, Default)]
pub struct InstantClock {
    interrupt: Option<InterruptFlag>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interrupt(interrupt: InterruptFlag) -> Self {
        Self {
            interrupt: Some(interrupt),
        }
    }
}

impl Clock for InstantClock {
    fn sleep(&self, _duration: Duration) -> RenderResult {
        match &self.interrupt {
            Some(flag) => flag.check(),
            None => Ok(()),
        }
    }

    fn sleep_through(&self, _duration: Duration) {}
}
