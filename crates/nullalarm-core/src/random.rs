use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the two kinds of randomness a trace needs: a uniform pick over a
/// small catalog and independent Bernoulli draws.
pub trait TraceRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> TraceRng for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Replays queued answers in order. Once a queue is exhausted picks return `0`
/// and draws return `false`, so `ScriptedRng::default()` always selects the
/// first chain with no injections.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
    draws: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_draws(mut self, draws: impl IntoIterator<Item = bool>) -> Self {
        self.draws.extend(draws);
        self
    }

    /// Answers not yet consumed, as `(picks, draws)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.picks.len(), self.draws.len())
    }
}

impl TraceRng for ScriptedRng {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.draws.pop_front().unwrap_or(false)
    }
}
