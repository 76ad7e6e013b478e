//! Stack-trace generation.
//!
//! A trace is built in one pass over a randomly chosen [`CallChain`]:
//!
//! 1. the exception identifier,
//! 2. the chain's frames innermost first, with the reflection block optionally
//!    injected right after reversed index 1,
//! 3. an optional thread-run line,
//! 4. an optional caused-by block.
//!
//! Each optional block is one independent draw, taken once, in that order.

use crate::catalog::{
    CallChain, Scenario, CAUSED_BY_BLOCK, CAUSED_BY_PROBABILITY, CHAINS, EXCEPTION_HEADER,
    REFLECTION_BLOCK, REFLECTION_INJECTION_INDEX, REFLECTION_PROBABILITY, THREAD_RUN_LINE,
    THREAD_RUN_PROBABILITY,
};
use crate::random::TraceRng;
use serde::Serialize;
use std::fmt;

/// Shortest possible trace: header plus four frames.
pub const MIN_TRACE_LEN: usize = 1 + 4;
/// Longest possible trace: every optional block fired.
pub const MAX_TRACE_LEN: usize =
    MIN_TRACE_LEN + REFLECTION_BLOCK.len() + 1 + CAUSED_BY_BLOCK.len();

/// Which optional blocks made it into a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Injections {
    pub reflection: bool,
    pub thread_run: bool,
    pub caused_by: bool,
}

/// Ordered, immutable trace lines. The first line is always [`EXCEPTION_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackTrace {
    scenario: Scenario,
    injections: Injections,
    lines: Vec<String>,
}

impl StackTrace {
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn injections(&self) -> Injections {
        self.injections
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn header(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    /// The last `n` lines, or all of them when the trace is shorter.
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Owns its random source and produces a fresh trace per call.
#[derive(Debug)]
pub struct StackTraceGenerator<R> {
    rng: R,
}

impl<R: TraceRng> StackTraceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> StackTrace {
        generate(&mut self.rng)
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// Pick a chain uniformly and build a trace from it.
pub fn generate<R: TraceRng + ?Sized>(rng: &mut R) -> StackTrace {
    let chain = &CHAINS[rng.pick(CHAINS.len())];
    generate_from(chain, rng)
}

/// Build a trace from a given chain, drawing only the optional blocks.
pub fn generate_from<R: TraceRng + ?Sized>(chain: &CallChain, rng: &mut R) -> StackTrace {
    let mut lines = Vec::with_capacity(MAX_TRACE_LEN);
    let mut injections = Injections::default();

    lines.push(EXCEPTION_HEADER.to_string());

    for (i, frame) in chain.innermost_first().enumerate() {
        lines.push(frame.render());

        if i == REFLECTION_INJECTION_INDEX && rng.chance(REFLECTION_PROBABILITY) {
            lines.extend(REFLECTION_BLOCK.iter().map(|l| l.to_string()));
            injections.reflection = true;
        }
    }

    if rng.chance(THREAD_RUN_PROBABILITY) {
        lines.push(THREAD_RUN_LINE.to_string());
        injections.thread_run = true;
    }

    if rng.chance(CAUSED_BY_PROBABILITY) {
        lines.extend(CAUSED_BY_BLOCK.iter().map(|l| l.to_string()));
        injections.caused_by = true;
    }

    tracing::debug!(
        scenario = %chain.scenario,
        reflection = injections.reflection,
        thread_run = injections.thread_run,
        caused_by = injections.caused_by,
        lines = lines.len(),
        "generated stack trace"
    );

    StackTrace {
        scenario: chain.scenario,
        injections,
        lines,
    }
}
