//! Core of nullalarm: a randomized, plausible-looking `NullPointerException`
//! stack trace and a probable cause that agrees with it.
//!
//! The crate does no I/O. Callers supply a [`TraceRng`] (any `rand::Rng`, or a
//! [`ScriptedRng`] in tests), call [`generate`] for a [`StackTrace`] and hand it
//! to [`match_cause`] for a [`Cause`].

pub mod catalog;
pub mod cause;
pub mod line;
pub mod random;
pub mod trace;

pub use catalog::{CallChain, CallFrame, Scenario, CHAINS, EXCEPTION_HEADER, FALLBACK_CAUSES};
pub use cause::{match_cause, matched_cause, Cause, CauseMatcher, CauseOrigin, TAIL_WINDOW};
pub use line::LineKind;
pub use random::{seeded_rng, ScriptedRng, TraceRng};
pub use trace::{generate, Injections, StackTrace, StackTraceGenerator};
