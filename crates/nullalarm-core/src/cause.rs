//! Probable-cause matching.
//!
//! The matcher looks at the last [`TAIL_WINDOW`] lines of a trace and walks
//! them in trace order. The first line containing any rule token decides the
//! cause; within one line, rules are tried in table order. Tokens are plain
//! substrings, so `getValueOrDefault` still matches `getValue`.

use crate::catalog::FALLBACK_CAUSES;
use crate::random::TraceRng;
use crate::trace::StackTrace;
use serde::Serialize;
use std::fmt;

/// Number of trailing lines inspected.
pub const TAIL_WINDOW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CauseRule {
    pub tokens: &'static [&'static str],
    pub cause: &'static str,
}

pub static CAUSE_RULES: &[CauseRule] = &[
    CauseRule {
        tokens: &["getString", "readProperty", "getValue"],
        cause: "Attempt to invoke method on null object returned from getter",
    },
    CauseRule {
        tokens: &["checkNotNull", "validateInput"],
        cause: "Null check failed - parameter was null",
    },
    CauseRule {
        tokens: &["processUserData", "processOrder"],
        cause: "Business object was not properly initialized",
    },
    CauseRule {
        tokens: &["handleRequest"],
        cause: "Request body or parameter was null",
    },
    CauseRule {
        tokens: &["loadConfig"],
        cause: "Configuration file or property was missing",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CauseOrigin {
    /// A rule token was found in the tail window.
    Matched { token: &'static str },
    /// Nothing matched; picked from [`FALLBACK_CAUSES`].
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub text: &'static str,
    pub origin: CauseOrigin,
}

impl Cause {
    pub fn as_str(&self) -> &'static str {
        self.text
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, CauseOrigin::Fallback)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Deterministic half of matching: `None` when the tail window has no token.
pub fn matched_cause_in<S: AsRef<str>>(lines: &[S]) -> Option<Cause> {
    let start = lines.len().saturating_sub(TAIL_WINDOW);
    lines[start..].iter().find_map(|line| {
        let line = line.as_ref();
        CAUSE_RULES.iter().find_map(|rule| {
            rule.tokens
                .iter()
                .find(|token| line.contains(**token))
                .map(|&token| Cause {
                    text: rule.cause,
                    origin: CauseOrigin::Matched { token },
                })
        })
    })
}

pub fn matched_cause(trace: &StackTrace) -> Option<Cause> {
    matched_cause_in(trace.lines())
}

pub fn fallback_cause<R: TraceRng + ?Sized>(rng: &mut R) -> Cause {
    Cause {
        text: FALLBACK_CAUSES[rng.pick(FALLBACK_CAUSES.len())],
        origin: CauseOrigin::Fallback,
    }
}

/// Match against raw lines, falling back to a random generic cause.
pub fn match_lines<S: AsRef<str>, R: TraceRng + ?Sized>(lines: &[S], rng: &mut R) -> Cause {
    let cause = matched_cause_in(lines).unwrap_or_else(|| fallback_cause(rng));
    tracing::debug!(cause = cause.text, origin = ?cause.origin, "matched cause");
    cause
}

pub fn match_cause<R: TraceRng + ?Sized>(trace: &StackTrace, rng: &mut R) -> Cause {
    match_lines(trace.lines(), rng)
}

/// Owns the random source used by the fallback branch.
#[derive(Debug)]
pub struct CauseMatcher<R> {
    rng: R,
}

impl<R: TraceRng> CauseMatcher<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn match_trace(&mut self, trace: &StackTrace) -> Cause {
        match_cause(trace, &mut self.rng)
    }

    pub fn match_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Cause {
        match_lines(lines, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CHAINS;
    use crate::random::ScriptedRng;
    use crate::trace::{generate, generate_from};

    #[test]
    fn plain_first_chain_is_null_check() {
        let trace = generate(&mut ScriptedRng::new());
        let cause = match_cause(&trace, &mut ScriptedRng::new());
        assert_eq!(cause.text, "Null check failed - parameter was null");
        assert_eq!(
            cause.origin,
            CauseOrigin::Matched {
                token: "checkNotNull"
            }
        );
    }

    #[test]
    fn scan_order_beats_rule_order() {
        let lines = [
            "java.lang.NullPointerException",
            "at com.example.WebServer.handleRequest(WebServer.java:88)",
            "at com.example.PropertyUtils.getValue(PropertyUtils.java:19)",
        ];
        let cause = matched_cause_in(&lines).unwrap();
        assert_eq!(cause.text, "Request body or parameter was null");
    }

    #[test]
    fn rule_order_applies_within_one_line() {
        let lines = ["at Foo.loadConfig(getString)"];
        let cause = matched_cause_in(&lines).unwrap();
        assert_eq!(
            cause.text,
            "Attempt to invoke method on null object returned from getter"
        );
    }

    #[test]
    fn only_the_tail_window_counts() {
        let lines = [
            "java.lang.NullPointerException",
            "at com.example.ValidationUtil.checkNotNull(ValidationUtil.java:18)",
            "at a.B.c(B.java:1)",
            "at a.B.d(B.java:2)",
            "at a.B.e(B.java:3)",
            "at a.B.f(B.java:4)",
        ];
        assert_eq!(matched_cause_in(&lines), None);
    }

    #[test]
    fn substring_tokens_match_inside_longer_names() {
        let lines = ["at x.Y.getValueOrDefault(Y.java:3)"];
        assert!(matched_cause_in(&lines).is_some());
    }

    #[test]
    fn no_match_falls_back() {
        let lines = ["java.lang.NullPointerException", "at a.B.c(B.java:1)"];
        let cause = match_lines(&lines, &mut ScriptedRng::new().with_picks([2]));
        assert!(cause.is_fallback());
        assert_eq!(cause.text, FALLBACK_CAUSES[2]);
    }

    #[test]
    fn empty_input_falls_back() {
        let lines: [&str; 0] = [];
        let cause = match_lines(&lines, &mut ScriptedRng::new());
        assert_eq!(cause.text, FALLBACK_CAUSES[0]);
    }

    #[test]
    fn plain_chains_map_to_their_scenario_cause() {
        let expected = [
            "Null check failed - parameter was null",
            "Attempt to invoke method on null object returned from getter",
            "Attempt to invoke method on null object returned from getter",
            "Business object was not properly initialized",
        ];
        for (chain, want) in CHAINS.iter().zip(expected) {
            let trace = generate_from(chain, &mut ScriptedRng::new());
            assert_eq!(matched_cause(&trace).map(|c| c.text), Some(want));
        }
    }

    #[test]
    fn caused_by_tail_falls_back() {
        // reflection=false, thread_run=false, caused_by=true pushes every
        // chain frame except the outermost out of the window.
        let mut rng = ScriptedRng::new().with_draws([false, false, true]);
        let trace = generate(&mut rng);
        assert_eq!(matched_cause(&trace), None);
    }

    #[test]
    fn matcher_is_stable_for_matching_traces() {
        let trace = generate(&mut ScriptedRng::new());
        let mut matcher = CauseMatcher::new(rand::thread_rng());
        let first = matcher.match_trace(&trace);
        let second = matcher.match_trace(&trace);
        assert_eq!(first, second);
    }
}
