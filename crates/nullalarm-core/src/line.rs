use crate::catalog::EXCEPTION_HEADER;
use serde::Serialize;

/// Display category of a trace line; the renderer picks color and
/// indentation from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    ExceptionHeader,
    CausedBy,
    NativeFrame,
    Elision,
    Frame,
}

impl LineKind {
    /// First matching test wins: header, caused-by, native, elision, frame.
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim_start();
        if trimmed.contains(EXCEPTION_HEADER) {
            LineKind::ExceptionHeader
        } else if trimmed.contains("Caused by:") {
            LineKind::CausedBy
        } else if trimmed.starts_with("at java.base") {
            LineKind::NativeFrame
        } else if trimmed.contains("...") {
            LineKind::Elision
        } else {
            LineKind::Frame
        }
    }

    /// Headers sit flush left; everything else is a frame-level line.
    pub fn indented(self) -> bool {
        !matches!(self, LineKind::ExceptionHeader | LineKind::CausedBy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CAUSED_BY_BLOCK, REFLECTION_BLOCK, THREAD_RUN_LINE};

    #[test]
    fn classifies_decorative_blocks() {
        assert_eq!(
            LineKind::classify(EXCEPTION_HEADER),
            LineKind::ExceptionHeader
        );
        for line in REFLECTION_BLOCK {
            assert_eq!(LineKind::classify(line), LineKind::NativeFrame);
        }
        assert_eq!(LineKind::classify(THREAD_RUN_LINE), LineKind::NativeFrame);
        assert_eq!(LineKind::classify(CAUSED_BY_BLOCK[0]), LineKind::CausedBy);
        assert_eq!(LineKind::classify(CAUSED_BY_BLOCK[1]), LineKind::Frame);
        assert_eq!(LineKind::classify(CAUSED_BY_BLOCK[2]), LineKind::Elision);
    }

    #[test]
    fn leading_indent_is_ignored() {
        assert_eq!(
            LineKind::classify("    at java.base/java.lang.Thread.run(Thread.java:833)"),
            LineKind::NativeFrame
        );
    }

    #[test]
    fn indentation_by_kind() {
        assert!(!LineKind::ExceptionHeader.indented());
        assert!(!LineKind::CausedBy.indented());
        assert!(LineKind::Frame.indented());
        assert!(LineKind::Elision.indented());
    }
}
