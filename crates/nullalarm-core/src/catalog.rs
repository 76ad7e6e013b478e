//! Static frame catalog.
//!
//! Every line a generated trace can contain comes from this module: the four
//! hand-authored call chains plus the decorative blocks that may be injected
//! around them. Nothing here is built per call.

use serde::Serialize;
use std::fmt;

/// Identifier printed as the first line of every trace.
pub const EXCEPTION_HEADER: &str = "java.lang.NullPointerException";

/// Source file extension used when rendering a frame location.
pub const SOURCE_EXT: &str = "java";

/// Probability of injecting [`REFLECTION_BLOCK`] after the second frame.
pub const REFLECTION_PROBABILITY: f64 = 0.3;
/// Probability of appending [`THREAD_RUN_LINE`].
pub const THREAD_RUN_PROBABILITY: f64 = 0.2;
/// Probability of appending [`CAUSED_BY_BLOCK`].
pub const CAUSED_BY_PROBABILITY: f64 = 0.1;

/// Reversed frame index after which the reflection block may be injected.
pub const REFLECTION_INJECTION_INDEX: usize = 1;

pub const REFLECTION_BLOCK: [&str; 3] = [
    "at java.base/jdk.internal.reflect.NativeMethodAccessorImpl.invoke0(Native Method)",
    "at java.base/jdk.internal.reflect.NativeMethodAccessorImpl.invoke(NativeMethodAccessorImpl.java:77)",
    "at java.base/jdk.internal.reflect.DelegatingMethodAccessorImpl.invoke(DelegatingMethodAccessorImpl.java:43)",
];

pub const THREAD_RUN_LINE: &str = "at java.base/java.lang.Thread.run(Thread.java:833)";

pub const CAUSED_BY_BLOCK: [&str; 3] = [
    "Caused by: java.lang.IllegalArgumentException: Source must not be null",
    "at org.springframework.util.Assert.notNull(Assert.java:201)",
    "... 4 more",
];

/// Generic causes used when nothing in the tail window matches a rule.
pub const FALLBACK_CAUSES: [&str; 4] = [
    "Attempt to invoke virtual method on null object reference",
    "Trying to access field of null object",
    "Method call on uninitialized object",
    "Array element access on null array",
];

/// The fictional execution path a chain models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    DataProcessing,
    WebRequest,
    FileConfig,
    BusinessLogic,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::DataProcessing => "data-processing",
            Scenario::WebRequest => "web-request",
            Scenario::FileConfig => "file-config",
            Scenario::BusinessLogic => "business-logic",
        };
        f.write_str(name)
    }
}

/// One synthetic stack frame: declaring type, method and source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallFrame {
    pub owner: &'static str,
    pub method: &'static str,
    pub line: u32,
}

impl CallFrame {
    pub const fn new(owner: &'static str, method: &'static str, line: u32) -> Self {
        Self {
            owner,
            method,
            line,
        }
    }

    /// Last dot-separated component of the owner, e.g. `Main` for `com.example.Main`.
    pub fn simple_owner(&self) -> &'static str {
        self.owner.rsplit('.').next().unwrap_or(self.owner)
    }

    /// `at <owner>.<method>(<simple>.java:<line>)`
    pub fn render(&self) -> String {
        format!(
            "at {}.{}({}.{}:{})",
            self.owner,
            self.method,
            self.simple_owner(),
            SOURCE_EXT,
            self.line
        )
    }
}

/// Ordered frames, outermost (entry point) first and fault site last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallChain {
    pub scenario: Scenario,
    pub frames: [CallFrame; 4],
}

impl CallChain {
    /// Frames innermost first, the order a trace prints them in.
    pub fn innermost_first(&self) -> impl Iterator<Item = &CallFrame> {
        self.frames.iter().rev()
    }
}

pub static CHAINS: [CallChain; 4] = [
    CallChain {
        scenario: Scenario::DataProcessing,
        frames: [
            CallFrame::new("com.example.Main", "main", 15),
            CallFrame::new("com.example.DataProcessor", "processUserData", 42),
            CallFrame::new("com.example.DataProcessor", "validateInput", 27),
            CallFrame::new("com.example.ValidationUtil", "checkNotNull", 18),
        ],
    },
    CallChain {
        scenario: Scenario::WebRequest,
        frames: [
            CallFrame::new("com.example.Main", "main", 10),
            CallFrame::new("com.example.WebServer", "handleRequest", 88),
            CallFrame::new("com.example.RequestHandler", "parseRequestBody", 33),
            CallFrame::new("com.example.JsonParser", "getString", 56),
        ],
    },
    CallChain {
        scenario: Scenario::FileConfig,
        frames: [
            CallFrame::new("com.example.Main", "main", 22),
            CallFrame::new("com.example.FileManager", "loadConfig", 47),
            CallFrame::new("com.example.ConfigReader", "readProperty", 31),
            CallFrame::new("com.example.PropertyUtils", "getValue", 19),
        ],
    },
    CallChain {
        scenario: Scenario::BusinessLogic,
        frames: [
            CallFrame::new("com.example.Main", "main", 18),
            CallFrame::new("com.example.OrderService", "processOrder", 65),
            CallFrame::new("com.example.OrderService", "calculateTotal", 41),
            CallFrame::new("com.example.PriceCalculator", "getItemPrice", 29),
        ],
    },
];
