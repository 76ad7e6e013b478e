//! Process exit codes for `nullalarm`.

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // Terminal write failed or task crashed
pub const CONFIG_ERROR: i32 = 2; // Invalid flag value
pub const INTERRUPTED: i32 = 130; // Ctrl-C, same as a shell would report
