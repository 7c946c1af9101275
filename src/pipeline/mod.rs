//! Shared output plumbing for the CLI command handlers.

mod output;
mod report_stage;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use report_stage::{output_report, render_report, ReportPayload};

/// Process exit codes
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
