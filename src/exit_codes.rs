/// Exit codes for stylua-ls, following Ruff's convention
///
/// These exit codes let users and CI distinguish a clean run from a tool
/// failure.
/// Success - The requested operation completed
pub const SUCCESS: i32 = 0;

/// Tool error - Configuration error, missing binary, network failure, or
/// formatter failure
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
