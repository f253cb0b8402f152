//! Exit codes.

/// Exit codes for the fiche application.
///
/// - 0: Success (the run completed, even if a side or an artifact failed)
/// - 1: General error (the run could not start)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the run completed.
    Success = 0,
    /// General error: an unexpected error occurred before scanning.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FI000",
            Self::GeneralError => "FI001",
        }
    }
}
