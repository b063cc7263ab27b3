// Error types for the dance coach crate
//
// This module defines custom error types for recording processing and live
// coaching, providing structured error handling with stable error codes that
// batch reports and service callers can match on.

mod coach;
mod recording;

pub use coach::{log_coach_error, CoachError, CoachErrorCodes, GENERIC_SERVICE_FAILURE};
pub use recording::{log_recording_error, RecordingError, RecordingErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the CLI report and the service boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
