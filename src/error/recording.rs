// Recording error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::path::PathBuf;

/// Recording error code constants
///
/// Error code range: 3001-3006
pub struct RecordingErrorCodes {}

impl RecordingErrorCodes {
    /// Recording file could not be read from disk
    pub const UNREADABLE: i32 = 3001;

    /// Recording content is not a valid frame array
    pub const MALFORMED: i32 = 3002;

    /// Recording contains no frames
    pub const EMPTY: i32 = 3003;

    /// Recording has fewer frames than the window size
    pub const TOO_SHORT: i32 = 3004;

    /// No candidate window fits the transition sequence
    pub const NO_WINDOW: i32 = 3005;

    /// Reference segment could not be written
    pub const WRITE_FAILED: i32 = 3006;
}

/// Log a recording error with structured context
///
/// Logs the error code, the component and the message alongside the
/// caller-supplied context (usually the recording name).
pub fn log_recording_error(err: &RecordingError, context: &str) {
    error!(
        "Recording error in {}: code={}, component=ReferenceWindowSelector, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while loading or selecting from a single recording
///
/// Every variant is recoverable at the batch level: the recording is
/// skipped and processing continues with the next one.
///
/// Error code ranges: 3001-3006
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingError {
    /// Recording file missing or unreadable
    Unreadable { path: PathBuf, reason: String },

    /// Recording content could not be parsed
    Malformed { path: PathBuf, reason: String },

    /// Recording has no frames
    Empty,

    /// Recording is shorter than the configured window
    TooShort { frames: usize, window_size: usize },

    /// No window of the configured size fits the transition sequence
    NoWindow { transitions: usize, window_size: usize },

    /// Output segment could not be persisted
    WriteFailed { path: PathBuf, reason: String },
}

impl RecordingError {
    /// Malformed or missing persisted data.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            RecordingError::Unreadable { .. } | RecordingError::Malformed { .. }
        )
    }

    /// Not enough frames to pick a reference window.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            RecordingError::Empty | RecordingError::TooShort { .. } | RecordingError::NoWindow { .. }
        )
    }
}

impl ErrorCode for RecordingError {
    fn code(&self) -> i32 {
        match self {
            RecordingError::Unreadable { .. } => RecordingErrorCodes::UNREADABLE,
            RecordingError::Malformed { .. } => RecordingErrorCodes::MALFORMED,
            RecordingError::Empty => RecordingErrorCodes::EMPTY,
            RecordingError::TooShort { .. } => RecordingErrorCodes::TOO_SHORT,
            RecordingError::NoWindow { .. } => RecordingErrorCodes::NO_WINDOW,
            RecordingError::WriteFailed { .. } => RecordingErrorCodes::WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            RecordingError::Unreadable { path, reason } => {
                format!("Cannot read {}: {}", path.display(), reason)
            }
            RecordingError::Malformed { path, reason } => {
                format!("Invalid recording JSON in {}: {}", path.display(), reason)
            }
            RecordingError::Empty => "Recording contains no frames".to_string(),
            RecordingError::TooShort {
                frames,
                window_size,
            } => format!(
                "Recording has {} frames, fewer than window size {}",
                frames, window_size
            ),
            RecordingError::NoWindow {
                transitions,
                window_size,
            } => format!(
                "No ideal segment found: {} transitions cannot hold a window of {}",
                transitions, window_size
            ),
            RecordingError::WriteFailed { path, reason } => {
                format!("Cannot write {}: {}", path.display(), reason)
            }
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordingError (code {}): {}",
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for RecordingError {}
