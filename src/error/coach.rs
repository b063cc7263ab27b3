// Coaching error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Message shown to users when an upstream collaborator fails.
pub const GENERIC_SERVICE_FAILURE: &str = "Feedback is unavailable right now. Please try again.";

/// Coaching error code constants
///
/// Error code range: 4001-4003
pub struct CoachErrorCodes {}

impl CoachErrorCodes {
    /// Submitted pose is missing or has too few landmarks
    pub const INVALID_POSE: i32 = 4001;

    /// Required request field is empty
    pub const MISSING_FIELD: i32 = 4002;

    /// Text-generation or retrieval collaborator failed
    pub const EXTERNAL_SERVICE: i32 = 4003;
}

/// Log a coaching error with structured context
pub fn log_coach_error(err: &CoachError, context: &str) {
    error!(
        "Coach error in {}: code={}, component=Coach, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors surfaced at the live coaching boundary
#[derive(Debug, Clone, PartialEq)]
pub enum CoachError {
    /// Pose has fewer landmarks than required
    InvalidPose { reason: String },

    /// Required input field was empty
    MissingField { field: &'static str },

    /// Collaborator service failed; details are for logs only
    ExternalService { service: &'static str, reason: String },
}

impl CoachError {
    /// Text safe to return to an end user.
    ///
    /// Service failures collapse to [`GENERIC_SERVICE_FAILURE`]; input errors
    /// keep their specific message.
    pub fn user_message(&self) -> String {
        match self {
            CoachError::ExternalService { .. } => GENERIC_SERVICE_FAILURE.to_string(),
            other => other.message(),
        }
    }
}

impl ErrorCode for CoachError {
    fn code(&self) -> i32 {
        match self {
            CoachError::InvalidPose { .. } => CoachErrorCodes::INVALID_POSE,
            CoachError::MissingField { .. } => CoachErrorCodes::MISSING_FIELD,
            CoachError::ExternalService { .. } => CoachErrorCodes::EXTERNAL_SERVICE,
        }
    }

    fn message(&self) -> String {
        match self {
            CoachError::InvalidPose { reason } => format!("Missing or invalid pose data: {}", reason),
            CoachError::MissingField { field } => format!("Field '{}' is required", field),
            CoachError::ExternalService { service, reason } => {
                format!("{} service failed: {}", service, reason)
            }
        }
    }
}

impl fmt::Display for CoachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoachError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for CoachError {}
