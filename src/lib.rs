// Dance Coach Core - reference pose extraction and pose feedback
// Offline reference-window selection over recorded landmark data plus the
// joint-angle comparison behind live coaching feedback

// Module declarations
pub mod coach;
pub mod config;
pub mod error;
pub mod pose;
pub mod selection;

// Re-exports for convenience
pub use config::{AppConfig, ComparisonConfig, SelectionConfig};
pub use error::{CoachError, ErrorCode, RecordingError};
pub use pose::{joint_angle, Frame, JointAngleSchema, Landmark, PosePoint, Recording};
pub use selection::{process_directory, BatchReport, ReferenceSegment, ReferenceWindowSelector};
