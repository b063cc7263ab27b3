//! Pose data: landmark records, joint geometry and the joint-angle schema.

pub mod geometry;
pub mod io;
pub mod schema;
pub mod synthetic;
pub mod types;

pub use geometry::{joint_angle, Point2};
pub use io::{read_frames, recording_name, write_segment};
pub use schema::{JointAngleSchema, JointDefinition};
pub use synthetic::{synthesize, SyntheticSpec};
pub use types::{Frame, Landmark, PosePoint, Recording};
