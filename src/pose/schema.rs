//! Named joint-angle schema
//!
//! Decouples scoring and comparison from any particular pose-detection
//! numbering. A schema lists the joints an angle is measured on (as landmark
//! triples), which of those angles matter when scoring motion, and which
//! landmarks matter when scoring visibility. [`JointAngleSchema::mediapipe`]
//! provides the 33-point BlazePose numbering used by the capture tooling.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::geometry::{joint_angle, Point2};
use super::types::Frame;

/// Penalty per important angle applied when no important landmark is visible.
pub const PENALTY_PER_ANGLE: f64 = 50.0;

/// MediaPipe pose landmark indices referenced by the default schema.
pub mod mediapipe {
    pub const NOSE: u32 = 0;
    pub const LEFT_EAR: u32 = 7;
    pub const RIGHT_EAR: u32 = 8;
    pub const LEFT_SHOULDER: u32 = 11;
    pub const RIGHT_SHOULDER: u32 = 12;
    pub const LEFT_ELBOW: u32 = 13;
    pub const RIGHT_ELBOW: u32 = 14;
    pub const LEFT_WRIST: u32 = 15;
    pub const RIGHT_WRIST: u32 = 16;
    pub const LEFT_HIP: u32 = 23;
    pub const RIGHT_HIP: u32 = 24;
    pub const LEFT_KNEE: u32 = 25;
    pub const RIGHT_KNEE: u32 = 26;
    pub const LEFT_ANKLE: u32 = 27;
    pub const RIGHT_ANKLE: u32 = 28;

    /// Total landmarks emitted per pose.
    pub const LANDMARK_COUNT: usize = 33;
}

static MEDIAPIPE_SCHEMA: Lazy<JointAngleSchema> = Lazy::new(build_mediapipe_schema);

/// Angle measured at `vertex` between `first` and `last`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointDefinition {
    pub name: String,
    pub first: u32,
    pub vertex: u32,
    pub last: u32,
}

impl JointDefinition {
    pub fn new(name: &str, first: u32, vertex: u32, last: u32) -> Self {
        Self {
            name: name.to_string(),
            first,
            vertex,
            last,
        }
    }

    /// Human-readable joint label, e.g. `left elbow` for `left_elbow_angle`.
    pub fn label(&self) -> String {
        self.name
            .strip_suffix("_angle")
            .unwrap_or(&self.name)
            .replace('_', " ")
    }

    fn landmark_ids(&self) -> [u32; 3] {
        [self.first, self.vertex, self.last]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointAngleSchema {
    /// Joints in their fixed reporting order
    pub joints: Vec<JointDefinition>,
    /// Angle names whose frame-to-frame change counts towards instability
    pub important_angles: Vec<String>,
    /// Landmarks whose visibility counts towards instability
    pub important_landmark_ids: BTreeSet<u32>,
    /// Overrides the default `important_angles.len() * 50`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_penalty_factor: Option<f64>,
}

impl Default for JointAngleSchema {
    fn default() -> Self {
        MEDIAPIPE_SCHEMA.clone()
    }
}

impl JointAngleSchema {
    /// Schema matching MediaPipe's 33-landmark pose model.
    pub fn mediapipe() -> Self {
        MEDIAPIPE_SCHEMA.clone()
    }

    /// Scale of the visibility penalty.
    ///
    /// Defaults to 50 per important angle so a fully unseen frame weighs the
    /// same as every tracked angle swinging 50 degrees.
    pub fn penalty_factor(&self) -> f64 {
        self.visibility_penalty_factor
            .unwrap_or(self.important_angles.len() as f64 * PENALTY_PER_ANGLE)
    }

    pub fn is_important_landmark(&self, id: u32) -> bool {
        self.important_landmark_ids.contains(&id)
    }

    /// Highest landmark index any joint refers to.
    pub fn max_landmark_id(&self) -> Option<u32> {
        self.joints
            .iter()
            .flat_map(|joint| joint.landmark_ids())
            .max()
    }

    /// Check invariants after loading a schema from configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.important_angles.is_empty() {
            return Err("important_angles must not be empty".to_string());
        }
        let mut seen = BTreeSet::new();
        for joint in &self.joints {
            if joint.name.trim().is_empty() {
                return Err("joint name cannot be empty".to_string());
            }
            if !seen.insert(joint.name.as_str()) {
                return Err(format!("duplicate joint name: {}", joint.name));
            }
        }
        if let Some(factor) = self.visibility_penalty_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(format!("visibility_penalty_factor {} must be >= 0", factor));
            }
        }
        Ok(())
    }

    /// Angles for every joint of a pose indexed by landmark number.
    ///
    /// Joints whose landmarks are missing or degenerate map to `None`.
    pub fn measure<P: Point2>(&self, pose: &[P]) -> Vec<(&JointDefinition, Option<f64>)> {
        self.measure_gated(pose, None)
    }

    /// Like [`measure`](Self::measure), but a joint is left unmeasured when
    /// any of its landmarks reports a visibility below `min_visibility`.
    /// Landmarks without a visibility value pass.
    pub fn measure_visible<P: Point2>(
        &self,
        pose: &[P],
        min_visibility: f64,
    ) -> Vec<(&JointDefinition, Option<f64>)> {
        self.measure_gated(pose, Some(min_visibility))
    }

    fn measure_gated<P: Point2>(
        &self,
        pose: &[P],
        min_visibility: Option<f64>,
    ) -> Vec<(&JointDefinition, Option<f64>)> {
        self.joints
            .iter()
            .map(|joint| {
                let points = joint.landmark_ids().map(|id| pose.get(id as usize));
                let hidden = min_visibility.is_some_and(|min| {
                    points
                        .iter()
                        .flatten()
                        .any(|point| point.visibility().is_some_and(|v| v < min))
                });
                let angle = if hidden {
                    None
                } else {
                    joint_angle(points[0], points[1], points[2])
                };
                (joint, angle)
            })
            .collect()
    }

    /// Fill `frame.angles` from its landmarks.
    ///
    /// Previously stored angles for the schema's joints are replaced; joints
    /// that cannot be measured are removed rather than stored as zero.
    pub fn annotate(&self, frame: &mut Frame) {
        let measured: BTreeMap<&str, Option<f64>> = self
            .joints
            .iter()
            .map(|joint| {
                let angle = joint_angle(
                    frame.landmark(joint.first),
                    frame.landmark(joint.vertex),
                    frame.landmark(joint.last),
                );
                (joint.name.as_str(), angle)
            })
            .collect();

        for (name, angle) in measured {
            match angle {
                Some(degrees) => {
                    frame.set_angle(name, degrees);
                }
                None => {
                    frame.angles.remove(name);
                }
            }
        }
    }
}

fn build_mediapipe_schema() -> JointAngleSchema {
    use mediapipe::*;

    let joints = vec![
        JointDefinition::new("left_elbow_angle", LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
        JointDefinition::new("right_elbow_angle", RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
        JointDefinition::new("left_shoulder_angle", LEFT_ELBOW, LEFT_SHOULDER, LEFT_HIP),
        JointDefinition::new("right_shoulder_angle", RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_HIP),
        JointDefinition::new("left_hip_angle", LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE),
        JointDefinition::new("right_hip_angle", RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE),
        JointDefinition::new("left_knee_angle", LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
        JointDefinition::new("right_knee_angle", RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
    ];
    let important_angles = joints.iter().map(|joint| joint.name.clone()).collect();
    let important_landmark_ids = [
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_WRIST,
        RIGHT_WRIST,
        LEFT_HIP,
        RIGHT_HIP,
        LEFT_KNEE,
        RIGHT_KNEE,
        LEFT_ANKLE,
        RIGHT_ANKLE,
        NOSE,
        LEFT_EAR,
        RIGHT_EAR,
    ]
    .into_iter()
    .collect();

    JointAngleSchema {
        joints,
        important_angles,
        important_landmark_ids,
        visibility_penalty_factor: None,
    }
}
