//! Live pose comparison against a reference pose
//!
//! Both poses arrive as landmark arrays in the schema's numbering. Every
//! schema joint is measured on both; the joint that differs most is the one
//! reported for correction, unless all joints are within the configured
//! threshold.

use serde::Serialize;

use crate::config::ComparisonConfig;
use crate::error::CoachError;
use crate::pose::{JointAngleSchema, JointDefinition, Point2};

/// Outcome of comparing a user's pose with the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum PoseAssessment {
    /// Every comparable joint is within the threshold
    Perfect,
    /// The joint with the largest angle difference
    Correction {
        joint: String,
        label: String,
        user_angle: f64,
        reference_angle: f64,
        difference: f64,
    },
}

/// Per-joint difference where both poses produced an angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointDifference {
    pub joint: String,
    pub label: String,
    pub user_angle: f64,
    pub reference_angle: f64,
    pub difference: f64,
}

fn validate_pose<P>(pose: &[P], role: &str, config: &ComparisonConfig) -> Result<(), CoachError> {
    if pose.len() < config.min_landmarks {
        return Err(CoachError::InvalidPose {
            reason: format!(
                "{} pose has {} landmarks, need at least {}",
                role,
                pose.len(),
                config.min_landmarks
            ),
        });
    }
    Ok(())
}

/// Differences for joints measurable in both poses, in schema order.
pub fn joint_differences<P: Point2>(
    user: &[P],
    reference: &[P],
    schema: &JointAngleSchema,
) -> Vec<JointDifference> {
    pair_differences(schema.measure(user), schema.measure(reference))
}

fn pair_differences(
    user: Vec<(&JointDefinition, Option<f64>)>,
    reference: Vec<(&JointDefinition, Option<f64>)>,
) -> Vec<JointDifference> {
    user.into_iter()
        .zip(reference)
        .filter_map(|((joint, user_angle), (_, reference_angle))| {
            let (user_angle, reference_angle) = (user_angle?, reference_angle?);
            Some(JointDifference {
                joint: joint.name.clone(),
                label: joint.label(),
                user_angle,
                reference_angle,
                difference: (user_angle - reference_angle).abs(),
            })
        })
        .collect()
}

/// Compare `user` against `reference`.
///
/// # Errors
/// `CoachError::InvalidPose` when either pose has fewer than
/// `config.min_landmarks` records.
pub fn compare_poses<P: Point2>(
    user: &[P],
    reference: &[P],
    schema: &JointAngleSchema,
    config: &ComparisonConfig,
) -> Result<PoseAssessment, CoachError> {
    validate_pose(user, "user", config)?;
    validate_pose(reference, "reference", config)?;

    let differences = joint_differences(user, reference, schema);
    if differences
        .iter()
        .all(|diff| diff.difference < config.perfect_threshold_deg)
    {
        return Ok(PoseAssessment::Perfect);
    }

    // Strictly greater keeps the first joint on ties
    let mut worst = &differences[0];
    for diff in &differences[1..] {
        if diff.difference > worst.difference {
            worst = diff;
        }
    }

    Ok(PoseAssessment::Correction {
        joint: worst.joint.clone(),
        label: worst.label.clone(),
        user_angle: worst.user_angle,
        reference_angle: worst.reference_angle,
        difference: worst.difference,
    })
}

/// Similarity percentage in `0..=100` over joints measurable in both poses.
///
/// Joints with a landmark below `config.min_visibility` in either pose are
/// left out. Each remaining joint contributes its difference out of a
/// maximum of 180 degrees. Returns 0 when no joint can be compared.
pub fn pose_similarity<P: Point2>(
    user: &[P],
    reference: &[P],
    schema: &JointAngleSchema,
    config: &ComparisonConfig,
) -> u8 {
    let differences = pair_differences(
        schema.measure_visible(user, config.min_visibility),
        schema.measure_visible(reference, config.min_visibility),
    );
    if differences.is_empty() {
        return 0;
    }
    let total: f64 = differences.iter().map(|diff| diff.difference).sum();
    let max_total = differences.len() as f64 * 180.0;
    let similarity = (1.0 - total / max_total).clamp(0.0, 1.0);
    (similarity * 100.0).floor() as u8
}
