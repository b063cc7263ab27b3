//! Transition instability scoring
//!
//! Each adjacent frame pair gets a score combining how far the important
//! joint angles moved and how poorly the important landmarks were observed
//! in the departure frame. Lower is steadier.

use crate::pose::{Frame, JointAngleSchema};

/// Mean visibility of the schema's important landmarks in `frame`.
///
/// Frames without any important landmark score 0 (worst case). A landmark
/// with no recorded visibility counts as unseen.
pub fn average_visibility(frame: &Frame, schema: &JointAngleSchema) -> f64 {
    let (total, count) = frame
        .landmarks
        .iter()
        .filter(|landmark| schema.is_important_landmark(landmark.id))
        .fold((0.0, 0usize), |(total, count), landmark| {
            (total + landmark.visibility.unwrap_or(0.0), count + 1)
        });

    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// Sum of absolute angle changes between two frames.
///
/// Angles missing from either frame are skipped, not treated as zero.
pub fn angle_delta_sum(current: &Frame, next: &Frame, schema: &JointAngleSchema) -> f64 {
    schema
        .important_angles
        .iter()
        .filter_map(|name| Some((current.angle(name)? - next.angle(name)?).abs()))
        .sum()
}

/// Instability of the transition `current -> next`.
///
/// Only the departure frame's visibility is penalized.
pub fn transition_score(current: &Frame, next: &Frame, schema: &JointAngleSchema) -> f64 {
    let visibility_penalty = (1.0 - average_visibility(current, schema)) * schema.penalty_factor();
    angle_delta_sum(current, next, schema) + visibility_penalty
}

/// Scores for every adjacent pair; one shorter than `frames`.
pub fn transition_scores(frames: &[Frame], schema: &JointAngleSchema) -> Vec<f64> {
    frames
        .windows(2)
        .map(|pair| transition_score(&pair[0], &pair[1], schema))
        .collect()
}
