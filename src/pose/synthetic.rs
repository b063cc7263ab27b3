//! Deterministic synthetic recordings for demos and tests.
//!
//! A synthetic recording holds a standing skeleton that jitters randomly
//! everywhere except inside one calm stretch, where it is perfectly still
//! and fully visible. Angles are derived from the landmarks through the
//! schema, the same way capture tooling annotates real recordings.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::schema::{mediapipe, JointAngleSchema};
use super::types::{Frame, Landmark};

/// Parameters of a synthetic recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub frames: usize,
    /// First frame of the still stretch
    pub calm_start: usize,
    /// Length of the still stretch in frames
    pub calm_frames: usize,
    /// Maximum landmark displacement per axis outside the calm stretch
    pub jitter: f64,
    pub seed: u64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            frames: 60,
            calm_start: 20,
            calm_frames: 26,
            jitter: 0.02,
            seed: 0x5A5A_FFF0,
        }
    }
}

impl SyntheticSpec {
    pub fn validate(&self) -> Result<(), String> {
        if self.frames == 0 {
            return Err("frame count must be greater than zero".to_string());
        }
        if self.calm_start + self.calm_frames > self.frames {
            return Err(format!(
                "calm stretch {}..{} exceeds {} frames",
                self.calm_start,
                self.calm_start + self.calm_frames,
                self.frames
            ));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(format!("jitter {} must be >= 0", self.jitter));
        }
        Ok(())
    }

    fn is_calm(&self, index: usize) -> bool {
        (self.calm_start..self.calm_start + self.calm_frames).contains(&index)
    }
}

fn base_position(id: u32) -> (f64, f64) {
    use mediapipe::*;
    match id {
        NOSE => (0.5, 0.12),
        LEFT_EAR => (0.54, 0.11),
        RIGHT_EAR => (0.46, 0.11),
        LEFT_SHOULDER => (0.6, 0.3),
        RIGHT_SHOULDER => (0.4, 0.3),
        LEFT_ELBOW => (0.66, 0.42),
        RIGHT_ELBOW => (0.34, 0.42),
        LEFT_WRIST => (0.7, 0.32),
        RIGHT_WRIST => (0.3, 0.32),
        LEFT_HIP => (0.57, 0.6),
        RIGHT_HIP => (0.43, 0.6),
        LEFT_KNEE => (0.6, 0.75),
        RIGHT_KNEE => (0.4, 0.75),
        LEFT_ANKLE => (0.58, 0.92),
        RIGHT_ANKLE => (0.42, 0.92),
        other => (0.5, 0.1 + other as f64 * 0.01),
    }
}

/// Generate the frames described by `spec`.
pub fn synthesize(spec: &SyntheticSpec, schema: &JointAngleSchema) -> Result<Vec<Frame>, String> {
    spec.validate()?;
    let mut rng = StdRng::seed_from_u64(spec.seed);

    let frames = (0..spec.frames)
        .map(|index| {
            let calm = spec.is_calm(index);
            let landmarks = (0..mediapipe::LANDMARK_COUNT as u32)
                .map(|id| {
                    let (x, y) = base_position(id);
                    if calm {
                        Landmark::new(id, x, y).with_visibility(1.0)
                    } else {
                        let dx = rng.gen_range(-spec.jitter..=spec.jitter);
                        let dy = rng.gen_range(-spec.jitter..=spec.jitter);
                        let visibility = rng.gen_range(0.6..0.95);
                        Landmark::new(id, x + dx, y + dy).with_visibility(visibility)
                    }
                })
                .collect();
            let mut frame = Frame::new(landmarks);
            schema.annotate(&mut frame);
            frame
        })
        .collect();

    Ok(frames)
}
