//! ReferenceWindowSelector - picks the steadiest stretch of a recording
//!
//! The selector scores every frame transition, slides a fixed-length window
//! over the transition scores and keeps the window with the smallest sum.
//! The frames starting at that offset become the reference segment used as
//! the comparison baseline for live coaching.
//!
//! Selection is pure: it never touches the filesystem. Persisting the
//! segment is the caller's job (see [`super::batch`]).

use crate::error::RecordingError;
use crate::pose::{Frame, JointAngleSchema, Recording};

use super::scoring::transition_scores;
use super::window::{find_min_window, WindowSelection};

/// Frames chosen as the reference for one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSegment {
    pub name: String,
    /// Index of the first selected frame in the source recording
    pub start: usize,
    /// Cumulative instability of the winning window
    pub score: f64,
    pub frames: Vec<Frame>,
}

impl ReferenceSegment {
    /// 1-based start frame for human-facing reports.
    pub fn display_start(&self) -> usize {
        self.start + 1
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Window selection over a single recording.
///
/// # Example
/// ```ignore
/// let selector = ReferenceWindowSelector::new(25, JointAngleSchema::mediapipe());
/// let segment = selector.select(&recording)?;
/// println!("start frame {} score {:.2}", segment.display_start(), segment.score);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceWindowSelector {
    window_size: usize,
    schema: JointAngleSchema,
}

impl ReferenceWindowSelector {
    pub fn new(window_size: usize, schema: JointAngleSchema) -> Self {
        Self {
            window_size,
            schema,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn schema(&self) -> &JointAngleSchema {
        &self.schema
    }

    /// Transition scores plus the best window, without extracting frames.
    ///
    /// # Errors
    /// * `RecordingError::Empty` - no frames
    /// * `RecordingError::TooShort` - fewer frames than the window
    /// * `RecordingError::NoWindow` - the transition sequence cannot hold a window
    pub fn evaluate(&self, frames: &[Frame]) -> Result<(Vec<f64>, WindowSelection), RecordingError> {
        if frames.is_empty() {
            return Err(RecordingError::Empty);
        }
        if frames.len() < self.window_size {
            return Err(RecordingError::TooShort {
                frames: frames.len(),
                window_size: self.window_size,
            });
        }

        let scores = transition_scores(frames, &self.schema);
        match find_min_window(&scores, self.window_size) {
            Some(best) => Ok((scores, best)),
            None => Err(RecordingError::NoWindow {
                transitions: scores.len(),
                window_size: self.window_size,
            }),
        }
    }

    /// Select the reference segment for `recording`.
    pub fn select(&self, recording: &Recording) -> Result<ReferenceSegment, RecordingError> {
        let (scores, best) = self.evaluate(&recording.frames)?;
        tracing::debug!(
            "[Selector] {}: {} transitions, best window start={} score={:.2}",
            recording.name,
            scores.len(),
            best.start,
            best.score
        );

        let frames = recording.frames[best.start..best.start + self.window_size].to_vec();
        Ok(ReferenceSegment {
            name: recording.name.clone(),
            start: best.start,
            score: best.score,
            frames,
        })
    }
}

impl Default for ReferenceWindowSelector {
    fn default() -> Self {
        Self::new(25, JointAngleSchema::mediapipe())
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
