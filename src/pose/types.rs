//! Frame and landmark records shared by recordings and live poses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tracked body point in normalized image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: u32,
    /// Capture tools may drop coordinates for an untracked joint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Confidence in [0, 1] that the joint was observed in this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x: Some(x),
            y: Some(y),
            z: None,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

/// One captured frame of a recording.
///
/// Keys other than `angles` and `landmarks` are carried through untouched so
/// an extracted segment keeps whatever the capture tool wrote. An angle the
/// capture tool could not measure may be stored as `null`; it is kept as
/// `None` so the segment writes it back the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub angles: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Frame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            landmarks,
            ..Self::default()
        }
    }

    /// Look up a landmark by its identifier.
    pub fn landmark(&self, id: u32) -> Option<&Landmark> {
        self.landmarks.iter().find(|landmark| landmark.id == id)
    }

    /// Angle in degrees, or `None` when absent or stored as `null`.
    pub fn angle(&self, name: &str) -> Option<f64> {
        self.angles.get(name).copied().flatten()
    }

    pub fn set_angle(&mut self, name: impl Into<String>, degrees: f64) {
        self.angles.insert(name.into(), Some(degrees));
    }
}

/// A full capture of one performance, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Recording name with the input suffix stripped
    pub name: String,
    pub frames: Vec<Frame>,
}

impl Recording {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Landmark record submitted by the live comparison flow.
///
/// Poses arrive as an array indexed by landmark number, and any key may be
/// missing. A point without both coordinates yields no angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PosePoint {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl PosePoint {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            visibility: None,
        }
    }
}
