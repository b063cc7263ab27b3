//! Joint angle calculation using the dot product
//!
//! The angle at a joint is measured between the vectors running from the
//! vertex landmark to its two neighbours. Missing or degenerate input yields
//! `None` instead of an error so callers can skip the term.

use super::types::{Landmark, PosePoint};

/// Anything that may expose a 2-D position.
pub trait Point2 {
    /// Position as `(x, y)`, or `None` when a coordinate is missing.
    fn xy(&self) -> Option<(f64, f64)>;

    /// Detection confidence, when the source reports one.
    fn visibility(&self) -> Option<f64> {
        None
    }
}

impl Point2 for Landmark {
    fn xy(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    fn visibility(&self) -> Option<f64> {
        self.visibility
    }
}

impl Point2 for PosePoint {
    fn xy(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    fn visibility(&self) -> Option<f64> {
        self.visibility
    }
}

impl Point2 for (f64, f64) {
    fn xy(&self) -> Option<(f64, f64)> {
        Some(*self)
    }
}

impl Point2 for serde_json::Value {
    fn xy(&self) -> Option<(f64, f64)> {
        Some((self.get("x")?.as_f64()?, self.get("y")?.as_f64()?))
    }

    fn visibility(&self) -> Option<f64> {
        self.get("visibility")?.as_f64()
    }
}

/// Angle in degrees at `vertex`, formed by `first` and `last`.
///
/// Returns `None` when any point is absent, lacks a coordinate, coincides
/// with the vertex, or carries non-finite values. The cosine is clamped to
/// `[-1, 1]` before `acos` to absorb rounding overshoot.
pub fn joint_angle<P: Point2 + ?Sized>(
    first: Option<&P>,
    vertex: Option<&P>,
    last: Option<&P>,
) -> Option<f64> {
    let (x1, y1) = first?.xy()?;
    let (x2, y2) = vertex?.xy()?;
    let (x3, y3) = last?.xy()?;

    let v1 = (x1 - x2, y1 - y2);
    let v2 = (x3 - x2, y3 - y2);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }

    let degrees = (dot / (mag1 * mag2)).clamp(-1.0, 1.0).acos().to_degrees();
    degrees.is_finite().then_some(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Option<f64> {
        joint_angle(Some(&a), Some(&b), Some(&c))
    }

    #[test]
    fn test_right_angle() {
        let result = angle((1.0, 0.0), (0.0, 0.0), (0.0, 1.0)).unwrap();
        assert!((result - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_limb() {
        let result = angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0)).unwrap();
        assert!((result - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_folded_limb_is_zero() {
        let result = angle((1.0, 0.0), (0.0, 0.0), (2.0, 0.0)).unwrap();
        assert!(result.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_points() {
        for p in [(0.0, 0.0), (0.3, 0.7), (-2.0, 5.5)] {
            assert_eq!(angle(p, p, p), None);
        }
        assert_eq!(angle((0.2, 0.2), (0.2, 0.2), (0.9, 0.1)), None);
    }

    #[test]
    fn test_symmetric_in_outer_points() {
        let cases = [
            ((0.1, 0.9), (0.4, 0.5), (0.8, 0.7)),
            ((1.0, 2.0), (-1.0, 0.5), (3.0, -4.0)),
            ((0.33, 0.12), (0.5, 0.5), (0.51, 0.98)),
        ];
        for (a, b, c) in cases {
            let forward = angle(a, b, c).unwrap();
            let backward = angle(c, b, a).unwrap();
            assert!((forward - backward).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_point() {
        let p = (0.0, 0.0);
        assert_eq!(joint_angle(None, Some(&p), Some(&p)), None);
        assert_eq!(joint_angle(Some(&p), None, Some(&p)), None);
        assert_eq!(joint_angle::<(f64, f64)>(Some(&p), Some(&p), None), None);
    }

    #[test]
    fn test_malformed_records() {
        let good = json!({"x": 1.0, "y": 0.0});
        let vertex = json!({"x": 0.0, "y": 0.0});
        let no_y = json!({"x": 0.0});
        let not_number = json!({"x": "a", "y": 1.0});

        assert!(joint_angle(Some(&good), Some(&vertex), Some(&json!({"x": 0.0, "y": 1.0}))).is_some());
        assert_eq!(joint_angle(Some(&good), Some(&vertex), Some(&no_y)), None);
        assert_eq!(joint_angle(Some(&not_number), Some(&vertex), Some(&good)), None);
        assert_eq!(joint_angle(Some(&json!(null)), Some(&vertex), Some(&good)), None);
    }

    #[test]
    fn test_pose_point_missing_coordinate() {
        let a = PosePoint::at(1.0, 0.0);
        let b = PosePoint::at(0.0, 0.0);
        let c = PosePoint {
            x: Some(0.0),
            y: None,
            visibility: Some(1.0),
        };
        assert_eq!(joint_angle(Some(&a), Some(&b), Some(&c)), None);
    }

    #[test]
    fn test_landmark_missing_coordinate() {
        let a = Landmark::new(11, 1.0, 0.0);
        let b = Landmark::new(13, 0.0, 0.0);
        let c = Landmark {
            x: None,
            ..Landmark::new(15, 0.0, 1.0)
        };
        assert!(joint_angle(Some(&a), Some(&b), Some(&b.clone())).is_none());
        assert_eq!(joint_angle(Some(&a), Some(&b), Some(&c)), None);
        assert_eq!(c.visibility(), None);
        assert_eq!(a.with_visibility(0.4).visibility(), Some(0.4));
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(angle((f64::NAN, 0.0), (0.0, 0.0), (0.0, 1.0)), None);
    }
}
