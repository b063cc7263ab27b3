use super::*;
use crate::pose::schema::mediapipe;
use crate::pose::{JointDefinition, Landmark};
use std::collections::BTreeSet;

const ELBOW: &str = "left_elbow_angle";

/// Schema scoring a single angle and a single landmark (the nose)
fn single_joint_schema() -> JointAngleSchema {
    JointAngleSchema {
        joints: vec![JointDefinition::new(
            ELBOW,
            mediapipe::LEFT_SHOULDER,
            mediapipe::LEFT_ELBOW,
            mediapipe::LEFT_WRIST,
        )],
        important_angles: vec![ELBOW.to_string()],
        important_landmark_ids: BTreeSet::from([mediapipe::NOSE]),
        visibility_penalty_factor: None,
    }
}

/// Frame with one elbow angle and every landmark in `ids` at `visibility`
fn create_frame(elbow: f64, ids: &[u32], visibility: f64) -> Frame {
    let landmarks = ids
        .iter()
        .map(|id| Landmark::new(*id, 0.5, 0.5).with_visibility(visibility))
        .collect();
    let mut frame = Frame::new(landmarks);
    frame.set_angle(ELBOW, elbow);
    frame
}

/// Recording whose consecutive elbow deltas equal `transitions`
fn recording_from_transitions(transitions: &[f64]) -> Recording {
    let mut angle = 90.0;
    let mut frames = vec![create_frame(angle, &[mediapipe::NOSE], 1.0)];
    for delta in transitions {
        angle += delta;
        frames.push(create_frame(angle, &[mediapipe::NOSE], 1.0));
    }
    Recording::new("synthetic", frames)
}

fn important_ids() -> Vec<u32> {
    JointAngleSchema::mediapipe()
        .important_landmark_ids
        .into_iter()
        .collect()
}

#[test]
fn test_empty_recording_skipped() {
    let selector = ReferenceWindowSelector::default();
    let err = selector.select(&Recording::new("empty", Vec::new())).unwrap_err();
    assert_eq!(err, RecordingError::Empty);
}

#[test]
fn test_short_recording_skipped() {
    let selector = ReferenceWindowSelector::default();
    let recording = recording_from_transitions(&[1.0; 9]);
    let err = selector.select(&recording).unwrap_err();
    assert_eq!(
        err,
        RecordingError::TooShort {
            frames: 10,
            window_size: 25
        }
    );
    assert!(err.is_insufficient_data());
}

#[test]
fn test_exact_window_length_has_no_candidate() {
    // 25 frames give 24 transitions, one short of a 25-transition window
    let selector = ReferenceWindowSelector::default();
    let recording = recording_from_transitions(&[1.0; 24]);
    let err = selector.select(&recording).unwrap_err();
    assert_eq!(
        err,
        RecordingError::NoWindow {
            transitions: 24,
            window_size: 25
        }
    );
}

#[test]
fn test_one_extra_frame_selects_start() {
    let selector = ReferenceWindowSelector::new(25, single_joint_schema());
    let recording = recording_from_transitions(&[2.0; 25]);
    let segment = selector.select(&recording).unwrap();
    assert_eq!(segment.start, 0);
    assert_eq!(segment.display_start(), 1);
    assert_eq!(segment.score, 50.0);
    assert_eq!(segment.len(), 25);
}

#[test]
fn test_selects_zero_instability_window() {
    let mut transitions = vec![3.0; 20];
    transitions.extend([0.0; 5]);
    transitions.extend([3.0; 14]);

    let selector = ReferenceWindowSelector::new(5, single_joint_schema());
    let recording = recording_from_transitions(&transitions);
    let segment = selector.select(&recording).unwrap();

    assert_eq!(segment.start, 20);
    assert_eq!(segment.score, 0.0);
    assert_eq!(segment.frames, recording.frames[20..25].to_vec());
}

#[test]
fn test_equal_windows_prefer_earliest() {
    let transitions = [1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
    let selector = ReferenceWindowSelector::new(2, single_joint_schema());
    let recording = recording_from_transitions(&transitions);

    let (scores, best) = selector.evaluate(&recording.frames).unwrap();
    assert_eq!(scores, transitions.to_vec());
    assert_eq!(best.start, 1);
    assert_eq!(best.score, 0.0);
}

#[test]
fn test_segment_is_contiguous_slice() {
    let transitions: Vec<f64> = (0..60).map(|i| ((i * 7) % 11) as f64).collect();
    let recording = recording_from_transitions(&transitions);

    for window_size in [1, 3, 10, 25, 60] {
        let selector = ReferenceWindowSelector::new(window_size, single_joint_schema());
        let segment = selector.select(&recording).unwrap();
        assert_eq!(segment.len(), window_size);
        assert_eq!(
            segment.frames,
            recording.frames[segment.start..segment.start + window_size].to_vec()
        );
    }
}

#[test]
fn test_oscillation_then_calm() {
    let ids = important_ids();
    let frames: Vec<Frame> = (0..30)
        .map(|i| {
            let elbow = if i < 15 { 90.0 + (i % 2) as f64 * 10.0 } else { 90.0 };
            create_frame(elbow, &ids, 1.0)
        })
        .collect();
    let recording = Recording::new("toprock", frames);

    let selector = ReferenceWindowSelector::new(25, JointAngleSchema::mediapipe());
    let segment = selector.select(&recording).unwrap();

    // Transitions 0..=13 move 10 degrees, 14..=28 are still: the last
    // candidate overlaps the oscillation least.
    assert_eq!(segment.start, 4);
    assert_eq!(segment.score, 100.0);
    assert_eq!(segment.frames, recording.frames[4..29].to_vec());
}

#[test]
fn test_visibility_penalty_decides() {
    let window_size = 5;
    let schema = single_joint_schema();
    let factor = schema.penalty_factor();
    assert_eq!(factor, 50.0);

    let frames: Vec<Frame> = (0..2 * window_size + 1)
        .map(|i| {
            let visibility = if i < window_size { 0.0 } else { 1.0 };
            create_frame(120.0, &[mediapipe::NOSE], visibility)
        })
        .collect();

    let selector = ReferenceWindowSelector::new(window_size, schema);
    let (scores, best) = selector.evaluate(&frames).unwrap();

    let blind_window: f64 = scores[0..window_size].iter().sum();
    let clear_window: f64 = scores[window_size..2 * window_size].iter().sum();
    assert_eq!(blind_window - clear_window, window_size as f64 * factor);
    assert_eq!(best.start, window_size);
    assert_eq!(best.score, 0.0);
}

#[test]
fn test_missing_angles_are_not_penalized() {
    let ids = [mediapipe::NOSE];
    let mut frames: Vec<Frame> = (0..6).map(|_| create_frame(90.0, &ids, 1.0)).collect();
    // Undefined angles in the first frames: no delta can be computed
    frames[0].angles.clear();
    frames[1].angles.clear();
    frames[3].set_angle(ELBOW, 150.0);

    let selector = ReferenceWindowSelector::new(2, single_joint_schema());
    let (scores, best) = selector.evaluate(&frames).unwrap();
    assert_eq!(scores, vec![0.0, 0.0, 60.0, 60.0, 0.0]);
    assert_eq!(best.start, 0);
}

#[test]
fn test_null_angle_skips_term() {
    let ids = [mediapipe::NOSE];
    let mut frames: Vec<Frame> = (0..6).map(|i| create_frame(90.0 + i as f64, &ids, 1.0)).collect();
    frames[3].angles.insert(ELBOW.to_string(), None);

    let selector = ReferenceWindowSelector::new(2, single_joint_schema());
    let (scores, best) = selector.evaluate(&frames).unwrap();
    assert_eq!(scores, vec![1.0, 1.0, 0.0, 0.0, 1.0]);
    assert_eq!(best.start, 2);

    let segment = selector.select(&Recording::new("gap", frames.clone())).unwrap();
    assert_eq!(segment.frames, frames[2..4].to_vec());
    assert_eq!(segment.frames[1].angles.get(ELBOW), Some(&None));
}

#[test]
fn test_overflowing_scores_have_no_window() {
    let ids = [mediapipe::NOSE];
    let frames: Vec<Frame> = (0..6)
        .map(|i| {
            let elbow = if i % 2 == 0 { f64::MAX } else { -f64::MAX };
            create_frame(elbow, &ids, 1.0)
        })
        .collect();

    let selector = ReferenceWindowSelector::new(3, single_joint_schema());
    let err = selector.evaluate(&frames).unwrap_err();
    assert_eq!(
        err,
        RecordingError::NoWindow {
            transitions: 5,
            window_size: 3
        }
    );
}
