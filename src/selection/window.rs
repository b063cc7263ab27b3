//! Sliding-window minimum over transition scores.

use serde::Serialize;

/// Best window found over a score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSelection {
    /// Offset into the score sequence; equals the first frame index
    pub start: usize,
    /// Sum of the scores the window covers
    pub score: f64,
}

/// Find the `window_size`-long run of `scores` with the smallest sum.
///
/// Every candidate is summed directly from its slice so equal inputs give
/// bit-identical sums, and only a strictly smaller sum replaces the current
/// best: ties resolve to the lowest start offset. Candidates whose sum is not
/// finite are never selected. Returns `None` when no candidate fits, none has
/// a finite sum, or `window_size` is zero.
pub fn find_min_window(scores: &[f64], window_size: usize) -> Option<WindowSelection> {
    if window_size == 0 {
        return None;
    }

    let mut best: Option<WindowSelection> = None;
    for (start, window) in scores.windows(window_size).enumerate() {
        let score: f64 = window.iter().sum();
        tracing::trace!("[Window] start={} score={:.4}", start, score);
        if !score.is_finite() {
            continue;
        }
        match best {
            Some(current) if score >= current.score => {}
            _ => best = Some(WindowSelection { start, score }),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_lowest_run() {
        let scores = [5.0, 4.0, 1.0, 0.0, 2.0, 9.0];
        let best = find_min_window(&scores, 2).unwrap();
        assert_eq!(best.start, 2);
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_tie_keeps_first() {
        let scores = [1.0, 2.0, 3.0, 0.5, 2.5, 3.0];
        // Windows of 3: 6.0, 5.5, 6.0, 6.0 -> unique min at 1
        assert_eq!(find_min_window(&scores, 3).unwrap().start, 1);

        let flat = [2.0; 10];
        assert_eq!(find_min_window(&flat, 4).unwrap().start, 0);

        let mirrored = [3.0, 1.0, 1.0, 3.0, 1.0, 1.0, 3.0];
        let best = find_min_window(&mirrored, 2).unwrap();
        assert_eq!(best.start, 1);
        assert_eq!(best.score, 2.0);
    }

    #[test]
    fn test_candidate_count() {
        let scores = [1.0; 24];
        assert!(find_min_window(&scores, 25).is_none());
        assert_eq!(find_min_window(&scores, 24).unwrap().start, 0);
        assert!(find_min_window(&[], 1).is_none());
        assert!(find_min_window(&scores, 0).is_none());
    }

    #[test]
    fn test_non_finite_sums_are_not_candidates() {
        let overflow = [f64::MAX, f64::MAX, f64::MAX, f64::MAX];
        assert!(find_min_window(&overflow, 2).is_none());

        let scores = [f64::INFINITY, 1.0, 2.0, f64::NAN, 0.5, 0.5];
        let best = find_min_window(&scores, 2).unwrap();
        assert_eq!(best.start, 4);
        assert_eq!(best.score, 1.0);

        let mixed = [f64::INFINITY, 3.0, 4.0];
        assert_eq!(find_min_window(&mixed, 2).unwrap().start, 1);
    }

    #[test]
    fn test_whole_sequence_window() {
        let scores = [0.25, 0.5, 0.25];
        let best = find_min_window(&scores, 3).unwrap();
        assert_eq!(best.start, 0);
        assert_eq!(best.score, 1.0);
    }
}
