//! Swipe tracking
//!
//! Keeps the most recent touch samples as a short polyline and gates the
//! swoosh sound so it plays at most once at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SLICE_POINTS;

/// Bounded polyline of the current swipe (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlicePath {
    points: Vec<Vec2>,
}

impl SlicePath {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(MAX_SLICE_POINTS + 1),
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Append a sample, dropping the oldest ones past the cap
    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
        if self.points.len() > MAX_SLICE_POINTS {
            let excess = self.points.len() - MAX_SLICE_POINTS;
            self.points.drain(..excess);
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Polyline to draw. A lone point has no segments to show.
    pub fn drawable(&self) -> &[Vec2] {
        if self.points.len() < 2 { &[] } else { self.points.as_slice() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }
}

/// Current swipe plus swoosh re-entrancy state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GestureTracker {
    path: SlicePath,
    swoosh_active: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            path: SlicePath::new(),
            swoosh_active: false,
        }
    }

    /// Finger down: start a fresh path at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.path.clear();
        self.path.push(point);
    }

    /// Finger moved. Returns true when a swoosh should start now.
    pub fn extend(&mut self, point: Vec2) -> bool {
        self.path.push(point);
        if self.swoosh_active {
            false
        } else {
            self.swoosh_active = true;
            true
        }
    }

    /// Swoosh clip finished playing
    pub fn swoosh_finished(&mut self) {
        self.swoosh_active = false;
    }

    pub fn swoosh_active(&self) -> bool {
        self.swoosh_active
    }

    pub fn path(&self) -> &SlicePath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_begin_leaves_one_point() {
        let mut tracker = GestureTracker::new();
        for i in 0..20 {
            tracker.extend(Vec2::new(i as f32, 0.0));
        }
        tracker.begin(Vec2::new(5.0, 5.0));
        assert_eq!(tracker.path().points(), &[Vec2::new(5.0, 5.0)]);
        assert!(tracker.path().drawable().is_empty());
    }

    #[test]
    fn test_path_keeps_newest_points() {
        let mut tracker = GestureTracker::new();
        tracker.begin(Vec2::ZERO);
        for i in 1..=15 {
            tracker.extend(Vec2::new(i as f32, 0.0));
        }
        let points = tracker.path().points();
        assert_eq!(points.len(), MAX_SLICE_POINTS);
        assert_eq!(points[0], Vec2::new(4.0, 0.0));
        assert_eq!(tracker.path().last(), Some(Vec2::new(15.0, 0.0)));
    }

    #[test]
    fn test_swoosh_gated_until_finished() {
        let mut tracker = GestureTracker::new();
        tracker.begin(Vec2::ZERO);
        assert!(tracker.extend(Vec2::new(1.0, 0.0)));
        assert!(!tracker.extend(Vec2::new(2.0, 0.0)));
        assert!(!tracker.extend(Vec2::new(3.0, 0.0)));
        // A new gesture does not reset the gate
        tracker.begin(Vec2::ZERO);
        assert!(!tracker.extend(Vec2::new(1.0, 0.0)));
        tracker.swoosh_finished();
        assert!(tracker.extend(Vec2::new(2.0, 0.0)));
    }

    proptest! {
        #[test]
        fn prop_path_never_exceeds_cap(xs in proptest::collection::vec(-2000.0f32..2000.0, 0..64)) {
            let mut tracker = GestureTracker::new();
            tracker.begin(Vec2::ZERO);
            prop_assert_eq!(tracker.path().len(), 1);
            for x in xs {
                tracker.extend(Vec2::new(x, -x));
                prop_assert!(tracker.path().len() <= MAX_SLICE_POINTS);
            }
        }
    }
}
