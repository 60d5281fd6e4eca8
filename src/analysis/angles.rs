//! Joint angles from keypoint triples
//!
//! Angle at vertex B between rays B→A and B→C, using the difference of the
//! two ray headings. The result is signed and not unwrapped, so it spans
//! (-360°, 360°).

use super::pose::Keypoint;
use crate::config::BackAngleWrap;

/// Signed angle in degrees at `vertex`: heading(vertex→a) - heading(vertex→c)
pub fn joint_angle(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let heading_a = (a.1 - vertex.1).atan2(a.0 - vertex.0);
    let heading_c = (c.1 - vertex.1).atan2(c.0 - vertex.0);
    (heading_a - heading_c).to_degrees()
}

/// Fold an angle into a half turn
pub fn wrap_half_turn(angle: f32, wrap: BackAngleWrap) -> f32 {
    match wrap {
        BackAngleWrap::Euclidean => angle.rem_euclid(180.0),
        BackAngleWrap::Truncated => angle % 180.0,
    }
}

/// Holds the last angle computed from confident keypoints.
///
/// A triple with any score at or below the threshold leaves the stored value
/// untouched, so a stale angle survives until confident data returns.
#[derive(Clone, Debug)]
pub struct AngleTracker {
    value: Option<f32>,
    threshold: f32,
}

impl AngleTracker {
    pub fn new(threshold: f32) -> Self {
        Self { value: None, threshold }
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Recompute from `a`, `vertex`, `c`; returns the fresh angle or `None`
    /// when the triple was gated out.
    pub fn update(&mut self, a: &Keypoint, vertex: &Keypoint, c: &Keypoint) -> Option<f32> {
        let confident = [a, vertex, c].iter().all(|kp| kp.is_confident(self.threshold));
        if !confident {
            return None;
        }

        let angle = joint_angle(a.position(), vertex.position(), c.position());
        self.value = Some(angle);
        Some(angle)
    }

    /// Same as [`update`](Self::update) but folds the result before storing it
    pub fn update_wrapped(
        &mut self,
        a: &Keypoint,
        vertex: &Keypoint,
        c: &Keypoint,
        wrap: BackAngleWrap,
    ) -> Option<f32> {
        let angle = wrap_half_turn(self.update(a, vertex, c)?, wrap);
        self.value = Some(angle);
        Some(angle)
    }

    /// Last accepted angle, `None` until the first confident triple
    pub fn value(&self) -> Option<f32> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(x: f32, y: f32) -> Keypoint {
        Keypoint::new(x, y, 0.9)
    }

    #[test]
    fn test_straight_arm() {
        // wrist and shoulder on opposite sides of the elbow
        let angle = joint_angle((100.0, 0.0), (50.0, 0.0), (0.0, 0.0));
        assert!((angle.abs() - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_right_angle_is_signed() {
        let angle = joint_angle((50.0, 50.0), (50.0, 0.0), (0.0, 0.0));
        assert!((angle - (90.0 - 180.0)).abs() < 0.01);

        let mirrored = joint_angle((0.0, 0.0), (50.0, 0.0), (50.0, 50.0));
        assert!((mirrored - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_wrap_conventions() {
        assert!((wrap_half_turn(190.0, BackAngleWrap::Euclidean) - 10.0).abs() < 1e-4);
        assert!((wrap_half_turn(190.0, BackAngleWrap::Truncated) - 10.0).abs() < 1e-4);
        assert!((wrap_half_turn(-10.0, BackAngleWrap::Euclidean) - 170.0).abs() < 1e-4);
        assert!((wrap_half_turn(-10.0, BackAngleWrap::Truncated) + 10.0).abs() < 1e-4);
        assert!((wrap_half_turn(10.0, BackAngleWrap::Euclidean) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_low_confidence_keeps_previous() {
        let mut tracker = AngleTracker::new(0.3);
        assert_eq!(tracker.value(), None);

        assert!(tracker.update(&kp(50.0, 50.0), &kp(50.0, 0.0), &kp(0.0, 0.0)).is_some());
        let before = tracker.value();

        let weak = Keypoint::new(0.0, 0.0, 0.3);
        assert_eq!(tracker.update(&kp(100.0, 0.0), &kp(50.0, 0.0), &weak), None);
        assert_eq!(tracker.value(), before);
    }

    #[test]
    fn test_wrapped_update_stores_folded_value() {
        let mut tracker = AngleTracker::new(0.3);
        // heading(a) = 90°, heading(c) = 180° → -90° raw
        let fresh = tracker.update_wrapped(
            &kp(0.0, 10.0),
            &kp(0.0, 0.0),
            &kp(-10.0, 0.0),
            BackAngleWrap::Euclidean,
        );
        assert!((fresh.unwrap() - 90.0).abs() < 0.01);
        assert_eq!(tracker.value(), fresh);
    }
}
