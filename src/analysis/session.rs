//! Rep session - all per-page counting state behind one tick function
//!
//! `tick` is called once per animation frame with the latest pose the
//! detector produced. It updates the angles, posture and position, and
//! returns the feedback events for this frame in emission order.

use log::{debug, info};

use super::angles::AngleTracker;
use super::counter::RepCounter;
use super::pose::{Pose, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE};
use super::position::{DownGate, Position, PositionClassifier, Transition};
use super::posture::{Posture, PostureMonitor};
use crate::config::RepConfig;

/// Spoken when posture first turns bad in an episode
pub const POSTURE_WARNING_PHRASE: &str = "Keep your back straight";
/// Spoken when the athlete reaches the bottom after being up
pub const UP_CUE_PHRASE: &str = "Up";

/// Feedback produced by one tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    PostureWarning,
    RepCompleted { count: u32 },
    UpCue,
}

impl SessionEvent {
    /// Phrase handed to the speech sink
    pub fn phrase(&self) -> String {
        match self {
            SessionEvent::PostureWarning => POSTURE_WARNING_PHRASE.to_string(),
            SessionEvent::RepCompleted { count } => count.to_string(),
            SessionEvent::UpCue => UP_CUE_PHRASE.to_string(),
        }
    }
}

pub struct RepSession {
    config: RepConfig,
    elbow: AngleTracker,
    back: AngleTracker,
    posture: PostureMonitor,
    classifier: PositionClassifier,
    counter: RepCounter,
}

impl RepSession {
    pub fn new(config: RepConfig) -> Self {
        Self {
            elbow: AngleTracker::new(config.keypoint_min_score),
            back: AngleTracker::new(config.keypoint_min_score),
            posture: PostureMonitor::new(config.posture_bad_range),
            classifier: PositionClassifier::new(config.up_range, config.down_range),
            counter: RepCounter::new(),
            config,
        }
    }

    /// Swap thresholds in place; angles, position and count carry over
    pub fn reconfigure(&mut self, config: RepConfig) {
        self.elbow.set_threshold(config.keypoint_min_score);
        self.back.set_threshold(config.keypoint_min_score);
        self.posture.set_bad_range(config.posture_bad_range);
        self.classifier.set_ranges(config.up_range, config.down_range);
        self.config = config;
    }

    /// Advance one frame
    pub fn tick(&mut self, pose: Option<&Pose>) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        let pose = match pose {
            Some(p) if p.is_complete() => p,
            Some(p) => {
                debug!("skipping tick: pose has {} keypoints", p.len());
                return events;
            }
            None => return events,
        };

        self.update_elbow(pose);
        if self.update_back(pose) {
            events.push(SessionEvent::PostureWarning);
        }

        let Some(elbow_angle) = self.elbow.value() else {
            return events;
        };

        if let Some(Transition::RepCompleted) = self.classifier.check_up(elbow_angle) {
            let count = self.counter.increment();
            info!("rep {} completed", count);
            events.push(SessionEvent::RepCompleted { count });
        }

        if let Some(gate) = self.down_gate(pose) {
            if let Some(Transition::UpCue) = self.classifier.check_down(elbow_angle, gate) {
                events.push(SessionEvent::UpCue);
            }
        }

        events
    }

    fn update_elbow(&mut self, pose: &Pose) {
        if let Some((wrist, elbow, shoulder)) = pose.triple(LEFT_WRIST, LEFT_ELBOW, LEFT_SHOULDER) {
            self.elbow.update(&wrist, &elbow, &shoulder);
        }
    }

    /// Returns `true` when a posture warning is due
    fn update_back(&mut self, pose: &Pose) -> bool {
        let Some((knee, hip, shoulder)) = pose.triple(LEFT_KNEE, LEFT_HIP, LEFT_SHOULDER) else {
            return false;
        };
        match self.back.update_wrapped(&knee, &hip, &shoulder, self.config.back_angle_wrap) {
            Some(angle) => self.posture.evaluate(angle),
            None => false,
        }
    }

    fn down_gate(&self, pose: &Pose) -> Option<DownGate> {
        let nose = pose.get(NOSE)?;
        let elbow = pose.get(LEFT_ELBOW)?;
        Some(DownGate {
            posture_bad: self.posture.is_bad(),
            nose_below_elbow: nose.y > elbow.y,
        })
    }

    // ========================================================================
    // READOUTS
    // ========================================================================

    pub fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    pub fn elbow_angle(&self) -> Option<f32> {
        self.elbow.value()
    }

    pub fn back_angle(&self) -> Option<f32> {
        self.back.value()
    }

    pub fn posture(&self) -> Posture {
        self.posture.posture()
    }

    /// Skeleton highlight flag for the renderer
    pub fn highlight_back(&self) -> bool {
        self.posture.is_bad()
    }

    pub fn position(&self) -> Position {
        self.classifier.current()
    }

    pub fn config(&self) -> &RepConfig {
        &self.config
    }
}

impl Default for RepSession {
    fn default() -> Self {
        Self::new(RepConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pose::{Keypoint, KEYPOINT_COUNT};
    use pretty_assertions::assert_eq;

    /// Full pose with a straight back and the given elbow angle / nose height
    fn pose_with(elbow_deg: f32, nose_y: f32) -> Pose {
        let mut kps = vec![Keypoint::new(500.0, 500.0, 0.9); KEYPOINT_COUNT];
        // shoulder straight above the elbow: heading -90°
        kps[LEFT_ELBOW] = Keypoint::new(500.0, 250.0, 0.9);
        kps[LEFT_SHOULDER] = Keypoint::new(500.0, 150.0, 0.9);
        let heading = (elbow_deg - 90.0).to_radians();
        kps[LEFT_WRIST] = Keypoint::new(500.0 + 100.0 * heading.cos(), 250.0 + 100.0 * heading.sin(), 0.9);
        // knee - hip - shoulder on one line
        kps[LEFT_HIP] = Keypoint::new(300.0, 150.0, 0.9);
        kps[LEFT_KNEE] = Keypoint::new(200.0, 150.0, 0.9);
        kps[NOSE] = Keypoint::new(380.0, nose_y, 0.9);
        Pose::new(kps)
    }

    #[test]
    fn test_fixture_angles() {
        let mut session = RepSession::default();
        session.tick(Some(&pose_with(85.0, 300.0)));
        assert!((session.elbow_angle().unwrap() - 85.0).abs() < 0.01);
        let back = session.back_angle().unwrap();
        assert!(back < 20.0 || back > 160.0);
        assert_eq!(session.posture(), Posture::Good);
    }

    #[test]
    fn test_full_rep_events() {
        let mut session = RepSession::default();
        assert!(session.tick(Some(&pose_with(180.0, 300.0))).is_empty());
        assert_eq!(session.tick(Some(&pose_with(85.0, 300.0))), vec![SessionEvent::UpCue]);
        assert_eq!(
            session.tick(Some(&pose_with(180.0, 300.0))),
            vec![SessionEvent::RepCompleted { count: 1 }]
        );
        assert_eq!(session.rep_count(), 1);
    }

    #[test]
    fn test_no_pose_is_noop() {
        let mut session = RepSession::default();
        session.tick(Some(&pose_with(85.0, 300.0)));
        assert!(session.tick(None).is_empty());
        assert_eq!(session.position(), Position::Down);
    }

    #[test]
    fn test_stale_elbow_angle_still_classifies() {
        let mut session = RepSession::default();
        session.tick(Some(&pose_with(85.0, 300.0)));

        // wrist drops out of confidence, angle stays at 85
        let mut pose = pose_with(180.0, 300.0).keypoints().to_vec();
        pose[LEFT_WRIST].score = 0.1;
        assert!(session.tick(Some(&Pose::new(pose))).is_empty());
        assert!((session.elbow_angle().unwrap() - 85.0).abs() < 0.01);
        assert_eq!(session.position(), Position::Down);
    }

    #[test]
    fn test_phrases() {
        assert_eq!(SessionEvent::RepCompleted { count: 12 }.phrase(), "12");
        assert_eq!(SessionEvent::UpCue.phrase(), "Up");
        assert_eq!(SessionEvent::PostureWarning.phrase(), "Keep your back straight");
    }

    #[test]
    fn test_reconfigure_keeps_count() {
        let mut session = RepSession::default();
        session.tick(Some(&pose_with(85.0, 300.0)));
        session.tick(Some(&pose_with(180.0, 300.0)));

        let mut config = RepConfig::default();
        config.up_range = crate::config::AngleBand::new(160.0, 200.0);
        session.reconfigure(config);

        assert_eq!(session.rep_count(), 1);
        session.tick(Some(&pose_with(85.0, 300.0)));
        session.tick(Some(&pose_with(165.0, 300.0)));
        assert_eq!(session.rep_count(), 2);
    }
}
