use pretty_assertions::assert_eq;
use pushup_web::analysis::{
    wrap_half_turn, Keypoint, Pose, Position, Posture, RepSession, SessionEvent, KEYPOINT_COUNT,
    LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE,
};
use pushup_web::config::{BackAngleWrap, RepConfig};

/// Knee directly left of the hip: back angle 180, wraps to 0 (straight)
const STRAIGHT: f32 = 180.0;
/// Knee directly below the hip: back angle 90 (bent)
const BENT: f32 = 90.0;

/// Build a full pose.
///
/// The shoulder sits above the elbow and right of the hip, so the elbow angle
/// equals `elbow_deg` and the raw back angle equals `knee_heading_deg`.
fn pose(elbow_deg: f32, nose_y: f32, knee_heading_deg: f32) -> Pose {
    let mut kps = vec![Keypoint::new(500.0, 500.0, 0.9); KEYPOINT_COUNT];
    kps[LEFT_ELBOW] = Keypoint::new(500.0, 250.0, 0.9);
    kps[LEFT_SHOULDER] = Keypoint::new(500.0, 150.0, 0.9);

    let wrist = (elbow_deg - 90.0).to_radians();
    kps[LEFT_WRIST] = Keypoint::new(500.0 + 100.0 * wrist.cos(), 250.0 + 100.0 * wrist.sin(), 0.9);

    kps[LEFT_HIP] = Keypoint::new(300.0, 150.0, 0.9);
    let knee = knee_heading_deg.to_radians();
    kps[LEFT_KNEE] = Keypoint::new(300.0 + 100.0 * knee.cos(), 150.0 + 100.0 * knee.sin(), 0.9);

    kps[NOSE] = Keypoint::new(380.0, nose_y, 0.9);
    Pose::new(kps)
}

fn up() -> Pose {
    pose(180.0, 300.0, STRAIGHT)
}

fn down() -> Pose {
    pose(85.0, 300.0, STRAIGHT)
}

fn with_score(pose: &Pose, index: usize, score: f32) -> Pose {
    let mut kps = pose.keypoints().to_vec();
    kps[index].score = score;
    Pose::new(kps)
}

fn run(session: &mut RepSession, poses: &[Pose]) -> Vec<SessionEvent> {
    poses.iter().flat_map(|p| session.tick(Some(p))).collect()
}

#[test]
fn test_low_confidence_leaves_angles_unchanged() {
    let mut session = RepSession::default();
    session.tick(Some(&down()));
    let elbow = session.elbow_angle();
    let back = session.back_angle();

    for index in [LEFT_WRIST, LEFT_ELBOW, LEFT_SHOULDER] {
        session.tick(Some(&with_score(&up(), index, 0.2)));
        assert_eq!(session.elbow_angle(), elbow);
    }
    for index in [LEFT_KNEE, LEFT_HIP] {
        session.tick(Some(&with_score(&pose(85.0, 300.0, BENT), index, 0.3)));
        assert_eq!(session.back_angle(), back);
    }
    assert_eq!(session.posture(), Posture::Good);
}

#[test]
fn test_back_angle_wrap_convention() {
    for wrap in [BackAngleWrap::Truncated, BackAngleWrap::Euclidean] {
        assert!((wrap_half_turn(190.0, wrap) - wrap_half_turn(10.0, wrap)).abs() < 1e-4);
    }
    assert!((wrap_half_turn(-10.0, BackAngleWrap::Truncated) + 10.0).abs() < 1e-4);

    // knee above the hip: raw back angle -90, sign kept by default
    let mut truncated = RepSession::default();
    truncated.tick(Some(&pose(140.0, 300.0, -90.0)));
    assert!((truncated.back_angle().unwrap() + 90.0).abs() < 0.01);
    assert_eq!(truncated.posture(), Posture::Good);

    let config = RepConfig { back_angle_wrap: BackAngleWrap::Euclidean, ..RepConfig::default() };
    let mut euclidean = RepSession::new(config);
    euclidean.tick(Some(&pose(140.0, 300.0, -90.0)));
    assert!((euclidean.back_angle().unwrap() - 90.0).abs() < 0.01);
    assert_eq!(euclidean.posture(), Posture::Bad);
}

#[test]
fn test_negative_back_angle_counts_under_defaults() {
    let mut session = RepSession::default();
    let events = run(&mut session, &[pose(180.0, 300.0, -60.0), pose(85.0, 300.0, -60.0), pose(180.0, 300.0, -60.0)]);

    assert!((session.back_angle().unwrap() + 60.0).abs() < 0.01);
    assert_eq!(session.posture(), Posture::Good);
    assert_eq!(events, vec![SessionEvent::UpCue, SessionEvent::RepCompleted { count: 1 }]);
    assert_eq!(session.rep_count(), 1);
}

#[test]
fn test_down_up_counts_once() {
    let mut session = RepSession::default();
    let events = run(&mut session, &[down(), up()]);
    assert_eq!(events, vec![SessionEvent::RepCompleted { count: 1 }]);
    assert_eq!(session.rep_count(), 1);
}

#[test]
fn test_repeated_positions_do_not_count() {
    let mut session = RepSession::default();
    run(&mut session, &[up(), up(), up()]);
    assert_eq!(session.rep_count(), 0);

    run(&mut session, &[down(), down(), down()]);
    assert_eq!(session.rep_count(), 0);

    run(&mut session, &[up(), up()]);
    assert_eq!(session.rep_count(), 1);
}

#[test]
fn test_several_reps_with_cues() {
    let mut session = RepSession::default();
    let events = run(&mut session, &[up(), down(), pose(130.0, 300.0, STRAIGHT), up(), down(), up()]);
    assert_eq!(
        events,
        vec![
            SessionEvent::UpCue,
            SessionEvent::RepCompleted { count: 1 },
            SessionEvent::UpCue,
            SessionEvent::RepCompleted { count: 2 },
        ]
    );
}

#[test]
fn test_one_warning_per_bad_episode() {
    let mut session = RepSession::default();
    let bad = pose(140.0, 300.0, BENT);
    let good = pose(140.0, 300.0, STRAIGHT);

    let events = run(&mut session, &[bad.clone(), bad.clone(), bad.clone(), bad.clone(), good.clone(), good, bad.clone(), bad]);
    let warnings = events.iter().filter(|e| **e == SessionEvent::PostureWarning).count();
    assert_eq!(warnings, 2);
}

#[test]
fn test_bad_posture_blocks_down() {
    let mut session = RepSession::default();
    session.tick(Some(&up()));

    // elbow 85, nose.y 300 below elbow.y 250, back 90
    let events = session.tick(Some(&pose(85.0, 300.0, BENT)));
    assert_eq!(events, vec![SessionEvent::PostureWarning]);
    assert!((session.back_angle().unwrap() - 90.0).abs() < 0.01);
    assert_eq!(session.position(), Position::Up);

    // no Down happened, so straightening the arm is not a rep
    session.tick(Some(&up()));
    assert_eq!(session.rep_count(), 0);
}

#[test]
fn test_nose_above_elbow_blocks_down() {
    let mut session = RepSession::default();
    session.tick(Some(&up()));
    assert!(session.tick(Some(&pose(85.0, 200.0, STRAIGHT))).is_empty());
    assert_eq!(session.position(), Position::Up);
}

#[test]
fn test_incomplete_pose_preserves_state() {
    let mut session = RepSession::default();
    run(&mut session, &[down(), up(), down()]);
    let before = (session.rep_count(), session.position(), session.elbow_angle(), session.back_angle());

    let short = Pose::new(up().keypoints()[..10].to_vec());
    assert!(session.tick(Some(&short)).is_empty());
    assert!(session.tick(Some(&Pose::new(Vec::new()))).is_empty());
    assert!(session.tick(None).is_empty());

    let after = (session.rep_count(), session.position(), session.elbow_angle(), session.back_angle());
    assert_eq!(before, after);
}
