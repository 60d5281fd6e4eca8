//! Analysis module - angle heuristics and rep state
//!
//! Re-exports only. All logic in submodules. Nothing here touches the
//! browser, so the whole module runs under native `cargo test`.

mod angles;
mod counter;
mod pose;
mod position;
mod posture;
mod session;

pub use angles::{joint_angle, wrap_half_turn, AngleTracker};
pub use counter::RepCounter;
pub use pose::{
    is_back_edge, Keypoint, Pose,
    // Constants
    KEYPOINT_COUNT, SKELETON_EDGES,
    NOSE, LEFT_EYE, RIGHT_EYE, LEFT_EAR, RIGHT_EAR,
    LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST, LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
};
pub use position::{DownGate, Position, PositionClassifier, Transition};
pub use posture::{Posture, PostureMonitor};
pub use session::{RepSession, SessionEvent, POSTURE_WARNING_PHRASE, UP_CUE_PHRASE};
