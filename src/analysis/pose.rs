//! Pose data - keypoints as delivered by the MoveNet detector
//!
//! MoveNet emits the 17-point COCO schema in pixel space of the video frame.
//! Index meaning is fixed by the model and never reordered here.

// ============================================================================
// KEYPOINT INDICES (MoveNet / COCO - 17 total)
// ============================================================================

pub const NOSE: usize = 0;
pub const LEFT_EYE: usize = 1;
pub const RIGHT_EYE: usize = 2;
pub const LEFT_EAR: usize = 3;
pub const RIGHT_EAR: usize = 4;
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;
pub const LEFT_ANKLE: usize = 15;
pub const RIGHT_ANKLE: usize = 16;

/// Number of keypoints in a complete pose
pub const KEYPOINT_COUNT: usize = 17;

/// Skeleton connections drawn on the overlay (pairs of keypoint indices)
pub const SKELETON_EDGES: [(usize, usize); 12] = [
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
    (LEFT_HIP, RIGHT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
    (RIGHT_HIP, RIGHT_KNEE),
    (RIGHT_KNEE, RIGHT_ANKLE),
];

/// Whether an edge belongs to the torso/hip group recoloured on bad posture.
///
/// Matches (5,11), (6,12), (11,13) and (12,14) out of [`SKELETON_EDGES`].
pub fn is_back_edge(edge: (usize, usize)) -> bool {
    let (a, b) = edge;
    b == LEFT_HIP || (a == RIGHT_SHOULDER && b == RIGHT_HIP) || b == LEFT_KNEE || a == RIGHT_HIP
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single detected landmark in frame pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detection confidence (0-1)
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Strictly above the threshold, as the detector's own overlays treat it
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

/// One detected subject in one frame.
///
/// A pose may arrive with fewer than [`KEYPOINT_COUNT`] entries, so every
/// lookup is an `Option`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    keypoints: Vec<Keypoint>,
}

impl Pose {
    /// Build a pose, keeping at most [`KEYPOINT_COUNT`] keypoints
    pub fn new(mut keypoints: Vec<Keypoint>) -> Self {
        keypoints.truncate(KEYPOINT_COUNT);
        Self { keypoints }
    }

    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    /// Three keypoints at once, `None` if any is missing
    pub fn triple(&self, a: usize, b: usize, c: usize) -> Option<(Keypoint, Keypoint, Keypoint)> {
        Some((*self.get(a)?, *self.get(b)?, *self.get(c)?))
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// All 17 schema slots are filled
    pub fn is_complete(&self) -> bool {
        self.keypoints.len() == KEYPOINT_COUNT
    }
}
