//! Keypoint storage and JS bridge
//!
//! Receives MoveNet keypoints from JavaScript whenever `estimatePoses`
//! resolves and keeps the latest one for the session and renderer to read.
//! Inference runs at its own pace; every animation tick simply reuses
//! whatever pose is currently stored.

use log::warn;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::analysis::{Keypoint, Pose, KEYPOINT_COUNT};

/// Floats per keypoint: x, y, score
pub const STRIDE: usize = 3;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LATEST_POSE: RefCell<Option<Pose>> = RefCell::new(None);
}

/// Parse a flat `[x, y, score, ...]` buffer.
///
/// Trailing floats that do not make a whole keypoint are dropped, extra
/// keypoints beyond the schema are ignored. An empty buffer means no pose.
pub fn parse_keypoints(data: &[f32]) -> Option<Pose> {
    if data.len() % STRIDE != 0 {
        warn!(
            "keypoint buffer length {} is not a multiple of {}, truncating",
            data.len(),
            STRIDE
        );
    }
    if data.len() > KEYPOINT_COUNT * STRIDE {
        warn!(
            "keypoint buffer has {} keypoints, keeping the first {}",
            data.len() / STRIDE,
            KEYPOINT_COUNT
        );
    }

    let keypoints: Vec<Keypoint> = data
        .chunks_exact(STRIDE)
        .take(KEYPOINT_COUNT)
        .map(|kp| Keypoint::new(kp[0], kp[1], kp[2]))
        .collect();

    if keypoints.is_empty() {
        None
    } else {
        Some(Pose::new(keypoints))
    }
}

pub(crate) fn store_pose(pose: Option<Pose>) {
    LATEST_POSE.with(|cell| *cell.borrow_mut() = pose);
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with a flat Float32Array of the first pose
/// (17 keypoints × 3 values: x, y, score)
#[wasm_bindgen]
pub fn update_keypoints(data: &[f32]) {
    store_pose(parse_keypoints(data));
}

/// Called when the detector returned no poses
#[wasm_bindgen]
pub fn clear_keypoints() {
    store_pose(None);
}

/// Check if a pose has been received
#[wasm_bindgen]
pub fn has_pose() -> bool {
    LATEST_POSE.with(|cell| cell.borrow().is_some())
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Run `f` against the stored pose without cloning it
pub fn with_latest_pose<R>(f: impl FnOnce(Option<&Pose>) -> R) -> R {
    LATEST_POSE.with(|cell| f(cell.borrow().as_ref()))
}
