//! Session integration - drives the rep session from the stored pose
//!
//! One `RepSession` lives for the lifetime of the page. Only the animation
//! tick mutates it.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::keypoints::{has_pose, with_latest_pose};
use crate::analysis::{RepSession, SessionEvent};
use crate::renderer::status_text;

thread_local! {
    static SESSION: RefCell<RepSession> = RefCell::new(RepSession::default());
}

/// Borrow the session mutably for the duration of `f`
pub fn with_session<R>(f: impl FnOnce(&mut RepSession) -> R) -> R {
    SESSION.with(|cell| f(&mut cell.borrow_mut()))
}

/// Feed the latest pose through the session, returns this tick's events
pub fn run_tick() -> Vec<SessionEvent> {
    with_latest_pose(|pose| with_session(|session| session.tick(pose)))
}

// ============================================================================
// WASM-BINDGEN READOUTS
// ============================================================================

#[wasm_bindgen]
pub fn get_rep_count() -> u32 {
    with_session(|s| s.rep_count())
}

/// "Push-ups completed: N", or the loading message before the first pose
#[wasm_bindgen]
pub fn get_status_text() -> String {
    let reps = get_rep_count();
    status_text(has_pose(), reps)
}

#[wasm_bindgen]
pub fn get_elbow_angle() -> Option<f32> {
    with_session(|s| s.elbow_angle())
}

#[wasm_bindgen]
pub fn get_back_angle() -> Option<f32> {
    with_session(|s| s.back_angle())
}

#[wasm_bindgen]
pub fn is_back_highlighted() -> bool {
    with_session(|s| s.highlight_back())
}
