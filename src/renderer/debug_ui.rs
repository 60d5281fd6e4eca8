//! Performance metrics and session readout for the debug overlay

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::analysis::RepSession;
use crate::bridge::with_session;

/// Smoothing weight given to the newest sample
const EMA_WEIGHT: f32 = 0.1;

/// Performance metrics storage
#[derive(Default)]
struct Metrics {
    fps: f32,
    frame_time_ms: f32,
    detector_latency_ms: f32,
}

impl Metrics {
    fn record_frame(&mut self, fps: f32, frame_time_ms: f32) {
        // Ignore invalid times (tab backgrounded or first frame)
        if !(1.0..=200.0).contains(&frame_time_ms) {
            return;
        }
        self.fps = ema(self.fps, fps);
        self.frame_time_ms = ema(self.frame_time_ms, frame_time_ms);
    }
}

fn ema(old: f32, sample: f32) -> f32 {
    old * (1.0 - EMA_WEIGHT) + sample * EMA_WEIGHT
}

thread_local! {
    static METRICS: RefCell<Metrics> = RefCell::new(Metrics::default());
}

fn format_angle(angle: Option<f32>) -> String {
    match angle {
        Some(a) => format!("{:.0}°", a),
        None => "--".to_string(),
    }
}

fn format_debug_text(metrics: &Metrics, session: &RepSession) -> String {
    format!(
        "FPS: {:.0} | Frame: {:.1}ms | MoveNet: {:.0}ms\n\
         Elbow: {} | Back: {}\n\
         Position: {} | Posture: {} | Reps: {}",
        metrics.fps, metrics.frame_time_ms, metrics.detector_latency_ms,
        format_angle(session.elbow_angle()),
        format_angle(session.back_angle()),
        session.position().name(),
        session.posture().name(),
        session.rep_count(),
    )
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Set frame timing (called from JS each frame)
#[wasm_bindgen]
pub fn set_frame_metrics(fps: f32, frame_time_ms: f32) {
    METRICS.with(|m| m.borrow_mut().record_frame(fps, frame_time_ms));
}

/// Set pose detector latency
#[wasm_bindgen]
pub fn set_detector_latency(ms: f32) {
    METRICS.with(|m| {
        let mut metrics = m.borrow_mut();
        metrics.detector_latency_ms = ema(metrics.detector_latency_ms, ms);
    });
}

/// Get formatted overlay text (called from JS to update HTML)
#[wasm_bindgen]
pub fn get_debug_overlay_text() -> String {
    METRICS.with(|m| with_session(|session| format_debug_text(&m.borrow(), session)))
}
