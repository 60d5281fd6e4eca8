//! Overlay geometry - what to draw for one pose, in canvas pixels
//!
//! Kept free of GPU types so the drawing rules can be tested natively.
//! The WebGPU pass in `skeleton.rs` only tessellates what this produces.

use crate::analysis::{is_back_edge, Pose, SKELETON_EDGES};
use crate::config::RepConfig;

/// Colors for overlay elements (linear RGBA)
pub mod colors {
    /// Keypoint dots
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Dot outline
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Skeleton edges
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Torso/hip edges while posture is flagged
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

pub const DOT_RADIUS: f32 = 8.0;
pub const DOT_OUTLINE: f32 = 2.0;
pub const EDGE_WIDTH: f32 = 2.0;
pub const HIGHLIGHT_EDGE_WIDTH: f32 = 3.0;

pub const LOADING_TEXT: &str = "Loading, please wait...";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: (f32, f32),
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub width: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub dots: Vec<Dot>,
    pub segments: Vec<Segment>,
}

impl Overlay {
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.segments.is_empty()
    }
}

/// Flip x for the selfie view
fn place(pos: (f32, f32), config: &RepConfig) -> (f32, f32) {
    if config.mirror {
        (config.canvas_size as f32 - pos.0, pos.1)
    } else {
        pos
    }
}

/// Dots for confident keypoints and, unless the skeleton is hidden, edges
/// whose endpoints are both confident
pub fn build_overlay(pose: &Pose, highlight_back: bool, config: &RepConfig) -> Overlay {
    let mut overlay = Overlay::default();

    for kp in pose.keypoints() {
        if !kp.is_confident(config.keypoint_min_score) {
            continue;
        }
        let center = place(kp.position(), config);
        // outline first, fill drawn on top
        overlay.dots.push(Dot { center, radius: DOT_RADIUS + DOT_OUTLINE, color: colors::BLACK });
        overlay.dots.push(Dot { center, radius: DOT_RADIUS, color: colors::WHITE });
    }

    if !config.show_skeleton {
        return overlay;
    }

    for &edge in SKELETON_EDGES.iter() {
        let (Some(a), Some(b)) = (pose.get(edge.0), pose.get(edge.1)) else {
            continue;
        };
        if !(a.is_confident(config.edge_min_score) && b.is_confident(config.edge_min_score)) {
            continue;
        }

        let (width, color) = if highlight_back && is_back_edge(edge) {
            (HIGHLIGHT_EDGE_WIDTH, colors::RED)
        } else {
            (EDGE_WIDTH, colors::GREEN)
        };
        overlay.segments.push(Segment {
            from: place(a.position(), config),
            to: place(b.position(), config),
            width,
            color,
        });
    }

    overlay
}

/// Headline shown above the video
pub fn status_text(has_pose: bool, reps: u32) -> String {
    if has_pose {
        format!("Push-ups completed: {}", reps)
    } else {
        LOADING_TEXT.to_string()
    }
}
