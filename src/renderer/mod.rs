//! Renderer module - WebGPU overlay for keypoints and skeleton
//!
//! Re-exports only. All logic in submodules. Geometry is built natively
//! testable; the GPU half only exists on wasm32.

mod debug_ui;
mod overlay;
mod shapes;

#[cfg(target_arch = "wasm32")]
mod skeleton;
#[cfg(target_arch = "wasm32")]
mod state;

pub use debug_ui::{get_debug_overlay_text, set_detector_latency, set_frame_metrics};
pub use overlay::{build_overlay, colors, status_text, Dot, Overlay, Segment, LOADING_TEXT};
pub use shapes::{create_circle_vertices, create_line_vertices, tessellate, to_clip_space, Vertex};

#[cfg(target_arch = "wasm32")]
pub use skeleton::render_frame;
#[cfg(target_arch = "wasm32")]
pub use state::{initialize_gpu, GpuStateError, CANVAS_ID};
