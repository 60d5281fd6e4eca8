//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points except the lifecycle ones in lib.rs
//! live here. Re-exports only in mod.rs, logic in submodules.

mod keypoints;
mod session;
mod settings;

#[cfg(target_arch = "wasm32")]
mod logging;

pub use keypoints::{
    // WASM entry points
    update_keypoints,
    clear_keypoints,
    has_pose,
    // Internal API
    parse_keypoints,
    with_latest_pose,
    STRIDE,
};

pub use session::{
    get_rep_count,
    get_status_text,
    get_elbow_angle,
    get_back_angle,
    is_back_highlighted,
    run_tick,
    with_session,
};

pub use settings::{
    configure,
    get_config_json,
    get_model_type,
    get_canvas_size,
    apply_config,
    current_config,
};

#[cfg(target_arch = "wasm32")]
pub use logging::init_logging;
