//! Pushup Web - push-up rep counter over MoveNet keypoints
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen lifecycle entry points that delegate to submodules
//!
//! The page owns the camera and the pose model. Each animation frame it
//! calls `tick()` and then `render_frame()`; whenever the detector resolves
//! it hands the first pose to `update_keypoints()`.

pub mod analysis;
pub mod bridge;
pub mod config;
pub mod feedback;
pub mod renderer;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use log::{info, LevelFilter};
    use wasm_bindgen::prelude::*;

    use crate::renderer::LOADING_TEXT;
    use crate::{bridge, feedback, renderer};

    // ========================================================================
    // WASM ENTRY POINTS
    // ========================================================================

    /// Called automatically when WASM module loads
    #[wasm_bindgen(start)]
    pub fn init_panic_hook() {
        console_error_panic_hook::set_once();
        bridge::init_logging(LevelFilter::Info);
    }

    /// Initialize WebGPU - must be called before render_frame
    #[wasm_bindgen]
    pub async fn init() -> Result<(), JsValue> {
        let config = bridge::current_config();
        feedback::speak(LOADING_TEXT, config.speech_policy);

        renderer::initialize_gpu(config.canvas_size).await?;
        info!(
            "✅ WebGPU overlay initialized ({}px, model {})",
            config.canvas_size,
            config.model_variant.model_type()
        );
        Ok(())
    }

    /// Switch console verbosity ("error", "warn", "info", "debug", "trace")
    #[wasm_bindgen]
    pub fn set_log_level(level: &str) -> Result<(), JsValue> {
        let filter: LevelFilter = level
            .parse()
            .map_err(|_| JsValue::from_str(&format!("unknown log level '{}'", level)))?;
        bridge::init_logging(filter);
        Ok(())
    }

    /// Advance the session one frame and speak its events.
    ///
    /// Returns the spoken phrases so the page can mirror them in its UI.
    #[wasm_bindgen]
    pub fn tick() -> js_sys::Array {
        let policy = bridge::current_config().speech_policy;
        let phrases = js_sys::Array::new();
        for event in bridge::run_tick() {
            let phrase = event.phrase();
            feedback::speak(&phrase, policy);
            phrases.push(&JsValue::from_str(&phrase));
        }
        phrases
    }

    /// Render one frame with the current pose
    #[wasm_bindgen]
    pub fn render_frame() {
        renderer::render_frame();
    }
}
