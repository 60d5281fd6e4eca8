//! Configuration entry points
//!
//! The page calls `configure()` before `init()` to override thresholds and
//! reads `get_model_type()` to create the matching MoveNet detector.

use log::info;
use wasm_bindgen::prelude::*;

use super::session::with_session;
use crate::config::{ConfigError, RepConfig};

/// Parse, validate and install a config; the rep count survives
pub fn apply_config(json: &str) -> Result<RepConfig, ConfigError> {
    let config = RepConfig::from_json(json)?;
    with_session(|s| s.reconfigure(config.clone()));
    info!("config applied: {:?}", config);
    Ok(config)
}

/// Snapshot of the active config
pub fn current_config() -> RepConfig {
    with_session(|s| s.config().clone())
}

#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    apply_config(json)?;
    Ok(())
}

#[wasm_bindgen]
pub fn get_config_json() -> Result<String, JsValue> {
    Ok(current_config().to_json()?)
}

/// MoveNet model type for `poseDetection.createDetector`
#[wasm_bindgen]
pub fn get_model_type() -> String {
    current_config().model_variant.model_type().to_string()
}

#[wasm_bindgen]
pub fn get_canvas_size() -> u32 {
    current_config().canvas_size
}
