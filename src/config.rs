//! Runtime configuration
//!
//! Defaults reproduce the thresholds the page shipped with. The host page may
//! override any subset by passing JSON to `configure()`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} range is reversed: min {min} >= max {max}")]
    ReversedRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be within 0..=1, got {value}")]
    ScoreOutOfRange { name: &'static str, value: f32 },
    #[error("canvas size must be non-zero")]
    EmptyCanvas,
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Closed or open interval of angles in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleBand {
    pub min: f32,
    pub max: f32,
}

impl AngleBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// min < angle < max
    pub fn contains_open(&self, angle: f32) -> bool {
        angle > self.min && angle < self.max
    }

    /// min <= angle <= max
    pub fn contains_closed(&self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }
}

/// How a back angle is folded into a half turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackAngleWrap {
    /// Remainder keeps the sign of the input: -10 stays -10
    #[default]
    Truncated,
    /// Always lands in [0, 180): -10 becomes 170
    Euclidean,
}

/// What to do when a phrase is requested while another is still playing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPolicy {
    /// Hand every phrase to the browser queue
    #[default]
    Queue,
    DropWhileSpeaking,
    /// Cancel whatever is playing, then speak
    Interrupt,
}

/// MoveNet single-pose accuracy/speed tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    Lightning,
    #[default]
    Thunder,
}

impl ModelVariant {
    /// Model type string understood by `poseDetection.movenet.modelType`
    pub fn model_type(&self) -> &'static str {
        match self {
            ModelVariant::Lightning => "SinglePose.Lightning",
            ModelVariant::Thunder => "SinglePose.Thunder",
        }
    }
}

/// Thresholds and presentation settings for one counting session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepConfig {
    /// Minimum score for a keypoint to feed an angle or be drawn as a dot
    pub keypoint_min_score: f32,
    /// Minimum score of both endpoints for a skeleton edge to be drawn
    pub edge_min_score: f32,
    /// Elbow angle band (exclusive) classified as Up
    pub up_range: AngleBand,
    /// |elbow angle| band (exclusive) classified as Down
    pub down_range: AngleBand,
    /// Back angle band (inclusive) flagged as bad posture
    pub posture_bad_range: AngleBand,
    pub back_angle_wrap: BackAngleWrap,
    /// Draw skeleton edges; keypoint dots are drawn either way
    pub show_skeleton: bool,
    pub speech_policy: SpeechPolicy,
    pub model_variant: ModelVariant,
    /// Square canvas edge in pixels
    pub canvas_size: u32,
    /// Selfie view: flip the overlay horizontally
    pub mirror: bool,
}

impl Default for RepConfig {
    fn default() -> Self {
        Self {
            keypoint_min_score: 0.3,
            edge_min_score: 0.5,
            up_range: AngleBand::new(170.0, 200.0),
            down_range: AngleBand::new(70.0, 100.0),
            posture_bad_range: AngleBand::new(20.0, 160.0),
            back_angle_wrap: BackAngleWrap::Truncated,
            show_skeleton: true,
            speech_policy: SpeechPolicy::Queue,
            model_variant: ModelVariant::Thunder,
            canvas_size: 1000,
            mirror: true,
        }
    }
}

impl RepConfig {
    /// Parse a (possibly partial) JSON object and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RepConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("keypoint_min_score", self.keypoint_min_score),
            ("edge_min_score", self.edge_min_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ScoreOutOfRange { name, value });
            }
        }

        for (name, band) in [
            ("up_range", self.up_range),
            ("down_range", self.down_range),
            ("posture_bad_range", self.posture_bad_range),
        ] {
            if band.min >= band.max {
                return Err(ConfigError::ReversedRange { name, min: band.min, max: band.max });
            }
        }

        if self.canvas_size == 0 {
            return Err(ConfigError::EmptyCanvas);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RepConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RepConfig::from_json(r#"{"model_variant": "lightning", "mirror": false}"#).unwrap();
        assert_eq!(config.model_variant, ModelVariant::Lightning);
        assert!(!config.mirror);
        assert_eq!(config.up_range, AngleBand::new(170.0, 200.0));
        assert_eq!(config.keypoint_min_score, 0.3);
    }

    #[test]
    fn test_back_angle_wrap_defaults_to_truncated() {
        assert_eq!(RepConfig::default().back_angle_wrap, BackAngleWrap::Truncated);
        let config = RepConfig::from_json(r#"{"mirror": true}"#).unwrap();
        assert_eq!(config.back_angle_wrap, BackAngleWrap::Truncated);
        assert!(config.show_skeleton);

        let config = RepConfig::from_json(r#"{"back_angle_wrap": "euclidean", "show_skeleton": false}"#).unwrap();
        assert_eq!(config.back_angle_wrap, BackAngleWrap::Euclidean);
        assert!(!config.show_skeleton);
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = RepConfig::from_json(r#"{"down_range": {"min": 100, "max": 70}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ReversedRange { name: "down_range", .. }));
    }

    #[test]
    fn test_rejects_bad_score() {
        let err = RepConfig::from_json(r#"{"edge_min_score": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ScoreOutOfRange { name: "edge_min_score", .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(RepConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_band_edges() {
        let band = AngleBand::new(20.0, 160.0);
        assert!(band.contains_closed(20.0));
        assert!(!band.contains_open(20.0));
        assert!(band.contains_open(90.0));
    }

    #[test]
    fn test_json_round_trip_keeps_enums_snake_case() {
        let mut config = RepConfig::default();
        config.speech_policy = SpeechPolicy::DropWhileSpeaking;
        let json = config.to_json().unwrap();
        assert!(json.contains("\"drop_while_speaking\""));
        assert_eq!(RepConfig::from_json(&json).unwrap(), config);
    }
}
