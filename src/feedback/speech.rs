//! Browser speech sink - `window.speechSynthesis`
//!
//! Fire and forget. A failed utterance is logged and dropped so the tick
//! loop never sees an error.

use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::JsValue;

use super::{plan_utterance, SpeechAction};
use crate::config::SpeechPolicy;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("No window found")]
    NoWindow,
    #[error("Speech synthesis unavailable: {0}")]
    Unavailable(String),
    #[error("Utterance creation failed: {0}")]
    Utterance(String),
}

fn js_message(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn try_speak(phrase: &str, policy: SpeechPolicy) -> Result<(), SpeechError> {
    let window = web_sys::window().ok_or(SpeechError::NoWindow)?;
    let synth = window
        .speech_synthesis()
        .map_err(|e| SpeechError::Unavailable(js_message(e)))?;

    match plan_utterance(policy, synth.speaking()) {
        SpeechAction::Skip => {
            debug!("dropping '{}' while speaking", phrase);
            return Ok(());
        }
        SpeechAction::CancelThenSpeak => synth.cancel(),
        SpeechAction::Speak => {}
    }

    let utterance = web_sys::SpeechSynthesisUtterance::new_with_text(phrase)
        .map_err(|e| SpeechError::Utterance(js_message(e)))?;
    synth.speak(&utterance);
    Ok(())
}

/// Speak `phrase` under `policy`
pub fn speak(phrase: &str, policy: SpeechPolicy) {
    if let Err(err) = try_speak(phrase, policy) {
        warn!("speech failed: {}", err);
    }
}
