//! Feedback module - spoken cues for session events
//!
//! The overlap decision is pure and tested natively; the browser sink
//! itself only exists on wasm32.

#[cfg(target_arch = "wasm32")]
mod speech;

#[cfg(target_arch = "wasm32")]
pub use speech::{speak, SpeechError};

use crate::config::SpeechPolicy;

/// What the sink does with a new phrase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechAction {
    Speak,
    Skip,
    CancelThenSpeak,
}

/// Decide how to hand a phrase to the synthesizer given what is playing
pub fn plan_utterance(policy: SpeechPolicy, currently_speaking: bool) -> SpeechAction {
    match (policy, currently_speaking) {
        (_, false) | (SpeechPolicy::Queue, true) => SpeechAction::Speak,
        (SpeechPolicy::DropWhileSpeaking, true) => SpeechAction::Skip,
        (SpeechPolicy::Interrupt, true) => SpeechAction::CancelThenSpeak,
    }
}
