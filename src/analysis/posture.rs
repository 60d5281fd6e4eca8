//! Back straightness check
//!
//! A back angle inside the bad band flags the posture and, once per bad
//! episode, asks for a spoken warning. The latch clears only when the angle
//! leaves the band again.

use crate::config::AngleBand;

/// Posture verdict for the current back angle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Posture {
    #[default]
    Good,
    Bad,
}

impl Posture {
    pub fn name(&self) -> &'static str {
        match self {
            Posture::Good => "GOOD",
            Posture::Bad => "BAD",
        }
    }
}

pub struct PostureMonitor {
    bad_range: AngleBand,
    posture: Posture,
    /// Warning already spoken for the current bad episode
    warning_given: bool,
}

impl PostureMonitor {
    pub fn new(bad_range: AngleBand) -> Self {
        Self {
            bad_range,
            posture: Posture::Good,
            warning_given: false,
        }
    }

    pub fn set_bad_range(&mut self, bad_range: AngleBand) {
        self.bad_range = bad_range;
    }

    /// Classify a freshly computed back angle.
    ///
    /// Returns `true` when a warning should be spoken this tick.
    pub fn evaluate(&mut self, back_angle: f32) -> bool {
        if !self.bad_range.contains_closed(back_angle) {
            self.posture = Posture::Good;
            self.warning_given = false;
            return false;
        }

        self.posture = Posture::Bad;
        if self.warning_given {
            return false;
        }
        self.warning_given = true;
        true
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    /// Skeleton highlight flag
    pub fn is_bad(&self) -> bool {
        self.posture == Posture::Bad
    }
}

impl Default for PostureMonitor {
    fn default() -> Self {
        Self::new(crate::config::RepConfig::default().posture_bad_range)
    }
}
