//! Up / Down classification from the elbow angle
//!
//! Two disjoint angle bands drive the toggle. Angles between them leave the
//! state where it was, which gives the classifier its hysteresis.

use crate::config::AngleBand;

/// Arm position of the current rep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Nothing classified yet
    #[default]
    Indeterminate,
    Up,
    Down,
}

impl Position {
    pub fn name(&self) -> &'static str {
        match self {
            Position::Indeterminate => "-",
            Position::Up => "UP",
            Position::Down => "DOWN",
        }
    }
}

/// Edge produced by one classification step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Down → Up: one completed rep
    RepCompleted,
    /// Up → Down: cue the athlete to push back up
    UpCue,
}

/// Inputs for the Down check, read from the current pose
#[derive(Clone, Copy, Debug)]
pub struct DownGate {
    /// Back flagged as bent
    pub posture_bad: bool,
    /// Nose y is numerically greater than elbow y (lower on screen)
    pub nose_below_elbow: bool,
}

pub struct PositionClassifier {
    up_range: AngleBand,
    down_range: AngleBand,
    current: Position,
    previous: Position,
}

impl PositionClassifier {
    pub fn new(up_range: AngleBand, down_range: AngleBand) -> Self {
        Self {
            up_range,
            down_range,
            current: Position::Indeterminate,
            previous: Position::Indeterminate,
        }
    }

    pub fn set_ranges(&mut self, up_range: AngleBand, down_range: AngleBand) {
        self.up_range = up_range;
        self.down_range = down_range;
    }

    /// Up check: elbow angle inside the Up band
    pub fn check_up(&mut self, elbow_angle: f32) -> Option<Transition> {
        if !self.up_range.contains_open(elbow_angle) {
            return None;
        }
        let was_down = self.current == Position::Down;
        self.enter(Position::Up);
        was_down.then_some(Transition::RepCompleted)
    }

    /// Down check: good posture, nose below the elbow, |elbow| in the Down band
    pub fn check_down(&mut self, elbow_angle: f32, gate: DownGate) -> Option<Transition> {
        if gate.posture_bad || !gate.nose_below_elbow {
            return None;
        }
        if !self.down_range.contains_open(elbow_angle.abs()) {
            return None;
        }
        let was_up = self.current == Position::Up;
        self.enter(Position::Down);
        was_up.then_some(Transition::UpCue)
    }

    fn enter(&mut self, position: Position) {
        if self.current != position {
            self.previous = self.current;
        }
        self.current = position;
    }

    pub fn current(&self) -> Position {
        self.current
    }

    /// Position held before the last change
    pub fn previous(&self) -> Position {
        self.previous
    }
}

impl Default for PositionClassifier {
    fn default() -> Self {
        let config = crate::config::RepConfig::default();
        Self::new(config.up_range, config.down_range)
    }
}
