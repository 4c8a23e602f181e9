//! Angle input with slider semantics.

use logi_ffb::{AngleCommand, apply_dead_zone};

/// Tracks the last angle sent so that unchanged positions are not resent.
///
/// Input passes through the dead zone first, so small jitter around center
/// collapses onto center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slider {
    last: AngleCommand,
}

impl Slider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `degrees`. Returns the angle to send, or `None` if it matches
    /// the previous position.
    pub fn move_to(&mut self, degrees: i32) -> Option<AngleCommand> {
        let angle = apply_dead_zone(AngleCommand::from(degrees));
        if !angle.is_in_range() {
            tracing::warn!(angle = %angle, "Angle outside [-450, 450]; force will saturate");
        }
        if angle == self.last {
            return None;
        }
        self.last = angle;
        Some(angle)
    }

    /// Forget the last position, as after the wheel was stopped.
    pub fn reset(&mut self) {
        self.last = AngleCommand::CENTER;
    }
}
