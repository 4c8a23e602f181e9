//! Angle to force translation.
//!
//! The wheel angle domain `[-450°, +450°]` maps linearly onto the SDK's
//! constant-force domain `[-100%, +100%]`:
//!
//! ```text
//! force = clamp(round(angle / 4.5), -100, 100)
//! ```

use core::fmt;

use logi_ffb_binding::ForceCommand;
use serde::{Deserialize, Serialize};

/// Degrees of wheel deflection per percent of force.
pub const DEGREES_PER_PERCENT: f64 = 4.5;

/// Half-width of the neutral band snapped to zero by [`apply_dead_zone`].
pub const DEAD_ZONE_DEG: f64 = 5.0;

/// Desired wheel deflection in degrees.
///
/// The nominal domain is `[-450, 450]`. Values outside it are accepted and
/// saturate during [`translate`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleCommand(f64);

impl AngleCommand {
    /// Full left lock.
    pub const MIN_DEG: f64 = -450.0;
    /// Full right lock.
    pub const MAX_DEG: f64 = 450.0;
    /// Centered.
    pub const CENTER: AngleCommand = AngleCommand(0.0);

    /// Create an angle command. NaN is treated as center.
    pub fn new(degrees: f64) -> Self {
        if degrees.is_nan() {
            Self::CENTER
        } else {
            Self(degrees)
        }
    }

    /// Angle in degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Whether the angle lies in the nominal `[-450, 450]` domain.
    pub fn is_in_range(self) -> bool {
        (Self::MIN_DEG..=Self::MAX_DEG).contains(&self.0)
    }
}

impl From<i32> for AngleCommand {
    fn from(degrees: i32) -> Self {
        Self(f64::from(degrees))
    }
}

impl fmt::Display for AngleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Translate an angle into a force command.
///
/// Total over every [`AngleCommand`]; out-of-domain angles saturate at
/// ±100%. No dead zone is applied here.
///
/// # Examples
///
/// ```
/// use logi_ffb::{AngleCommand, translate};
///
/// assert_eq!(translate(AngleCommand::from(450)).percent(), 100);
/// assert_eq!(translate(AngleCommand::from(-90)).percent(), -20);
/// assert_eq!(translate(AngleCommand::from(2000)).percent(), 100);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and clamped to [-100, 100] before the cast"
)]
pub fn translate(angle: AngleCommand) -> ForceCommand {
    let percent = (angle.degrees() / DEGREES_PER_PERCENT)
        .round()
        .clamp(-100.0, 100.0);
    ForceCommand::saturating(percent as i32)
}

/// Snap angles strictly inside `(-5°, 5°)` to exactly center.
///
/// Used by front ends so that small slider jitter around center does not
/// produce a force. [`translate`] never calls this.
pub fn apply_dead_zone(angle: AngleCommand) -> AngleCommand {
    if angle.degrees().abs() < DEAD_ZONE_DEG {
        AngleCommand::CENTER
    } else {
        angle
    }
}
