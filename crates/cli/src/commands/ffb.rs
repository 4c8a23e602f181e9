//! One-shot force feedback commands
//!
//! Each command owns a session for its lifetime and shuts it down on the
//! way out, so the wheel never keeps pulling after the process exits.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use logi_ffb::{CommandOutcome, DeviceConfig, DeviceSession};

use crate::error::CliError;
use crate::output;
use crate::slider::Slider;

/// Initialize the binding and report the connection state.
pub fn init(config: DeviceConfig, json: bool) -> Result<()> {
    let mut session = DeviceSession::new(config);
    let state = session.ensure_initialized().map_err(CliError::from)?;
    output::print_state(state, session.config(), json);
    session.shutdown();
    Ok(())
}

/// Send each angle in turn, holding every force for `hold_ms`.
pub fn angle(config: DeviceConfig, degrees: &[i32], hold_ms: u64, json: bool) -> Result<()> {
    let mut session = DeviceSession::new(config);
    let mut slider = Slider::new();
    let hold = Duration::from_millis(hold_ms);

    for &deg in degrees {
        let Some(angle) = slider.move_to(deg) else {
            output::print_unchanged(deg, json);
            continue;
        };

        let outcome = session.send_angle(angle).map_err(CliError::from)?;
        output::print_outcome(Some(angle), outcome, json);

        if matches!(outcome, CommandOutcome::Sent(_)) && !hold.is_zero() {
            tracing::debug!(hold_ms, "Holding force");
            thread::sleep(hold);
        }
    }

    session.shutdown();
    Ok(())
}

/// Stop every effect on the configured slot.
pub fn stop(config: DeviceConfig, json: bool) -> Result<()> {
    let mut session = DeviceSession::new(config);
    let outcome = session.stop_all().map_err(CliError::from)?;
    output::print_outcome(None, outcome, json);
    session.shutdown();
    Ok(())
}
