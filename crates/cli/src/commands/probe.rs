//! Slot probe command

use anyhow::Result;
use logi_ffb::{DeviceConfig, DiagnosticProber};

use crate::error::CliError;
use crate::output;

/// Probe `slots` device slots through the configured binding.
pub fn execute(config: &DeviceConfig, slots: u8, json: bool) -> Result<()> {
    let report = DiagnosticProber::new()
        .probe(&config.binding, slots)
        .map_err(CliError::from)?;

    output::print_report(&report, json);
    Ok(())
}
