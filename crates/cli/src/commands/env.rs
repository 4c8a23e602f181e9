//! Host environment command

use anyhow::Result;
use logi_ffb::{DeviceConfig, EnvironmentReport};

use crate::output;

pub fn execute(config: &DeviceConfig, json: bool) -> Result<()> {
    let report = EnvironmentReport::collect(config);
    output::print_environment(&report, json);
    Ok(())
}
