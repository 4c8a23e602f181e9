//! Host environment summary for troubleshooting.

use core::fmt;

use logi_ffb_binding::{GHUB_SDK_LIBRARY_PATH, SlotIndex};
use serde::Serialize;

use crate::config::DeviceConfig;

/// Facts about this process that decide whether the vendor library can load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentReport {
    /// Target architecture (`x86_64`, `x86`, ...).
    pub arch: &'static str,
    /// Pointer width of this process in bits.
    pub pointer_width: u32,
    /// Target operating system.
    pub os: &'static str,
    /// Version of this crate.
    pub version: &'static str,
    /// Binding the session is configured with.
    pub binding: String,
    /// Slot the session targets.
    pub slot: SlotIndex,
    /// Where G HUB normally installs the SDK library.
    pub expected_library: &'static str,
}

impl EnvironmentReport {
    /// Collect the report for `config`.
    pub fn collect(config: &DeviceConfig) -> Self {
        Self {
            arch: std::env::consts::ARCH,
            pointer_width: usize::BITS,
            os: std::env::consts::OS,
            version: env!("CARGO_PKG_VERSION"),
            binding: config.binding.to_string(),
            slot: config.slot,
            expected_library: GHUB_SDK_LIBRARY_PATH,
        }
    }

    /// Whether the vendor SDK can run on this platform at all.
    pub fn is_supported_platform(&self) -> bool {
        self.os == "windows"
    }

    /// Advice about matching library and process architecture.
    pub fn advisory(&self) -> String {
        format!(
            "The SDK library must match this process's architecture ({}-bit).",
            self.pointer_width
        )
    }
}

impl fmt::Display for EnvironmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Architecture: {} ({}-bit)", self.arch, self.pointer_width)?;
        writeln!(f, "Operating system: {}", self.os)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Selected binding: {}", self.binding)?;
        writeln!(f, "Device slot: {}", self.slot)?;
        writeln!(f)?;
        writeln!(f, "{}", self.advisory())?;
        writeln!(f, "The library is usually located at:")?;
        write!(f, "{}", self.expected_library)
    }
}
