//! Device session configuration.

use std::path::PathBuf;

use logi_ffb_binding::{BindingSource, SlotIndex};
use serde::{Deserialize, Serialize};

/// Which binding artifact to load and which device slot to drive.
///
/// Changing the configuration of a live [`crate::DeviceSession`] goes through
/// [`crate::DeviceSession::reconfigure`], which drops the current binding.
///
/// # Examples
///
/// ```
/// use logi_ffb::DeviceConfig;
///
/// let config = DeviceConfig::default()
///     .with_binding_path(r"C:\sdk\LogitechSteeringWheelEnginesWrapper.dll")
///     .with_slot(1);
/// assert_eq!(config.slot.get(), 1);
/// assert!(config.binding.as_path().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Binding artifact to load.
    pub binding: BindingSource,
    /// Device slot to target.
    pub slot: SlotIndex,
}

impl DeviceConfig {
    /// Configuration for an explicit library path on slot 0.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::default().with_binding_path(path)
    }

    /// Load the binding from `path`.
    pub fn with_binding_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.binding = BindingSource::path(path);
        self
    }

    /// Load the binding from `source`.
    pub fn with_binding(mut self, source: BindingSource) -> Self {
        self.binding = source;
        self
    }

    /// Target `slot`.
    pub fn with_slot(mut self, slot: impl Into<SlotIndex>) -> Self {
        self.slot = slot.into();
        self
    }
}
