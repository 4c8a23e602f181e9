//! One-shot connectivity probe.
//!
//! The prober loads its own binding instance, scans a range of slots, and
//! shuts that instance down again. It has no access to any
//! [`crate::DeviceSession`] and therefore cannot disturb one.

use core::fmt;

use logi_ffb_binding::{BindingLoader, BindingSource, SdkLoader, SlotIndex, SteeringBinding};
use serde::Serialize;

use crate::error::BindingInitError;

/// Number of slots scanned when the caller has no preference.
pub const DEFAULT_PROBE_SLOTS: u8 = 5;

/// Connectivity of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    /// Slot that was queried.
    pub slot: SlotIndex,
    /// Whether a device answered.
    pub connected: bool,
}

/// Result of a probe, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    binding: String,
    entries: Vec<SlotStatus>,
    any_device_found: bool,
}

impl DiagnosticReport {
    /// Build a report from per-slot results.
    pub fn new(binding: impl Into<String>, entries: Vec<SlotStatus>) -> Self {
        let any_device_found = entries.iter().any(|entry| entry.connected);
        Self {
            binding: binding.into(),
            entries,
            any_device_found,
        }
    }

    /// Binding the probe ran against.
    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Per-slot results in index order.
    pub fn entries(&self) -> &[SlotStatus] {
        &self.entries
    }

    /// Whether at least one slot reported a device.
    pub fn any_device_found(&self) -> bool {
        self.any_device_found
    }

    /// Slots that reported a device.
    pub fn connected_slots(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.connected)
            .map(|entry| entry.slot)
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self
            .entries
            .iter()
            .map(|entry| format!("Device index {}: {}", entry.slot, entry.connected))
            .collect::<Vec<_>>();
        if !self.any_device_found {
            lines.push("No device detected!".to_string());
        }
        f.write_str(&lines.join("\n"))
    }
}

/// Stateless connectivity prober.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticProber<L = SdkLoader> {
    loader: L,
}

impl DiagnosticProber<SdkLoader> {
    /// Create a prober over the vendor SDK.
    pub fn new() -> Self {
        Self::with_loader(SdkLoader::new())
    }
}

impl<L: BindingLoader> DiagnosticProber<L> {
    /// Create a prober that loads bindings with `loader`.
    pub fn with_loader(loader: L) -> Self {
        Self { loader }
    }

    /// Load a binding from `source` and query slots `0..slot_count`.
    ///
    /// The probe binding is shut down before returning, whether or not the
    /// SDK initialized.
    ///
    /// # Errors
    ///
    /// Returns [`BindingInitError::Load`] if the binding cannot be loaded
    /// and [`BindingInitError::SdkInitFailed`] if it will not initialize.
    /// No report is produced in either case.
    pub fn probe(
        &self,
        source: &BindingSource,
        slot_count: u8,
    ) -> Result<DiagnosticReport, BindingInitError> {
        let mut binding = self.loader.load(source)?;
        let description = binding.describe();

        if !binding.initialize() {
            binding.shutdown();
            tracing::warn!(binding = %description, "Probe binding failed to initialize");
            return Err(BindingInitError::sdk_init_failed(description));
        }

        let entries: Vec<SlotStatus> = (0..slot_count)
            .map(SlotIndex::new)
            .map(|slot| SlotStatus {
                slot,
                connected: binding.is_connected(slot),
            })
            .collect();
        binding.shutdown();

        let report = DiagnosticReport::new(description, entries);
        tracing::info!(
            binding = %report.binding(),
            slots = slot_count,
            found = report.any_device_found(),
            "Probe complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logi_ffb_binding::mock::MockLoader;

    #[test]
    fn test_report_flags_any_connected_slot() {
        let report = DiagnosticReport::new(
            "mock",
            vec![
                SlotStatus {
                    slot: SlotIndex::new(0),
                    connected: false,
                },
                SlotStatus {
                    slot: SlotIndex::new(1),
                    connected: true,
                },
            ],
        );
        assert!(report.any_device_found());
        assert_eq!(report.connected_slots().collect::<Vec<_>>(), vec![SlotIndex::new(1)]);
    }

    #[test]
    fn test_empty_report_finds_nothing() {
        let report = DiagnosticReport::new("mock", Vec::new());
        assert!(!report.any_device_found());
        assert_eq!(report.to_string(), "No device detected!");
    }

    #[test]
    fn test_probe_scans_requested_slots() -> Result<(), BindingInitError> {
        let loader = MockLoader::new().with_connected_slots(&[true, false, true]);
        let prober = DiagnosticProber::with_loader(loader.clone());

        let report = prober.probe(&BindingSource::Default, 4)?;
        let connected: Vec<bool> = report.entries().iter().map(|e| e.connected).collect();
        assert_eq!(connected, vec![true, false, true, false]);
        assert_eq!(loader.calls().connection_queries, 4);
        assert_eq!(loader.calls().shutdowns, 1);
        assert_eq!(loader.live_bindings(), 0);
        Ok(())
    }

    #[test]
    fn test_probe_shuts_down_after_failed_initialize() {
        let loader = MockLoader::new().with_failing_initialize();
        let prober = DiagnosticProber::with_loader(loader.clone());

        let result = prober.probe(&BindingSource::Default, DEFAULT_PROBE_SLOTS);
        assert!(matches!(result, Err(BindingInitError::SdkInitFailed { .. })));
        assert_eq!(loader.calls().shutdowns, 1);
        assert_eq!(loader.calls().connection_queries, 0);
    }

    #[test]
    fn test_probe_zero_slots() -> Result<(), BindingInitError> {
        let loader = MockLoader::new();
        let report = DiagnosticProber::with_loader(loader).probe(&BindingSource::Default, 0)?;
        assert!(report.entries().is_empty());
        assert!(!report.any_device_found());
        Ok(())
    }
}
