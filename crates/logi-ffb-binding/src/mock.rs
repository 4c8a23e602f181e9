//! Call-counting test double for the binding contract.
//!
//! [`MockLoader`] is cheap to clone; every clone and every [`MockBinding`]
//! it produces share one state, so a test can keep a loader handle, give
//! another clone to the code under test, and inspect what happened.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::binding::{BindingLoader, SteeringBinding};
use crate::error::{BindingRuntimeError, LoadError};
use crate::types::{BindingSource, ForceCommand, SlotIndex};

/// Number of binding calls observed, by operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `load` attempts, successful or not.
    pub loads: usize,
    /// `initialize` calls.
    pub initializes: usize,
    /// `is_connected` calls.
    pub connection_queries: usize,
    /// `send_force` calls, successful or not.
    pub forces: usize,
    /// `stop_all` calls, successful or not.
    pub stops: usize,
    /// `shutdown` calls.
    pub shutdowns: usize,
}

#[derive(Debug)]
struct MockState {
    library_present: bool,
    initialize_succeeds: bool,
    connected_slots: Vec<bool>,
    force_fault: bool,
    stop_fault: bool,
    calls: CallCounts,
    forces_sent: Vec<(SlotIndex, ForceCommand)>,
    sources_loaded: Vec<BindingSource>,
    live_bindings: usize,
    next_id: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            library_present: true,
            initialize_succeeds: true,
            connected_slots: vec![true],
            force_fault: false,
            stop_fault: false,
            calls: CallCounts::default(),
            forces_sent: Vec::new(),
            sources_loaded: Vec::new(),
            live_bindings: 0,
            next_id: 0,
        }
    }
}

/// Test double for [`BindingLoader`].
///
/// By default the library loads, initializes, and reports a device on
/// slot 0 only.
#[derive(Debug, Clone, Default)]
pub struct MockLoader {
    state: Arc<Mutex<MockState>>,
}

impl MockLoader {
    /// A loader whose library is present with a wheel on slot 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader whose library cannot be found.
    pub fn missing() -> Self {
        let loader = Self::new();
        loader.state.lock().library_present = false;
        loader
    }

    /// Make SDK initialization fail.
    pub fn with_failing_initialize(self) -> Self {
        self.state.lock().initialize_succeeds = false;
        self
    }

    /// Set per-slot connectivity, slot 0 first. Slots beyond the list are
    /// disconnected.
    pub fn with_connected_slots(self, slots: &[bool]) -> Self {
        self.state.lock().connected_slots = slots.to_vec();
        self
    }

    /// Report no device on any slot.
    pub fn with_no_devices(self) -> Self {
        self.with_connected_slots(&[])
    }

    /// Make every `send_force` call fail.
    pub fn with_force_fault(self) -> Self {
        self.set_force_fault(true);
        self
    }

    /// Make every `stop_all` call fail.
    pub fn with_stop_fault(self) -> Self {
        self.set_stop_fault(true);
        self
    }

    /// Toggle `send_force` failures on live bindings.
    pub fn set_force_fault(&self, fault: bool) {
        self.state.lock().force_fault = fault;
    }

    /// Toggle `stop_all` failures on live bindings.
    pub fn set_stop_fault(&self, fault: bool) {
        self.state.lock().stop_fault = fault;
    }

    /// Toggle whether the library can be found.
    pub fn set_library_present(&self, present: bool) {
        self.state.lock().library_present = present;
    }

    /// Call counts so far.
    pub fn calls(&self) -> CallCounts {
        self.state.lock().calls
    }

    /// Every force that reached a binding, in order.
    pub fn forces_sent(&self) -> Vec<(SlotIndex, ForceCommand)> {
        self.state.lock().forces_sent.clone()
    }

    /// Every source passed to `load`, in order.
    pub fn sources_loaded(&self) -> Vec<BindingSource> {
        self.state.lock().sources_loaded.clone()
    }

    /// Bindings that were loaded and not yet dropped.
    pub fn live_bindings(&self) -> usize {
        self.state.lock().live_bindings
    }
}

impl BindingLoader for MockLoader {
    type Binding = MockBinding;

    fn load(&self, source: &BindingSource) -> Result<MockBinding, LoadError> {
        let mut state = self.state.lock();
        state.calls.loads += 1;
        state.sources_loaded.push(source.clone());

        if !state.library_present {
            return Err(LoadError::load_failed(
                source.to_string(),
                "mock library not present",
            ));
        }

        state.live_bindings += 1;
        state.next_id += 1;
        Ok(MockBinding {
            id: state.next_id,
            state: Arc::clone(&self.state),
        })
    }
}

/// Test double for [`SteeringBinding`].
#[derive(Debug)]
pub struct MockBinding {
    id: usize,
    state: Arc<Mutex<MockState>>,
}

impl MockBinding {
    /// Sequence number of this binding among all bindings of its loader,
    /// starting at 1.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl SteeringBinding for MockBinding {
    fn initialize(&mut self) -> bool {
        let mut state = self.state.lock();
        state.calls.initializes += 1;
        state.initialize_succeeds
    }

    fn is_connected(&mut self, slot: SlotIndex) -> bool {
        let mut state = self.state.lock();
        state.calls.connection_queries += 1;
        state
            .connected_slots
            .get(usize::from(slot.get()))
            .copied()
            .unwrap_or(false)
    }

    fn send_force(
        &mut self,
        slot: SlotIndex,
        force: ForceCommand,
    ) -> Result<(), BindingRuntimeError> {
        let mut state = self.state.lock();
        state.calls.forces += 1;
        if state.force_fault {
            return Err(BindingRuntimeError::fault(
                "send_force",
                slot,
                "mock force fault",
            ));
        }
        state.forces_sent.push((slot, force));
        Ok(())
    }

    fn stop_all(&mut self, slot: SlotIndex) -> Result<(), BindingRuntimeError> {
        let mut state = self.state.lock();
        state.calls.stops += 1;
        if state.stop_fault {
            return Err(BindingRuntimeError::fault(
                "stop_all",
                slot,
                "mock stop fault",
            ));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.state.lock().calls.shutdowns += 1;
    }

    fn describe(&self) -> String {
        format!("mock binding #{}", self.id)
    }
}

impl Drop for MockBinding {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.live_bindings = state.live_bindings.saturating_sub(1);
    }
}
