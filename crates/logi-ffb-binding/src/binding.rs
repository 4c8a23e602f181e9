//! Binding traits.
//!
//! The force-feedback core only ever talks to hardware through these two
//! traits, which lets it be tested end to end against [`crate::mock`].

use crate::error::{BindingRuntimeError, LoadError};
use crate::types::{BindingSource, ForceCommand, SlotIndex};

/// Loads binding instances.
pub trait BindingLoader {
    /// Binding produced by this loader.
    type Binding: SteeringBinding;

    /// Load a binding from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the artifact is missing or incompatible.
    fn load(&self, source: &BindingSource) -> Result<Self::Binding, LoadError>;
}

/// A loaded vendor interface instance.
///
/// Calls are synchronous and may block for as long as the vendor driver
/// takes to answer.
///
/// # Lifecycle
///
/// ```text
/// load ──► initialize ──► is_connected / send_force / stop_all ──► shutdown ──► drop
/// ```
///
/// `shutdown` must tolerate being called on a binding whose `initialize`
/// returned `false`, and must be a no-op when called again.
pub trait SteeringBinding {
    /// Initialize the SDK. Returns `false` if the SDK refused.
    fn initialize(&mut self) -> bool;

    /// Whether a device is connected at `slot`.
    fn is_connected(&mut self, slot: SlotIndex) -> bool;

    /// Play a constant force on `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingRuntimeError`] if the call fails.
    fn send_force(&mut self, slot: SlotIndex, force: ForceCommand)
    -> Result<(), BindingRuntimeError>;

    /// Stop every effect playing on `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingRuntimeError`] if the call fails.
    fn stop_all(&mut self, slot: SlotIndex) -> Result<(), BindingRuntimeError>;

    /// Shut the SDK down.
    fn shutdown(&mut self);

    /// Human-readable identity of this binding, for logs and reports.
    fn describe(&self) -> String;
}
