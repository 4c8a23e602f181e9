//! Error taxonomy for the force-feedback core.
//!
//! | Error | Raised by | Recovery |
//! |-------|-----------|----------|
//! | [`BindingInitError::Load`] | missing/incompatible library | reconfigure |
//! | [`BindingInitError::SdkInitFailed`] | SDK refused to initialize | reconfigure |
//! | [`BindingInitError::DeviceNotFound`] | no wheel at the slot | reconfigure |
//! | [`ForceCommandError`] | a command failed on a live binding | reconfigure or restart |
//!
//! Angles outside the nominal domain are never an error; they saturate.

use core::fmt;

use logi_ffb_binding::{BindingRuntimeError, LoadError, SlotIndex};
use thiserror::Error;

/// Operator checklist shown alongside initialization failures.
pub const TROUBLESHOOTING_HINTS: [&str; 4] = [
    "Logitech G HUB is not running.",
    "The selected library is not the one shipped with G HUB, or its architecture does not match this process (64-bit).",
    "The program may need to run with administrator privileges.",
    "The wheel may not be supported by the legacy steering wheel SDK.",
];

/// The binding could not be brought up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingInitError {
    /// The binding library could not be loaded.
    #[error("Unable to load the steering wheel SDK: {0}")]
    Load(#[from] LoadError),

    /// The SDK reported that it failed to initialize.
    #[error("Steering wheel SDK at {binding} failed to initialize")]
    SdkInitFailed {
        /// Binding description.
        binding: String,
    },

    /// The SDK initialized but no device answered on the slot.
    #[error("No steering wheel detected on slot {slot}")]
    DeviceNotFound {
        /// Slot that was queried.
        slot: SlotIndex,
    },
}

impl BindingInitError {
    /// Create an SDK initialization failure.
    pub fn sdk_init_failed(binding: impl Into<String>) -> Self {
        BindingInitError::SdkInitFailed {
            binding: binding.into(),
        }
    }

    /// Create a device-not-found error.
    pub fn device_not_found(slot: SlotIndex) -> Self {
        BindingInitError::DeviceNotFound { slot }
    }

    /// Whether the failure happened before the SDK was initialized.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, BindingInitError::Load(_))
    }

    /// Likely causes to present to the operator.
    pub fn troubleshooting_hints(&self) -> &'static [&'static str] {
        &TROUBLESHOOTING_HINTS
    }
}

/// Command that was being forwarded when a binding call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Constant force from an angle.
    Force,
    /// Stop every effect.
    StopAll,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Force => write!(f, "force"),
            CommandKind::StopAll => write!(f, "stop"),
        }
    }
}

/// A command failed on a previously working connection.
///
/// The session is demoted to [`crate::ConnectionState::Disconnected`] when
/// this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error sending the FFB {command} command: {source}")]
pub struct ForceCommandError {
    /// Command being forwarded.
    pub command: CommandKind,
    /// Binding failure.
    #[source]
    pub source: BindingRuntimeError,
}

impl ForceCommandError {
    /// Wrap a binding failure for `command`.
    pub fn new(command: CommandKind, source: BindingRuntimeError) -> Self {
        Self { command, source }
    }
}

/// Any failure surfaced by a [`crate::DeviceSession`] command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FfbError {
    /// Lazy initialization failed.
    #[error(transparent)]
    Init(#[from] BindingInitError),

    /// The binding failed while executing a command.
    #[error(transparent)]
    Command(#[from] ForceCommandError),
}

/// A specialized `Result` type for session commands.
pub type Result<T> = std::result::Result<T, FfbError>;
