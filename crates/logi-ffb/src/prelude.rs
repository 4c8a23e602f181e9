//! Prelude for logi-ffb.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! ```rust
//! use logi_ffb::prelude::*;
//!
//! assert_eq!(translate(AngleCommand::from(45)).percent(), 10);
//! ```

pub use crate::config::DeviceConfig;
pub use crate::environment::EnvironmentReport;
pub use crate::error::{BindingInitError, CommandKind, FfbError, ForceCommandError};
pub use crate::probe::{DEFAULT_PROBE_SLOTS, DiagnosticProber, DiagnosticReport, SlotStatus};
pub use crate::session::{CommandOutcome, DeviceSession};
pub use crate::state::ConnectionState;
pub use crate::translate::{AngleCommand, DEAD_ZONE_DEG, apply_dead_zone, translate};

pub use logi_ffb_binding::{BindingLoader, BindingSource, ForceCommand, SlotIndex, SteeringBinding};
