//! Force-feedback control core for Logitech steering wheels.
//!
//! This crate sits between an operator-facing front end and the vendor
//! steering wheel SDK:
//!
//! - [`session`]: [`DeviceSession`] owns the binding, initializes it lazily,
//!   caches connectivity, and demotes on failure without retrying
//! - [`translate`]: maps a wheel angle onto a bounded constant force
//! - [`probe`]: [`DiagnosticProber`] reports which slots have a device,
//!   independently of any session
//! - [`environment`]: process facts relevant to loading the SDK
//!
//! The core performs no user-facing I/O. Every failure comes back as a value
//! for the front end to render.
//!
//! # Example
//!
//! ```rust,no_run
//! use logi_ffb::prelude::*;
//!
//! let report = DiagnosticProber::new().probe(&BindingSource::Default, DEFAULT_PROBE_SLOTS)?;
//! println!("{report}");
//!
//! let mut session = DeviceSession::new(DeviceConfig::default());
//! session.send_angle(AngleCommand::from(-180))?;
//! session.stop_all()?;
//! session.shutdown();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod environment;
pub mod error;
pub mod prelude;
pub mod probe;
pub mod session;
pub mod state;
pub mod translate;

pub use config::DeviceConfig;
pub use environment::EnvironmentReport;
pub use error::{BindingInitError, CommandKind, FfbError, ForceCommandError, Result};
pub use probe::{DEFAULT_PROBE_SLOTS, DiagnosticProber, DiagnosticReport, SlotStatus};
pub use session::{CommandOutcome, DeviceSession};
pub use state::ConnectionState;
pub use translate::{AngleCommand, DEAD_ZONE_DEG, apply_dead_zone, translate};

pub use logi_ffb_binding::{BindingSource, ForceCommand, SlotIndex};
