//! Hardware binding layer for Logitech steering wheel force feedback.
//!
//! This crate defines the narrow contract the force-feedback core depends on
//! and provides two implementations of it:
//!
//! - [`sdk`]: the production binding over the vendor steering wheel SDK
//!   (`LogitechSteeringWheelEnginesWrapper`), loaded at runtime
//! - [`mock`]: a call-counting test double (requires the `mock` feature)
//!
//! # Contract
//!
//! | Operation | Trait method | Failure |
//! |-----------|--------------|---------|
//! | load | [`BindingLoader::load`] | [`LoadError`] |
//! | initialize | [`SteeringBinding::initialize`] | `false` |
//! | connection query | [`SteeringBinding::is_connected`] | `false` |
//! | constant force | [`SteeringBinding::send_force`] | [`BindingRuntimeError`] |
//! | stop all | [`SteeringBinding::stop_all`] | [`BindingRuntimeError`] |
//! | shutdown | [`SteeringBinding::shutdown`] | infallible |
//!
//! # Example
//!
//! ```rust,no_run
//! use logi_ffb_binding::prelude::*;
//!
//! let loader = SdkLoader::new();
//! let mut binding = loader.load(&BindingSource::Default)?;
//! if binding.initialize() && binding.is_connected(SlotIndex::DEFAULT) {
//!     binding.send_force(SlotIndex::DEFAULT, ForceCommand::saturating(25))?;
//!     binding.stop_all(SlotIndex::DEFAULT)?;
//! }
//! binding.shutdown();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod binding;
pub mod error;
pub mod prelude;
pub mod sdk;
pub mod types;

#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

pub use binding::{BindingLoader, SteeringBinding};
pub use error::{BindingRuntimeError, LoadError};
pub use sdk::{SdkBinding, SdkLoader};
pub use types::{
    BindingSource, DEFAULT_LIBRARY_NAME, ForceCommand, GHUB_SDK_LIBRARY_PATH, SlotIndex,
};
