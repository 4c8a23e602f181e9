//! Prelude for logi-ffb-binding.
//!
//! ```rust
//! use logi_ffb_binding::prelude::*;
//!
//! let force = ForceCommand::saturating(-20);
//! assert_eq!(force.percent(), -20);
//! ```

pub use crate::binding::{BindingLoader, SteeringBinding};
pub use crate::error::{BindingRuntimeError, LoadError};
pub use crate::sdk::{SdkBinding, SdkLoader};
pub use crate::types::{BindingSource, ForceCommand, SlotIndex};

#[cfg(feature = "mock")]
pub use crate::mock::{CallCounts, MockBinding, MockLoader};
