//! Error types for binding operations.

use thiserror::Error;

use crate::types::SlotIndex;

/// The binding library could not be loaded.
///
/// Either the artifact is missing or it does not export the SDK surface
/// this crate expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The shared library could not be opened.
    #[error("Failed to load binding library {path}: {reason}")]
    LibraryLoadFailed {
        /// Library path that was tried.
        path: String,
        /// Loader diagnostic.
        reason: String,
    },

    /// The library loaded but lacks a required export.
    #[error("Binding library {path} is missing export {symbol}: {reason}")]
    MissingSymbol {
        /// Library path.
        path: String,
        /// Name of the missing export.
        symbol: &'static str,
        /// Loader diagnostic.
        reason: String,
    },
}

impl LoadError {
    /// Create a library load failure.
    pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::LibraryLoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the artifact involved.
    pub fn path(&self) -> &str {
        match self {
            LoadError::LibraryLoadFailed { path, .. } | LoadError::MissingSymbol { path, .. } => {
                path
            }
        }
    }
}

/// A previously working binding failed while executing a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingRuntimeError {
    /// The SDK reported failure for the call.
    #[error("SDK rejected {operation} on slot {slot}")]
    Rejected {
        /// SDK operation name.
        operation: &'static str,
        /// Target slot.
        slot: SlotIndex,
    },

    /// The call faulted for another reason.
    #[error("{operation} on slot {slot} failed: {reason}")]
    Fault {
        /// SDK operation name.
        operation: &'static str,
        /// Target slot.
        slot: SlotIndex,
        /// Failure description.
        reason: String,
    },
}

impl BindingRuntimeError {
    /// Create a rejected-call error.
    pub fn rejected(operation: &'static str, slot: SlotIndex) -> Self {
        BindingRuntimeError::Rejected { operation, slot }
    }

    /// Create a generic fault.
    pub fn fault(operation: &'static str, slot: SlotIndex, reason: impl Into<String>) -> Self {
        BindingRuntimeError::Fault {
            operation,
            slot,
            reason: reason.into(),
        }
    }

    /// SDK operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            BindingRuntimeError::Rejected { operation, .. }
            | BindingRuntimeError::Fault { operation, .. } => operation,
        }
    }
}
