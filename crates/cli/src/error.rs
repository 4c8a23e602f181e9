//! Error types for the ffbtest CLI

use logi_ffb::{BindingInitError, FfbError, ForceCommandError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Init(#[from] BindingInitError),

    #[error(transparent)]
    Command(#[from] ForceCommandError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<FfbError> for CliError {
    fn from(err: FfbError) -> Self {
        match err {
            FfbError::Init(err) => Self::Init(err),
            FfbError::Command(err) => Self::Command(err),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Init(BindingInitError::DeviceNotFound { .. }) => 2,
            Self::Init(_) => 3,
            Self::Command(_) => 4,
            Self::InvalidInput(_) | Self::IoError(_) => 1,
        }
    }

    /// Troubleshooting hints to show alongside the error, if any.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::Init(err) => err.troubleshooting_hints(),
            _ => &[],
        }
    }
}
