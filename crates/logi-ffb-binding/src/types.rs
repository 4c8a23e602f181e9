//! Value types shared by every binding implementation.

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the vendor steering wheel SDK wrapper library.
pub const DEFAULT_LIBRARY_NAME: &str = "LogitechSteeringWheelEnginesWrapper.dll";

/// Install location of the legacy steering wheel SDK shipped with G HUB (64-bit).
pub const GHUB_SDK_LIBRARY_PATH: &str =
    r"C:\Program Files\LGHUB\sdk_legacy\bin\x64\LogitechSteeringWheelEnginesWrapper.dll";

/// Device slot addressed by the vendor SDK.
///
/// The SDK addresses controllers by a small integer index rather than by
/// USB path; slot `0` is the first wheel the SDK enumerated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// The first device slot.
    pub const DEFAULT: SlotIndex = SlotIndex(0);

    /// Create a slot index.
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Raw slot number.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for SlotIndex {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Constant-force magnitude as a signed percentage of full scale.
///
/// Always within `[-100, 100]`. Positive values push the wheel clockwise.
///
/// # Examples
///
/// ```
/// use logi_ffb_binding::ForceCommand;
///
/// assert_eq!(ForceCommand::saturating(250).percent(), 100);
/// assert_eq!(ForceCommand::new(-40).map(|f| f.percent()), Some(-40));
/// assert!(ForceCommand::new(101).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ForceCommand(i8);

impl ForceCommand {
    /// Lower bound in percent.
    pub const MIN_PERCENT: i8 = -100;
    /// Upper bound in percent.
    pub const MAX_PERCENT: i8 = 100;
    /// No force.
    pub const ZERO: ForceCommand = ForceCommand(0);

    /// Create a force command, rejecting values outside `[-100, 100]`.
    pub fn new(percent: i32) -> Option<Self> {
        let min = i32::from(Self::MIN_PERCENT);
        let max = i32::from(Self::MAX_PERCENT);
        if (min..=max).contains(&percent) {
            i8::try_from(percent).ok().map(Self)
        } else {
            None
        }
    }

    /// Create a force command, clamping into `[-100, 100]`.
    pub fn saturating(percent: i32) -> Self {
        let clamped = percent.clamp(i32::from(Self::MIN_PERCENT), i32::from(Self::MAX_PERCENT));
        Self(i8::try_from(clamped).unwrap_or(0))
    }

    /// Signed percentage.
    pub fn percent(self) -> i32 {
        i32::from(self.0)
    }

    /// Whether this command requests no force.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ForceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Where to load the vendor SDK library from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum BindingSource {
    /// Look the library up by [`DEFAULT_LIBRARY_NAME`] through the platform
    /// loader, then fall back to [`GHUB_SDK_LIBRARY_PATH`].
    #[default]
    Default,
    /// Load exactly this file.
    Path(PathBuf),
}

impl BindingSource {
    /// Source for an explicit library path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Explicit path, if any.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Default => None,
            Self::Path(path) => Some(path),
        }
    }

    /// Candidate library locations, in the order they are tried.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match self {
            Self::Default => vec![
                PathBuf::from(DEFAULT_LIBRARY_NAME),
                PathBuf::from(GHUB_SDK_LIBRARY_PATH),
            ],
            Self::Path(path) => vec![path.clone()],
        }
    }
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default ({DEFAULT_LIBRARY_NAME})"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
