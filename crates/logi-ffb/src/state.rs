//! Cached connection state.

use core::fmt;

use serde::Serialize;

/// Connection state cached by a [`crate::DeviceSession`].
///
/// ```text
/// Unknown ──ensure_initialized()──► Connected
///    ▲   └─────────────────────────► Disconnected
///    │                                   ▲
///    │         command failure ──────────┘ (from Connected)
///    │
///    └── reconfigure() / shutdown() (from any state)
/// ```
///
/// There is no edge from `Disconnected` back to `Connected`; recovery always
/// passes through `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No initialization attempted since creation or the last reset.
    #[default]
    Unknown,
    /// The binding is initialized and the configured slot has a device.
    Connected,
    /// Initialization failed, no device was found, or a command failed.
    Disconnected,
}

impl ConnectionState {
    /// Whether commands will be forwarded to the binding.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Whether an initialization attempt has been made and cached.
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The state as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
