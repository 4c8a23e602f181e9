//! Device session: owner of the binding handle and its connection state.
//!
//! A [`DeviceSession`] is the only thing that creates or destroys a binding.
//! It initializes lazily, caches the outcome, and never retries on its own:
//!
//! - The first command (or an explicit [`DeviceSession::ensure_initialized`])
//!   loads and initializes the binding and queries the configured slot.
//! - The outcome is cached. While `Connected`, commands are forwarded; while
//!   `Disconnected`, commands are silently skipped.
//! - A failing command demotes `Connected` to `Disconnected`.
//! - Only [`DeviceSession::reconfigure`] (or a new session) brings the state
//!   back to `Unknown` and allows another initialization attempt.
//!
//! All calls block on the binding; there is no internal threading.

use core::fmt;

use logi_ffb_binding::{
    BindingLoader, BindingRuntimeError, ForceCommand, SdkLoader, SlotIndex, SteeringBinding,
};

use crate::config::DeviceConfig;
use crate::error::{BindingInitError, CommandKind, ForceCommandError, Result};
use crate::state::ConnectionState;
use crate::translate::{AngleCommand, translate};

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The force was forwarded to the binding.
    Sent(ForceCommand),
    /// The stop was forwarded to the binding.
    Stopped,
    /// Nothing was forwarded because the session is not connected.
    Skipped(ConnectionState),
}

impl CommandOutcome {
    /// Whether the command reached the binding.
    pub fn was_forwarded(self) -> bool {
        !matches!(self, CommandOutcome::Skipped(_))
    }
}

/// Single-device force-feedback session.
///
/// # Example
///
/// ```rust,no_run
/// use logi_ffb::prelude::*;
///
/// let mut session = DeviceSession::new(DeviceConfig::default());
/// match session.send_angle(AngleCommand::from(90)) {
///     Ok(CommandOutcome::Sent(force)) => println!("sent {force}"),
///     Ok(CommandOutcome::Skipped(state)) => println!("not connected: {state}"),
///     Ok(CommandOutcome::Stopped) => {}
///     Err(err) => eprintln!("{err}"),
/// }
/// session.shutdown();
/// ```
pub struct DeviceSession<L: BindingLoader = SdkLoader> {
    loader: L,
    config: DeviceConfig,
    state: ConnectionState,
    binding: Option<L::Binding>,
}

impl DeviceSession<SdkLoader> {
    /// Create a session over the vendor SDK.
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_loader(SdkLoader::new(), config)
    }
}

impl<L: BindingLoader> DeviceSession<L> {
    /// Create a session that loads bindings with `loader`.
    pub fn with_loader(loader: L, config: DeviceConfig) -> Self {
        Self {
            loader,
            config,
            state: ConnectionState::Unknown,
            binding: None,
        }
    }

    /// Cached connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Current configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Whether a binding is currently held.
    pub fn has_handle(&self) -> bool {
        self.binding.is_some()
    }

    /// Initialize the binding if no attempt has been cached yet.
    ///
    /// Returns the cached state without touching the binding when the state
    /// is already `Connected` or `Disconnected`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingInitError`] when the attempt made by this call
    /// fails; the state is then `Disconnected`. On
    /// [`BindingInitError::DeviceNotFound`] the initialized binding is kept
    /// so that [`DeviceSession::shutdown`] can release it through the SDK.
    pub fn ensure_initialized(&mut self) -> std::result::Result<ConnectionState, BindingInitError> {
        if self.state.is_known() {
            tracing::debug!(state = %self.state, "Using cached connection state");
            return Ok(self.state);
        }

        match self.initialize() {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                Ok(self.state)
            }
            Err(err) => {
                self.state = ConnectionState::Disconnected;
                tracing::warn!(
                    binding = %self.config.binding,
                    slot = %self.config.slot,
                    error = %err,
                    "Force feedback initialization failed"
                );
                Err(err)
            }
        }
    }

    fn initialize(&mut self) -> std::result::Result<(), BindingInitError> {
        let mut binding = self.loader.load(&self.config.binding)?;

        if !binding.initialize() {
            // Dropping the uninitialized binding unloads it.
            return Err(BindingInitError::sdk_init_failed(binding.describe()));
        }

        let slot = self.config.slot;
        let connected = binding.is_connected(slot);
        let description = binding.describe();
        self.binding = Some(binding);

        if connected {
            tracing::info!(binding = %description, slot = %slot, "Steering wheel connected");
            Ok(())
        } else {
            Err(BindingInitError::device_not_found(slot))
        }
    }

    /// Replace the configuration and drop the current binding.
    ///
    /// The state returns to `Unknown`; the next command or
    /// [`DeviceSession::ensure_initialized`] call makes a fresh attempt.
    pub fn reconfigure(&mut self, config: DeviceConfig) {
        self.release();
        tracing::info!(
            binding = %config.binding,
            slot = %config.slot,
            "Force feedback reconfigured; reinitializing on next command"
        );
        self.config = config;
        self.state = ConnectionState::Unknown;
    }

    /// Translate `angle` and play it as a constant force.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FfbError::Init`] if this call's initialization attempt
    /// fails and [`crate::FfbError::Command`] if the binding rejects the
    /// force. Being disconnected is not an error: the result is
    /// [`CommandOutcome::Skipped`].
    pub fn send_angle(&mut self, angle: AngleCommand) -> Result<CommandOutcome> {
        let force = translate(angle);
        let forwarded = self.dispatch(CommandKind::Force, |binding, slot| {
            binding.send_force(slot, force)
        })?;
        if forwarded {
            tracing::debug!(angle = %angle, force = %force, "Constant force sent");
            Ok(CommandOutcome::Sent(force))
        } else {
            Ok(CommandOutcome::Skipped(self.state))
        }
    }

    /// Stop every effect on the configured slot.
    ///
    /// Gated exactly like [`DeviceSession::send_angle`]. Never panics.
    ///
    /// # Errors
    ///
    /// Same as [`DeviceSession::send_angle`].
    pub fn stop_all(&mut self) -> Result<CommandOutcome> {
        let forwarded = self.dispatch(CommandKind::StopAll, |binding, slot| binding.stop_all(slot))?;
        if forwarded {
            tracing::debug!("All effects stopped");
            Ok(CommandOutcome::Stopped)
        } else {
            Ok(CommandOutcome::Skipped(self.state))
        }
    }

    /// Stop forces, release the binding, and return to `Unknown`.
    ///
    /// Failures of the final stop are logged and otherwise ignored. Calling
    /// this again has no further effect.
    pub fn shutdown(&mut self) {
        if self.binding.is_some() {
            if let Err(err) = self.stop_all() {
                tracing::warn!(error = %err, "Stopping forces during shutdown failed");
            }
        }
        self.release();
        self.state = ConnectionState::Unknown;
    }

    fn dispatch<F>(&mut self, command: CommandKind, call: F) -> Result<bool>
    where
        F: FnOnce(&mut L::Binding, SlotIndex) -> std::result::Result<(), BindingRuntimeError>,
    {
        let state = self.ensure_initialized()?;
        if !state.is_connected() {
            tracing::debug!(command = %command, state = %state, "Command skipped");
            return Ok(false);
        }

        let slot = self.config.slot;
        let Some(binding) = self.binding.as_mut() else {
            self.state = ConnectionState::Disconnected;
            return Ok(false);
        };

        match call(binding, slot) {
            Ok(()) => Ok(true),
            Err(source) => {
                self.state = ConnectionState::Disconnected;
                tracing::warn!(
                    command = %command,
                    slot = %slot,
                    error = %source,
                    "Force feedback command failed; connection demoted to Disconnected"
                );
                Err(ForceCommandError::new(command, source).into())
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut binding) = self.binding.take() {
            binding.shutdown();
            tracing::info!(binding = %binding.describe(), "Binding released");
        }
    }
}

impl<L: BindingLoader> Drop for DeviceSession<L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<L: BindingLoader> fmt::Debug for DeviceSession<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_handle", &self.binding.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FfbError;
    use logi_ffb_binding::mock::{CallCounts, MockLoader};
    use tracing_test::traced_test;

    fn session(loader: &MockLoader) -> DeviceSession<MockLoader> {
        DeviceSession::with_loader(loader.clone(), DeviceConfig::default())
    }

    #[test]
    fn test_new_session_is_unknown_without_handle() {
        let loader = MockLoader::new();
        let session = session(&loader);
        assert_eq!(session.state(), ConnectionState::Unknown);
        assert!(!session.has_handle());
        assert_eq!(loader.calls().loads, 0);
    }

    #[test]
    fn test_ensure_initialized_connects() -> std::result::Result<(), BindingInitError> {
        let loader = MockLoader::new();
        let mut session = session(&loader);

        assert_eq!(session.ensure_initialized()?, ConnectionState::Connected);
        assert!(session.has_handle());
        let calls = loader.calls();
        assert_eq!(calls.loads, 1);
        assert_eq!(calls.initializes, 1);
        assert_eq!(calls.connection_queries, 1);
        Ok(())
    }

    #[test]
    fn test_ensure_initialized_is_cached() -> std::result::Result<(), BindingInitError> {
        let loader = MockLoader::new();
        let mut session = session(&loader);

        session.ensure_initialized()?;
        session.ensure_initialized()?;
        session.ensure_initialized()?;
        assert_eq!(loader.calls().loads, 1);
        assert_eq!(loader.calls().connection_queries, 1);
        Ok(())
    }

    #[test]
    fn test_load_failure_leaves_no_handle() {
        let loader = MockLoader::missing();
        let mut session = session(&loader);

        let result = session.ensure_initialized();
        assert!(matches!(result, Err(BindingInitError::Load(_))));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.has_handle());
    }

    #[test]
    fn test_sdk_init_failure_drops_partial_handle() {
        let loader = MockLoader::new().with_failing_initialize();
        let mut session = session(&loader);

        let result = session.ensure_initialized();
        assert!(matches!(result, Err(BindingInitError::SdkInitFailed { .. })));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.has_handle());
        assert_eq!(loader.live_bindings(), 0);
        assert_eq!(loader.calls().connection_queries, 0);
    }

    #[test]
    fn test_device_not_found_keeps_handle_for_shutdown() {
        let loader = MockLoader::new().with_no_devices();
        let mut session = session(&loader);

        let result = session.ensure_initialized();
        assert!(matches!(
            result,
            Err(BindingInitError::DeviceNotFound { slot }) if slot == SlotIndex::DEFAULT
        ));
        assert!(session.has_handle());

        session.shutdown();
        assert_eq!(loader.calls().shutdowns, 1);
        assert_eq!(loader.live_bindings(), 0);
    }

    #[test]
    fn test_failed_init_is_cached_as_disconnected() -> Result<()> {
        let loader = MockLoader::missing();
        let mut session = session(&loader);

        assert!(session.ensure_initialized().is_err());
        assert_eq!(session.ensure_initialized(), Ok(ConnectionState::Disconnected));
        assert_eq!(
            session.send_angle(AngleCommand::from(90))?,
            CommandOutcome::Skipped(ConnectionState::Disconnected)
        );
        assert_eq!(loader.calls().loads, 1);
        assert_eq!(loader.calls().forces, 0);
        Ok(())
    }

    #[test]
    fn test_send_angle_lazily_initializes_and_forwards() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);

        let outcome = session.send_angle(AngleCommand::from(225))?;
        assert_eq!(outcome, CommandOutcome::Sent(ForceCommand::saturating(50)));
        assert!(outcome.was_forwarded());
        assert_eq!(loader.calls().loads, 1);
        assert_eq!(
            loader.forces_sent(),
            vec![(SlotIndex::DEFAULT, ForceCommand::saturating(50))]
        );
        Ok(())
    }

    #[test]
    fn test_send_angle_propagates_first_init_failure() {
        let loader = MockLoader::new().with_no_devices();
        let mut session = session(&loader);

        let result = session.send_angle(AngleCommand::from(45));
        assert!(matches!(
            result,
            Err(FfbError::Init(BindingInitError::DeviceNotFound { .. }))
        ));
        assert_eq!(loader.calls().forces, 0);
    }

    #[test]
    #[traced_test]
    fn test_force_failure_demotes_without_retry() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);
        session.ensure_initialized()?;

        loader.set_force_fault(true);
        let result = session.send_angle(AngleCommand::from(90));
        assert!(matches!(
            result,
            Err(FfbError::Command(ForceCommandError {
                command: CommandKind::Force,
                ..
            }))
        ));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(logs_contain("demoted to Disconnected"));

        // Even once the fault clears, nothing is retried.
        loader.set_force_fault(false);
        for _ in 0..5 {
            assert_eq!(
                session.send_angle(AngleCommand::from(90))?,
                CommandOutcome::Skipped(ConnectionState::Disconnected)
            );
        }
        assert_eq!(loader.calls().forces, 1);
        assert_eq!(loader.calls().loads, 1);
        Ok(())
    }

    #[test]
    fn test_stop_failure_demotes() -> std::result::Result<(), BindingInitError> {
        let loader = MockLoader::new().with_stop_fault();
        let mut session = session(&loader);
        session.ensure_initialized()?;

        let result = session.stop_all();
        assert!(matches!(
            result,
            Err(FfbError::Command(ForceCommandError {
                command: CommandKind::StopAll,
                ..
            }))
        ));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        Ok(())
    }

    #[test]
    fn test_reconfigure_releases_and_resets() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);
        session.send_angle(AngleCommand::from(10))?;
        assert_eq!(loader.live_bindings(), 1);

        session.reconfigure(DeviceConfig::from_path("other.dll").with_slot(1));
        assert_eq!(session.state(), ConnectionState::Unknown);
        assert!(!session.has_handle());
        assert_eq!(loader.live_bindings(), 0);
        assert_eq!(loader.calls().shutdowns, 1);
        assert_eq!(session.config().slot, SlotIndex::new(1));
        // Reconfiguring does not itself attempt initialization.
        assert_eq!(loader.calls().loads, 1);
        Ok(())
    }

    #[test]
    fn test_reconfigure_recovers_after_demotion() -> Result<()> {
        let loader = MockLoader::new().with_force_fault();
        let mut session = session(&loader);
        assert!(session.send_angle(AngleCommand::from(90)).is_err());

        loader.set_force_fault(false);
        session.reconfigure(DeviceConfig::default());
        let outcome = session.send_angle(AngleCommand::from(90))?;
        assert_eq!(outcome, CommandOutcome::Sent(ForceCommand::saturating(20)));
        assert_eq!(loader.calls().loads, 2);
        Ok(())
    }

    #[test]
    fn test_reconfigure_uses_new_source() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);
        session.reconfigure(DeviceConfig::from_path("X"));
        session.stop_all()?;

        assert_eq!(
            loader.sources_loaded(),
            vec![logi_ffb_binding::BindingSource::path("X")]
        );
        Ok(())
    }

    #[test]
    fn test_shutdown_stops_then_releases() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);
        session.send_angle(AngleCommand::from(-300))?;

        session.shutdown();
        assert_eq!(session.state(), ConnectionState::Unknown);
        assert!(!session.has_handle());
        assert_eq!(loader.calls().stops, 1);
        assert_eq!(loader.calls().shutdowns, 1);
        Ok(())
    }

    #[test]
    fn test_shutdown_is_idempotent() -> Result<()> {
        let loader = MockLoader::new();
        let mut session = session(&loader);
        session.send_angle(AngleCommand::from(100))?;

        session.shutdown();
        let after_first = (session.state(), session.has_handle(), loader.calls());
        session.shutdown();
        let after_second = (session.state(), session.has_handle(), loader.calls());
        assert_eq!(after_first, after_second);
        Ok(())
    }

    #[test]
    fn test_shutdown_before_initialization_touches_nothing() {
        let loader = MockLoader::new();
        let mut session = session(&loader);

        session.shutdown();
        assert_eq!(loader.calls(), CallCounts::default());
        assert_eq!(session.state(), ConnectionState::Unknown);
    }

    #[test]
    fn test_shutdown_swallows_stop_failure() -> std::result::Result<(), BindingInitError> {
        let loader = MockLoader::new().with_stop_fault();
        let mut session = session(&loader);
        session.ensure_initialized()?;

        session.shutdown();
        assert_eq!(session.state(), ConnectionState::Unknown);
        assert!(!session.has_handle());
        assert_eq!(loader.calls().shutdowns, 1);
        Ok(())
    }

    #[test]
    fn test_drop_shuts_down() -> std::result::Result<(), BindingInitError> {
        let loader = MockLoader::new();
        {
            let mut session = session(&loader);
            session.ensure_initialized()?;
        }
        assert_eq!(loader.calls().stops, 1);
        assert_eq!(loader.calls().shutdowns, 1);
        assert_eq!(loader.live_bindings(), 0);
        Ok(())
    }

    #[test]
    fn test_targets_configured_slot() -> Result<()> {
        let loader = MockLoader::new().with_connected_slots(&[false, false, true]);
        let mut session =
            DeviceSession::with_loader(loader.clone(), DeviceConfig::default().with_slot(2));

        session.send_angle(AngleCommand::from(-450))?;
        assert_eq!(
            loader.forces_sent(),
            vec![(SlotIndex::new(2), ForceCommand::saturating(-100))]
        );
        Ok(())
    }
}
