//! Production binding over the vendor steering wheel SDK.
//!
//! The SDK ships as `LogitechSteeringWheelEnginesWrapper.dll` and exposes a
//! flat C interface. Every export used here is resolved when the library is
//! loaded, so an incompatible artifact fails in [`SdkLoader::load`] rather
//! than in the middle of a command.

use std::path::{Path, PathBuf};

use libloading::Library;

use crate::binding::{BindingLoader, SteeringBinding};
use crate::error::{BindingRuntimeError, LoadError};
use crate::types::{BindingSource, ForceCommand, SlotIndex};

// Signatures of the SDK exports. `system` is stdcall on 32-bit Windows and
// the C ABI everywhere else, which matches how the wrapper is built.
type InitializeFn = unsafe extern "system" fn(ignore_x_input_controllers: bool) -> bool;
type UpdateFn = unsafe extern "system" fn() -> bool;
type IsConnectedFn = unsafe extern "system" fn(index: i32) -> bool;
type PlayConstantForceFn = unsafe extern "system" fn(index: i32, magnitude_percentage: i32) -> bool;
type StopForceFn = unsafe extern "system" fn(index: i32) -> bool;
type ShutdownFn = unsafe extern "system" fn();

const SYM_INITIALIZE: &str = "LogiSteeringInitialize";
const SYM_UPDATE: &str = "LogiUpdate";
const SYM_IS_CONNECTED: &str = "LogiIsConnected";
const SYM_PLAY_CONSTANT: &str = "LogiPlayConstantForce";
const SYM_STOP_CONSTANT: &str = "LogiStopConstantForce";
const SYM_STOP_SPRING: &str = "LogiStopSpringForce";
const SYM_STOP_DAMPER: &str = "LogiStopDamperForce";
const SYM_SHUTDOWN: &str = "LogiSteeringShutdown";

/// Loads [`SdkBinding`]s with `libloading`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkLoader;

impl SdkLoader {
    /// Create a loader.
    pub fn new() -> Self {
        Self
    }
}

impl BindingLoader for SdkLoader {
    type Binding = SdkBinding;

    fn load(&self, source: &BindingSource) -> Result<SdkBinding, LoadError> {
        let mut failures = Vec::new();

        for candidate in source.candidates() {
            match SdkBinding::open(&candidate) {
                Ok(binding) => return Ok(binding),
                // A library that opened but lacks exports is the wrong
                // artifact; trying further candidates would hide that.
                Err(err @ LoadError::MissingSymbol { .. }) => return Err(err),
                Err(err) => {
                    tracing::debug!(
                        library = %candidate.display(),
                        error = %err,
                        "Binding candidate rejected"
                    );
                    failures.push(err);
                }
            }
        }

        match failures.len() {
            1 => Err(failures.remove(0)),
            _ => Err(LoadError::load_failed(
                source.to_string(),
                failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }
}

/// A loaded steering wheel SDK.
///
/// The library stays loaded for as long as this value lives. Dropping an
/// initialized binding that was never shut down shuts the SDK down first.
pub struct SdkBinding {
    path: PathBuf,
    logi_initialize: InitializeFn,
    logi_update: UpdateFn,
    logi_is_connected: IsConnectedFn,
    play_constant: PlayConstantForceFn,
    stop_constant: StopForceFn,
    stop_spring: StopForceFn,
    stop_damper: StopForceFn,
    logi_shutdown: ShutdownFn,
    initialized: bool,
    shut_down: bool,
    // Declared last so the resolved entry points never outlive it.
    _library: Library,
}

impl std::fmt::Debug for SdkBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkBinding")
            .field("path", &self.path)
            .field("initialized", &self.initialized)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl SdkBinding {
    /// Open the SDK library at `path` and resolve its exports.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::LibraryLoadFailed`] if the library cannot be
    /// opened and [`LoadError::MissingSymbol`] if an export is absent.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let library_path = path.display().to_string();

        // SAFETY: loading the vendor SDK runs its initialization routines;
        // the library is a plain C wrapper without loader-time side effects
        // beyond its own static state.
        let library = unsafe { Library::new(path) }
            .map_err(|e| LoadError::load_failed(library_path.clone(), e.to_string()))?;

        let binding = Self {
            logi_initialize: resolve::<InitializeFn>(&library, &library_path, SYM_INITIALIZE)?,
            logi_update: resolve::<UpdateFn>(&library, &library_path, SYM_UPDATE)?,
            logi_is_connected: resolve::<IsConnectedFn>(&library, &library_path, SYM_IS_CONNECTED)?,
            play_constant: resolve::<PlayConstantForceFn>(&library, &library_path, SYM_PLAY_CONSTANT)?,
            stop_constant: resolve::<StopForceFn>(&library, &library_path, SYM_STOP_CONSTANT)?,
            stop_spring: resolve::<StopForceFn>(&library, &library_path, SYM_STOP_SPRING)?,
            stop_damper: resolve::<StopForceFn>(&library, &library_path, SYM_STOP_DAMPER)?,
            logi_shutdown: resolve::<ShutdownFn>(&library, &library_path, SYM_SHUTDOWN)?,
            path: path.to_path_buf(),
            initialized: false,
            shut_down: false,
            _library: library,
        };

        tracing::info!(library = %library_path, "Steering wheel SDK loaded");
        Ok(binding)
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn stop_effect(
        &self,
        stop: StopForceFn,
        operation: &'static str,
        slot: SlotIndex,
    ) -> Result<(), BindingRuntimeError> {
        // SAFETY: `stop` was resolved from `_library`, which is still loaded,
        // and has the exported `bool(int)` signature.
        let ok = unsafe { stop(i32::from(slot.get())) };
        if ok {
            Ok(())
        } else {
            Err(BindingRuntimeError::rejected(operation, slot))
        }
    }
}

fn resolve<T: Copy>(library: &Library, path: &str, symbol: &'static str) -> Result<T, LoadError> {
    // SAFETY: every `T` passed here is one of the function pointer aliases
    // above, each matching the documented signature of `symbol`.
    let sym = unsafe { library.get::<T>(symbol.as_bytes()) }.map_err(|e| {
        LoadError::MissingSymbol {
            path: path.to_string(),
            symbol,
            reason: e.to_string(),
        }
    })?;
    Ok(*sym)
}

impl SteeringBinding for SdkBinding {
    fn initialize(&mut self) -> bool {
        // SAFETY: resolved from the live library with the exported signature.
        let ok = unsafe { (self.logi_initialize)(false) };
        self.initialized = ok;
        ok
    }

    fn is_connected(&mut self, slot: SlotIndex) -> bool {
        // SAFETY: resolved from the live library with the exported signature.
        let updated = unsafe { (self.logi_update)() };
        if !updated {
            tracing::debug!(slot = %slot, "LogiUpdate reported no fresh state");
        }
        // SAFETY: resolved from the live library with the exported signature.
        unsafe { (self.logi_is_connected)(i32::from(slot.get())) }
    }

    fn send_force(
        &mut self,
        slot: SlotIndex,
        force: ForceCommand,
    ) -> Result<(), BindingRuntimeError> {
        // SAFETY: resolved from the live library with the exported signature;
        // the magnitude is already within the SDK's [-100, 100] domain.
        let ok = unsafe { (self.play_constant)(i32::from(slot.get()), force.percent()) };
        if ok {
            Ok(())
        } else {
            Err(BindingRuntimeError::rejected(SYM_PLAY_CONSTANT, slot))
        }
    }

    fn stop_all(&mut self, slot: SlotIndex) -> Result<(), BindingRuntimeError> {
        self.stop_effect(self.stop_constant, SYM_STOP_CONSTANT, slot)?;
        self.stop_effect(self.stop_spring, SYM_STOP_SPRING, slot)?;
        self.stop_effect(self.stop_damper, SYM_STOP_DAMPER, slot)
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        // SAFETY: resolved from the live library with the exported signature.
        unsafe { (self.logi_shutdown)() };
        self.shut_down = true;
        self.initialized = false;
        tracing::info!(library = %self.path.display(), "Steering wheel SDK shut down");
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for SdkBinding {
    fn drop(&mut self) {
        if self.initialized && !self.shut_down {
            self.shutdown();
        }
    }
}
