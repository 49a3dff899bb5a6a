//! The module/driver registry and the `Library` handle that owns it.

use crate::driver::Driver;
use crate::error::{Error, ErrorKind, Module as ErrorModule, Result};
use crate::face::Face;
use crate::renderer::Renderer;
use crate::slot::GlyphSlot;
use log::{debug, warn};

/// Upper bound on registered font drivers, mirroring `FT_MAX_DRIVERS`.
pub const MAX_DRIVERS: usize = 32;

/// A module's own version and the minimum library version it requires,
/// used for the registration-time gating check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(pub u16, pub u16, pub u16);

/// The version of this library build, checked against each registered
/// module's `requires` field.
pub const LIBRARY_VERSION: Version = Version(1, 0, 0);

struct DriverEntry {
    driver: Box<dyn Driver>,
    version: Version,
}

/// Observable points in the loader state machine, passed to a
/// registered debug hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoaderState {
    Start,
    LoadUnscaled,
    LoadScaled,
    Autohint,
    RenderOrDone,
    SelectRenderer,
    Rasterize,
    End,
}

/// A debug hook observing every loader state transition.
pub type DebugHook = Box<dyn Fn(LoaderState, &GlyphSlot) + Send + Sync>;

/// The process-wide registry root.
pub struct Library {
    drivers: Vec<DriverEntry>,
    renderers: Vec<Box<dyn Renderer>>,
    debug_hook: Option<DebugHook>,
}

impl Default for Library {
    fn default() -> Self {
        Library::new()
    }
}

impl Library {
    pub fn new() -> Library {
        Library {
            drivers: Vec::new(),
            renderers: Vec::new(),
            debug_hook: None,
        }
    }

    /// Register a font-format driver, gating on version and rejecting a
    /// duplicate name.
    pub fn register_driver(&mut self, driver: Box<dyn Driver>, version: Version) -> Result<()> {
        if self.drivers.len() >= MAX_DRIVERS {
            return Err(Error::new(ErrorModule::Base, ErrorKind::TooManyDrivers));
        }
        if self.drivers.iter().any(|e| e.driver.name() == driver.name()) {
            return Err(Error::invalid_argument(ErrorModule::Base));
        }
        Self::check_module_version(version)?;
        debug!("registering driver {:?} v{:?}", driver.name(), version);
        self.drivers.push(DriverEntry { driver, version });
        Ok(())
    }

    /// Reverse lookup by name, for callers that only know the driver
    /// they want by its registered name.
    pub fn driver_named(&self, name: &str) -> Option<&dyn Driver> {
        self.drivers
            .iter()
            .find(|e| e.driver.name() == name)
            .map(|e| e.driver.as_ref())
    }

    /// Check a module's declared minimum library version against
    /// [`LIBRARY_VERSION`], failing with `invalid_version` when the
    /// module demands a newer library than this build.
    pub fn check_module_version(required: Version) -> Result<()> {
        if required > LIBRARY_VERSION {
            return Err(Error::new(ErrorModule::Base, ErrorKind::InvalidVersion));
        }
        Ok(())
    }

    pub fn register_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub(crate) fn renderers(&self) -> &[Box<dyn Renderer>] {
        &self.renderers
    }

    pub fn set_debug_hook(&mut self, hook: DebugHook) {
        self.debug_hook = Some(hook);
    }

    pub(crate) fn notify(&self, state: LoaderState, slot: &GlyphSlot) {
        if let Some(hook) = &self.debug_hook {
            hook(state, slot);
        }
    }

    /// Probe registered drivers in insertion order. The first driver that
    /// recognizes the stream owns the face; a parse error aborts the scan
    /// immediately since the stream is malformed, not merely foreign.
    pub fn open_face(&self, data: &[u8], face_index: u32) -> Result<Face> {
        for entry in &self.drivers {
            match entry.driver.face_init(data, face_index) {
                Ok(Some(driver_face)) => {
                    return Ok(Face::new(entry.driver.name().to_string(), driver_face));
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!("driver {} rejected stream: {e}", entry.driver.name());
                    return Err(e);
                }
            }
        }
        Err(Error::new(ErrorModule::Base, ErrorKind::UnknownFileFormat))
    }
}
