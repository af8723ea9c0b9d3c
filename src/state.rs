use std::sync::Arc;

use log::{debug, error, info};
use parking_lot::Mutex;

use crate::chroma::controller::Device;
use crate::chroma::devices::{DeviceKind, Headset, Keyboard, Keypad, Mouse, Mousepad};
use crate::chroma::protocol::{DeviceId, DeviceType, ResultCode};
use crate::config::ChromaConfig;
use crate::error::Result;
use crate::native::{NativeCall, SharedSdk};

/// Lazily constructed dispatcher for one device family.
struct Slot<K: DeviceKind> {
    device: Mutex<Option<Arc<Device<K>>>>,
}

impl<K: DeviceKind> Slot<K> {
    fn new() -> Self {
        Self {
            device: Mutex::new(None),
        }
    }

    /// Check-then-create under the slot lock; racing callers get the same `Arc`.
    fn get_or_create(&self, chroma: &Chroma) -> Result<Arc<Device<K>>> {
        let mut slot = self.device.lock();
        if let Some(device) = slot.as_ref() {
            return Ok(Arc::clone(device));
        }
        chroma.ensure_initialized()?;
        let device = Arc::new(Device::new(chroma.native.clone()));
        *slot = Some(Arc::clone(&device));
        Ok(device)
    }
}

/// Owns the SDK session and one dispatcher per device family.
///
/// Pass it explicitly to whatever needs device access. Dropping it
/// uninitializes the SDK.
pub struct Chroma {
    native: NativeCall,
    clear_on_uninitialize: bool,
    initialized: Mutex<bool>,
    keyboard: Slot<Keyboard>,
    mouse: Slot<Mouse>,
    headset: Slot<Headset>,
    mousepad: Slot<Mousepad>,
    keypad: Slot<Keypad>,
}

impl Chroma {
    /// Wrap an SDK implementation with default settings.
    #[must_use]
    pub fn new(sdk: SharedSdk) -> Self {
        Self {
            native: NativeCall::new(sdk),
            clear_on_uninitialize: false,
            initialized: Mutex::new(false),
            keyboard: Slot::new(),
            mouse: Slot::new(),
            headset: Slot::new(),
            mousepad: Slot::new(),
            keypad: Slot::new(),
        }
    }

    /// Wrap an SDK implementation and apply `config`.
    #[must_use]
    pub fn with_config(sdk: SharedSdk, config: &ChromaConfig) -> Self {
        log::set_max_level(config.level_filter());
        let mut chroma = Self::new(sdk);
        chroma.clear_on_uninitialize = config.clear_on_uninitialize;
        chroma
    }

    /// Load the native SDK named by `config.sdk_library`.
    ///
    /// # Errors
    ///
    /// Returns `Library` if the DLL or one of its exports is missing.
    #[cfg(windows)]
    pub fn load(config: &ChromaConfig) -> Result<Self> {
        let library = crate::native::library::SdkLibrary::load(&config.sdk_library)?;
        Ok(Self::with_config(Arc::new(library), config))
    }

    // ── Session ──────────────────────────────────────────────

    /// Initialize the SDK if it is not already.
    pub fn initialize(&self) -> Result<()> {
        self.ensure_initialized()
    }

    /// Drop every dispatcher and uninitialize the SDK.
    ///
    /// Devices still held elsewhere stay usable as values, but their
    /// native calls fail until the SDK is initialized again.
    /// If `UnInit` fails the SDK stays initialized and every dispatcher
    /// stays in place.
    pub fn uninitialize(&self) -> Result<()> {
        // Slot locks before the init lock, same order as `get_or_create`.
        let mut keyboard = self.keyboard.device.lock();
        let mut mouse = self.mouse.device.lock();
        let mut headset = self.headset.device.lock();
        let mut mousepad = self.mousepad.device.lock();
        let mut keypad = self.keypad.device.lock();

        let mut initialized = self.initialized.lock();
        if !*initialized {
            return Ok(());
        }

        if self.clear_on_uninitialize {
            clear_quietly(keyboard.as_deref());
            clear_quietly(mouse.as_deref());
            clear_quietly(headset.as_deref());
            clear_quietly(mousepad.as_deref());
            clear_quietly(keypad.as_deref());
        }

        self.native.uninit()?;
        *initialized = false;
        *keyboard = None;
        *mouse = None;
        *headset = None;
        *mousepad = None;
        *keypad = None;
        info!("Chroma SDK uninitialized");
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }

    fn ensure_initialized(&self) -> Result<()> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }
        match self.native.init() {
            Ok(()) => info!("Chroma SDK initialized"),
            Err(e) if e.result_code() == Some(ResultCode::ALREADY_INITIALIZED) => {
                debug!("Chroma SDK was already initialized");
            }
            Err(e) => return Err(e),
        }
        *initialized = true;
        Ok(())
    }

    // ── Devices ──────────────────────────────────────────────

    pub fn keyboard(&self) -> Result<Arc<Device<Keyboard>>> {
        self.keyboard.get_or_create(self)
    }

    pub fn mouse(&self) -> Result<Arc<Device<Mouse>>> {
        self.mouse.get_or_create(self)
    }

    pub fn headset(&self) -> Result<Arc<Device<Headset>>> {
        self.headset.get_or_create(self)
    }

    pub fn mousepad(&self) -> Result<Arc<Device<Mousepad>>> {
        self.mousepad.get_or_create(self)
    }

    pub fn keypad(&self) -> Result<Arc<Device<Keypad>>> {
        self.keypad.get_or_create(self)
    }

    /// Connected devices of `device_type`.
    pub fn query(&self, device_type: DeviceType) -> Result<Vec<DeviceId>> {
        self.ensure_initialized()?;
        self.native.query_devices(device_type)
    }
}

fn clear_quietly<K: DeviceKind>(device: Option<&Device<K>>) {
    if let Some(device) = device {
        if let Err(e) = device.clear() {
            error!("Failed to clear {:?}: {e}", K::DEVICE_TYPE);
        }
    }
}

impl Drop for Chroma {
    fn drop(&mut self) {
        if let Err(e) = self.uninitialize() {
            error!("Chroma SDK uninitialize failed: {e}");
        }
    }
}
