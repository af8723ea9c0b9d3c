//! Runtime-loaded `RzChromaSDK` DLL.
//!
//! The SDK ships with Razer Synapse rather than with applications, so the
//! library is resolved at runtime with `LoadLibraryW` / `GetProcAddress`
//! and freed again on drop.
#![allow(unsafe_code)]

use std::ffi::c_void;

use log::{debug, info};
use windows::core::{HSTRING, PCSTR};
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

use crate::chroma::protocol::{DeviceId, DeviceInfo, DeviceType, EffectHandle, Guid, ResultCode};
use crate::error::{ChromaError, Result};

use super::NativeSdk;

type InitFn = unsafe extern "C" fn() -> i32;
type CreateEffectFn = unsafe extern "C" fn(i32, *const c_void, *mut Guid) -> i32;
type QueryDeviceFn = unsafe extern "C" fn(Guid, *mut DeviceInfo) -> i32;

/// Resolved SDK exports plus the module handle that keeps them valid.
pub struct SdkLibrary {
    module: HMODULE,
    init: InitFn,
    uninit: InitFn,
    create_keyboard_effect: CreateEffectFn,
    create_mouse_effect: CreateEffectFn,
    create_headset_effect: CreateEffectFn,
    create_mousepad_effect: CreateEffectFn,
    create_keypad_effect: CreateEffectFn,
    query_device: QueryDeviceFn,
}

// The SDK exports are plain C functions with no thread affinity, and the
// module handle is only used again in Drop.
unsafe impl Send for SdkLibrary {}
unsafe impl Sync for SdkLibrary {}

impl SdkLibrary {
    /// Load the SDK from `path` (a file name searched on the DLL path, or
    /// an absolute path) and resolve all exports.
    ///
    /// # Errors
    ///
    /// Returns `Library` if the DLL cannot be loaded or an export is missing.
    pub fn load(path: &str) -> Result<Self> {
        let module = unsafe { LoadLibraryW(&HSTRING::from(path)) }
            .map_err(|e| ChromaError::Library(format!("Failed to load {path}: {e}")))?;

        match Self::resolve(module) {
            Ok(library) => {
                info!("Loaded native Chroma SDK from {path}");
                Ok(library)
            }
            Err(e) => {
                let _ = unsafe { FreeLibrary(module) };
                Err(e)
            }
        }
    }

    fn resolve(module: HMODULE) -> Result<Self> {
        unsafe {
            Ok(Self {
                module,
                init: std::mem::transmute::<*const c_void, InitFn>(export(module, "Init")?),
                uninit: std::mem::transmute::<*const c_void, InitFn>(export(module, "UnInit")?),
                create_keyboard_effect: std::mem::transmute::<*const c_void, CreateEffectFn>(
                    export(module, "CreateKeyboardEffect")?,
                ),
                create_mouse_effect: std::mem::transmute::<*const c_void, CreateEffectFn>(
                    export(module, "CreateMouseEffect")?,
                ),
                create_headset_effect: std::mem::transmute::<*const c_void, CreateEffectFn>(
                    export(module, "CreateHeadsetEffect")?,
                ),
                create_mousepad_effect: std::mem::transmute::<*const c_void, CreateEffectFn>(
                    export(module, "CreateMousepadEffect")?,
                ),
                create_keypad_effect: std::mem::transmute::<*const c_void, CreateEffectFn>(
                    export(module, "CreateKeypadEffect")?,
                ),
                query_device: std::mem::transmute::<*const c_void, QueryDeviceFn>(export(
                    module,
                    "QueryDevice",
                )?),
            })
        }
    }

    const fn create_fn(&self, device_type: DeviceType) -> Option<CreateEffectFn> {
        match device_type {
            DeviceType::Keyboard => Some(self.create_keyboard_effect),
            DeviceType::Mouse => Some(self.create_mouse_effect),
            DeviceType::Headset => Some(self.create_headset_effect),
            DeviceType::Mousepad => Some(self.create_mousepad_effect),
            DeviceType::Keypad => Some(self.create_keypad_effect),
            DeviceType::System => None,
        }
    }
}

/// Look up one export by name.
unsafe fn export(module: HMODULE, name: &str) -> Result<*const c_void> {
    let symbol = format!("{name}\0");
    let proc = GetProcAddress(module, PCSTR(symbol.as_ptr()));
    proc.map(|f| f as *const c_void)
        .ok_or_else(|| ChromaError::Library(format!("Missing SDK export {name}")))
}

impl NativeSdk for SdkLibrary {
    fn init(&self) -> ResultCode {
        ResultCode(unsafe { (self.init)() })
    }

    fn uninit(&self) -> ResultCode {
        ResultCode(unsafe { (self.uninit)() })
    }

    fn create_effect(
        &self,
        device_type: DeviceType,
        effect: i32,
        param: Option<&[u8]>,
    ) -> std::result::Result<EffectHandle, ResultCode> {
        let create = self
            .create_fn(device_type)
            .ok_or(ResultCode::NOT_SUPPORTED)?;

        // Records are made of 4-byte fields; hand the SDK an aligned copy.
        let aligned: Option<Vec<u32>> = param.map(|bytes| {
            bytes
                .chunks(4)
                .map(|c| {
                    let mut word = [0u8; 4];
                    word[..c.len()].copy_from_slice(c);
                    u32::from_le_bytes(word)
                })
                .collect()
        });
        let ptr = aligned
            .as_ref()
            .map_or(std::ptr::null(), |words| words.as_ptr().cast::<c_void>());

        let mut id = Guid::NIL;
        let result = ResultCode(unsafe { create(effect, ptr, &mut id) });
        if result.is_success() {
            Ok(EffectHandle(id))
        } else {
            Err(result)
        }
    }

    fn query_device(&self, id: DeviceId) -> std::result::Result<DeviceInfo, ResultCode> {
        let mut info = DeviceInfo::default();
        let result = ResultCode(unsafe { (self.query_device)(id.0, &mut info) });
        if result.is_success() {
            Ok(info)
        } else {
            Err(result)
        }
    }
}

impl Drop for SdkLibrary {
    fn drop(&mut self) {
        debug!("Unloading native Chroma SDK");
        unsafe {
            let _ = FreeLibrary(self.module);
        }
    }
}
