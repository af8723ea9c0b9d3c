//! Native Chroma SDK call boundary.
//!
//! [`NativeSdk`] mirrors the handful of exports this crate needs. Methods
//! return the raw [`ResultCode`] on failure; [`NativeCall`] turns those into
//! [`ChromaError::NativeCall`] tagged with the export name.

#[cfg(windows)]
pub mod library;

use std::sync::Arc;

use log::{debug, warn};

use crate::chroma::protocol::{
    DeviceId, DeviceInfo, DeviceType, EffectHandle, ResultCode, ResultKind, KNOWN_DEVICES,
};
use crate::error::{ChromaError, Result};

/// The native SDK surface.
///
/// # Implementations
/// - **Production:** `SdkLibrary` (Windows, loads the vendor DLL)
/// - **Testing:** recording mocks that script result codes and handles
pub trait NativeSdk: Send + Sync {
    fn init(&self) -> ResultCode;

    fn uninit(&self) -> ResultCode;

    /// Create an effect on every device of `device_type`.
    ///
    /// `effect` is the device-specific discriminant; `param` is the
    /// fixed-layout parameter record, or `None` for a null pointer.
    fn create_effect(
        &self,
        device_type: DeviceType,
        effect: i32,
        param: Option<&[u8]>,
    ) -> std::result::Result<EffectHandle, ResultCode>;

    fn query_device(&self, id: DeviceId) -> std::result::Result<DeviceInfo, ResultCode>;

    /// Ids of the connected devices of `device_type`.
    ///
    /// Probes every entry of [`KNOWN_DEVICES`]. Ids the SDK does not know
    /// about or that are unplugged are skipped; any other failure aborts.
    fn query_devices(
        &self,
        device_type: DeviceType,
    ) -> std::result::Result<Vec<DeviceId>, ResultCode> {
        let mut connected = Vec::new();
        for device in KNOWN_DEVICES {
            match self.query_device(device.id) {
                Ok(info) => {
                    if info.is_connected() && info.device_type() == Some(device_type) {
                        connected.push(device.id);
                    }
                }
                Err(code)
                    if code == ResultCode::NOT_FOUND
                        || code.kind() == ResultKind::DeviceNotConnected => {}
                Err(code) => return Err(code),
            }
        }
        Ok(connected)
    }
}

/// Shared handle to the SDK.
pub type SharedSdk = Arc<dyn NativeSdk>;

/// Checked wrappers around [`NativeSdk`] calls.
#[derive(Clone)]
pub struct NativeCall {
    sdk: SharedSdk,
}

impl NativeCall {
    #[must_use]
    pub fn new(sdk: SharedSdk) -> Self {
        Self { sdk }
    }

    pub fn init(&self) -> Result<()> {
        debug!("Initializing native Chroma SDK");
        checked("Init", self.sdk.init())
    }

    pub fn uninit(&self) -> Result<()> {
        debug!("Uninitializing native Chroma SDK");
        checked("UnInit", self.sdk.uninit())
    }

    pub fn create_effect(
        &self,
        device_type: DeviceType,
        effect: i32,
        param: Option<&[u8]>,
    ) -> Result<EffectHandle> {
        let function = device_type.create_function();
        self.sdk
            .create_effect(device_type, effect, param)
            .map_err(|result| failed(function, result))
    }

    pub fn query_devices(&self, device_type: DeviceType) -> Result<Vec<DeviceId>> {
        self.sdk
            .query_devices(device_type)
            .map_err(|result| failed("QueryDevice", result))
    }
}

fn checked(function: &'static str, result: ResultCode) -> Result<()> {
    result.check(function).inspect_err(|_| {
        warn!("Native call {function} failed: {result}");
    })
}

fn failed(function: &'static str, result: ResultCode) -> ChromaError {
    warn!("Native call {function} failed: {result}");
    ChromaError::NativeCall { function, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chroma::protocol::Guid;

    /// Reports the first known device as a connected mouse and everything
    /// else as missing, or fails every probe with `fail_with`.
    struct ProbeSdk {
        fail_with: Option<ResultCode>,
    }

    impl NativeSdk for ProbeSdk {
        fn init(&self) -> ResultCode {
            ResultCode::SUCCESS
        }

        fn uninit(&self) -> ResultCode {
            ResultCode::SUCCESS
        }

        fn create_effect(
            &self,
            _device_type: DeviceType,
            _effect: i32,
            _param: Option<&[u8]>,
        ) -> std::result::Result<EffectHandle, ResultCode> {
            Ok(EffectHandle(Guid::NIL))
        }

        fn query_device(&self, id: DeviceId) -> std::result::Result<DeviceInfo, ResultCode> {
            if let Some(code) = self.fail_with {
                return Err(code);
            }
            if id == KNOWN_DEVICES[0].id {
                Ok(DeviceInfo::new(DeviceType::Mouse, true))
            } else {
                Err(ResultCode::DEVICE_NOT_CONNECTED)
            }
        }
    }

    #[test]
    fn query_devices_filters_by_type() {
        let sdk = ProbeSdk { fail_with: None };
        assert_eq!(
            sdk.query_devices(DeviceType::Mouse),
            Ok(vec![KNOWN_DEVICES[0].id])
        );
        assert_eq!(sdk.query_devices(DeviceType::Keyboard), Ok(vec![]));
    }

    #[test]
    fn query_devices_propagates_hard_failures() {
        let call = NativeCall::new(Arc::new(ProbeSdk {
            fail_with: Some(ResultCode::SERVICE_NOT_ACTIVE),
        }));
        assert_eq!(
            call.query_devices(DeviceType::Mouse),
            Err(ChromaError::NativeCall {
                function: "QueryDevice",
                result: ResultCode::SERVICE_NOT_ACTIVE,
            })
        );
    }

    #[test]
    fn create_effect_names_device_export() {
        struct Refusing;
        impl NativeSdk for Refusing {
            fn init(&self) -> ResultCode {
                ResultCode::FAILED
            }
            fn uninit(&self) -> ResultCode {
                ResultCode::SUCCESS
            }
            fn create_effect(
                &self,
                _device_type: DeviceType,
                _effect: i32,
                _param: Option<&[u8]>,
            ) -> std::result::Result<EffectHandle, ResultCode> {
                Err(ResultCode::INVALID_PARAMETER)
            }
            fn query_device(&self, _id: DeviceId) -> std::result::Result<DeviceInfo, ResultCode> {
                Err(ResultCode::NOT_FOUND)
            }
        }

        let call = NativeCall::new(Arc::new(Refusing));
        let err = call
            .create_effect(DeviceType::Keypad, 0, None)
            .unwrap_err();
        assert_eq!(
            err,
            ChromaError::NativeCall {
                function: "CreateKeypadEffect",
                result: ResultCode::INVALID_PARAMETER,
            }
        );
        assert_eq!(call.init().unwrap_err().result_code(), Some(ResultCode::FAILED));
    }
}
