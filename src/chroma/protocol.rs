//! Chroma SDK wire identifiers, layout constants and status codes.
//!
//! Values mirror the `RzChromaSDKDefines.h` / `RzErrors.h` headers shipped
//! with the native SDK. Every record here crosses the FFI boundary as-is,
//! so field order and widths are fixed.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{ChromaError, Result};

// ─── Grid Layout ─────────────────────────────────────────────

/// Rows in the keyboard and mouse custom grids.
pub const MAX_ROWS: usize = 30;

/// Columns in the keyboard and mouse custom grids.
pub const MAX_COLUMNS: usize = 30;

/// Cells in the keyboard and mouse custom grids.
pub const MAX_GRID_LEDS: usize = MAX_ROWS * MAX_COLUMNS;

pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLUMNS: usize = 5;

/// LEDs on the mousepad strip.
pub const MOUSEPAD_LEDS: usize = 15;

/// LEDs on the headset.
pub const HEADSET_LEDS: usize = 5;

// ─── Device Types ────────────────────────────────────────────

/// Device categories as reported by `QueryDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Keyboard,
    Mouse,
    Headset,
    Mousepad,
    Keypad,
    System,
}

impl DeviceType {
    pub const ALL: [Self; 6] = [
        Self::Keyboard,
        Self::Mouse,
        Self::Headset,
        Self::Mousepad,
        Self::Keypad,
        Self::System,
    ];

    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::Keyboard => 1,
            Self::Mouse => 2,
            Self::Headset => 3,
            Self::Mousepad => 4,
            Self::Keypad => 5,
            Self::System => 6,
        }
    }

    #[must_use]
    pub const fn from_raw(v: i32) -> Option<Self> {
        match v {
            1 => Some(Self::Keyboard),
            2 => Some(Self::Mouse),
            3 => Some(Self::Headset),
            4 => Some(Self::Mousepad),
            5 => Some(Self::Keypad),
            6 => Some(Self::System),
            _ => None,
        }
    }

    /// Name of the native `Create*Effect` export for this device type.
    #[must_use]
    pub const fn create_function(self) -> &'static str {
        match self {
            Self::Keyboard => "CreateKeyboardEffect",
            Self::Mouse => "CreateMouseEffect",
            Self::Headset => "CreateHeadsetEffect",
            Self::Mousepad => "CreateMousepadEffect",
            Self::Keypad => "CreateKeypadEffect",
            Self::System => "CreateEffect",
        }
    }
}

// ─── Effect Kinds ────────────────────────────────────────────

/// Lighting patterns understood by the SDK.
///
/// The native discriminant differs per device type; see
/// [`DeviceKind::effect_code`](super::devices::DeviceKind::effect_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// No effect, LEDs off.
    None,
    /// Solid single color.
    Static,
    /// Fade between two colors, or random colors.
    Breathing,
    /// Light up on key press, then fade.
    Reactive,
    /// Color wave travelling in one direction.
    Wave,
    /// Cycle through the color spectrum.
    SpectrumCycling,
    /// Per-cell colors from an [`EffectGrid`](super::grid::EffectGrid).
    Custom,
}

impl EffectKind {
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Static,
        Self::Breathing,
        Self::Reactive,
        Self::Wave,
        Self::SpectrumCycling,
        Self::Custom,
    ];
}

// ─── Result Codes ────────────────────────────────────────────

/// Raw `RZRESULT` status returned by every native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ResultCode(pub i32);

impl ResultCode {
    pub const INVALID: Self = Self(-1);
    pub const SUCCESS: Self = Self(0);
    pub const ACCESS_DENIED: Self = Self(5);
    pub const INVALID_HANDLE: Self = Self(6);
    pub const NOT_SUPPORTED: Self = Self(50);
    pub const INVALID_PARAMETER: Self = Self(87);
    pub const SERVICE_NOT_ACTIVE: Self = Self(1062);
    pub const SINGLE_INSTANCE_APP: Self = Self(1152);
    pub const DEVICE_NOT_CONNECTED: Self = Self(1167);
    pub const NOT_FOUND: Self = Self(1168);
    pub const REQUEST_ABORTED: Self = Self(1235);
    pub const ALREADY_INITIALIZED: Self = Self(1247);
    pub const RESOURCE_DISABLED: Self = Self(4309);
    pub const DEVICE_NOT_AVAILABLE: Self = Self(4319);
    pub const NOT_VALID_STATE: Self = Self(5023);
    pub const NO_MORE_ITEMS: Self = Self(259);
    #[allow(clippy::cast_possible_wrap)]
    pub const FAILED: Self = Self(0x8000_4005_u32 as i32);

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Classify this code. Total over `i32`: anything unrecognised is
    /// [`ResultKind::GenericFailure`].
    #[must_use]
    pub const fn kind(self) -> ResultKind {
        match self {
            Self::SUCCESS => ResultKind::Success,
            Self::INVALID_PARAMETER | Self::INVALID_HANDLE => ResultKind::InvalidArgument,
            Self::NOT_SUPPORTED => ResultKind::NotSupported,
            Self::DEVICE_NOT_CONNECTED | Self::DEVICE_NOT_AVAILABLE => {
                ResultKind::DeviceNotConnected
            }
            _ => ResultKind::GenericFailure,
        }
    }

    /// Map a non-success code into [`ChromaError::NativeCall`].
    pub fn check(self, function: &'static str) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ChromaError::NativeCall {
                function,
                result: self,
            })
        }
    }

    const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::INVALID => "Invalid",
            Self::SUCCESS => "Success",
            Self::ACCESS_DENIED => "AccessDenied",
            Self::INVALID_HANDLE => "InvalidHandle",
            Self::NOT_SUPPORTED => "NotSupported",
            Self::INVALID_PARAMETER => "InvalidParameter",
            Self::SERVICE_NOT_ACTIVE => "ServiceNotActive",
            Self::SINGLE_INSTANCE_APP => "SingleInstanceApp",
            Self::DEVICE_NOT_CONNECTED => "DeviceNotConnected",
            Self::NOT_FOUND => "NotFound",
            Self::REQUEST_ABORTED => "RequestAborted",
            Self::ALREADY_INITIALIZED => "AlreadyInitialized",
            Self::RESOURCE_DISABLED => "ResourceDisabled",
            Self::DEVICE_NOT_AVAILABLE => "DeviceNotAvailable",
            Self::NOT_VALID_STATE => "NotValidState",
            Self::NO_MORE_ITEMS => "NoMoreItems",
            Self::FAILED => "Failed",
            _ => return None,
        })
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "Unknown ({})", self.0),
        }
    }
}

/// Failure categories a [`ResultCode`] collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Success,
    InvalidArgument,
    NotSupported,
    DeviceNotConnected,
    GenericFailure,
}

// ─── GUID ────────────────────────────────────────────────────

/// Windows `GUID` layout: 16 bytes, no padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

const _: () = assert!(std::mem::size_of::<Guid>() == 16);

impl Guid {
    pub const NIL: Self = Self::new(0, 0, 0, [0; 8]);

    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    #[must_use]
    pub fn to_uuid(self) -> Uuid {
        Uuid::from_fields(self.data1, self.data2, self.data3, &self.data4)
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        let (data1, data2, data3, data4) = uuid.as_fields();
        Self::new(data1, data2, data3, *data4)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uuid().braced())
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_uuid().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Opaque id of the effect most recently created on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct EffectHandle(pub Guid);

impl fmt::Display for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies one physical device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DeviceId(pub Guid);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ─── Device Info ─────────────────────────────────────────────

/// `DEVICE_INFO_TYPE` as filled in by `QueryDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct DeviceInfo {
    pub device_type: i32,
    pub connected: u32,
}

impl DeviceInfo {
    #[must_use]
    pub const fn new(device_type: DeviceType, connected: bool) -> Self {
        Self {
            device_type: device_type.to_raw(),
            connected: connected as u32,
        }
    }

    #[must_use]
    pub const fn device_type(&self) -> Option<DeviceType> {
        DeviceType::from_raw(self.device_type)
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected != 0
    }
}

// ─── Known Devices ───────────────────────────────────────────

/// A device model the SDK can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownDevice {
    pub id: DeviceId,
    pub name: &'static str,
}

const fn known(name: &'static str, d1: u32, d2: u16, d3: u16, d4: [u8; 8]) -> KnownDevice {
    KnownDevice {
        id: DeviceId(Guid::new(d1, d2, d3, d4)),
        name,
    }
}

#[rustfmt::skip]
/// Device ids probed by [`NativeSdk::query_devices`](crate::native::NativeSdk::query_devices).
pub const KNOWN_DEVICES: &[KnownDevice] = &[
    known("BlackWidow Chroma", 0x2EA1_BB63, 0xCA28, 0x428D, [0x9F, 0x06, 0x19, 0x6B, 0x88, 0x33, 0x0B, 0xBB]),
    known("BlackWidow Chroma TE", 0xED1C_1B82, 0xBFBE, 0x418F, [0xB4, 0x9D, 0xD0, 0x3F, 0x05, 0xB1, 0x49, 0xDF]),
    known("DeathStalker Chroma", 0x18C5_AD9B, 0x4326, 0x4828, [0x92, 0xC4, 0x26, 0x69, 0xA6, 0x6D, 0x22, 0x83]),
    known("BlackWidow X Chroma", 0x5AF6_0076, 0xADE9, 0x43D4, [0xB5, 0x74, 0x52, 0x59, 0x92, 0x93, 0xB5, 0x54]),
    known("DeathAdder Chroma", 0xAEC5_0D91, 0xB1F1, 0x452F, [0x8E, 0x16, 0x7B, 0x73, 0xF3, 0x76, 0xFD, 0xF3]),
    known("Mamba Chroma TE", 0x7EC0_0450, 0xE0EE, 0x4289, [0x89, 0xD5, 0x0D, 0x87, 0x9C, 0x19, 0x06, 0x1A]),
    known("Diamondback Chroma", 0xFF8A_5929, 0x4512, 0x4257, [0x8D, 0x59, 0xC6, 0x47, 0xBF, 0x99, 0x35, 0xD0]),
    known("Naga Chroma", 0xF187_6328, 0x6CA4, 0x46AE, [0xBE, 0x04, 0xBE, 0x81, 0x2B, 0x41, 0x44, 0x33]),
    known("Kraken 7.1 Chroma", 0xCD1E_09A5, 0xD5E6, 0x4A6C, [0xA9, 0x3B, 0xE6, 0xD9, 0xBF, 0x1D, 0x20, 0x92]),
    known("ManO'War Chroma", 0xDF31_64D7, 0x5408, 0x4A0E, [0x8A, 0x7F, 0xA7, 0x41, 0x2F, 0x26, 0xBE, 0xBF]),
    known("Firefly Chroma", 0x80F9_5A94, 0x73D2, 0x48CA, [0xAE, 0x9A, 0x09, 0x86, 0x78, 0x9A, 0x9A, 0xF2]),
    known("Tartarus Chroma", 0x00F0_545C, 0xE180, 0x4AD1, [0x8E, 0x8A, 0x41, 0x90, 0x61, 0xCE, 0x50, 0x5E]),
    known("Orbweaver Chroma", 0x9D24_B0AB, 0x0162, 0x466C, [0x96, 0x40, 0x7A, 0x92, 0x4A, 0xA4, 0xD9, 0xFD]),
];
