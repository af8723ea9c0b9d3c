//! Per-device-type descriptions: grid shape, named LEDs and the native
//! effect discriminants each device family accepts.
use serde::Serialize;

use super::effects::{EffectParam, SpectrumCycling};
use super::grid::{GridLayout, GridPosition};
use super::protocol::{
    DeviceType, EffectKind, HEADSET_LEDS, KEYPAD_COLUMNS, KEYPAD_ROWS, MAX_COLUMNS, MAX_ROWS,
    MOUSEPAD_LEDS,
};

/// Static description of one device family.
pub trait DeviceKind: Send + Sync + 'static {
    const DEVICE_TYPE: DeviceType;

    /// Shape of the custom-effect grid.
    const LAYOUT: GridLayout;

    /// Named LEDs addressable on this device.
    type Led: GridPosition;

    /// Native discriminant for `kind`, or `None` if the device family
    /// has no such effect.
    fn effect_code(kind: EffectKind) -> Option<i32>;

    /// Parameter record sent with spectrum cycling, if the device needs one.
    #[must_use]
    fn spectrum_cycling_param() -> Option<Vec<u8>> {
        None
    }
}

/// Devices without named LEDs. Uninhabited, so named addressing on such a
/// device does not type-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoNamedLeds {}

impl GridPosition for NoNamedLeds {
    fn to_raw(self) -> u16 {
        match self {}
    }
}

// ─── Keyboard ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Keyboard;

impl DeviceKind for Keyboard {
    const DEVICE_TYPE: DeviceType = DeviceType::Keyboard;
    const LAYOUT: GridLayout = GridLayout::new(MAX_ROWS, MAX_COLUMNS);
    type Led = Key;

    fn effect_code(kind: EffectKind) -> Option<i32> {
        Some(match kind {
            EffectKind::None => 0,
            EffectKind::Breathing => 1,
            EffectKind::Custom => 2,
            EffectKind::Reactive => 3,
            EffectKind::Static => 4,
            EffectKind::SpectrumCycling => 5,
            EffectKind::Wave => 6,
        })
    }
}

/// A keyboard key, encoded as `row << 8 | column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Key(u16);

impl Key {
    pub const ESCAPE: Self = Self(0x0001);
    pub const F1: Self = Self(0x0003);
    pub const F2: Self = Self(0x0004);
    pub const F3: Self = Self(0x0005);
    pub const F4: Self = Self(0x0006);
    pub const F5: Self = Self(0x0007);
    pub const F6: Self = Self(0x0008);
    pub const F7: Self = Self(0x0009);
    pub const F8: Self = Self(0x000A);
    pub const F9: Self = Self(0x000B);
    pub const F10: Self = Self(0x000C);
    pub const F11: Self = Self(0x000D);
    pub const F12: Self = Self(0x000E);
    pub const PRINT_SCREEN: Self = Self(0x000F);
    pub const SCROLL: Self = Self(0x0010);
    pub const PAUSE: Self = Self(0x0011);
    pub const LOGO: Self = Self(0x0014);

    pub const MACRO1: Self = Self(0x0100);
    pub const OEM1: Self = Self(0x0101);
    pub const D1: Self = Self(0x0102);
    pub const D2: Self = Self(0x0103);
    pub const D3: Self = Self(0x0104);
    pub const D4: Self = Self(0x0105);
    pub const D5: Self = Self(0x0106);
    pub const D6: Self = Self(0x0107);
    pub const D7: Self = Self(0x0108);
    pub const D8: Self = Self(0x0109);
    pub const D9: Self = Self(0x010A);
    pub const D0: Self = Self(0x010B);
    pub const BACKSPACE: Self = Self(0x010E);

    pub const MACRO2: Self = Self(0x0200);
    pub const TAB: Self = Self(0x0201);
    pub const Q: Self = Self(0x0202);
    pub const W: Self = Self(0x0203);
    pub const E: Self = Self(0x0204);
    pub const R: Self = Self(0x0205);
    pub const T: Self = Self(0x0206);
    pub const Y: Self = Self(0x0207);
    pub const U: Self = Self(0x0208);
    pub const I: Self = Self(0x0209);
    pub const O: Self = Self(0x020A);
    pub const P: Self = Self(0x020B);

    pub const MACRO3: Self = Self(0x0300);
    pub const CAPS_LOCK: Self = Self(0x0301);
    pub const A: Self = Self(0x0302);
    pub const S: Self = Self(0x0303);
    pub const D: Self = Self(0x0304);
    pub const F: Self = Self(0x0305);
    pub const G: Self = Self(0x0306);
    pub const H: Self = Self(0x0307);
    pub const J: Self = Self(0x0308);
    pub const K: Self = Self(0x0309);
    pub const L: Self = Self(0x030A);
    pub const ENTER: Self = Self(0x030E);

    pub const MACRO4: Self = Self(0x0400);
    pub const LEFT_SHIFT: Self = Self(0x0401);
    pub const Z: Self = Self(0x0403);
    pub const X: Self = Self(0x0404);
    pub const C: Self = Self(0x0405);
    pub const V: Self = Self(0x0406);
    pub const B: Self = Self(0x0407);
    pub const N: Self = Self(0x0408);
    pub const M: Self = Self(0x0409);
    pub const RIGHT_SHIFT: Self = Self(0x040E);
    pub const UP: Self = Self(0x0410);

    pub const MACRO5: Self = Self(0x0500);
    pub const LEFT_CONTROL: Self = Self(0x0501);
    pub const LEFT_WINDOWS: Self = Self(0x0502);
    pub const LEFT_ALT: Self = Self(0x0503);
    pub const SPACE: Self = Self(0x0507);
    pub const RIGHT_ALT: Self = Self(0x050B);
    pub const RIGHT_CONTROL: Self = Self(0x050E);
    pub const LEFT: Self = Self(0x050F);
    pub const DOWN: Self = Self(0x0510);
    pub const RIGHT: Self = Self(0x0511);

    /// A key at an arbitrary position; not range-checked until used.
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }
}

impl GridPosition for Key {
    fn to_raw(self) -> u16 {
        self.0
    }
}

// ─── Mouse ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Mouse;

impl DeviceKind for Mouse {
    const DEVICE_TYPE: DeviceType = DeviceType::Mouse;
    const LAYOUT: GridLayout = GridLayout::new(MAX_ROWS, MAX_COLUMNS);
    type Led = GridLed;

    fn effect_code(kind: EffectKind) -> Option<i32> {
        Some(match kind {
            EffectKind::None => 0,
            EffectKind::Custom => 1,
            EffectKind::Static => 2,
            EffectKind::Breathing => 4,
            EffectKind::SpectrumCycling => 5,
            EffectKind::Wave => 6,
            EffectKind::Reactive => 7,
        })
    }

    fn spectrum_cycling_param() -> Option<Vec<u8>> {
        Some(SpectrumCycling::new(MouseLed::All).to_bytes())
    }
}

/// A mouse LED in the custom grid, encoded as `row << 8 | column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GridLed(u16);

impl GridLed {
    pub const LEFT_SIDE1: Self = Self(0x0100);
    pub const LEFT_SIDE2: Self = Self(0x0200);
    pub const LEFT_SIDE3: Self = Self(0x0300);
    pub const LEFT_SIDE4: Self = Self(0x0400);
    pub const LEFT_SIDE5: Self = Self(0x0500);
    pub const LEFT_SIDE6: Self = Self(0x0600);
    pub const LEFT_SIDE7: Self = Self(0x0700);
    pub const SCROLL_WHEEL: Self = Self(0x0203);
    pub const BACKLIGHT: Self = Self(0x0403);
    pub const LOGO: Self = Self(0x0703);
    pub const RIGHT_SIDE1: Self = Self(0x0106);
    pub const RIGHT_SIDE2: Self = Self(0x0206);
    pub const RIGHT_SIDE3: Self = Self(0x0306);
    pub const RIGHT_SIDE4: Self = Self(0x0406);
    pub const RIGHT_SIDE5: Self = Self(0x0506);
    pub const RIGHT_SIDE6: Self = Self(0x0606);
    pub const RIGHT_SIDE7: Self = Self(0x0706);
    pub const BOTTOM1: Self = Self(0x0801);
    pub const BOTTOM2: Self = Self(0x0802);
    pub const BOTTOM3: Self = Self(0x0803);
    pub const BOTTOM4: Self = Self(0x0804);
    pub const BOTTOM5: Self = Self(0x0805);

    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }
}

impl GridPosition for GridLed {
    fn to_raw(self) -> u16 {
        self.0
    }
}

/// Mouse LED zones used by zone-wide effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MouseLed {
    None = 0,
    ScrollWheel = 1,
    Logo = 2,
    Backlight = 3,
    All = 0xFFFF,
}

impl MouseLed {
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        self as i32
    }
}

// ─── Headset ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Headset;

impl DeviceKind for Headset {
    const DEVICE_TYPE: DeviceType = DeviceType::Headset;
    const LAYOUT: GridLayout = GridLayout::strip(HEADSET_LEDS);
    type Led = NoNamedLeds;

    fn effect_code(kind: EffectKind) -> Option<i32> {
        match kind {
            EffectKind::None => Some(0),
            EffectKind::Static => Some(1),
            EffectKind::Breathing => Some(2),
            EffectKind::SpectrumCycling => Some(3),
            EffectKind::Custom => Some(4),
            EffectKind::Reactive | EffectKind::Wave => None,
        }
    }
}

// ─── Mousepad ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Mousepad;

impl DeviceKind for Mousepad {
    const DEVICE_TYPE: DeviceType = DeviceType::Mousepad;
    const LAYOUT: GridLayout = GridLayout::strip(MOUSEPAD_LEDS);
    type Led = NoNamedLeds;

    fn effect_code(kind: EffectKind) -> Option<i32> {
        match kind {
            EffectKind::None => Some(0),
            EffectKind::Breathing => Some(1),
            EffectKind::Custom => Some(2),
            EffectKind::SpectrumCycling => Some(3),
            EffectKind::Static => Some(4),
            EffectKind::Wave => Some(5),
            EffectKind::Reactive => None,
        }
    }
}

// ─── Keypad ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Keypad;

impl DeviceKind for Keypad {
    const DEVICE_TYPE: DeviceType = DeviceType::Keypad;
    const LAYOUT: GridLayout = GridLayout::new(KEYPAD_ROWS, KEYPAD_COLUMNS);
    type Led = NoNamedLeds;

    fn effect_code(kind: EffectKind) -> Option<i32> {
        Some(match kind {
            EffectKind::None => 0,
            EffectKind::Breathing => 1,
            EffectKind::Custom => 2,
            EffectKind::Reactive => 3,
            EffectKind::SpectrumCycling => 4,
            EffectKind::Static => 5,
            EffectKind::Wave => 6,
        })
    }
}
