//! Packed RGB color as the native SDK expects it.
use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB color packed into a `u32` on the form `0xKKBBGGRR`.
///
/// Red lives in bits 0–7, green in 8–15 and blue in 16–23. The top byte is
/// reserved for key-mode flags and is carried through untouched, so two
/// colors compare equal only when all 32 bits match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Color(u32);

const _: () = assert!(std::mem::size_of::<Color>() == 4);

impl Color {
    pub const BLACK: Self = Self::from_rgb(0x00_0000);
    pub const WHITE: Self = Self::from_rgb(0xFF_FFFF);
    pub const RED: Self = Self::from_rgb(0xFF_0000);
    pub const GREEN: Self = Self::from_rgb(0x00_FF00);
    pub const BLUE: Self = Self::from_rgb(0x00_00FF);
    pub const YELLOW: Self = Self::from_rgb(0xFF_FF00);
    pub const PURPLE: Self = Self::from_rgb(0x80_0080);
    pub const PINK: Self = Self::from_rgb(0xFF_C0CB);
    pub const ORANGE: Self = Self::from_rgb(0xFF_A500);
    pub const HOT_PINK: Self = Self::from_rgb(0xFF_69B4);

    /// Wrap a raw `0xKKBBGGRR` value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(red as u32 | (green as u32) << 8 | (blue as u32) << 16)
    }

    /// Same as [`Color::new`].
    #[must_use]
    pub const fn from_bytes(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue)
    }

    /// Build from channels in `0.0..=1.0`.
    ///
    /// Each channel is scaled by 255 and truncated toward zero. Inputs
    /// outside the unit range are not clamped: the scaled value wraps
    /// modulo 256 exactly like a narrowing integer cast.
    #[must_use]
    pub fn from_floats(red: f32, green: f32, blue: f32) -> Self {
        Self::new(
            narrow(f64::from(red)),
            narrow(f64::from(green)),
            narrow(f64::from(blue)),
        )
    }

    /// `f64` flavour of [`Color::from_floats`], same truncation rules.
    #[must_use]
    pub fn from_doubles(red: f64, green: f64, blue: f64) -> Self {
        Self::new(narrow(red), narrow(green), narrow(blue))
    }

    /// Build from a web-style `0xRRGGBB` value.
    #[must_use]
    pub const fn from_rgb(value: u32) -> Self {
        Self((value & 0xFF_0000) >> 16 | (value & 0x00_FF00) | (value & 0x00_00FF) << 16)
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// The four bytes sent over the native boundary.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn narrow(channel: f64) -> u8 {
    (channel * 255.0) as i64 as u8
}

impl PartialEq<u32> for Color {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Color> for u32 {
    fn eq(&self, other: &Color) -> bool {
        *self == other.0
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_raw()
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::from_raw(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (1, 2, 3), (200, 17, 99)] {
            let c = Color::from_bytes(r, g, b);
            assert_eq!((c.red(), c.green(), c.blue()), (r, g, b));
        }
    }

    #[test]
    fn byte_packing_is_bgr() {
        assert_eq!(Color::new(0x11, 0x22, 0x33).to_raw(), 0x0033_2211);
        assert_eq!(Color::RED.to_raw(), 0x0000_00FF);
        assert_eq!(Color::BLUE.to_raw(), 0x00FF_0000);
        assert_eq!(Color::RED.to_le_bytes(), [0xFF, 0, 0, 0]);
    }

    #[test]
    fn float_constructor_truncates() {
        assert_eq!(Color::from_floats(0.0, 0.0, 0.0), Color::from_bytes(0, 0, 0));
        assert_eq!(Color::from_floats(1.0, 0.0, 0.0).red(), 255);
        // 0.5 * 255 = 127.5 → 127, not rounded
        assert_eq!(Color::from_floats(0.5, 0.5, 0.5), Color::new(127, 127, 127));
        assert_eq!(Color::from_doubles(0.999, 0.0, 1.0), Color::new(254, 0, 255));
    }

    #[test]
    fn float_constructor_wraps_out_of_range() {
        // 2.0 * 255 = 510 → 510 mod 256 = 254
        assert_eq!(Color::from_floats(2.0, 0.0, 0.0).red(), 254);
        // -1.0 * 255 = -255 → 1 after wrapping
        assert_eq!(Color::from_floats(-1.0, 0.0, 0.0).red(), 1);
    }

    #[test]
    fn equality_against_raw_values() {
        let keyed = Color::from_raw(0x0100_00FF);
        assert_ne!(keyed, Color::RED);
        assert_eq!(keyed, 0x0100_00FF_u32);
        assert_eq!(0x0000_00FF_u32, Color::RED);
        assert_eq!(u32::from(Color::GREEN), 0x0000_FF00);
    }

    #[test]
    fn from_rgb_swaps_red_and_blue() {
        let c = Color::from_rgb(0x12_3456);
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56));
        assert_eq!(c.to_string(), "#123456");
    }
}
