//! Fixed-layout effect parameter records.
//!
//! Each record is `#[repr(C)]` with 4-byte fields only, so the in-memory
//! layout has no padding and [`EffectParam::to_bytes`] reproduces it field by
//! field. Records carrying a `size` field fill it from their own size at
//! construction.
use std::mem::size_of;

use serde::Serialize;

use crate::error::{ChromaError, Result};

use super::color::Color;
use super::devices::MouseLed;
use super::protocol::EffectKind;

/// A parameter record for one effect kind.
pub trait EffectParam: Serialize {
    const KIND: EffectKind;

    /// Field-sequential little-endian encoding of the record.
    fn to_bytes(&self) -> Vec<u8>;
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn record_size<T>() -> i32 {
    size_of::<T>() as i32
}

fn pack(fields: &[u32]) -> Vec<u8> {
    fields.iter().flat_map(|f| f.to_le_bytes()).collect()
}

#[allow(clippy::cast_sign_loss)]
const fn word(v: i32) -> u32 {
    v as u32
}

// ─── Enumerations ────────────────────────────────────────────

/// How long a reactive effect stays lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Duration {
    None = 0,
    Short = 1,
    Medium = 2,
    Long = 3,
}

impl Duration {
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        self as i32
    }
}

/// Travel direction of a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Direction {
    None = 0,
    LeftToRight = 1,
    RightToLeft = 2,
    FrontToBack = 3,
    BackToFront = 4,
}

impl Direction {
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum BreathingType {
    /// Alternate between the two given colors.
    Two = 1,
    /// Let the device pick colors; the given colors are ignored.
    Random = 2,
}

impl BreathingType {
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        self as i32
    }
}

// ─── Records ─────────────────────────────────────────────────

/// Parameters of the "no effect" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct NoneEffect {
    pub size: i32,
    pub parameter: i32,
}

impl NoneEffect {
    #[must_use]
    pub const fn new(parameter: i32) -> Self {
        Self {
            size: record_size::<Self>(),
            parameter,
        }
    }
}

impl Default for NoneEffect {
    fn default() -> Self {
        Self::new(0)
    }
}

impl EffectParam for NoneEffect {
    const KIND: EffectKind = EffectKind::None;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[word(self.size), word(self.parameter)])
    }
}

/// A single solid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct Static {
    pub color: Color,
}

impl Static {
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl EffectParam for Static {
    const KIND: EffectKind = EffectKind::Static;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[self.color.to_raw()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct Breathing {
    pub kind: BreathingType,
    pub first: Color,
    pub second: Color,
}

impl Breathing {
    #[must_use]
    pub const fn new(kind: BreathingType, first: Color, second: Color) -> Self {
        Self {
            kind,
            first,
            second,
        }
    }

    /// Breathe between two colors.
    #[must_use]
    pub const fn two(first: Color, second: Color) -> Self {
        Self::new(BreathingType::Two, first, second)
    }

    #[must_use]
    pub const fn random() -> Self {
        Self::new(BreathingType::Random, Color::BLACK, Color::BLACK)
    }
}

impl EffectParam for Breathing {
    const KIND: EffectKind = EffectKind::Breathing;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[
            word(self.kind.to_raw()),
            self.first.to_raw(),
            self.second.to_raw(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct Reactive {
    pub size: i32,
    pub parameter: i32,
    pub duration: Duration,
    pub color: Color,
}

impl Reactive {
    #[must_use]
    pub const fn new(duration: Duration, color: Color) -> Self {
        Self::with_parameter(duration, color, 0)
    }

    #[must_use]
    pub const fn with_parameter(duration: Duration, color: Color, parameter: i32) -> Self {
        Self {
            size: record_size::<Self>(),
            parameter,
            duration,
            color,
        }
    }
}

impl EffectParam for Reactive {
    const KIND: EffectKind = EffectKind::Reactive;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[
            word(self.size),
            word(self.parameter),
            word(self.duration.to_raw()),
            self.color.to_raw(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct Wave {
    pub direction: Direction,
}

impl Wave {
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl EffectParam for Wave {
    const KIND: EffectKind = EffectKind::Wave;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[word(self.direction.to_raw())])
    }
}

/// Spectrum cycling on one mouse LED zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(C)]
pub struct SpectrumCycling {
    pub led: MouseLed,
}

impl SpectrumCycling {
    #[must_use]
    pub const fn new(led: MouseLed) -> Self {
        Self { led }
    }
}

impl EffectParam for SpectrumCycling {
    const KIND: EffectKind = EffectKind::SpectrumCycling;

    fn to_bytes(&self) -> Vec<u8> {
        pack(&[word(self.led.to_raw())])
    }
}

const _: () = {
    assert!(size_of::<NoneEffect>() == 8);
    assert!(size_of::<Static>() == 4);
    assert!(size_of::<Breathing>() == 12);
    assert!(size_of::<Reactive>() == 16);
    assert!(size_of::<Wave>() == 4);
    assert!(size_of::<SpectrumCycling>() == 4);
};

// ─── Wire Form ───────────────────────────────────────────────

/// JSON description of an effect for out-of-process consumers.
///
/// Write-only: effects are produced for the wire, never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectData {
    pub effect: EffectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<serde_json::Value>,
}

impl EffectData {
    pub fn new<P: EffectParam>(param: &P) -> Result<Self> {
        let value = serde_json::to_value(param)
            .map_err(|e| ChromaError::Validation(format!("Failed to encode effect: {e}")))?;
        Ok(Self {
            effect: P::KIND,
            param: Some(value),
        })
    }

    /// A parameterless effect such as spectrum cycling.
    #[must_use]
    pub const fn bare(effect: EffectKind) -> Self {
        Self {
            effect,
            param: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChromaError::Validation(format!("Failed to encode effect: {e}")))
    }

    /// Always fails: the wire form cannot be read back.
    pub fn from_json(_json: &str) -> Result<Self> {
        Err(ChromaError::NotSupported(
            "Only writing of effect data is supported".into(),
        ))
    }
}
