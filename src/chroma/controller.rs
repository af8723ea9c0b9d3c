//! Per-device effect dispatcher.
//!
//! A [`Device`] owns the shadow copy of its custom grid and the handle of
//! the last effect it created. Every setter builds a parameter record,
//! hands it to the native SDK and keeps the returned handle. Writing a
//! single cell re-submits the whole grid, since the SDK has no partial
//! update.
use std::marker::PhantomData;

use log::debug;
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{ChromaError, Result};
use crate::native::NativeCall;

use super::color::Color;
use super::devices::{DeviceKind, Mouse, MouseLed};
use super::effects::{
    Breathing, Direction, Duration, EffectParam, NoneEffect, Reactive, SpectrumCycling, Static,
    Wave,
};
use super::grid::EffectGrid;
use super::protocol::{DeviceId, EffectHandle, EffectKind};

/// Lifecycle of a constructed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    /// SDK initialized and grid allocated, no effect created yet.
    Ready,
    /// An effect handle is held, including the handle of a "none" effect.
    EffectActive,
}

struct Shadow {
    grid: EffectGrid,
    handle: Option<EffectHandle>,
}

/// Effect dispatcher for one device family.
///
/// Every native call runs under the device lock together with the grid
/// edit before it, so a `Device` may be shared between threads and the
/// stored handle is always that of the last completed call.
pub struct Device<K: DeviceKind> {
    native: NativeCall,
    shadow: Mutex<Shadow>,
    _kind: PhantomData<K>,
}

impl<K: DeviceKind> Device<K> {
    /// Allocate the dispatcher with an all-black grid. The SDK must
    /// already be initialized.
    pub(crate) fn new(native: NativeCall) -> Self {
        debug!("{:?} is initializing", K::DEVICE_TYPE);
        Self {
            native,
            shadow: Mutex::new(Shadow {
                grid: EffectGrid::new(K::LAYOUT),
                handle: None,
            }),
            _kind: PhantomData,
        }
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        if self.shadow.lock().handle.is_some() {
            DeviceState::EffectActive
        } else {
            DeviceState::Ready
        }
    }

    /// Handle of the most recently created effect.
    #[must_use]
    pub fn current_effect(&self) -> Option<EffectHandle> {
        self.shadow.lock().handle
    }

    // ── Queries ──────────────────────────────────────────────

    /// Connected devices of this family. Always asks the SDK.
    pub fn connected_devices(&self) -> Result<Vec<DeviceId>> {
        self.native.query_devices(K::DEVICE_TYPE)
    }

    pub fn is_connected(&self) -> Result<bool> {
        Ok(!self.connected_devices()?.is_empty())
    }

    // ── Effect mode ──────────────────────────────────────────

    /// Create a parameterless effect.
    pub fn set_effect(&self, kind: EffectKind) -> Result<()> {
        match kind {
            EffectKind::None => self.set_none(),
            EffectKind::SpectrumCycling => self.set_spectrum_cycling(),
            _ => Err(ChromaError::Validation(format!(
                "{kind:?} requires parameters"
            ))),
        }
    }

    /// Turn the effect off without touching the grid.
    pub fn set_none(&self) -> Result<()> {
        self.submit_param(&NoneEffect::default())
    }

    pub fn set_static(&self, effect: Static) -> Result<()> {
        self.submit_param(&effect)
    }

    pub fn set_static_color(&self, color: Color) -> Result<()> {
        self.set_static(Static::new(color))
    }

    pub fn set_breathing(&self, effect: Breathing) -> Result<()> {
        self.submit_param(&effect)
    }

    pub fn set_breathing_colors(&self, first: Color, second: Color) -> Result<()> {
        self.set_breathing(Breathing::two(first, second))
    }

    pub fn set_breathing_random(&self) -> Result<()> {
        self.set_breathing(Breathing::random())
    }

    pub fn set_reactive(&self, effect: Reactive) -> Result<()> {
        self.submit_param(&effect)
    }

    pub fn set_reactive_color(&self, color: Color, duration: Duration) -> Result<()> {
        self.set_reactive(Reactive::new(duration, color))
    }

    pub fn set_wave(&self, effect: Wave) -> Result<()> {
        self.submit_param(&effect)
    }

    pub fn set_wave_direction(&self, direction: Direction) -> Result<()> {
        self.set_wave(Wave::new(direction))
    }

    pub fn set_spectrum_cycling(&self) -> Result<()> {
        self.submit(EffectKind::SpectrumCycling, K::spectrum_cycling_param().as_deref())
    }

    // ── Custom grid ──────────────────────────────────────────

    /// Submit `grid` and adopt it as the new shadow grid.
    pub fn set_custom(&self, grid: &EffectGrid) -> Result<()> {
        if grid.layout() != K::LAYOUT {
            return Err(ChromaError::Validation(format!(
                "grid is {}x{}, {:?} expects {}x{}",
                grid.layout().rows,
                grid.layout().columns,
                K::DEVICE_TYPE,
                K::LAYOUT.rows,
                K::LAYOUT.columns
            )));
        }
        let mut shadow = self.shadow.lock();
        shadow.grid.clone_from(grid);
        self.submit_custom(&mut shadow)
    }

    /// Set every cell to `color` and submit the grid.
    pub fn set_all(&self, color: Color) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.grid.fill(color);
        self.submit_custom(&mut shadow)
    }

    /// Black out the grid, submit it, then request "no effect".
    pub fn clear(&self) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.grid.clear();
        self.submit_custom(&mut shadow)?;
        let handle = self.create(EffectKind::None, Some(&NoneEffect::default().to_bytes()))?;
        shadow.handle = Some(handle);
        Ok(())
    }

    /// Copy of the shadow grid.
    #[must_use]
    pub fn custom_grid(&self) -> EffectGrid {
        self.shadow.lock().grid.clone()
    }

    // ── Indexers ─────────────────────────────────────────────

    pub fn get(&self, index: usize) -> Result<Color> {
        self.shadow.lock().grid.get(index)
    }

    pub fn get_at(&self, row: usize, column: usize) -> Result<Color> {
        self.shadow.lock().grid.get_at(row, column)
    }

    pub fn get_led(&self, led: K::Led) -> Result<Color> {
        self.shadow.lock().grid.get_led(led)
    }

    /// Write one cell and submit the whole grid.
    pub fn set(&self, index: usize, color: Color) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.grid.set(index, color)?;
        self.submit_custom(&mut shadow)
    }

    /// Write one cell by row and column and submit the whole grid.
    pub fn set_at(&self, row: usize, column: usize, color: Color) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.grid.set_at(row, column, color)?;
        self.submit_custom(&mut shadow)
    }

    /// Write one named LED and submit the whole grid.
    pub fn set_led(&self, led: K::Led, color: Color) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.grid.set_led(led, color)?;
        self.submit_custom(&mut shadow)
    }

    // ── Internal I/O ─────────────────────────────────────────

    fn submit_param<P: EffectParam>(&self, param: &P) -> Result<()> {
        self.submit(P::KIND, Some(&param.to_bytes()))
    }

    /// Create `kind` under the shadow lock so handles land in call order.
    fn submit(&self, kind: EffectKind, param: Option<&[u8]>) -> Result<()> {
        let mut shadow = self.shadow.lock();
        shadow.handle = Some(self.create(kind, param)?);
        Ok(())
    }

    /// Submit the locked shadow grid. The grid is left as-is on failure.
    fn submit_custom(&self, shadow: &mut Shadow) -> Result<()> {
        let blob = shadow.grid.to_bytes();
        shadow.handle = Some(self.create(EffectKind::Custom, Some(&blob))?);
        Ok(())
    }

    fn create(&self, kind: EffectKind, param: Option<&[u8]>) -> Result<EffectHandle> {
        let code = K::effect_code(kind).ok_or_else(|| {
            ChromaError::NotSupported(format!("{kind:?} effect on {:?}", K::DEVICE_TYPE))
        })?;
        self.native.create_effect(K::DEVICE_TYPE, code, param)
    }
}

impl Device<Mouse> {
    /// Spectrum cycling limited to one LED zone.
    pub fn set_spectrum_cycling_led(&self, led: MouseLed) -> Result<()> {
        self.submit_param(&SpectrumCycling::new(led))
    }
}
