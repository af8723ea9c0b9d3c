//! Typed effect layer over the Razer Chroma SDK.
//!
//! Colors, custom grids and effect parameter records are laid out exactly
//! as the native SDK expects. Each device family gets one [`Device`]
//! dispatcher, handed out by a [`Chroma`] context.

pub mod chroma;
pub mod config;
pub mod error;
pub mod native;
pub mod state;

pub use chroma::color::Color;
pub use chroma::controller::{Device, DeviceState};
pub use chroma::devices::{self, DeviceKind};
pub use chroma::effects;
pub use chroma::grid::{EffectGrid, GridLayout, GridPosition};
pub use chroma::protocol::{
    DeviceId, DeviceType, EffectHandle, EffectKind, Guid, ResultCode, ResultKind,
};
pub use config::{ChromaConfig, ConfigStore};
pub use error::{ChromaError, Result};
pub use native::{NativeSdk, SharedSdk};
pub use state::Chroma;
