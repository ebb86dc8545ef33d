//! Always-on-top desktop clock: appearance state, frame rendering, drag
//! handling, preference persistence and the Win32 window that ties them
//! together.

pub mod appearance;
pub mod color;
pub mod controller;
pub mod dialogs;
pub mod drag;
pub mod frame;
pub mod glyphs;
pub mod layout;
pub mod menu;
pub mod preferences;
#[cfg(windows)]
pub mod registry;
pub mod render;
pub mod surface;
pub mod window;

pub use appearance::{AppearanceState, ColorTarget, FontDescriptor};
pub use color::ClockColor;
pub use controller::{ClockController, ClockEffect, ClockEvent};
pub use frame::{FrameSlot, TickOutcome};
pub use surface::{ClockSurface, FrameBuffer};
