//! Display surface for the ORAC controller.
//!
//! The UI paints whole frames through the [`Surface`] trait: `clear()`,
//! rectangles, text and bars laid out on the rows described by
//! [`DisplayConfig`], then `present()`.
//!
//! Two implementations ship with the crate:
//!
//! - [`OledDriver`] drives an SSD1306 128×64 panel over async I2C.
//! - [`FrameSurface`] renders into any `embedded-graphics` draw target.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].

#![no_std]

pub mod driver;
pub mod error;
pub mod graphics;
pub mod layout;
pub mod surface;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::{OledDriver, PANEL_ADDRESS};
pub use error::OledError;
pub use graphics::FrameSurface;
pub use layout::{DisplayConfig, Row};
pub use surface::{Alignment, Font, Rect, Surface};
