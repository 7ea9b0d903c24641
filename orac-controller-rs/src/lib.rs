//! Four-button menu controller for a remote ORAC rack.
//!
//! The controller mirrors the rack's patch (modules, pages, parameters,
//! presets) from `/Kontrol/*` push messages, presents it on a 128×64
//! screen, and turns button gestures into edits sent back to the rack.
//!
//! ```text
//!  ButtonSource ─► InputArbiter ─► Navigator ─► Link ─► Transport ─► rack
//!  Transport ─► handle_inbound ─► Rack ─► RenderScheduler ─► Surface
//! ```
//!
//! Everything runs on one cooperative loop, [`run()`]. Collaborators are
//! traits: [`Transport`] for the wire, [`ButtonSource`] for edges,
//! [`Surface`](orac_oled_display_rs::Surface) for pixels and [`Platform`]
//! for host services.
//!
//! # Buttons
//!
//! | button | press | release |
//! |---|---|---|
//! | `^` | | focus previous |
//! | `v` | | focus next |
//! | `x` | decrease (repeats) | |
//! | `o` | increase (repeats) | |
//! | `^` + `v` | pop modal / next view | |
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod input;
pub mod navigation;
pub mod protocol;
pub mod runner;
pub mod scheduler;
pub mod session;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use config::ControllerConfig;
pub use controller::Controller;
pub use input::{Button, ButtonEdge, Edge, InputArbiter, UiAction};
pub use navigation::Navigator;
pub use protocol::{Arg, Inbound, InboundPacket, Outbound, ProtocolError};
pub use runner::run;
pub use scheduler::RenderScheduler;
pub use session::{Platform, RackCursor, Session};
pub use sync::Link;
pub use transport::{ButtonSource, Transport};
