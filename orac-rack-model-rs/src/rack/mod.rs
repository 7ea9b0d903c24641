//! Mirror of a remote modular-synth rack.
//!
//! The [`Rack`] holds an ordered list of **slots**, each optionally occupied
//! by a [`Module`]. A module owns its [`Page`]s and [`Param`]s; pages refer
//! to parameters by id.
//!
//! ```text
//! Rack ── slot order: a1 a2 a3 b1 ... s2
//!   └─ a1 → Module "Brds Mono"
//!            ├─ Page "Oscillator": [o_shape, o_colour, ...]   (ids)
//!            └─ params: { o_shape → Param, o_colour → Param, ... }
//! ```
//!
//! All entities are created by inbound protocol events. There is no delete
//! path: a new module declaration for an occupied slot replaces the old
//! module and everything under it, and a rack identity change resets the
//! whole mirror.
//!
//! # `no_std` Compatibility
//!
//! The model needs `alloc` for strings and collections and nothing from
//! `std`. The optional `defmt` feature derives `defmt::Format` on the small
//! value types; the optional `serde` feature derives serialization for state
//! dumps.

mod error;
mod module;
mod page;
mod param;
mod state;

pub use error::RackError;
pub use module::Module;
pub use page::Page;
pub use param::{DisplayValue, Param, ParamKind, ParamParts, MAX_ACCELERATION_LEVEL};
pub use state::{Rack, ResourceKind};

/// Canonical slot order, restored on every reset.
pub const DEFAULT_SLOT_ORDER: [&str; 17] = [
    "a1", "a2", "a3", "b1", "b2", "b3", "b4", "c1", "c2", "c3", "p1", "p2", "m1", "m2", "m3",
    "s1", "s2",
];
