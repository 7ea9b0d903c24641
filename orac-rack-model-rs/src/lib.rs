//! Rack state shared by the ORAC control surface.
//!
//! See [`rack`] for the data model.

#![no_std]

extern crate alloc;

pub mod rack;
