//! The explicit context every handler works on.

use alloc::string::String;

use orac::rack::{Module, Page, Param, Rack};

use crate::sync::Link;

/// Host services outside the rack protocol.
pub trait Platform {
    /// Current IPv4 address of `interface`, `None` when unavailable.
    fn interface_address(&self, interface: &str) -> Option<String>;

    /// Power the device down.
    fn shutdown(&mut self);

    /// Persist controller settings.
    fn save_settings(&mut self, _rack: &Rack) {}
}

/// Which slot and page the parameter view is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RackCursor {
    pub slot_index: usize,
    pub page_index: usize,
}

impl RackCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step the slot by `delta` positions, wrapping. Changing slot shows
    /// its first page.
    pub fn step_slot(&mut self, delta: isize, slot_len: usize) {
        if slot_len == 0 {
            return;
        }
        self.slot_index = wrap(self.slot_index, delta, slot_len);
        self.page_index = 0;
    }

    pub fn step_page(&mut self, delta: isize, page_len: usize) {
        if page_len == 0 {
            return;
        }
        self.page_index = wrap(self.page_index, delta, page_len);
    }

    /// Pull the cursor back inside a slot list that shrank.
    pub fn clamp_slot(&mut self, slot_len: usize) {
        if self.slot_index >= slot_len {
            self.reset();
        }
    }
}

pub(crate) fn wrap(index: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    ((index as isize + delta) % len + len) as usize % len as usize
}

/// Rack mirror, view cursor, outbound link and host platform.
pub struct Session<T, P> {
    pub rack: Rack,
    pub cursor: RackCursor,
    pub link: Link<T>,
    pub platform: P,
}

impl<T, P> Session<T, P> {
    pub fn new(link: Link<T>, platform: P) -> Self {
        Self {
            rack: Rack::new(),
            cursor: RackCursor::default(),
            link,
            platform,
        }
    }

    pub fn active_slot(&self) -> Option<&str> {
        self.rack.slot_id(self.cursor.slot_index)
    }

    pub fn active_module(&self) -> Option<&Module> {
        self.rack.slot_module(self.active_slot()?)
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.active_module()?.page(self.cursor.page_index)
    }

    /// Parameter at `index` on the active page.
    pub fn page_param(&self, index: usize) -> Option<&Param> {
        self.active_module()?
            .page_param(self.cursor.page_index, index)
    }
}
