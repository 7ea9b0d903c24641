//! Modal item picker over a rack resource list.

use alloc::format;
use alloc::string::String;

use orac::rack::{Rack, ResourceKind};

use crate::session::{Platform, Session};
use crate::transport::Transport;

/// List index of the "save current preset" row.
pub const SAVE_CURRENT: isize = -2;
/// List index of the "create new preset" row.
pub const CREATE_NEW: isize = -1;

const PRESET_EXTRAS: [&str; 2] = ["(Save Preset)", "(New Preset)"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerPurpose {
    /// Replace the module in `slot`.
    LoadModule { slot: String },
    /// Load a preset, or save under the current or a new name.
    Preset,
}

/// A windowed view over `extras ++ resource list`.
///
/// Rows show absolute positions `offset .. offset + rows`. Extras come
/// first and map to negative list indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    purpose: PickerPurpose,
    offset: usize,
}

impl Picker {
    pub fn new(purpose: PickerPurpose) -> Self {
        Self { purpose, offset: 0 }
    }

    /// Module picker for the active slot, focused on its current module.
    /// `None` while the slot is empty.
    pub fn for_module<T, P>(session: &Session<T, P>) -> Option<(Self, usize)> {
        let slot = session.active_slot()?;
        let module = session.active_module()?;
        let picker = Self::new(PickerPurpose::LoadModule { slot: slot.into() });
        let focus = picker.position_of(&module.id, &session.rack).unwrap_or(0);
        Some((picker, focus))
    }

    /// Preset picker focused on the current preset. `None` until a preset
    /// is known.
    pub fn for_preset(rack: &Rack) -> Option<(Self, usize)> {
        let current = rack.current_preset()?;
        let picker = Self::new(PickerPurpose::Preset);
        let focus = picker.position_of(current, rack).unwrap_or(0);
        Some((picker, focus))
    }

    pub fn purpose(&self) -> &PickerPurpose {
        &self.purpose
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    fn extras(&self) -> &'static [&'static str] {
        match self.purpose {
            PickerPurpose::Preset => &PRESET_EXTRAS,
            PickerPurpose::LoadModule { .. } => &[],
        }
    }

    fn list<'r>(&self, rack: &'r Rack) -> &'r [String] {
        let kind = match self.purpose {
            PickerPurpose::LoadModule { .. } => ResourceKind::Module,
            PickerPurpose::Preset => ResourceKind::Preset,
        };
        rack.resource_list(kind).unwrap_or(&[])
    }

    fn position_of(&self, item: &str, rack: &Rack) -> Option<usize> {
        let index = self.list(rack).iter().position(|i| i == item)?;
        Some(self.extras().len() + index)
    }

    pub fn item_len(&self, rack: &Rack) -> usize {
        self.extras().len() + self.list(rack).len()
    }

    /// Text at absolute position `index`.
    pub fn item<'r>(&self, index: usize, rack: &'r Rack) -> Option<&'r str> {
        let extras = self.extras();
        match extras.get(index) {
            Some(extra) => Some(*extra),
            None => self
                .list(rack)
                .get(index - extras.len())
                .map(String::as_str),
        }
    }

    pub fn row_count(&self, rack: &Rack, visible: usize) -> usize {
        self.item_len(rack).min(visible)
    }

    /// Scroll so absolute position `index` is visible; returns its row.
    pub fn focus_absolute(&mut self, index: usize, rows: usize) -> usize {
        if rows == 0 {
            self.offset = 0;
            return 0;
        }
        let row = index.min(rows - 1);
        self.offset = index - row;
        row
    }

    /// Move the cursor up one item, scrolling at the top row. Never wraps.
    pub fn move_previous(&mut self, row: &mut usize) {
        if *row > 0 {
            *row -= 1;
        } else if self.offset > 0 {
            self.offset -= 1;
        }
    }

    /// Move the cursor down one item, scrolling at the last visible row.
    pub fn move_next(&mut self, row: &mut usize, rows: usize, len: usize) {
        if *row + 1 < rows {
            *row += 1;
        } else if self.offset + rows < len {
            self.offset += 1;
        }
    }

    /// List index behind `row`; extras are negative.
    pub fn list_index(&self, row: usize) -> isize {
        (self.offset + row) as isize - self.extras().len() as isize
    }

    /// Act on the item at `row`.
    pub fn select<T: Transport, P: Platform>(&self, row: usize, session: &mut Session<T, P>) {
        let index = self.list_index(row);
        let Session { rack, link, .. } = session;
        match &self.purpose {
            PickerPurpose::LoadModule { slot } => {
                let module = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.list(rack).get(i).cloned());
                if let Some(module) = module {
                    link.send_load_module(rack, slot, &module);
                }
            }
            PickerPurpose::Preset => match index {
                SAVE_CURRENT => {
                    if let Some(name) = rack.current_preset().map(String::from) {
                        link.send_save_preset(rack, &name);
                    }
                }
                CREATE_NEW => {
                    let name = format!("new-{}", self.list(rack).len());
                    link.send_save_preset(rack, &name);
                }
                _ => {
                    let preset = usize::try_from(index)
                        .ok()
                        .and_then(|i| self.list(rack).get(i).cloned());
                    if let Some(preset) = preset {
                        link.send_load_preset(rack, &preset);
                    }
                }
            },
        }
    }
}
