use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use super::module::Module;
use super::page::Page;
use super::param::Param;
use super::DEFAULT_SLOT_ORDER;

/// Kinds of resource announced by the remote rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceKind {
    /// A loadable module id, e.g. `synth/brdsmono`.
    Module,
    /// A preset name.
    Preset,
    /// Space-separated slot order; replaces the current order.
    ModuleOrder,
}

impl ResourceKind {
    /// Parse the wire kind. Unknown kinds return `None` and are ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "module" => Some(ResourceKind::Module),
            "preset" => Some(ResourceKind::Preset),
            "moduleorder" => Some(ResourceKind::ModuleOrder),
            _ => None,
        }
    }
}

/// Local mirror of the remote rack.
///
/// Pure state container: every mutation is driven by a protocol event or a
/// local edit, and every lookup of an unknown entity returns `None`.
///
/// # Invariants
///
/// - `slot_order` never contains duplicates.
/// - A slot holds at most one [`Module`].
/// - Resource lists never contain duplicates and keep insertion order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rack {
    id: Option<String>,
    slot_order: Vec<String>,
    modules: BTreeMap<String, Module>,
    current_preset: Option<String>,
    module_resources: Vec<String>,
    preset_resources: Vec<String>,
    midi_learn: bool,
    mod_learn: bool,
}

impl Default for Rack {
    fn default() -> Self {
        Self::new()
    }
}

impl Rack {
    /// Empty rack with no identity and the canonical slot order.
    pub fn new() -> Self {
        Self {
            id: None,
            slot_order: default_slot_order(),
            modules: BTreeMap::new(),
            current_preset: None,
            module_resources: Vec::new(),
            preset_resources: Vec::new(),
            midi_learn: false,
            mod_learn: false,
        }
    }

    // ── Identity and lifecycle ───────────────────────────────────────

    /// Identity token of the remote rack (`host:port`), once announced.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Record the identity carried by a rack announcement.
    pub fn set_id(&mut self, id: &str) {
        self.id = Some(id.into());
    }

    /// Drop all modules, restore the canonical slot order and clear the
    /// resource lists.
    ///
    /// Identity, current preset and learn flags are left untouched.
    pub fn reset(&mut self) {
        self.slot_order = default_slot_order();
        self.modules.clear();
        self.module_resources.clear();
        self.preset_resources.clear();
    }

    // ── Slots ────────────────────────────────────────────────────────

    /// Number of slots in the current order, occupied or not.
    pub fn slot_len(&self) -> usize {
        self.slot_order.len()
    }

    /// Slot ids in display order.
    pub fn slot_order(&self) -> &[String] {
        &self.slot_order
    }

    /// Slot id at position `index` in the current order.
    pub fn slot_id(&self, index: usize) -> Option<&str> {
        self.slot_order.get(index).map(String::as_str)
    }

    /// Module in `slot`, or `None` while the slot is empty.
    pub fn slot_module(&self, slot: &str) -> Option<&Module> {
        self.modules.get(slot)
    }

    /// Mutable variant of [`slot_module()`](Self::slot_module).
    pub fn slot_module_mut(&mut self, slot: &str) -> Option<&mut Module> {
        self.modules.get_mut(slot)
    }

    /// Number of slots currently holding a module.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    // ── Remote declarations ──────────────────────────────────────────

    /// Place a fresh module in `slot`, discarding whatever was there
    /// (including its pages and parameters).
    pub fn set_module(&mut self, slot: &str, label: &str, id: &str) {
        self.modules.insert(slot.into(), Module::new(label, id));
    }

    /// Append a page to the module in `slot`. Returns `false` (and does
    /// nothing) if the slot is empty.
    pub fn add_page(&mut self, slot: &str, page: Page) -> bool {
        match self.modules.get_mut(slot) {
            Some(module) => {
                module.add_page(page);
                true
            }
            None => false,
        }
    }

    /// Add a parameter to the module in `slot`. Returns `false` (and does
    /// nothing) if the slot is empty.
    pub fn add_param(&mut self, slot: &str, param: Param) -> bool {
        match self.modules.get_mut(slot) {
            Some(module) => {
                module.add_param(param);
                true
            }
            None => false,
        }
    }

    /// Set a parameter's current value (clamped to its range).
    ///
    /// No-op returning `false` if the slot or parameter is unknown.
    pub fn set_param_current(&mut self, slot: &str, param_id: &str, value: f32) -> bool {
        match self
            .modules
            .get_mut(slot)
            .and_then(|module| module.param_mut(param_id))
        {
            Some(param) => {
                param.set_current(value);
                true
            }
            None => false,
        }
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Record a resource announcement.
    ///
    /// [`ResourceKind::ModuleOrder`] replaces the slot order wholesale with
    /// the whitespace-separated ids in `value` (repeated ids keep their
    /// first position). Other kinds append `value` unless already listed.
    pub fn add_resource(&mut self, kind: ResourceKind, value: &str) {
        let list = match kind {
            ResourceKind::ModuleOrder => {
                let mut order: Vec<String> = Vec::new();
                for slot in value.split_whitespace() {
                    if !order.iter().any(|s| s == slot) {
                        order.push(slot.into());
                    }
                }
                self.slot_order = order;
                return;
            }
            ResourceKind::Module => &mut self.module_resources,
            ResourceKind::Preset => &mut self.preset_resources,
        };
        if !list.iter().any(|item| item == value) {
            list.push(value.into());
        }
    }

    /// The list for a resource kind. `None` for
    /// [`ResourceKind::ModuleOrder`], which is exposed as
    /// [`slot_order()`](Self::slot_order) instead.
    pub fn resource_list(&self, kind: ResourceKind) -> Option<&[String]> {
        match kind {
            ResourceKind::Module => Some(&self.module_resources),
            ResourceKind::Preset => Some(&self.preset_resources),
            ResourceKind::ModuleOrder => None,
        }
    }

    // ── Session flags ────────────────────────────────────────────────

    /// Name of the loaded preset, `None` until one is announced or chosen.
    pub fn current_preset(&self) -> Option<&str> {
        self.current_preset.as_deref()
    }

    /// Record the loaded preset, from the rack or a local load/save.
    pub fn set_current_preset(&mut self, name: &str) {
        self.current_preset = Some(name.into());
    }

    /// Whether the rack is in MIDI learn mode.
    pub fn midi_learn(&self) -> bool {
        self.midi_learn
    }

    /// Set the MIDI learn flag.
    pub fn set_midi_learn(&mut self, enabled: bool) {
        self.midi_learn = enabled;
    }

    /// Whether the rack is in modulation learn mode.
    pub fn mod_learn(&self) -> bool {
        self.mod_learn
    }

    /// Set the modulation learn flag.
    pub fn set_mod_learn(&mut self, enabled: bool) {
        self.mod_learn = enabled;
    }
}

fn default_slot_order() -> Vec<String> {
    DEFAULT_SLOT_ORDER.iter().map(|&s| s.into()).collect()
}
