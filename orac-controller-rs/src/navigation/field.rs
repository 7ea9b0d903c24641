//! Row-sized UI elements.
//!
//! Every row of a view is a [`Field`]. All kinds share one capability set:
//! render into their row, react to increase/decrease, name their action
//! in the footer hint.

use alloc::string::String;
use core::fmt::{self, Write};

use orac::rack::{Module, Rack};
use orac_oled_display_rs::{Alignment, Font, Rect, Surface};

use super::picker::Picker;
use crate::session::{Platform, Session};
use crate::transport::Transport;

/// Characters across a row in the condensed font (128 px / 4 px).
const LINE_CAPACITY: usize = 32;

/// Marks a line cut short by [`fit()`].
const ELLIPSIS: &str = "..";

type Line = heapless::String<LINE_CAPACITY>;

/// Writer that keeps whole chars up to capacity and drops the rest.
struct Clip {
    line: Line,
    clipped: bool,
}

impl Write for Clip {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.clipped || self.line.push(c).is_err() {
                self.clipped = true;
                break;
            }
        }
        Ok(())
    }
}

/// Format row text into a fixed line. Text that does not fit is cut at a
/// char boundary and ends in [`ELLIPSIS`].
fn fit(args: fmt::Arguments<'_>) -> Line {
    let mut clip = Clip {
        line: Line::new(),
        clipped: false,
    };
    if clip.write_fmt(args).is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("row text formatting failed");
    }
    if clip.clipped {
        while clip.line.len() + ELLIPSIS.len() > LINE_CAPACITY {
            clip.line.pop();
        }
        // Room was made above.
        let _ = clip.line.push_str(ELLIPSIS);
    }
    clip.line
}

/// Footer hint for fields without an action.
pub const NO_HINT: &str = "--------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decrease,
    Increase,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Decrease => -1,
            Direction::Increase => 1,
        }
    }
}

/// Rack value read at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    RackId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Literal(&'static str),
    Bound(Accessor),
}

impl TextSource {
    fn resolve(self, rack: &Rack) -> &str {
        match self {
            TextSource::Literal(text) => text,
            TextSource::Bound(Accessor::RackId) => rack.id().unwrap_or(""),
        }
    }
}

/// Session flag a toggle reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    MidiLearn,
    ModLearn,
}

impl Binding {
    fn get(self, rack: &Rack) -> bool {
        match self {
            Binding::MidiLearn => rack.midi_learn(),
            Binding::ModLearn => rack.mod_learn(),
        }
    }
}

/// What the view has to do after a field acted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Push a picker with absolute position `focus` selected.
    Open { picker: Picker, focus: usize },
    /// A picker row was activated.
    Pick(usize),
    /// Pop the modal this view lives in.
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    StaticText { text: TextSource, font: Font },
    Toggle { label: &'static str, binding: Binding },
    SlotSelector,
    PageSelector,
    /// Parameter `index` of the active page.
    ParamTweak { index: usize },
    ModulePicker,
    PresetPicker,
    PickerRow { row: usize },
    SaveSettings { saved: bool },
    /// Two-step: the first activation arms, a second `x` shuts down.
    Shutdown { armed: bool },
    NetworkInfo { interface: &'static str },
}

impl Field {
    pub fn hint(&self) -> &'static str {
        match self {
            Field::StaticText { .. } | Field::NetworkInfo { .. } => NO_HINT,
            Field::Toggle { .. } => "TOGGLE",
            Field::SlotSelector => "SWITCH SLOT",
            Field::PageSelector => "SWITCH PAGE",
            Field::ParamTweak { .. } => "TWEAK",
            Field::ModulePicker => "SELECT MODULE",
            Field::PresetPicker => "SELECT PRESET",
            Field::PickerRow { .. } => "MOVE CURSOR",
            Field::SaveSettings { .. } | Field::Shutdown { .. } => "EXECUTE",
        }
    }

    /// Focus left the field.
    pub fn blur(&mut self) {
        if let Field::Shutdown { armed } = self {
            *armed = false;
        }
    }

    /// Start of a new user action: drop transient feedback.
    pub fn settle(&mut self) {
        if let Field::SaveSettings { saved } = self {
            *saved = false;
        }
    }

    pub fn perform_increase<T: Transport, P: Platform>(
        &mut self,
        level: u8,
        session: &mut Session<T, P>,
    ) -> Outcome {
        self.perform(Direction::Increase, level, session)
    }

    pub fn perform_decrease<T: Transport, P: Platform>(
        &mut self,
        level: u8,
        session: &mut Session<T, P>,
    ) -> Outcome {
        self.perform(Direction::Decrease, level, session)
    }

    fn perform<T: Transport, P: Platform>(
        &mut self,
        direction: Direction,
        level: u8,
        session: &mut Session<T, P>,
    ) -> Outcome {
        match self {
            Field::StaticText { .. } | Field::NetworkInfo { .. } => {}
            Field::Toggle { binding, .. } => {
                let enabled = !binding.get(&session.rack);
                match binding {
                    Binding::MidiLearn => session.link.send_midi_learn(&mut session.rack, enabled),
                    Binding::ModLearn => session.link.send_mod_learn(&mut session.rack, enabled),
                }
            }
            Field::SlotSelector => {
                let slot_len = session.rack.slot_len();
                session.cursor.step_slot(direction.delta(), slot_len);
            }
            Field::PageSelector => {
                let page_len = session.active_module().map_or(0, Module::page_len);
                session.cursor.step_page(direction.delta(), page_len);
            }
            Field::ParamTweak { index } => tweak(session, *index, direction, level),
            Field::ModulePicker => {
                if let Some((picker, focus)) = Picker::for_module(session) {
                    return Outcome::Open { picker, focus };
                }
            }
            Field::PresetPicker => {
                if let Some((picker, focus)) = Picker::for_preset(&session.rack) {
                    return Outcome::Open { picker, focus };
                }
            }
            Field::PickerRow { row } => return Outcome::Pick(*row),
            Field::SaveSettings { saved } => {
                *saved = true;
                session.platform.save_settings(&session.rack);
            }
            Field::Shutdown { armed } => {
                if !*armed {
                    *armed = true;
                } else {
                    *armed = false;
                    if direction == Direction::Decrease {
                        #[cfg(feature = "defmt")]
                        defmt::info!("shutdown confirmed");
                        session.platform.shutdown();
                    }
                }
            }
        }
        Outcome::None
    }

    /// Paint the field into `rect`. Focused rows are drawn inverted.
    pub fn render<S: Surface, T, P: Platform>(
        &self,
        surface: &mut S,
        rect: Rect,
        focused: bool,
        session: &Session<T, P>,
        picker: Option<&Picker>,
    ) -> Result<(), S::Error> {
        let ink = !focused;
        surface.draw_rect(rect, focused)?;

        match self {
            Field::StaticText { text, font } => {
                let text = text.resolve(&session.rack);
                surface.draw_text(text, rect, ink, Alignment::Center, *font)?;
            }
            Field::Toggle { label, binding } => {
                let mark = if binding.get(&session.rack) { "[x]" } else { "[ ]" };
                surface.draw_text(label, rect, ink, Alignment::Left, Font::Regular)?;
                surface.draw_text(mark, rect, ink, Alignment::Right, Font::Regular)?;
            }
            Field::SlotSelector => {
                let slot = session.active_slot().unwrap_or("");
                let label = session.active_module().map_or("Empty", |m| m.label.as_str());
                let line = fit(format_args!("{}: {}", slot, label));
                surface.draw_text(&line, rect, ink, Alignment::Center, Font::Regular)?;
                draw_arrows(surface, rect, ink)?;
            }
            Field::PageSelector => {
                let label = session.active_page().map_or("-", |p| p.label.as_str());
                surface.draw_text(label, rect, ink, Alignment::Center, Font::Regular)?;
                draw_arrows(surface, rect, ink)?;
            }
            Field::ParamTweak { index } => {
                if let Some(param) = session.page_param(*index) {
                    let strip = Rect::new(rect.x, rect.y + rect.h as i32 - 1, rect.w, 1);
                    surface.draw_bar(param.percent(), strip, ink, focused)?;
                    let line = fit(format_args!("{}", param.display_value()));
                    surface.draw_text(param.label(), rect, ink, Alignment::Left, Font::Regular)?;
                    surface.draw_text(&line, rect, ink, Alignment::Right, Font::Regular)?;
                }
            }
            Field::ModulePicker => {
                let slot = fit(format_args!("Module ({})", session.active_slot().unwrap_or("")));
                surface.draw_text(&slot, rect, ink, Alignment::Left, Font::Condensed)?;
                let label = session.active_module().map_or("Empty", |m| m.label.as_str());
                let line = fit(format_args!("[ {} ]", label));
                surface.draw_text(&line, rect, ink, Alignment::Right, Font::Regular)?;
            }
            Field::PresetPicker => {
                let name = session.rack.current_preset().unwrap_or("(N/A)");
                let line = fit(format_args!("[ {} ]", name));
                surface.draw_text("Preset", rect, ink, Alignment::Left, Font::Regular)?;
                surface.draw_text(&line, rect, ink, Alignment::Right, Font::Regular)?;
            }
            Field::PickerRow { row } => {
                let text = picker
                    .and_then(|p| p.item(p.offset() + row, &session.rack))
                    .unwrap_or("");
                surface.draw_text(text, rect, ink, Alignment::Center, Font::Condensed)?;
            }
            Field::SaveSettings { saved } => {
                let text = if *saved { "SAVED!" } else { "[ Save Settings ]" };
                surface.draw_text(text, rect, ink, Alignment::Center, Font::Regular)?;
            }
            Field::Shutdown { armed } => {
                let text = if *armed { "PRESS x TO CONFIRM" } else { "[ Shutdown ]" };
                surface.draw_text(text, rect, ink, Alignment::Center, Font::Regular)?;
            }
            Field::NetworkInfo { interface } => {
                let address: Option<String> = session.platform.interface_address(interface);
                let line = fit(format_args!("{} IP:", interface));
                surface.draw_text(&line, rect, ink, Alignment::Left, Font::Condensed)?;
                let address = address.as_deref().unwrap_or("N/A");
                surface.draw_text(address, rect, ink, Alignment::Right, Font::Condensed)?;
            }
        }
        Ok(())
    }
}

fn draw_arrows<S: Surface>(surface: &mut S, rect: Rect, ink: bool) -> Result<(), S::Error> {
    surface.draw_text("<", rect, ink, Alignment::Left, Font::Regular)?;
    surface.draw_text(">", rect, ink, Alignment::Right, Font::Regular)
}

/// Step the parameter locally, then report the new value.
fn tweak<T: Transport, P>(
    session: &mut Session<T, P>,
    index: usize,
    direction: Direction,
    level: u8,
) {
    let Session {
        rack, cursor, link, ..
    } = session;
    let Some(slot) = rack.slot_id(cursor.slot_index).map(String::from) else {
        return;
    };
    let Some(param) = rack
        .slot_module_mut(&slot)
        .and_then(|m| m.page_param_mut(cursor.page_index, index))
    else {
        return;
    };
    match direction {
        Direction::Decrease => param.decrease(level),
        Direction::Increase => param.increase(level),
    }
    let (id, value) = (String::from(param.id()), param.current());
    link.send_changed(rack, &slot, &id, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Outbound;
    use crate::testing::{populated_session, session, RecordingSurface, TestSession, RACK};
    use orac::rack::ResourceKind;

    fn row() -> Rect {
        Rect::new(0, 8, 128, 8)
    }

    fn rendered(field: &Field, focused: bool, s: &TestSession) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        field.render(&mut surface, row(), focused, s, None).unwrap();
        surface
    }

    // ── Hints ────────────────────────────────────────────────────────

    #[test]
    fn hints_name_the_action() {
        assert_eq!(Field::ParamTweak { index: 0 }.hint(), "TWEAK");
        assert_eq!(Field::Shutdown { armed: false }.hint(), "EXECUTE");
        assert_eq!(Field::NetworkInfo { interface: "eth0" }.hint(), NO_HINT);
        assert_eq!(Field::PickerRow { row: 2 }.hint(), "MOVE CURSOR");
    }

    // ── Selectors ────────────────────────────────────────────────────

    #[test]
    fn slot_selector_wraps_and_shows_module() {
        let mut s = populated_session();
        let mut f = Field::SlotSelector;
        f.perform_decrease(0, &mut s);
        assert_eq!(s.active_slot(), Some("s2"));
        f.perform_increase(0, &mut s);
        assert_eq!(s.active_slot(), Some("a1"));

        assert!(rendered(&f, false, &s).texts().contains(&"a1: Brds Mono".into()));
    }

    #[test]
    fn page_selector_cycles_module_pages() {
        let mut s = populated_session();
        let mut f = Field::PageSelector;
        f.perform_increase(0, &mut s);
        assert_eq!(s.active_page().map(|p| p.label.as_str()), Some("Envelope"));
        f.perform_increase(0, &mut s);
        assert_eq!(s.cursor.page_index, 0);

        // Empty slot: nothing to cycle.
        s.cursor.slot_index = 5;
        f.perform_increase(0, &mut s);
        assert_eq!(s.cursor.page_index, 0);
        assert!(rendered(&f, false, &s).texts().contains(&"-".into()));
    }

    // ── Parameter tweak ──────────────────────────────────────────────

    #[test]
    fn tweak_applies_locally_and_sends() {
        let mut s = populated_session();
        let mut f = Field::ParamTweak { index: 0 };
        f.perform_increase(1, &mut s);
        assert_eq!(s.page_param(0).map(|p| p.current()), Some(55.0));
        assert_eq!(
            s.link.transport().sent.last(),
            Some(&Outbound::Changed {
                rack: RACK.into(),
                slot: "a1".into(),
                param: "o_colour".into(),
                value: 55.0
            })
        );
    }

    #[test]
    fn tweak_on_dangling_param_is_noop() {
        let mut s = populated_session();
        let before = s.link.transport().sent.len();
        let mut f = Field::ParamTweak { index: 3 };
        assert_eq!(f.perform_increase(0, &mut s), Outcome::None);
        assert_eq!(s.link.transport().sent.len(), before);
        assert!(rendered(&f, true, &s).texts().is_empty());
    }

    #[test]
    fn tweak_renders_label_value_and_bar() {
        let s = populated_session();
        let surface = rendered(&Field::ParamTweak { index: 0 }, false, &s);
        assert_eq!(surface.texts(), ["Colour", "50.00%"]);
        // Half of the bottom strip lit.
        assert!(surface.rect_drawn(Rect::new(0, 15, 64, 1), true));
    }

    // ── Menu fields ──────────────────────────────────────────────────

    #[test]
    fn toggle_flips_learn_flag_and_sends() {
        let mut s = populated_session();
        let mut f = Field::Toggle {
            label: "Midi Learn",
            binding: Binding::MidiLearn,
        };
        f.perform_decrease(0, &mut s);
        assert!(s.rack.midi_learn());
        assert_eq!(s.link.transport().sent.last(), Some(&Outbound::MidiLearn(true)));
        assert!(rendered(&f, false, &s).texts().contains(&"[x]".into()));
    }

    #[test]
    fn module_picker_needs_occupied_slot() {
        let mut s = populated_session();
        s.rack.add_resource(ResourceKind::Module, "utility/empty");
        s.rack.add_resource(ResourceKind::Module, "synth/brdsmono");
        match Field::ModulePicker.perform_increase(0, &mut s) {
            Outcome::Open { focus, .. } => assert_eq!(focus, 1),
            other => panic!("unexpected {:?}", other),
        }
        s.cursor.slot_index = 4;
        assert_eq!(Field::ModulePicker.perform_increase(0, &mut s), Outcome::None);
    }

    #[test]
    fn preset_picker_needs_current_preset() {
        let mut s = session();
        assert_eq!(Field::PresetPicker.perform_increase(0, &mut s), Outcome::None);
        assert!(rendered(&Field::PresetPicker, false, &s)
            .texts()
            .contains(&"[ (N/A) ]".into()));
    }

    #[test]
    fn long_preset_name_is_clipped_not_dropped() {
        let mut s = session();
        s.rack.set_current_preset("an-unusually-long-preset-name-for-the-demo");
        let texts = rendered(&Field::PresetPicker, false, &s).texts();
        let value = &texts[1];
        assert_eq!(value.len(), LINE_CAPACITY);
        assert!(value.starts_with("[ an-unusually-long-preset"));
        assert!(value.ends_with(ELLIPSIS));
    }

    #[test]
    fn fit_keeps_short_text_and_cuts_on_char_boundary() {
        assert_eq!(fit(format_args!("[ {} ]", "demo")).as_str(), "[ demo ]");

        let long = "é".repeat(LINE_CAPACITY);
        let line = fit(format_args!("{}", long));
        assert!(line.ends_with(ELLIPSIS));
        assert!(line.len() <= LINE_CAPACITY);
        assert!(line.trim_end_matches(ELLIPSIS).chars().all(|c| c == 'é'));
    }

    #[test]
    fn save_settings_shows_feedback_until_settled() {
        let mut s = session();
        let mut f = Field::SaveSettings { saved: false };
        f.perform_increase(0, &mut s);
        assert_eq!(s.platform.saves, 1);
        assert_eq!(rendered(&f, true, &s).texts(), ["SAVED!"]);
        f.settle();
        assert_eq!(rendered(&f, true, &s).texts(), ["[ Save Settings ]"]);
    }

    // ── Device fields ────────────────────────────────────────────────

    #[test]
    fn shutdown_needs_arm_then_decrease() {
        let mut s = session();
        let mut f = Field::Shutdown { armed: false };
        f.perform_decrease(0, &mut s);
        assert_eq!(s.platform.shutdowns, 0);
        assert_eq!(rendered(&f, true, &s).texts(), ["PRESS x TO CONFIRM"]);

        // Increase while armed disarms.
        f.perform_increase(0, &mut s);
        assert_eq!(f, Field::Shutdown { armed: false });

        f.perform_increase(0, &mut s);
        f.perform_decrease(0, &mut s);
        assert_eq!(s.platform.shutdowns, 1);
    }

    #[test]
    fn blur_disarms_shutdown() {
        let mut f = Field::Shutdown { armed: true };
        f.blur();
        assert_eq!(f, Field::Shutdown { armed: false });
    }

    #[test]
    fn network_info_falls_back_when_unavailable() {
        let mut s = session();
        s.platform.addresses.push(("eth0".into(), "192.168.1.20".into()));
        let eth = rendered(&Field::NetworkInfo { interface: "eth0" }, false, &s);
        assert_eq!(eth.texts(), ["eth0 IP:", "192.168.1.20"]);
        let wlan = rendered(&Field::NetworkInfo { interface: "wlan0" }, false, &s);
        assert_eq!(wlan.texts(), ["wlan0 IP:", "N/A"]);
    }

    #[test]
    fn bound_text_reads_rack_at_render_time() {
        let mut s = session();
        let f = Field::StaticText {
            text: TextSource::Bound(Accessor::RackId),
            font: Font::Condensed,
        };
        s.rack.set_id("10.0.0.9:6001");
        assert_eq!(rendered(&f, false, &s).texts(), ["10.0.0.9:6001"]);
    }

    #[test]
    fn focused_row_is_inverted() {
        let s = session();
        let surface = rendered(&Field::ParamTweak { index: 0 }, true, &s);
        assert!(surface.rect_drawn(row(), true));
        assert!(surface.texts().is_empty());
    }
}
