use alloc::vec::Vec;

use orac::rack::Page;
use orac_oled_display_rs::{Alignment, DisplayConfig, Font, Rect, Row, Surface};

use super::field::{Accessor, Binding, Direction, Field, Outcome, TextSource, NO_HINT};
use super::picker::Picker;
use crate::input::{Button, UiAction};
use crate::session::{wrap, Platform, Session};
use crate::transport::Transport;

pub const MOVE_TITLE: &str = "MOVE (^+v: MENU)";
pub const SELECT_TITLE: &str = "SELECT (^+v: EXIT)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Parameters,
    Menu,
    Device,
    Picker(Picker),
}

/// A screenful of fields with one focused row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    kind: ViewKind,
    fields: Vec<Field>,
    focus: usize,
}

impl View {
    /// Slot, page, then one row per parameter of the active page.
    pub fn parameters(rows: usize) -> Self {
        let mut fields = Vec::with_capacity(rows);
        fields.push(Field::SlotSelector);
        fields.push(Field::PageSelector);
        fields.extend((0..rows.saturating_sub(2)).map(|index| Field::ParamTweak { index }));
        Self::new(ViewKind::Parameters, fields)
    }

    pub fn menu() -> Self {
        let fields = alloc::vec![
            Field::StaticText {
                text: TextSource::Literal("===== MENU ====="),
                font: Font::Regular,
            },
            Field::ModulePicker,
            Field::PresetPicker,
            Field::Toggle {
                label: "Midi Learn",
                binding: Binding::MidiLearn,
            },
            Field::Toggle {
                label: "Mod Learn",
                binding: Binding::ModLearn,
            },
            Field::SaveSettings { saved: false },
        ];
        Self::new(ViewKind::Menu, fields)
    }

    pub fn device(interfaces: [&'static str; 2]) -> Self {
        let fields = alloc::vec![
            Field::StaticText {
                text: TextSource::Literal("==== Device ===="),
                font: Font::Regular,
            },
            Field::NetworkInfo {
                interface: interfaces[0],
            },
            Field::NetworkInfo {
                interface: interfaces[1],
            },
            Field::Shutdown { armed: false },
            Field::StaticText {
                text: TextSource::Literal("ORAC Controller"),
                font: Font::Condensed,
            },
            Field::StaticText {
                text: TextSource::Bound(Accessor::RackId),
                font: Font::Condensed,
            },
        ];
        Self::new(ViewKind::Device, fields)
    }

    /// Modal picker with absolute position `focus` selected.
    pub fn picker<T, P>(
        mut picker: Picker,
        focus: usize,
        session: &Session<T, P>,
        rows: usize,
    ) -> Self {
        let visible = picker.row_count(&session.rack, rows);
        let row = picker.focus_absolute(focus, visible);
        let fields = (0..rows).map(|row| Field::PickerRow { row }).collect();
        let mut view = Self::new(ViewKind::Picker(picker), fields);
        view.focus = row;
        view
    }

    fn new(kind: ViewKind, fields: Vec<Field>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ViewKind::Picker(_) => SELECT_TITLE,
            _ => MOVE_TITLE,
        }
    }

    /// Rows focus can move through right now.
    pub fn row_count<T, P>(&self, session: &Session<T, P>) -> usize {
        let rows = self.fields.len();
        match &self.kind {
            ViewKind::Parameters => {
                let params = session.active_page().map_or(0, Page::param_len);
                rows.min(2 + params)
            }
            ViewKind::Menu | ViewKind::Device => rows,
            ViewKind::Picker(picker) => picker.row_count(&session.rack, rows),
        }
    }

    fn set_focus(&mut self, focus: usize) {
        if focus != self.focus {
            if let Some(field) = self.fields.get_mut(self.focus) {
                field.blur();
            }
            self.focus = focus;
        }
    }

    /// Focus left the view.
    pub fn blur(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.blur();
        }
    }

    pub fn settle(&mut self) {
        self.fields.iter_mut().for_each(Field::settle);
    }

    /// Back to the first row and top of the list.
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(Field::blur);
        self.focus = 0;
        if let ViewKind::Picker(picker) = &mut self.kind {
            picker.reset();
        }
    }

    /// Run `action` against the focused field.
    ///
    /// Pickers swap the roles of the buttons: decrease/increase move the
    /// cursor (and auto-repeat), previous/next select the row.
    pub fn apply<T: Transport, P: Platform>(
        &mut self,
        action: UiAction,
        session: &mut Session<T, P>,
    ) -> Outcome {
        let rows = self.row_count(session);
        if rows == 0 {
            return Outcome::None;
        }
        if self.focus >= rows {
            self.set_focus(rows - 1);
        }

        if let ViewKind::Picker(picker) = &mut self.kind {
            let len = picker.item_len(&session.rack);
            let direction = match action {
                UiAction::Decrease(_) => {
                    picker.move_previous(&mut self.focus);
                    return Outcome::None;
                }
                UiAction::Increase(_) => {
                    picker.move_next(&mut self.focus, rows, len);
                    return Outcome::None;
                }
                UiAction::FocusPrevious => Direction::Decrease,
                UiAction::FocusNext => Direction::Increase,
                UiAction::PopOrToggle => return Outcome::None,
            };
            let field = &mut self.fields[self.focus];
            let outcome = match direction {
                Direction::Decrease => field.perform_decrease(0, session),
                Direction::Increase => field.perform_increase(0, session),
            };
            if let Outcome::Pick(row) = outcome {
                picker.select(row, session);
                return Outcome::Close;
            }
            return outcome;
        }

        match action {
            UiAction::FocusPrevious => self.set_focus(wrap(self.focus, -1, rows)),
            UiAction::FocusNext => self.set_focus(wrap(self.focus, 1, rows)),
            UiAction::Decrease(level) => return self.fields[self.focus].perform_decrease(level, session),
            UiAction::Increase(level) => return self.fields[self.focus].perform_increase(level, session),
            UiAction::PopOrToggle => {}
        }
        Outcome::None
    }

    /// Paint a full frame: every content row, header and footer.
    pub async fn render<S: Surface, T, P: Platform>(
        &self,
        surface: &mut S,
        session: &Session<T, P>,
        display: &DisplayConfig,
    ) -> Result<(), S::Error> {
        surface.clear()?;

        let rows = self.row_count(session);
        let focus = self.focus.min(rows.saturating_sub(1));
        let picker = match &self.kind {
            ViewKind::Picker(picker) => Some(picker),
            _ => None,
        };
        for (i, field) in self.fields.iter().enumerate().take(display.row_count) {
            let rect = display.row_rect(Row::Content(i));
            field.render(surface, rect, rows > 0 && i == focus, session, picker)?;
        }

        let hint = match self.fields.get(focus) {
            Some(field) if rows > 0 => field.hint(),
            _ => NO_HINT,
        };
        draw_band(
            surface,
            display.row_rect(Row::Header),
            self.title(),
            Button::Previous,
            Button::Decrease,
        )?;
        draw_band(
            surface,
            display.row_rect(Row::Footer),
            hint,
            Button::Next,
            Button::Increase,
        )?;

        surface.present().await
    }
}

/// Header or footer: centred text flanked by button legends.
fn draw_band<S: Surface>(
    surface: &mut S,
    rect: Rect,
    text: &str,
    left: Button,
    right: Button,
) -> Result<(), S::Error> {
    surface.draw_rect(rect, false)?;
    surface.draw_text(text, rect, true, Alignment::Center, Font::Condensed)?;
    surface.draw_text(left.legend(), rect, true, Alignment::Left, Font::Condensed)?;
    surface.draw_text(right.legend(), rect, true, Alignment::Right, Font::Condensed)
}
