//! Navigation engine.
//!
//! Three top-level views form a fixed cycle; pickers are pushed above them
//! on a LIFO modal stack. The active view is the top modal if any, else
//! the current top-level view:
//!
//! ```text
//!   modal stack   [ picker ]          ◄── active while non-empty
//!   cycle         parameters ─► menu ─► device ─► (wrap)
//! ```
//!
//! `PopOrToggle` pops the top modal, or advances the cycle when no modal
//! is open.

pub mod field;
pub mod picker;
pub mod view;

use alloc::vec::Vec;

use orac_oled_display_rs::{DisplayConfig, Surface};

use crate::config::ControllerConfig;
use crate::input::UiAction;
use crate::session::{Platform, Session};
use crate::transport::Transport;

pub use field::{Field, Outcome};
pub use picker::{Picker, PickerPurpose};
pub use view::{View, ViewKind};

pub struct Navigator {
    views: [View; 3],
    active: usize,
    modals: Vec<View>,
    visible_rows: usize,
}

impl Navigator {
    pub fn new(config: &ControllerConfig) -> Self {
        let rows = config.display.row_count;
        Self {
            views: [
                View::parameters(rows),
                View::menu(),
                View::device(config.network_interfaces),
            ],
            active: 0,
            modals: Vec::new(),
            visible_rows: rows,
        }
    }

    pub fn active_view(&self) -> &View {
        self.modals.last().unwrap_or(&self.views[self.active])
    }

    fn active_view_mut(&mut self) -> &mut View {
        match self.modals.last_mut() {
            Some(view) => view,
            None => &mut self.views[self.active],
        }
    }

    /// Index of the current top-level view.
    pub fn top_level(&self) -> usize {
        self.active
    }

    pub fn modal_depth(&self) -> usize {
        self.modals.len()
    }

    pub fn apply<T: Transport, P: Platform>(&mut self, action: UiAction, session: &mut Session<T, P>) {
        if action == UiAction::PopOrToggle {
            self.pop_or_toggle();
            return;
        }
        match self.active_view_mut().apply(action, session) {
            Outcome::Open { picker, focus } => {
                let view = View::picker(picker, focus, session, self.visible_rows);
                self.push_modal(view);
            }
            Outcome::Close => self.pop_modal(),
            Outcome::None | Outcome::Pick(_) => {}
        }
    }

    pub fn pop_or_toggle(&mut self) {
        if self.modals.pop().is_some() {
            #[cfg(feature = "defmt")]
            defmt::debug!("pop modal, depth {}", self.modals.len());
        } else {
            self.views[self.active].blur();
            self.active = (self.active + 1) % self.views.len();
            #[cfg(feature = "defmt")]
            defmt::debug!("top-level view {}", self.active);
        }
    }

    pub fn push_modal(&mut self, view: View) {
        self.modals.push(view);
        #[cfg(feature = "defmt")]
        defmt::debug!("push modal, depth {}", self.modals.len());
    }

    /// Pop the top modal; never toggles the cycle.
    pub fn pop_modal(&mut self) {
        if !self.modals.is_empty() {
            self.pop_or_toggle();
        }
    }

    /// Forget every modal and return each view to its first row.
    pub fn reset(&mut self) {
        self.modals.clear();
        self.views.iter_mut().for_each(View::reset);
    }

    pub fn settle(&mut self) {
        self.views.iter_mut().for_each(View::settle);
    }

    pub async fn render<S: Surface, T, P: Platform>(
        &self,
        surface: &mut S,
        session: &Session<T, P>,
        display: &DisplayConfig,
    ) -> Result<(), S::Error> {
        self.active_view().render(surface, session, display).await
    }
}
