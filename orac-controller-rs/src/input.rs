//! Button edge arbitration.
//!
//! [`InputArbiter`] turns raw press/release edges of the four logical
//! buttons into [`UiAction`]s and tells the caller what to do with the
//! shared repeat timer:
//!
//! ```text
//!   press x / o ──► Decrease / Increase(level) ──► arm repeat timer
//!   hold ^ + press v (or v + ^) ──► PopOrToggle, swallow next 2 releases
//!   release ^ / v ──► FocusPrevious / FocusNext
//!   release of the held button ──► cancel repeat timer
//! ```

use embassy_time::Duration;
use orac::rack::MAX_ACCELERATION_LEVEL;

use crate::config::ControllerConfig;

/// The four logical buttons, in channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// `^`
    Previous,
    /// `v`
    Next,
    /// `x`
    Decrease,
    /// `o`
    Increase,
}

impl Button {
    /// Map a hardware channel (0..=3) to its button.
    pub fn from_channel(channel: u8) -> Option<Self> {
        match channel {
            0 => Some(Button::Previous),
            1 => Some(Button::Next),
            2 => Some(Button::Decrease),
            3 => Some(Button::Increase),
            _ => None,
        }
    }

    /// Legend printed next to the button on the screen.
    pub fn legend(self) -> &'static str {
        match self {
            Button::Previous => "^",
            Button::Next => "v",
            Button::Decrease => "x",
            Button::Increase => "o",
        }
    }

    fn combo_partner(self) -> Option<Self> {
        match self {
            Button::Previous => Some(Button::Next),
            Button::Next => Some(Button::Previous),
            _ => None,
        }
    }
}

/// Level change of a button line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Button went down.
    Press,
    /// Button came back up.
    Release,
}

/// One raw input event, as delivered by a
/// [`ButtonSource`](crate::ButtonSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    /// Which of the four buttons changed.
    pub button: Button,
    /// Whether it was pressed or released.
    pub edge: Edge,
}

impl ButtonEdge {
    pub fn new(button: Button, edge: Edge) -> Self {
        Self { button, edge }
    }
}

/// Abstract action handed to the navigation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiAction {
    FocusPrevious,
    FocusNext,
    /// Decrease with the given acceleration level.
    Decrease(u8),
    /// Increase with the given acceleration level.
    Increase(u8),
    PopOrToggle,
}

/// What to do with the shared repeat/redraw timer after an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    /// Leave the pending deadline alone.
    Keep,
    /// Re-deliver the held press after this delay.
    Arm(Duration),
    /// Drop the pending auto-repeat.
    Cancel,
}

/// Held-button, repeat counter and combo-release bookkeeping.
#[derive(Debug, Clone)]
pub struct InputArbiter {
    config: ControllerConfig,
    held: Option<(Button, u32)>,
    swallow: u8,
}

impl InputArbiter {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            held: None,
            swallow: 0,
        }
    }

    /// Currently held button and its repeat counter.
    pub fn held(&self) -> Option<(Button, u32)> {
        self.held
    }

    /// Handle a press edge. Auto-repeat re-delivers the held button here.
    pub fn press(&mut self, button: Button) -> (Option<UiAction>, TimerRequest) {
        if let (Some((held, _)), Some(partner)) = (self.held, button.combo_partner()) {
            if held == partner {
                self.swallow = self.config.combo_release_swallow;
                return (Some(UiAction::PopOrToggle), TimerRequest::Keep);
            }
        }

        let count = match self.held {
            Some((held, count)) if held == button => count.saturating_add(1),
            _ => 1,
        };
        self.held = Some((button, count));

        let level = self.level(count);
        let action = match button {
            Button::Decrease => UiAction::Decrease(level),
            Button::Increase => UiAction::Increase(level),
            Button::Previous | Button::Next => return (None, TimerRequest::Keep),
        };
        (Some(action), TimerRequest::Arm(self.config.repeat_delay(count)))
    }

    /// Handle a release edge.
    pub fn release(&mut self, button: Button) -> (Option<UiAction>, TimerRequest) {
        let mut timer = TimerRequest::Keep;
        if matches!(self.held, Some((held, _)) if held == button) {
            self.held = None;
            timer = TimerRequest::Cancel;
        }

        if self.swallow > 0 {
            self.swallow -= 1;
            return (None, timer);
        }

        let action = match button {
            Button::Previous => Some(UiAction::FocusPrevious),
            Button::Next => Some(UiAction::FocusNext),
            Button::Decrease | Button::Increase => None,
        };
        (action, timer)
    }

    fn level(&self, count: u32) -> u8 {
        let per_level = self.config.presses_per_level.max(1);
        (count / per_level).min(MAX_ACCELERATION_LEVEL as u32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> InputArbiter {
        InputArbiter::new(ControllerConfig::default())
    }

    // ── Acceleration ─────────────────────────────────────────────────

    #[test]
    fn level_rises_on_tenth_press() {
        let mut a = arbiter();
        for _ in 0..9 {
            assert_eq!(a.press(Button::Increase).0, Some(UiAction::Increase(0)));
        }
        assert_eq!(a.press(Button::Increase).0, Some(UiAction::Increase(1)));
    }

    #[test]
    fn level_is_capped() {
        let mut a = arbiter();
        let mut last = None;
        for _ in 0..200 {
            last = a.press(Button::Decrease).0;
        }
        assert_eq!(last, Some(UiAction::Decrease(MAX_ACCELERATION_LEVEL)));
    }

    #[test]
    fn switching_buttons_restarts_counter() {
        let mut a = arbiter();
        for _ in 0..15 {
            a.press(Button::Increase);
        }
        assert_eq!(a.press(Button::Decrease).0, Some(UiAction::Decrease(0)));
        assert_eq!(a.held(), Some((Button::Decrease, 1)));
    }

    // ── Repeat timer ─────────────────────────────────────────────────

    #[test]
    fn first_press_waits_longer_than_repeats() {
        let mut a = arbiter();
        assert_eq!(
            a.press(Button::Increase).1,
            TimerRequest::Arm(Duration::from_millis(300))
        );
        assert_eq!(
            a.press(Button::Increase).1,
            TimerRequest::Arm(Duration::from_millis(100))
        );
    }

    #[test]
    fn releasing_held_button_cancels_timer() {
        let mut a = arbiter();
        a.press(Button::Increase);
        assert_eq!(a.release(Button::Increase), (None, TimerRequest::Cancel));
        assert_eq!(a.held(), None);
    }

    #[test]
    fn releasing_other_button_keeps_timer() {
        let mut a = arbiter();
        a.press(Button::Increase);
        assert_eq!(
            a.release(Button::Next),
            (Some(UiAction::FocusNext), TimerRequest::Keep)
        );
        assert_eq!(a.held(), Some((Button::Increase, 1)));
    }

    // ── Focus moves ──────────────────────────────────────────────────

    #[test]
    fn focus_moves_fire_on_release_only() {
        let mut a = arbiter();
        assert_eq!(a.press(Button::Previous), (None, TimerRequest::Keep));
        assert_eq!(
            a.release(Button::Previous).0,
            Some(UiAction::FocusPrevious)
        );
    }

    // ── Combo gesture ────────────────────────────────────────────────

    #[test]
    fn combo_fires_once_and_swallows_both_releases() {
        for (first, second) in [
            (Button::Previous, Button::Next),
            (Button::Next, Button::Previous),
        ] {
            let mut a = arbiter();
            a.press(first);
            assert_eq!(a.press(second).0, Some(UiAction::PopOrToggle));
            assert_eq!(a.release(second).0, None);
            assert_eq!(a.release(first).0, None);
            // Next gesture is ordinary again.
            a.press(first);
            assert!(a.release(first).0.is_some());
        }
    }

    #[test]
    fn combo_does_not_apply_to_value_buttons() {
        let mut a = arbiter();
        a.press(Button::Decrease);
        assert_eq!(a.press(Button::Increase).0, Some(UiAction::Increase(0)));
    }
}
