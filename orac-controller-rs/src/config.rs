//! Compile-time controller configuration.

use embassy_time::Duration;
use orac_oled_display_rs::DisplayConfig;

/// Timing and protocol settings for the controller.
///
/// There are no runtime flags; [`ControllerConfig::default()`] carries the
/// values the controller ships with. Override fields with struct-update
/// syntax:
///
/// ```
/// use orac_controller::ControllerConfig;
///
/// let config = ControllerConfig {
///     repeat_ms: 50,
///     ..ControllerConfig::default()
/// };
/// assert_eq!(config.initial_repeat_ms, 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Screen geometry and redraw rate.
    pub display: DisplayConfig,
    /// Port the controller listens on, announced in every ping. Default: 9001.
    pub listen_port: i32,
    /// Keepalive announced when echoing a ping. Default: 5 s.
    pub keepalive_secs: i32,
    /// Delay before the first auto-repeat of a held button. Default: 300 ms.
    pub initial_repeat_ms: u64,
    /// Interval between subsequent auto-repeats. Default: 100 ms.
    pub repeat_ms: u64,
    /// Repeats per acceleration level. Default: 10.
    pub presses_per_level: u32,
    /// Release edges swallowed after a combo gesture. Default: 2.
    pub combo_release_swallow: u8,
    /// Interfaces listed on the device view. Default: `eth0`, `wlan0`.
    pub network_interfaces: [&'static str; 2],
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            listen_port: 9001,
            keepalive_secs: 5,
            initial_repeat_ms: 300,
            repeat_ms: 100,
            presses_per_level: 10,
            combo_release_swallow: 2,
            network_interfaces: ["eth0", "wlan0"],
        }
    }
}

impl ControllerConfig {
    /// Coalescing delay for protocol-driven redraws.
    pub fn redraw_delay(&self) -> Duration {
        Duration::from_millis(self.display.frame_period_ms())
    }

    /// Auto-repeat delay after the `count`-th press of a held button.
    pub fn repeat_delay(&self, count: u32) -> Duration {
        if count > 1 {
            Duration::from_millis(self.repeat_ms)
        } else {
            Duration::from_millis(self.initial_repeat_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = ControllerConfig::default();
        assert_eq!(c.listen_port, 9001);
        assert_eq!(c.keepalive_secs, 5);
        assert_eq!(c.initial_repeat_ms, 300);
        assert_eq!(c.repeat_ms, 100);
        assert_eq!(c.presses_per_level, 10);
        assert_eq!(c.combo_release_swallow, 2);
    }

    #[test]
    fn redraw_delay_follows_frame_rate() {
        let c = ControllerConfig::default();
        assert_eq!(c.redraw_delay(), Duration::from_millis(100));
    }

    #[test]
    fn first_repeat_waits_longer() {
        let c = ControllerConfig::default();
        assert_eq!(c.repeat_delay(1), Duration::from_millis(300));
        assert_eq!(c.repeat_delay(2), Duration::from_millis(100));
        assert_eq!(c.repeat_delay(40), Duration::from_millis(100));
    }
}
