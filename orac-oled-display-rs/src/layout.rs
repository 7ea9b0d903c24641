//! Screen geometry: a header row, a fixed number of content rows, and a
//! footer row stacked top to bottom.
//!
//! ```text
//! ┌──────────────────────────────┐  y = 0
//! │ ^      header text         x │  Row::Header
//! ├──────────────────────────────┤  y = row_height
//! │ content row 0                │
//! │ ...                          │  Row::Content(0..row_count)
//! │ content row 5                │
//! ├──────────────────────────────┤
//! │ v      footer text         o │  Row::Footer
//! └──────────────────────────────┘  y = (row_count + 2) * row_height
//! ```

use crate::surface::Rect;

/// A row position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    Header,
    Content(usize),
    Footer,
}

/// Configuration for the display layout and redraw rate.
///
/// All layout geometry lives here; there are **no** module-level layout
/// constants.
///
/// [`DisplayConfig::default()`] is the stock ORAC panel
/// geometry: a 128×64 canvas, 8 px rows, 6 content rows, at most 10 frames
/// per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Upper bound on full-screen redraws per second. Default: 10.
    pub max_fps: u32,
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// Height of every row, header and footer included. Default: 8.
    pub row_height: u32,
    /// Number of content rows between header and footer. Default: 6.
    pub row_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_fps: 10,
            display_width: 128,
            display_height: 64,
            row_height: 8,
            row_count: 6,
        }
    }
}

impl DisplayConfig {
    /// Minimum spacing between two coalesced redraws, in milliseconds.
    ///
    /// Formula: `1000 / max_fps`.
    pub fn frame_period_ms(&self) -> u64 {
        1000 / self.max_fps.max(1) as u64
    }

    /// Full-width rectangle of `row`.
    ///
    /// Content rows past `row_count` are placed where they would fall;
    /// callers only render `0..row_count`.
    pub fn row_rect(&self, row: Row) -> Rect {
        let index = match row {
            Row::Header => 0,
            Row::Content(i) => i as i32 + 1,
            Row::Footer => self.row_count as i32 + 1,
        };
        Rect::new(
            0,
            index * self.row_height as i32,
            self.display_width,
            self.row_height,
        )
    }

    /// The whole canvas.
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.display_width, self.display_height)
    }
}
