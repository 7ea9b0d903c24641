//! The drawing contract between the UI and a physical or virtual screen.

/// Axis-aligned rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Left-anchored sub-rectangle covering `percent` of the width
    /// (clamped to 0–100).
    pub fn fraction(&self, percent: f32) -> Rect {
        let pct = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        Rect {
            w: (self.w as f32 * pct / 100.0) as u32,
            ..*self
        }
    }
}

/// Horizontal placement of text inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Font selector. `Condensed` fits longer labels on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[default]
    Regular,
    Condensed,
}

/// Monochrome drawing primitives used to paint one full frame.
///
/// `filled == true` paints lit pixels, `false` paints dark pixels. A frame
/// is always `clear()`, a series of draws, then `present()`.
#[allow(async_fn_in_trait)]
pub trait Surface {
    type Error;

    /// Blank the frame buffer.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Fill `rect` lit or dark.
    fn draw_rect(&mut self, rect: Rect, filled: bool) -> Result<(), Self::Error>;

    /// Draw `text` inside `rect`, vertically centred.
    fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        filled: bool,
        alignment: Alignment,
        font: Font,
    ) -> Result<(), Self::Error>;

    /// Horizontal bar: `rect` in the background shade, then the leftmost
    /// `percent` of it in the foreground shade.
    fn draw_bar(
        &mut self,
        percent: f32,
        rect: Rect,
        foreground: bool,
        background: bool,
    ) -> Result<(), Self::Error> {
        self.draw_rect(rect, background)?;
        let bar = rect.fraction(percent);
        if bar.w > 0 {
            self.draw_rect(bar, foreground)?;
        }
        Ok(())
    }

    /// Push the frame buffer to the screen.
    async fn present(&mut self) -> Result<(), Self::Error>;
}
