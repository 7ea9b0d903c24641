//! [`Surface`] rendering with `embedded-graphics`.
//!
//! The free functions draw onto any `BinaryColor` [`DrawTarget`]; both
//! [`FrameSurface`] and [`OledDriver`](crate::OledDriver) use them.

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_4X6, FONT_5X8},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder},
};

use crate::surface::{Alignment, Font, Rect, Surface};

fn shade(filled: bool) -> BinaryColor {
    if filled {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Regular => &FONT_5X8,
        Font::Condensed => &FONT_4X6,
    }
}

pub(crate) fn clear<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)
}

pub(crate) fn fill_rect<D>(target: &mut D, rect: Rect, filled: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(rect.x, rect.y), Size::new(rect.w, rect.h))
        .into_styled(PrimitiveStyle::with_fill(shade(filled)))
        .draw(target)
}

pub(crate) fn text<D>(
    target: &mut D,
    text: &str,
    rect: Rect,
    filled: bool,
    alignment: Alignment,
    font: Font,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if text.is_empty() {
        return Ok(());
    }
    let (x, align) = match alignment {
        Alignment::Left => (rect.x, TextAlignment::Left),
        Alignment::Center => (rect.x + rect.w as i32 / 2, TextAlignment::Center),
        Alignment::Right => (rect.x + rect.w as i32 - 1, TextAlignment::Right),
    };
    let y = rect.y + (rect.h as i32 - 1) / 2;
    let character_style = MonoTextStyle::new(mono_font(font), shade(filled));
    let text_style = TextStyleBuilder::new()
        .alignment(align)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, Point::new(x, y), character_style, text_style).draw(target)?;
    Ok(())
}

/// A [`Surface`] over any in-memory `BinaryColor` draw target.
///
/// `present()` only counts frames; use it for simulators, screenshots and
/// tests. Hardware goes through [`OledDriver`](crate::OledDriver).
pub struct FrameSurface<D> {
    target: D,
    frames: u32,
}

impl<D> FrameSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: D) -> Self {
        Self { target, frames: 0 }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Surface for FrameSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        clear(&mut self.target)
    }

    fn draw_rect(&mut self, rect: Rect, filled: bool) -> Result<(), Self::Error> {
        fill_rect(&mut self.target, rect, filled)
    }

    fn draw_text(
        &mut self,
        text_str: &str,
        rect: Rect,
        filled: bool,
        alignment: Alignment,
        font: Font,
    ) -> Result<(), Self::Error> {
        text(&mut self.target, text_str, rect, filled, alignment, font)
    }

    async fn present(&mut self) -> Result<(), Self::Error> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn surface() -> FrameSurface<MockDisplay<BinaryColor>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        FrameSurface::new(display)
    }

    fn lit_pixels(s: &FrameSurface<MockDisplay<BinaryColor>>, rect: Rect) -> usize {
        let mut count = 0;
        for y in rect.y..rect.y + rect.h as i32 {
            for x in rect.x..rect.x + rect.w as i32 {
                if s.target().get_pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn filled_rect_lights_every_pixel() {
        let mut s = surface();
        let r = Rect::new(2, 8, 10, 8);
        s.draw_rect(r, true).unwrap();
        assert_eq!(lit_pixels(&s, r), 80);
    }

    #[test]
    fn bar_fills_leading_fraction() {
        let mut s = surface();
        let r = Rect::new(0, 0, 40, 4);
        s.draw_bar(25.0, r, true, false).unwrap();
        assert_eq!(lit_pixels(&s, Rect::new(0, 0, 10, 4)), 40);
        assert_eq!(lit_pixels(&s, Rect::new(10, 0, 30, 4)), 0);
    }

    #[test]
    fn text_lands_inside_its_row() {
        let mut s = surface();
        let r = Rect::new(0, 8, 60, 8);
        s.draw_text("Hi", r, true, Alignment::Left, Font::Regular).unwrap();
        assert!(lit_pixels(&s, r) > 0);
        assert_eq!(lit_pixels(&s, Rect::new(0, 32, 60, 8)), 0);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut s = surface();
        let r = Rect::new(0, 0, 60, 8);
        s.draw_text("", r, true, Alignment::Center, Font::Condensed).unwrap();
        assert_eq!(lit_pixels(&s, r), 0);
    }

    #[test]
    fn present_counts_frames() {
        let mut s = surface();
        embassy_futures::block_on(s.present()).unwrap();
        embassy_futures::block_on(s.present()).unwrap();
        assert_eq!(s.frames(), 2);
    }
}
