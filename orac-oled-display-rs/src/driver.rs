//! The controller's physical panel: an SSD1306 128×64 on async I2C.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;
use crate::graphics;
use crate::surface::{Alignment, Font, Rect, Surface};

/// Default 7-bit address of the panel fitted to the controller.
pub const PANEL_ADDRESS: u8 = 0x3C;

type Panel<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// [`Surface`] backed by the panel's RAM frame buffer.
///
/// `new()` touches no hardware; `init()` powers the panel up. Draw calls
/// only edit the local buffer and `present()` sends the whole buffer.
/// Until `init()` succeeds every surface call fails with
/// [`OledError::NotReady`].
pub struct OledDriver<I2C> {
    panel: Panel<I2C>,
    ready: bool,
}

impl<I2C: I2c> OledDriver<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        Self {
            panel: Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                .into_buffered_graphics_mode(),
            ready: false,
        }
    }

    /// Send the power-on sequence. Safe to call again after a bus fault.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.ready = false;
        if self.panel.init().await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("panel at init did not respond");
            return Err(OledError::NoResponse);
        }
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::info!("panel ready");

        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn panel(&mut self) -> Result<&mut Panel<I2C>, OledError> {
        match self.ready {
            true => Ok(&mut self.panel),
            false => Err(OledError::NotReady),
        }
    }
}

impl<I2C: I2c> Surface for OledDriver<I2C> {
    type Error = OledError;

    fn clear(&mut self) -> Result<(), OledError> {
        self.panel()?.clear_buffer();
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, filled: bool) -> Result<(), OledError> {
        Ok(graphics::fill_rect(self.panel()?, rect, filled)?)
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        filled: bool,
        alignment: Alignment,
        font: Font,
    ) -> Result<(), OledError> {
        Ok(graphics::text(self.panel()?, text, rect, filled, alignment, font)?)
    }

    /// A full 1 KiB frame takes about 20 ms at 400 kHz.
    async fn present(&mut self) -> Result<(), OledError> {
        Ok(self.panel()?.flush().await?)
    }
}
