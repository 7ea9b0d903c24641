//! Panel errors.

use core::fmt;

use display_interface::DisplayError;

/// Why a [`Surface`](crate::Surface) call on the panel failed.
///
/// Bus faults reach us already wrapped by `ssd1306` as [`DisplayError`].
#[derive(Debug)]
pub enum OledError {
    /// I2C write or data format rejected by the panel interface.
    Bus(DisplayError),
    /// The power-on command sequence was not acknowledged.
    NoResponse,
    /// Frame operation before [`OledDriver::init()`](crate::OledDriver::init).
    NotReady,
}

impl OledError {
    /// Whether retrying after [`OledDriver::init()`](crate::OledDriver::init)
    /// can help.
    pub fn needs_init(&self) -> bool {
        matches!(self, OledError::NoResponse | OledError::NotReady)
    }
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Bus(e)
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Bus(e) => write!(f, "panel bus fault: {:?}", e),
            OledError::NoResponse => f.write_str("panel did not answer init"),
            OledError::NotReady => f.write_str("panel used before init"),
        }
    }
}

impl core::error::Error for OledError {}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Bus(_) => defmt::write!(f, "panel bus fault"),
            OledError::NoResponse => defmt::write!(f, "panel did not answer init"),
            OledError::NotReady => defmt::write!(f, "panel used before init"),
        }
    }
}
