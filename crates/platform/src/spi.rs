//! [`PanelTransport`] over a 4-wire SPI bus
//!
//! DC low selects the command byte, DC high selects parameter and pixel
//! bytes. Pixel data is always preceded by a RAMWR (0x2C) command so the
//! controller writes into the most recently selected address window.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::display::{PanelTransport, TransportError};

/// Memory write opcode shared by every supported controller.
pub const RAMWR: u8 = 0x2C;

/// Largest single SPI write issued by [`SpiTransport::send_pixels`].
///
/// Matches the DMA transfer ceiling of the ESP32 SPI peripheral.
pub const MAX_CHUNK: usize = 32 * 1024;

/// 4-wire SPI panel transport.
pub struct SpiTransport<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiTransport<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Wrap an SPI device and its data/command select pin.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Release the bus and pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    /// Assert DC low (command mode) and send one opcode byte.
    fn send_command(&mut self, cmd: u8) -> Result<(), TransportError> {
        self.dc.set_low().map_err(|_| TransportError::Gpio)?;
        self.spi
            .write(&[cmd])
            .map_err(|_| TransportError::Communication)
    }

    /// Assert DC high (data mode) and send bytes in `MAX_CHUNK` pieces.
    fn send_data(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| TransportError::Gpio)?;
        for chunk in data.chunks(MAX_CHUNK) {
            self.spi
                .write(chunk)
                .map_err(|_| TransportError::Communication)?;
        }
        Ok(())
    }
}

impl<SPI, DC> PanelTransport for SpiTransport<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn send_params(&mut self, cmd: u8, params: &[u8]) -> Result<(), TransportError> {
        self.send_command(cmd)?;
        self.send_data(params)
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        self.send_command(RAMWR)?;
        self.send_data(pixels)
    }
}
