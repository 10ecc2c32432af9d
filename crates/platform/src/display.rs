//! Panel transport abstraction

/// Transport capability for MIPI-DCS style panel controllers.
///
/// Both calls are synchronous and must preserve ordering: a window selected
/// with two `send_params` calls applies to the `send_pixels` that follows.
pub trait PanelTransport {
    /// Send a command opcode followed by its parameter bytes (may be empty).
    fn send_params(&mut self, cmd: u8, params: &[u8]) -> Result<(), TransportError>;

    /// Stream pixel bytes into the currently selected address window.
    ///
    /// The transport is responsible for issuing the memory-write opcode
    /// its bus framing requires.
    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError>;
}

impl<T: PanelTransport + ?Sized> PanelTransport for &mut T {
    fn send_params(&mut self, cmd: u8, params: &[u8]) -> Result<(), TransportError> {
        (**self).send_params(cmd, params)
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        (**self).send_pixels(pixels)
    }
}

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus write failed
    Communication,
    /// Data/command select pin could not be driven
    Gpio,
    /// Transport is not ready (not initialised or already released)
    NotReady,
}

impl core::error::Error for TransportError {}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Panel bus communication error"),
            Self::Gpio => write!(f, "Panel DC pin error"),
            Self::NotReady => write!(f, "Panel transport not ready"),
        }
    }
}
