//! GPIO capability needed by the two-wire bus.
//!
//! The TM1637 lines are open-drain: a line is either actively pulled low or
//! released and pulled high by the module's resistors. [`BusPin`] models that
//! as a direction toggle, and [`OpenDrain`] provides it for any embedded-hal
//! pin that can both drive and read the line.

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Line released, reads the bus level.
    Input,
    /// Line driven to the latched output level.
    Output,
}

pub trait BusPin: ErrorType {
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error>;

    /// Latches the level driven while the pin is in [`PinMode::Output`].
    fn write_bit(&mut self, high: bool) -> Result<(), Self::Error>;

    fn read_bit(&mut self) -> Result<bool, Self::Error>;
}

/// Adapts an open-drain embedded-hal pin to [`BusPin`].
///
/// Releasing the line is done by setting the pin high, so the pin must be
/// configured as open-drain (or the module must tolerate the push-pull high).
pub struct OpenDrain<P> {
    pin: P,
    latch: bool,
    mode: PinMode,
}

impl<P> OpenDrain<P>
where
    P: OutputPin + InputPin,
{
    /// Wraps `pin` and releases the line.
    pub fn new(pin: P) -> Result<Self, P::Error> {
        let mut open_drain = Self {
            pin,
            latch: false,
            mode: PinMode::Input,
        };
        open_drain.apply()?;
        Ok(open_drain)
    }

    pub fn destroy(self) -> P {
        self.pin
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    fn apply(&mut self) -> Result<(), P::Error> {
        match self.mode {
            PinMode::Output if !self.latch => self.pin.set_low(),
            _ => self.pin.set_high(),
        }
    }
}

impl<P> ErrorType for OpenDrain<P>
where
    P: ErrorType,
{
    type Error = P::Error;
}

impl<P> BusPin for OpenDrain<P>
where
    P: OutputPin + InputPin,
{
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        self.mode = mode;
        self.apply()
    }

    fn write_bit(&mut self, high: bool) -> Result<(), Self::Error> {
        self.latch = high;
        if self.mode == PinMode::Output {
            self.apply()?;
        }
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}
