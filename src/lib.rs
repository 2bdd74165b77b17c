//! Driver for TM1637 based 4-digit 7-segment LED modules.
//!
//! The TM1637 talks a two-wire, I2C-like protocol that is not real I2C (no
//! device address, LSB-first bytes), so it is bit-banged over two open-drain
//! GPIO lines. Every display update is three separate transactions: the data
//! command, the start address followed by the segment bytes, and the display
//! control byte carrying brightness and on/off.

#![no_std]

mod bus;
mod constants;
mod encode;
pub mod elevator;
mod pin;

pub use bus::{Bus, BusyWait};
pub use constants::*;
pub use encode::{encode_digit, encode_number, write_dots, NumberFormat};
pub use pin::{BusPin, OpenDrain, PinMode};

use embedded_hal::delay::DelayNs;
use num_traits::ToPrimitive;

pub struct TM1637<CLK, DIO, D> {
    bus: Bus<CLK, DIO, D>,
    brightness: u8,
    format: NumberFormat,
}

impl<CLK, DIO, D, E> TM1637<CLK, DIO, D>
where
    CLK: BusPin<Error = E>,
    DIO: BusPin<Error = E>,
    D: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Result<Self, Tm1637Error<E>> {
        Self::with_bit_delay(clk, dio, delay, DEFAULT_BIT_DELAY_US)
    }

    pub fn with_bit_delay(
        clk: CLK,
        dio: DIO,
        delay: D,
        bit_delay_us: u32,
    ) -> Result<Self, Tm1637Error<E>> {
        Ok(Self {
            bus: Bus::new(clk, dio, delay, bit_delay_us)?,
            brightness: MAX_BRIGHTNESS | DISPLAY_ON,
            format: NumberFormat::default(),
        })
    }

    pub fn destroy(self) -> (CLK, DIO, D) {
        self.bus.release()
    }

    /// Sets brightness 0 (dimmest) to 7 and whether the display is lit.
    ///
    /// Only the low 3 bits of `level` are used. Takes effect with the next
    /// write, since brightness is sent as the last transaction of every update.
    pub fn set_brightness(&mut self, level: u8, on: bool) {
        self.brightness = (level & MAX_BRIGHTNESS) | if on { DISPLAY_ON } else { 0 };
    }

    /// Packed display control bits: brightness in bits 0-2, on in bit 3.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn set_format(&mut self, format: NumberFormat) {
        self.format = format;
    }

    pub fn set_length(&mut self, length: u8) {
        self.format.length = length;
    }

    pub fn set_leading_zero(&mut self, leading_zero: bool) {
        self.format.leading_zero = leading_zero;
    }

    pub fn set_dots(&mut self, dots: u8) {
        self.format.dots = dots;
    }

    /// Lights or hides the colon of clock-style modules.
    pub fn set_double_dots(&mut self, on: bool) {
        self.format.dots = if on { dots::COLON } else { dots::NONE };
    }

    /// Writes raw segment bytes starting at digit `position` (0 is leftmost).
    ///
    /// Digits outside `position..position + segments.len()` keep their content.
    pub fn set_segments(
        &mut self,
        segments: &[u8],
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("TM1637 write {=[u8]:x} at {=u8}", segments, position);

        let data_command = self.bus.write_frame(&[command::DATA_WRITE])?;

        self.bus.start()?;
        let mut address_and_segments = self
            .bus
            .write_byte(command::ADDRESS | (position & command::ADDRESS_MASK))?;
        for &segment in segments {
            address_and_segments &= self.bus.write_byte(segment)?;
        }
        self.bus.stop()?;

        let display_control = self.bus.write_frame(&[
            command::DISPLAY_CONTROL | (self.brightness & command::CONTROL_MASK),
        ])?;

        Ok(FrameAck {
            data_command,
            address_and_segments,
            display_control,
        })
    }

    pub fn clear(&mut self) -> Result<FrameAck, Tm1637Error<E>> {
        self.set_segments(&[0; MAX_DIGITS as usize], 0)
    }

    /// Lights every segment and dot, for checking the module.
    pub fn light_segments(&mut self) -> Result<FrameAck, Tm1637Error<E>> {
        self.set_segments(&[0xFF; MAX_DIGITS as usize], 0)
    }

    /// Shows a decimal number with the stored length and leading-zero
    /// settings and no dots. Negative numbers get a minus sign when leading
    /// zeros are hidden.
    pub fn show_number_dec<T>(
        &mut self,
        number: T,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        T: ToPrimitive,
    {
        let format = self.format.with_dots(dots::NONE);
        self.show_number_dec_with(number, &format, position)
    }

    /// Like [`show_number_dec`](Self::show_number_dec) but with the stored dots.
    pub fn show_number_dec_ex<T>(
        &mut self,
        number: T,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        T: ToPrimitive,
    {
        let format = self.format;
        self.show_number_dec_with(number, &format, position)
    }

    pub fn show_number_dec_with<T>(
        &mut self,
        number: T,
        format: &NumberFormat,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        T: ToPrimitive,
    {
        let num = number.to_i64().ok_or(Tm1637Error::<E>::InvalidValue)?;
        self.show_number_base(10, num.unsigned_abs(), num < 0, format, position)
    }

    /// Shows a hexadecimal number with the stored settings. Hex numbers are
    /// never signed, negative values are rejected.
    pub fn show_number_hex_ex<T>(
        &mut self,
        number: T,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        T: ToPrimitive,
    {
        let format = self.format;
        self.show_number_hex_with(number, &format, position)
    }

    pub fn show_number_hex_with<T>(
        &mut self,
        number: T,
        format: &NumberFormat,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        T: ToPrimitive,
    {
        let num = number.to_u64().ok_or(Tm1637Error::<E>::InvalidValue)?;
        self.show_number_base(16, num, false, format, position)
    }

    /// Shows `magnitude` in any base up to 16, see [`encode_number`].
    pub fn show_number_base(
        &mut self,
        base: u8,
        magnitude: u64,
        negative: bool,
        format: &NumberFormat,
        position: u8,
    ) -> Result<FrameAck, Tm1637Error<E>> {
        let (digits, len) = encode_number(base, magnitude, negative, format);
        self.set_segments(&digits[..len], position)
    }
}

/// Acknowledgement outcome of the three transactions of one display update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameAck {
    pub data_command: bool,
    /// False if the address or any segment byte was not acknowledged.
    pub address_and_segments: bool,
    pub display_control: bool,
}

impl FrameAck {
    pub fn all(&self) -> bool {
        self.data_command && self.address_and_segments && self.display_control
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tm1637Error<E> {
    PinError(E),
    InvalidValue,
}

impl<E> From<E> for Tm1637Error<E> {
    fn from(error: E) -> Self {
        Tm1637Error::PinError(error)
    }
}
