//! Bit-banged TM1637 two-wire bus.
//!
//! Both lines idle released (high). Bytes go out least-significant bit first
//! and data only changes while the clock is held low, except for the start
//! and stop conditions. There is no clock stretching: the bit delay must be
//! long enough for the chip on its own.

use embedded_hal::delay::DelayNs;

use crate::pin::{BusPin, PinMode};

pub struct Bus<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    bit_delay_us: u32,
}

impl<CLK, DIO, D, E> Bus<CLK, DIO, D>
where
    CLK: BusPin<Error = E>,
    DIO: BusPin<Error = E>,
    D: DelayNs,
{
    /// Releases both lines and latches a low output level on each, so that
    /// switching a pin to output always pulls its line low.
    pub fn new(mut clk: CLK, mut dio: DIO, delay: D, bit_delay_us: u32) -> Result<Self, E> {
        clk.set_mode(PinMode::Input)?;
        dio.set_mode(PinMode::Input)?;
        clk.write_bit(false)?;
        dio.write_bit(false)?;

        Ok(Self {
            clk,
            dio,
            delay,
            bit_delay_us,
        })
    }

    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    pub fn bit_delay_us(&self) -> u32 {
        self.bit_delay_us
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    /// Data falls while the clock is high.
    pub fn start(&mut self) -> Result<(), E> {
        self.dio.set_mode(PinMode::Output)?;
        self.bit_delay();
        Ok(())
    }

    /// Data rises while the clock is high.
    pub fn stop(&mut self) -> Result<(), E> {
        self.dio.set_mode(PinMode::Output)?;
        self.bit_delay();
        self.clk.set_mode(PinMode::Input)?;
        self.bit_delay();
        self.dio.set_mode(PinMode::Input)?;
        self.bit_delay();
        Ok(())
    }

    /// Shifts out one byte and samples the ninth-clock acknowledgement.
    ///
    /// Returns `true` when the chip pulled the data line low. A missing ack
    /// is reported, never retried.
    pub fn write_byte(&mut self, byte: u8) -> Result<bool, E> {
        let mut data = byte;

        for _ in 0..8 {
            self.clk.set_mode(PinMode::Output)?;
            self.bit_delay();

            if data & 0x01 != 0 {
                self.dio.set_mode(PinMode::Input)?;
            } else {
                self.dio.set_mode(PinMode::Output)?;
            }
            self.bit_delay();

            self.clk.set_mode(PinMode::Input)?;
            self.bit_delay();
            data >>= 1;
        }

        self.clk.set_mode(PinMode::Output)?;
        self.dio.set_mode(PinMode::Input)?;
        self.bit_delay();

        self.clk.set_mode(PinMode::Input)?;
        self.bit_delay();
        let ack = !self.dio.read_bit()?;
        if ack {
            // hold the line low so releasing the chip's ack is not a stop
            self.dio.set_mode(PinMode::Output)?;
        }

        self.bit_delay();
        self.clk.set_mode(PinMode::Output)?;
        self.bit_delay();

        #[cfg(feature = "defmt")]
        if !ack {
            defmt::warn!("TM1637 did not acknowledge {=u8:#x}", byte);
        }

        Ok(ack)
    }

    /// One complete transaction: start, every byte, stop.
    ///
    /// All bytes are sent even if one is not acknowledged. Returns whether
    /// every byte was acknowledged.
    pub fn write_frame(&mut self, bytes: &[u8]) -> Result<bool, E> {
        self.start()?;
        let mut acked = true;
        for &byte in bytes {
            acked &= self.write_byte(byte)?;
        }
        self.stop()?;
        Ok(acked)
    }
}

/// Spin-loop delay for boards without a timer-backed [`DelayNs`].
///
/// `loops_per_us` must be calibrated for the core clock; the loop body is a
/// single spin hint so the count is roughly one iteration per few cycles.
#[derive(Clone, Copy, Debug)]
pub struct BusyWait {
    loops_per_us: u32,
}

impl BusyWait {
    pub const fn new(loops_per_us: u32) -> Self {
        Self { loops_per_us }
    }
}

impl Default for BusyWait {
    fn default() -> Self {
        // ~48 MHz Cortex-M0+
        Self::new(12)
    }
}

impl DelayNs for BusyWait {
    fn delay_ns(&mut self, ns: u32) {
        let loops = (ns as u64 * self.loops_per_us as u64).div_ceil(1000);
        for _ in 0..loops {
            core::hint::spin_loop();
        }
    }
}
