//! Elevator floor indicator animation.
//!
//! Shows the current floor on the leftmost digit and "UP" or "dO" on the two
//! rightmost digits, climbing to the top floor and back down forever.

use embedded_hal::delay::DelayNs;

use crate::{
    BusPin, FrameAck, NumberFormat, Tm1637Error, SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F, SEG_G,
    TM1637,
};

pub const UP: [u8; 2] = [
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_F, // U
    SEG_A | SEG_B | SEG_E | SEG_F | SEG_G, // P
];

pub const DOWN: [u8; 2] = [
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,         // d
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F, // O
];

const FLOOR_POSITION: u8 = 0;
const ARROW_POSITION: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn glyphs(&self) -> &'static [u8; 2] {
        match self {
            Direction::Up => &UP,
            Direction::Down => &DOWN,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Elevator {
    floor: u8,
    top_floor: u8,
    direction: Direction,
}

impl Elevator {
    /// `top_floor` is shown as a single digit, so it is capped at 9.
    pub fn new(top_floor: u8) -> Self {
        Self {
            floor: 0,
            top_floor: top_floor.min(9),
            direction: Direction::Up,
        }
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Draws the current floor and direction, then moves one floor. The top
    /// and ground floors are each shown once going up and once going down.
    pub fn step<CLK, DIO, D, E>(
        &mut self,
        display: &mut TM1637<CLK, DIO, D>,
    ) -> Result<FrameAck, Tm1637Error<E>>
    where
        CLK: BusPin<Error = E>,
        DIO: BusPin<Error = E>,
        D: DelayNs,
    {
        let floor = NumberFormat::new(0, false, 1);
        let ack = display.show_number_dec_with(self.floor, &floor, FLOOR_POSITION)?;
        let arrow = display.set_segments(self.direction.glyphs(), ARROW_POSITION)?;

        self.advance();

        Ok(FrameAck {
            data_command: ack.data_command && arrow.data_command,
            address_and_segments: ack.address_and_segments && arrow.address_and_segments,
            display_control: ack.display_control && arrow.display_control,
        })
    }

    fn advance(&mut self) {
        match self.direction {
            Direction::Up if self.floor >= self.top_floor => self.direction = Direction::Down,
            Direction::Up => self.floor += 1,
            Direction::Down if self.floor == 0 => self.direction = Direction::Up,
            Direction::Down => self.floor -= 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(UP, [0b0011_1110, 0b0111_0011]);
        assert_eq!(DOWN, [0b0101_1110, 0b0011_1111]);
    }

    #[test]
    fn test_advance_turns_at_both_ends() {
        let mut elevator = Elevator::new(2);
        let mut seen = [(0u8, Direction::Up); 8];
        for entry in seen.iter_mut() {
            *entry = (elevator.floor(), elevator.direction());
            elevator.advance();
        }
        assert_eq!(
            seen,
            [
                (0, Direction::Up),
                (1, Direction::Up),
                (2, Direction::Up),
                (2, Direction::Down),
                (1, Direction::Down),
                (0, Direction::Down),
                (0, Direction::Up),
                (1, Direction::Up),
            ]
        );
    }

    #[test]
    fn test_top_floor_capped() {
        let mut elevator = Elevator::new(42);
        for _ in 0..9 {
            elevator.advance();
        }
        assert_eq!(elevator.floor(), 9);
        elevator.advance();
        assert_eq!(elevator.direction(), Direction::Down);
    }
}
