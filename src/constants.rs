pub const MAX_DIGITS: u8 = 4;
pub const MAX_BRIGHTNESS: u8 = 7; // 3 bits
pub const DISPLAY_ON: u8 = 0x08;
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

pub const SEG_A: u8 = 0b0000_0001;
pub const SEG_B: u8 = 0b0000_0010;
pub const SEG_C: u8 = 0b0000_0100;
pub const SEG_D: u8 = 0b0000_1000;
pub const SEG_E: u8 = 0b0001_0000;
pub const SEG_F: u8 = 0b0010_0000;
pub const SEG_G: u8 = 0b0100_0000;
pub const SEG_DP: u8 = 0b1000_0000; // dot or colon

//
//      A
//     ---
//  F |   | B
//     -G-
//  E |   | C
//     ---
//      D
pub const DIGITS: [u8; 16] = [
    // XGFEDCBA
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0111_0111, // A
    0b0111_1100, // b
    0b0011_1001, // C
    0b0101_1110, // d
    0b0111_1001, // E
    0b0111_0001, // F
];
pub const MINUS: u8 = SEG_G;

/// Dot masks, one bit per digit position starting at bit 7 for the leftmost digit.
pub mod dots {
    pub const NONE: u8 = 0b0000_0000;
    pub const FIRST: u8 = 0b1000_0000; // 0.000
    pub const SECOND: u8 = 0b0100_0000; // 00.00
    pub const THIRD: u8 = 0b0010_0000; // 000.0
    pub const ALL: u8 = 0b1110_0000; // 0.0.0.0
    pub const COLON: u8 = SECOND; // 00:00 on clock modules
}

pub mod command {
    pub const DATA_WRITE: u8 = 0x40; // write to display registers, auto-increment address
    pub const ADDRESS: u8 = 0xC0; // bits 0-1: start position
    pub const DISPLAY_CONTROL: u8 = 0x80; // bits 0-2: brightness, bit 3: display on

    pub const ADDRESS_MASK: u8 = 0x03;
    pub const CONTROL_MASK: u8 = 0x0F;
}
