#![no_std]
#![no_main]

use arduino_hal::prelude::*;
use panic_halt as _;
use tm1637::{elevator::Elevator, OpenDrain, TM1637};

const TOP_FLOOR: u8 = 5;
const BRIGHTNESS: u8 = 7;

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let clk = OpenDrain::new(pins.d2.into_opendrain_high()).unwrap_infallible();
    let dio = OpenDrain::new(pins.d3.into_opendrain_high()).unwrap_infallible();

    let mut display = TM1637::new(clk, dio, arduino_hal::Delay::new()).unwrap();
    display.set_brightness(BRIGHTNESS, true);

    ufmt::uwriteln!(&mut serial, "Segment test...").unwrap_infallible();
    display.light_segments().unwrap();
    arduino_hal::delay_ms(1000);
    display.clear().unwrap();

    ufmt::uwriteln!(&mut serial, "Elevator...").unwrap_infallible();
    let mut elevator = Elevator::new(TOP_FLOOR);
    loop {
        if !elevator.step(&mut display).unwrap().all() {
            ufmt::uwriteln!(&mut serial, "display did not ack").unwrap_infallible();
        }
        arduino_hal::delay_ms(400);
    }
}
