#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use tm1637::{OpenDrain, TM1637};

/// Two-wire bus with a TM1637-like responder that decodes what the driver
/// puts on the lines.
#[derive(Default)]
pub struct SimBus {
    clk_low: bool,
    dio_low: bool,
    responder_low: bool,
    /// Responder pulls the data line low on the ninth clock.
    pub acknowledge: bool,
    in_frame: bool,
    bit_index: u8,
    shift: u8,
    current: Vec<u8>,
    current_acks: Vec<bool>,
    /// Completed start..stop transactions.
    pub frames: Vec<Vec<u8>>,
    /// Ack level seen on the ninth clock of each byte, per frame.
    pub acks: Vec<Vec<bool>>,
    pub starts: usize,
    pub stops: usize,
    pub edges: usize,
}

impl SimBus {
    fn clk_high(&self) -> bool {
        !self.clk_low
    }

    fn dio_high(&self) -> bool {
        !(self.dio_low || self.responder_low)
    }

    fn set_clk(&mut self, low: bool) {
        if low == self.clk_low {
            return;
        }
        self.edges += 1;
        self.clk_low = low;

        if low {
            if self.bit_index == 8 {
                self.responder_low = self.acknowledge;
            } else if self.bit_index == 0 {
                self.responder_low = false;
            }
        } else if self.in_frame {
            if self.bit_index < 8 {
                if self.dio_high() {
                    self.shift |= 1 << self.bit_index;
                }
                self.bit_index += 1;
            } else {
                self.current.push(self.shift);
                self.current_acks.push(!self.dio_high());
                self.shift = 0;
                self.bit_index = 0;
            }
        }
    }

    fn set_dio(&mut self, low: bool) {
        let before = self.dio_high();
        self.dio_low = low;
        let after = self.dio_high();

        if self.clk_high() && before != after {
            if after {
                self.stops += 1;
                if self.in_frame {
                    self.frames.push(std::mem::take(&mut self.current));
                    self.acks.push(std::mem::take(&mut self.current_acks));
                }
                self.in_frame = false;
            } else {
                self.starts += 1;
                self.in_frame = true;
                self.current.clear();
                self.current_acks.clear();
            }
            self.bit_index = 0;
            self.shift = 0;
        }
    }
}

#[derive(Clone, Copy)]
pub enum Line {
    Clk,
    Dio,
}

pub struct SimPin {
    bus: Rc<RefCell<SimBus>>,
    line: Line,
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.bus.borrow_mut();
        match self.line {
            Line::Clk => bus.set_clk(true),
            Line::Dio => bus.set_dio(true),
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.bus.borrow_mut();
        match self.line {
            Line::Clk => bus.set_clk(false),
            Line::Dio => bus.set_dio(false),
        }
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let bus = self.bus.borrow();
        Ok(match self.line {
            Line::Clk => bus.clk_high(),
            Line::Dio => bus.dio_high(),
        })
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

pub fn sim_pin(bus: &Rc<RefCell<SimBus>>, line: Line) -> SimPin {
    SimPin {
        bus: bus.clone(),
        line,
    }
}

pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub type SimDisplay = TM1637<OpenDrain<SimPin>, OpenDrain<SimPin>, NoDelay>;

pub fn sim_pins(acknowledge: bool) -> (Rc<RefCell<SimBus>>, OpenDrain<SimPin>, OpenDrain<SimPin>) {
    let bus = Rc::new(RefCell::new(SimBus {
        acknowledge,
        ..Default::default()
    }));
    let clk = OpenDrain::new(sim_pin(&bus, Line::Clk)).unwrap();
    let dio = OpenDrain::new(sim_pin(&bus, Line::Dio)).unwrap();
    (bus, clk, dio)
}

pub fn sim_display(acknowledge: bool) -> (Rc<RefCell<SimBus>>, SimDisplay) {
    let (bus, clk, dio) = sim_pins(acknowledge);
    let display = TM1637::new(clk, dio, NoDelay).unwrap();
    (bus, display)
}

/// Segment bytes of the address transaction of the `n`th display update.
pub fn segments_of(bus: &SimBus, n: usize) -> Vec<u8> {
    bus.frames[n * 3 + 1][1..].to_vec()
}
