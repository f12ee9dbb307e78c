/// IO port interface for the 8080 `IN` and `OUT` instructions.
///
/// The CPU owns its memory, so the host only sees port traffic through this
/// trait. Port numbers are not interpreted by the core; the host maps them to
/// devices (shift registers, sound latches, console output, ...).
///
/// Both calls happen in-line while the instruction executes. A blocking
/// implementation blocks the whole CPU, and a panic is not caught.
pub trait IoPorts {
    /// `IN port`: return the byte to place in the accumulator.
    fn read(&mut self, port: u8) -> u8;
    /// `OUT port`: receive the accumulator value.
    fn write(&mut self, port: u8, value: u8);
}

/// Ports for a CPU with nothing attached.
///
/// Reads float to 0 and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPorts;

impl IoPorts for NullPorts {
    fn read(&mut self, port: u8) -> u8 {
        log::trace!("IN {port:#04x} on unconnected port");
        0
    }

    fn write(&mut self, port: u8, value: u8) {
        log::trace!("OUT {port:#04x} <- {value:#04x} on unconnected port");
    }
}

/// Adapter that turns an input callback and an output callback into
/// [`IoPorts`].
///
/// ```
/// use retroboy_i8080::Cpu;
///
/// let mut cpu = Cpu::with_io(|port| port.wrapping_mul(2), |_port, _value| {});
/// cpu.load_bytes(&[0xdb, 0x21], 0); // IN $21
/// cpu.step();
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct FnPorts<I, O> {
    byte_in: I,
    byte_out: O,
}

impl<I, O> FnPorts<I, O>
where
    I: FnMut(u8) -> u8,
    O: FnMut(u8, u8),
{
    pub fn new(byte_in: I, byte_out: O) -> Self {
        Self { byte_in, byte_out }
    }
}

impl<I, O> IoPorts for FnPorts<I, O>
where
    I: FnMut(u8) -> u8,
    O: FnMut(u8, u8),
{
    fn read(&mut self, port: u8) -> u8 {
        (self.byte_in)(port)
    }

    fn write(&mut self, port: u8, value: u8) {
        (self.byte_out)(port, value)
    }
}

impl<T: IoPorts + ?Sized> IoPorts for &mut T {
    fn read(&mut self, port: u8) -> u8 {
        (**self).read(port)
    }

    fn write(&mut self, port: u8, value: u8) {
        (**self).write(port, value)
    }
}

impl<T: IoPorts + ?Sized> IoPorts for Box<T> {
    fn read(&mut self, port: u8) -> u8 {
        (**self).read(port)
    }

    fn write(&mut self, port: u8, value: u8) {
        (**self).write(port, value)
    }
}
