/// Register file for the Intel 8080.
///
/// The seven 8-bit registers are stored individually; the B/C, D/E and H/L
/// pairs are composed on demand with the high register in the upper byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Combine two 8-bit registers into a 16-bit value, `hi` in the upper byte.
    #[inline]
    pub fn pair(hi: u8, lo: u8) -> u16 {
        u16::from_be_bytes([hi, lo])
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        Self::pair(self.b, self.c)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        Self::pair(self.d, self.e)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        Self::pair(self.h, self.l)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Read a register pair by its 2-bit opcode field.
    ///
    /// Encoding: 0=BC, 1=DE, 2=HL, 3=SP.
    #[inline]
    pub(crate) fn rp(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            3 => self.sp,
            _ => unreachable!(),
        }
    }

    /// Write a register pair by its 2-bit opcode field. See [`Registers::rp`].
    #[inline]
    pub(crate) fn set_rp(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.set_bc(value),
            1 => self.set_de(value),
            2 => self.set_hl(value),
            3 => self.sp = value,
            _ => unreachable!(),
        }
    }
}
