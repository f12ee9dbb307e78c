use super::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    #[inline]
    pub(super) fn fetch8(&mut self) -> u8 {
        let value = self.read_byte(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8();
        let hi = self.fetch8();
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }

    /// Read an 8-bit register or M by its 3-bit opcode field.
    ///
    /// Encoding: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M (memory at HL), 7=A.
    #[inline]
    pub(super) fn read_reg8(&self, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => self.read_byte(self.regs.hl()),
            7 => self.regs.a,
            _ => unreachable!(),
        }
    }

    /// Write an 8-bit register or M by its 3-bit opcode field. See `read_reg8`.
    #[inline]
    pub(super) fn write_reg8(&mut self, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => self.write_byte(self.regs.hl(), value),
            7 => self.regs.a = value,
            _ => unreachable!(),
        }
    }

    /// Push a word: high byte at SP-1, low byte at SP-2.
    #[inline]
    pub(super) fn push_u16(&mut self, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        self.write_word(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self) -> u16 {
        let value = self.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Evaluate a branch condition by its 3-bit opcode field.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        match cc & 0x07 {
            0 => !self.flags.z,  // NZ
            1 => self.flags.z,   // Z
            2 => !self.flags.cy, // NC
            3 => self.flags.cy,  // C
            4 => !self.flags.p,  // PO
            5 => self.flags.p,   // PE
            6 => !self.flags.s,  // P
            7 => self.flags.s,   // M
            _ => unreachable!(),
        }
    }
}
