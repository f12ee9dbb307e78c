use crate::cpu::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    pub(super) fn exec_mov(&mut self, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7f).contains(&opcode) && opcode != 0x76);
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(src);
        self.write_reg8(dst, value);

        if dst == 6 || src == 6 {
            7
        } else {
            5
        }
    }

    pub(super) fn exec_mvi(&mut self, opcode: u8) -> u32 {
        let dst = (opcode >> 3) & 0x07;
        let value = self.fetch8();
        self.write_reg8(dst, value);
        if dst == 6 {
            10
        } else {
            7
        }
    }

    pub(super) fn exec_lxi(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch16();
        self.regs.set_rp(opcode >> 4, value);
        10
    }

    pub(super) fn exec_stax(&mut self, opcode: u8) -> u32 {
        let addr = if opcode == 0x02 {
            self.regs.bc()
        } else {
            self.regs.de()
        };
        self.write_byte(addr, self.regs.a);
        7
    }

    pub(super) fn exec_ldax(&mut self, opcode: u8) -> u32 {
        let addr = if opcode == 0x0a {
            self.regs.bc()
        } else {
            self.regs.de()
        };
        self.regs.a = self.read_byte(addr);
        7
    }

    pub(super) fn exec_sta(&mut self) -> u32 {
        let addr = self.fetch16();
        self.write_byte(addr, self.regs.a);
        13
    }

    pub(super) fn exec_lda(&mut self) -> u32 {
        let addr = self.fetch16();
        self.regs.a = self.read_byte(addr);
        13
    }

    /// SHLD: L to addr, H to addr+1.
    pub(super) fn exec_shld(&mut self) -> u32 {
        let addr = self.fetch16();
        self.write_word(addr, self.regs.hl());
        16
    }

    pub(super) fn exec_lhld(&mut self) -> u32 {
        let addr = self.fetch16();
        let value = self.read_word(addr);
        self.regs.set_hl(value);
        16
    }

    pub(super) fn exec_xchg(&mut self) -> u32 {
        core::mem::swap(&mut self.regs.d, &mut self.regs.h);
        core::mem::swap(&mut self.regs.e, &mut self.regs.l);
        4
    }
}
