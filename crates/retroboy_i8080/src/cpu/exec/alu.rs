use crate::cpu::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    /// Dispatch one of the eight accumulator operations by its opcode field.
    fn alu_op(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            7 => self.alu_cmp(value),
            _ => unreachable!(),
        }
    }

    pub(super) fn exec_alu_reg_group(&mut self, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xbf).contains(&opcode));
        let src = opcode & 0x07;
        let value = self.read_reg8(src);
        self.alu_op(opcode >> 3, value);

        if src == 6 {
            7
        } else {
            4
        }
    }

    pub(super) fn exec_alu_imm(&mut self, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xc7 == 0xc6);
        let value = self.fetch8();
        self.alu_op(opcode >> 3, value);
        7
    }

    pub(super) fn exec_inr(&mut self, opcode: u8) -> u32 {
        let r = (opcode >> 3) & 0x07;
        let value = self.read_reg8(r);
        let result = self.alu_inr(value);
        self.write_reg8(r, result);
        if r == 6 {
            10
        } else {
            5
        }
    }

    pub(super) fn exec_dcr(&mut self, opcode: u8) -> u32 {
        let r = (opcode >> 3) & 0x07;
        let value = self.read_reg8(r);
        let result = self.alu_dcr(value);
        self.write_reg8(r, result);
        if r == 6 {
            10
        } else {
            5
        }
    }

    pub(super) fn exec_inx(&mut self, opcode: u8) -> u32 {
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_add(1);
        self.regs.set_rp(rp, value);
        5
    }

    pub(super) fn exec_dcx(&mut self, opcode: u8) -> u32 {
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_sub(1);
        self.regs.set_rp(rp, value);
        5
    }

    pub(super) fn exec_dad(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.regs.rp(opcode >> 4);
        self.alu_dad(value);
        10
    }

    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0f | 0x17 | 0x1f));
        let a = self.regs.a;

        match opcode {
            // RLC: bit 7 to CY and bit 0.
            0x07 => {
                self.regs.a = a.rotate_left(1);
                self.flags.cy = a & 0x80 != 0;
            }
            // RRC: bit 0 to CY and bit 7.
            0x0f => {
                self.regs.a = a.rotate_right(1);
                self.flags.cy = a & 0x01 != 0;
            }
            // RAL: rotate left through CY.
            0x17 => {
                self.regs.a = (a << 1) | u8::from(self.flags.cy);
                self.flags.cy = a & 0x80 != 0;
            }
            // RAR: rotate right through CY.
            0x1f => {
                self.regs.a = (a >> 1) | (u8::from(self.flags.cy) << 7);
                self.flags.cy = a & 0x01 != 0;
            }
            _ => unreachable!(),
        }

        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cma(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        4
    }

    pub(super) fn exec_stc(&mut self) -> u32 {
        self.flags.cy = true;
        4
    }

    pub(super) fn exec_cmc(&mut self) -> u32 {
        self.flags.cy = !self.flags.cy;
        4
    }
}
