use crate::cpu::{Cpu, Flags};
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    /// PUSH B/D/H/PSW. PSW pushes A as the high byte and the packed flags
    /// as the low byte.
    pub(super) fn exec_push(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xc5 | 0xd5 | 0xe5 | 0xf5));
        let value = match (opcode >> 4) & 0x03 {
            3 => u16::from_be_bytes([self.regs.a, self.flags.to_u8()]),
            rp => self.regs.rp(rp),
        };
        self.push_u16(value);
        11
    }

    pub(super) fn exec_pop(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xc1 | 0xd1 | 0xe1 | 0xf1));
        let value = self.pop_u16();
        match (opcode >> 4) & 0x03 {
            3 => {
                let [a, f] = value.to_be_bytes();
                self.regs.a = a;
                self.flags = Flags::from_u8(f);
            }
            rp => self.regs.set_rp(rp, value),
        }
        10
    }

    /// XTHL: swap HL with the word on top of the stack.
    pub(super) fn exec_xthl(&mut self) -> u32 {
        let sp = self.regs.sp;
        let top = self.read_word(sp);
        self.write_word(sp, self.regs.hl());
        self.regs.set_hl(top);
        18
    }

    pub(super) fn exec_sphl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        5
    }
}
