use crate::cpu::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    pub(super) fn exec_jmp(&mut self) -> u32 {
        let addr = self.fetch16();
        self.regs.pc = addr;
        10
    }

    /// Jcc costs the same whether or not the jump is taken.
    pub(super) fn exec_jmp_cc(&mut self, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xc7 == 0xc2);
        let addr = self.fetch16();
        if self.condition(opcode >> 3) {
            self.regs.pc = addr;
        }
        10
    }

    pub(super) fn exec_pchl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        5
    }

    pub(super) fn exec_call(&mut self) -> u32 {
        let addr = self.fetch16();
        self.push_u16(self.regs.pc);
        self.regs.pc = addr;
        17
    }

    pub(super) fn exec_call_cc(&mut self, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xc7 == 0xc4);
        let addr = self.fetch16();
        if self.condition(opcode >> 3) {
            self.push_u16(self.regs.pc);
            self.regs.pc = addr;
            17
        } else {
            11
        }
    }

    pub(super) fn exec_ret(&mut self) -> u32 {
        self.regs.pc = self.pop_u16();
        10
    }

    pub(super) fn exec_ret_cc(&mut self, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xc7 == 0xc0);
        if self.condition(opcode >> 3) {
            self.regs.pc = self.pop_u16();
            11
        } else {
            5
        }
    }

    /// RST n: call to `n * 8`. Also the usual opcode injected by
    /// [`Cpu::interrupt`], in which case the pushed address is the
    /// instruction that was about to run.
    pub(super) fn exec_rst(&mut self, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xc7 == 0xc7);
        self.push_u16(self.regs.pc);
        self.regs.pc = u16::from(opcode & 0x38);
        11
    }
}
