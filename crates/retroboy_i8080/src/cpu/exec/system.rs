use crate::cpu::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    pub(super) fn exec_in(&mut self) -> u32 {
        let port = self.fetch8();
        self.regs.a = self.ports.read(port);
        10
    }

    pub(super) fn exec_out(&mut self) -> u32 {
        let port = self.fetch8();
        self.ports.write(port, self.regs.a);
        10
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        self.interrupts_enabled = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.interrupts_enabled = false;
        4
    }

    /// HLT: stop fetching until [`Cpu::interrupt`] is called.
    pub(super) fn exec_hlt(&mut self) -> u32 {
        self.halted = true;
        log::debug!("HLT at {:#06x}", self.regs.pc.wrapping_sub(1));
        7
    }
}
