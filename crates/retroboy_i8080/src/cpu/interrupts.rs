use super::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    /// Signal a maskable interrupt.
    ///
    /// `opcode` is the instruction the interrupting device places on the data
    /// bus, normally one of the `RST n` opcodes. It is latched only while
    /// interrupts are enabled, and latching disables further interrupts. The
    /// halt state is cleared either way.
    ///
    /// The latched opcode runs on the next [`Cpu::step`] instead of the byte
    /// at the program counter.
    pub fn interrupt(&mut self, opcode: u8) {
        self.halted = false;
        if !self.interrupts_enabled {
            log::trace!("Interrupt {opcode:#04x} ignored, interrupts disabled");
            return;
        }
        self.interrupts_enabled = false;
        self.interrupt_pending = true;
        self.interrupt_opcode = opcode;
        log::debug!(
            "Interrupt {opcode:#04x} latched at pc={:#06x}",
            self.regs.pc
        );
    }

    /// Consume the pending interrupt, if any, at the fetch point.
    ///
    /// Accepting it re-arms the interrupt-enable flag; software that wants
    /// to stay uninterruptible has to execute DI itself.
    pub(super) fn take_interrupt(&mut self) -> Option<u8> {
        if !self.interrupt_pending {
            return None;
        }
        self.interrupt_pending = false;
        self.interrupts_enabled = true;
        log::debug!(
            "Interrupt {:#04x} accepted at pc={:#06x} sp={:#06x}",
            self.interrupt_opcode,
            self.regs.pc,
            self.regs.sp
        );
        Some(self.interrupt_opcode)
    }
}
