mod alu;
mod exec;
mod flags;
mod helpers;
mod interrupts;
mod regs;


pub use flags::{parity, Flags};
pub use regs::Registers;

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::disasm;
use crate::io::{FnPorts, IoPorts, NullPorts};
use crate::MEMORY_SIZE;

/// Outcome of [`Cpu::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One instruction ran. `opcode` is the byte that was executed, which is
    /// the injected interrupt opcode when an interrupt was accepted.
    Executed { opcode: u8, cycles: u32 },
    /// The CPU is halted and no interrupt is pending. Nothing ran.
    Halted,
}

impl Step {
    pub fn opcode(self) -> Option<u8> {
        match self {
            Step::Executed { opcode, .. } => Some(opcode),
            Step::Halted => None,
        }
    }

    pub fn cycles(self) -> u32 {
        match self {
            Step::Executed { cycles, .. } => cycles,
            Step::Halted => 0,
        }
    }

    /// Integer form used by harnesses: the opcode, or `-1` when halted.
    pub fn code(self) -> i32 {
        match self {
            Step::Executed { opcode, .. } => i32::from(opcode),
            Step::Halted => -1,
        }
    }
}

/// Architectural state of the CPU at an instruction boundary, without memory.
///
/// Two cores fed the same program can be compared snapshot by snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuState {
    pub regs: Registers,
    pub flags: Flags,
    pub cycles: u64,
    pub interrupts_enabled: bool,
    pub interrupt_pending: bool,
    pub halted: bool,
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regs;
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "PC={:04X} SP={:04X} A={:02X} B={:02X} C={:02X} D={:02X} E={:02X} H={:02X} L={:02X} \
             F={}{}{}{}{} CYC={} IE={} INT={} HLT={}",
            r.pc,
            r.sp,
            r.a,
            r.b,
            r.c,
            r.d,
            r.e,
            r.h,
            r.l,
            flag(self.flags.s, 'S'),
            flag(self.flags.z, 'Z'),
            flag(self.flags.ac, 'A'),
            flag(self.flags.p, 'P'),
            flag(self.flags.cy, 'C'),
            self.cycles,
            u8::from(self.interrupts_enabled),
            u8::from(self.interrupt_pending),
            u8::from(self.halted),
        )
    }
}

/// Intel 8080 CPU with its 64 KiB of memory.
///
/// The core owns memory exclusively; the host talks to it through the
/// memory accessors and the [`IoPorts`] implementation `P` handed over at
/// construction.
pub struct Cpu<P = NullPorts> {
    regs: Registers,
    flags: Flags,
    memory: Box<[u8; MEMORY_SIZE]>,
    ports: P,
    /// Clock cycles elapsed since construction (or the last `reset`).
    cycles: u64,
    /// Instructions executed, including accepted interrupts.
    instructions: u64,
    interrupts_enabled: bool,
    interrupt_pending: bool,
    interrupt_opcode: u8,
    halted: bool,
}

impl Cpu<NullPorts> {
    /// Create a CPU with no IO devices attached.
    pub fn new() -> Self {
        Self::with_ports(NullPorts)
    }

    /// Treat two 8-bit register values as one 16-bit pair, `hi` first.
    pub fn pair(hi: u8, lo: u8) -> u16 {
        Registers::pair(hi, lo)
    }
}

impl Default for Cpu<NullPorts> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> Cpu<FnPorts<I, O>>
where
    I: FnMut(u8) -> u8,
    O: FnMut(u8, u8),
{
    /// Create a CPU whose `IN` and `OUT` instructions call `byte_in` and
    /// `byte_out`.
    pub fn with_io(byte_in: I, byte_out: O) -> Self {
        Self::with_ports(FnPorts::new(byte_in, byte_out))
    }
}

impl<P: IoPorts> Cpu<P> {
    /// Create a CPU in power-on state with the given IO ports.
    pub fn with_ports(ports: P) -> Self {
        Self {
            regs: Registers::default(),
            flags: Flags::default(),
            memory: Box::new([0; MEMORY_SIZE]),
            ports,
            cycles: 0,
            instructions: 0,
            interrupts_enabled: false,
            interrupt_pending: false,
            interrupt_opcode: 0,
            halted: false,
        }
    }

    /// Reset registers, flags, counters and interrupt state to power-on
    /// values. Memory contents are preserved.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.flags = Flags::default();
        self.cycles = 0;
        self.instructions = 0;
        self.interrupts_enabled = false;
        self.interrupt_pending = false;
        self.interrupt_opcode = 0;
        self.halted = false;
    }

    /// Copy `image` into memory at `offset` and point the program counter at
    /// it. Bytes that would land past 0xFFFF are dropped.
    ///
    /// Returns the number of bytes copied.
    pub fn load_bytes(&mut self, image: &[u8], offset: u16) -> usize {
        let start = offset as usize;
        let len = image.len().min(MEMORY_SIZE - start);
        if len < image.len() {
            log::warn!(
                "Program image of {} bytes truncated to {} at offset {:#06x}",
                image.len(),
                len,
                offset
            );
        }
        self.memory[start..start + len].copy_from_slice(&image[..len]);
        self.regs.pc = offset;
        len
    }

    /// Load a raw binary file into memory at `offset` and point the program
    /// counter at it.
    ///
    /// The file is read completely before memory is touched, so a failed
    /// load leaves the CPU as it was.
    pub fn load_program<Q: AsRef<Path>>(&mut self, path: Q, offset: u16) -> Result<usize> {
        let path = path.as_ref();
        let image = std::fs::read(path)
            .with_context(|| format!("failed to read program image '{}'", path.display()))?;
        let len = self.load_bytes(&image, offset);
        log::info!(
            "Loaded '{}' ({} bytes) at {:#06x}",
            path.display(),
            len,
            offset
        );
        Ok(len)
    }

    /// Execute one instruction, or the pending interrupt's opcode.
    pub fn step(&mut self) -> Step {
        let opcode = match self.take_interrupt() {
            Some(opcode) => opcode,
            None => {
                if self.halted {
                    return Step::Halted;
                }
                if log::log_enabled!(log::Level::Trace) {
                    self.trace_instruction();
                }
                self.fetch8()
            }
        };

        let cycles = self.exec_opcode(opcode);
        self.cycles += u64::from(cycles);
        self.instructions += 1;
        Step::Executed { opcode, cycles }
    }

    /// Execute up to `count` instructions, stopping early on halt.
    ///
    /// Returns the number of instructions executed.
    pub fn run_for(&mut self, count: u64) -> u64 {
        let mut ran = 0;
        while ran < count {
            if self.step() == Step::Halted {
                break;
            }
            ran += 1;
        }
        ran
    }

    /// Execute instructions until at least `budget` cycles have elapsed or
    /// the CPU halts.
    ///
    /// Returns the cycles actually consumed, which may overshoot `budget` by
    /// the tail of the last instruction.
    pub fn run_cycles(&mut self, budget: u64) -> u64 {
        let start = self.cycles;
        while self.cycles - start < budget {
            if self.step() == Step::Halted {
                break;
            }
        }
        self.cycles - start
    }

    fn trace_instruction(&self) {
        let (text, _) = disasm::disassemble(&self.memory[..], self.regs.pc);
        log::trace!(
            "{:04X}  {:<14} {} M={:02X}",
            self.regs.pc,
            text,
            self.snapshot(),
            self.memory[self.regs.hl() as usize]
        );
    }

    pub fn snapshot(&self) -> CpuState {
        CpuState {
            regs: self.regs,
            flags: self.flags,
            cycles: self.cycles,
            interrupts_enabled: self.interrupts_enabled,
            interrupt_pending: self.interrupt_pending,
            halted: self.halted,
        }
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut P {
        &mut self.ports
    }

    pub fn into_ports(self) -> P {
        self.ports
    }

    #[inline]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut [u8; MEMORY_SIZE] {
        &mut self.memory
    }

    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Seed execution at an arbitrary address.
    pub fn set_pc(&mut self, pc: u16) {
        self.regs.pc = pc;
    }

    pub fn sp(&self) -> u16 {
        self.regs.sp
    }

    pub fn set_sp(&mut self, sp: u16) {
        self.regs.sp = sp;
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    pub fn a(&self) -> u8 {
        self.regs.a
    }

    pub fn b(&self) -> u8 {
        self.regs.b
    }

    pub fn c(&self) -> u8 {
        self.regs.c
    }

    pub fn d(&self) -> u8 {
        self.regs.d
    }

    pub fn e(&self) -> u8 {
        self.regs.e
    }

    pub fn h(&self) -> u8 {
        self.regs.h
    }

    pub fn l(&self) -> u8 {
        self.regs.l
    }

    pub fn bc(&self) -> u16 {
        self.regs.bc()
    }

    pub fn de(&self) -> u16 {
        self.regs.de()
    }

    pub fn hl(&self) -> u16 {
        self.regs.hl()
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn interrupt_pending(&self) -> bool {
        self.interrupt_pending
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
