pub mod cpm;
pub mod cpu;
pub mod disasm;
pub mod io;

pub use cpm::{CpmConfig, CpmMachine, CpmOutcome};
pub use cpu::{Cpu, CpuState, Flags, Registers, Step};
pub use io::{FnPorts, IoPorts, NullPorts};

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Opcode of `RST 1`, the first Space Invaders frame interrupt.
pub const RST_1: u8 = 0xcf;
/// Opcode of `RST 2`, the second Space Invaders frame interrupt.
pub const RST_2: u8 = 0xd7;

/// Opcode of `HLT`.
pub const HLT: u8 = 0x76;
/// Opcode of `RET`.
pub const RET: u8 = 0xc9;
