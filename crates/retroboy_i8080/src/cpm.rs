//! Minimal CP/M environment for running 8080 diagnostic programs.
//!
//! Diagnostic ROMs such as `cpudiag.bin`, `TST8080.COM` and `8080EXM.COM`
//! are CP/M `.COM` programs: they load at 0x0100, print through BDOS
//! (`CALL 5`) and finish by jumping to the warm boot vector at 0x0000. This
//! module provides just enough of that to run them against the core.

use std::path::Path;

use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

use crate::cpu::{Cpu, Step};
use crate::{HLT, RET};

/// Start of the CP/M transient program area, where `.COM` files load.
pub const TPA_START: u16 = 0x0100;
/// BDOS entry point.
pub const BDOS_ENTRY: u16 = 0x0005;
/// Warm boot vector. Reaching it ends the program.
pub const WARM_BOOT: u16 = 0x0000;

/// BDOS function 2: write the character in E.
const BDOS_CONSOLE_OUTPUT: u8 = 2;
/// BDOS function 9: write the `$`-terminated string at DE.
const BDOS_PRINT_STRING: u8 = 9;

/// Run configuration for [`CpmMachine`].
#[derive(Clone, Debug, TypedBuilder)]
pub struct CpmConfig {
    /// Load address of the program image.
    #[builder(default = TPA_START)]
    pub load_offset: u16,
    /// Instruction budget before the run is abandoned.
    #[builder(default = 100_000_000)]
    pub max_instructions: u64,
    /// `(address, byte)` pairs written after the image is loaded.
    ///
    /// `cpudiag.bin` needs `(0x0170, 0x07)` to move its stack out of its
    /// own code.
    #[builder(default)]
    pub patches: Vec<(u16, u8)>,
    /// Fail the run when the program never printed a string through BDOS
    /// function 9.
    #[builder(default = false)]
    pub require_success: bool,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Result of a program that reached the warm boot vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpmOutcome {
    /// Everything written to the console.
    pub output: String,
    /// Cycles consumed by the program.
    pub cycles: u64,
    /// Instructions executed by the program.
    pub instructions: u64,
    /// Whether BDOS function 9 was called at least once.
    pub printed_message: bool,
    /// Address of the instruction that jumped to 0x0000.
    pub exit_from: u16,
}

/// A CPU with a CP/M console trap at the BDOS entry point.
pub struct CpmMachine {
    cpu: Cpu,
    config: CpmConfig,
    output: String,
    printed_message: bool,
}

impl CpmMachine {
    pub fn new(config: CpmConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            config,
            output: String::new(),
            printed_message: false,
        }
    }

    /// Load a program image, apply the configured patches and plant a `RET`
    /// at the BDOS entry point.
    pub fn load_image(&mut self, image: &[u8]) {
        self.cpu.load_bytes(image, self.config.load_offset);
        for &(addr, value) in &self.config.patches {
            log::debug!("Patching {addr:#06x} = {value:#04x}");
            self.cpu.write_byte(addr, value);
        }
        self.cpu.write_byte(BDOS_ENTRY, RET);
        self.cpu.set_pc(self.config.load_offset);
    }

    pub fn load_file<Q: AsRef<Path>>(&mut self, path: Q) -> Result<()> {
        let path = path.as_ref();
        let image = std::fs::read(path)
            .with_context(|| format!("failed to read CP/M program '{}'", path.display()))?;
        log::info!("Loaded '{}' ({} bytes)", path.display(), image.len());
        self.load_image(&image);
        Ok(())
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Console output produced so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Run until the program jumps to the warm boot vector.
    ///
    /// Reaching a `HLT`, running out of instruction budget or (with
    /// `require_success`) finishing without printing a message is an error.
    pub fn run(&mut self) -> Result<CpmOutcome> {
        let start_cycles = self.cpu.cycles();
        let mut instructions = 0u64;

        loop {
            let pc = self.cpu.pc();
            if self.cpu.read_byte(pc) == HLT {
                bail!("HLT reached at {pc:#06x}");
            }
            if instructions >= self.config.max_instructions {
                bail!(
                    "instruction budget of {} exhausted at {pc:#06x}",
                    self.config.max_instructions
                );
            }
            if pc == BDOS_ENTRY {
                self.bdos_call();
            }

            if self.cpu.step() == Step::Halted {
                bail!("CPU halted at {:#06x}", self.cpu.pc());
            }
            instructions += 1;

            if self.cpu.pc() == WARM_BOOT {
                log::info!("Jump to {WARM_BOOT:#06x} from {pc:#06x}");
                if self.config.require_success && !self.printed_message {
                    bail!("program finished at {pc:#06x} without printing a message");
                }
                return Ok(CpmOutcome {
                    output: self.output.clone(),
                    cycles: self.cpu.cycles() - start_cycles,
                    instructions,
                    printed_message: self.printed_message,
                    exit_from: pc,
                });
            }
        }
    }

    fn bdos_call(&mut self) {
        match self.cpu.c() {
            BDOS_PRINT_STRING => {
                let mut addr = self.cpu.de();
                let mut text = String::new();
                // Bounded by the address space in case the terminator is missing.
                for _ in 0..crate::MEMORY_SIZE {
                    let ch = self.cpu.read_byte(addr);
                    if ch == b'$' {
                        break;
                    }
                    text.push(char::from(ch));
                    addr = addr.wrapping_add(1);
                }
                log::info!("{}", text.trim_end());
                self.output.push_str(&text);
                self.printed_message = true;
            }
            BDOS_CONSOLE_OUTPUT => {
                self.output.push(char::from(self.cpu.e()));
            }
            function => {
                log::debug!("Unsupported BDOS function {function}");
            }
        }
    }
}

/// Run a program image under [`CpmMachine`].
pub fn run_image(image: &[u8], config: CpmConfig) -> Result<CpmOutcome> {
    let mut machine = CpmMachine::new(config);
    machine.load_image(image);
    machine.run()
}

/// Run a program file under [`CpmMachine`].
pub fn run_file<Q: AsRef<Path>>(path: Q, config: CpmConfig) -> Result<CpmOutcome> {
    let path = path.as_ref();
    let mut machine = CpmMachine::new(config);
    machine.load_file(path)?;
    machine
        .run()
        .with_context(|| format!("while running '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Prints "CPU IS OPERATIONAL" through BDOS function 9, then warm boots.
    fn operational_program() -> Vec<u8> {
        let mut program = vec![
            0x31, 0x00, 0xf0, // 0100 LXI SP,$F000
            0x11, 0x0f, 0x01, // 0103 LXI D,$010F
            0x0e, 0x09, // 0106 MVI C,9
            0xcd, 0x05, 0x00, // 0108 CALL 5
            0xc3, 0x00, 0x00, // 010B JMP 0
            0x00, // 010E
        ];
        program.extend_from_slice(b"CPU IS OPERATIONAL$");
        program
    }

    #[test]
    fn prints_banner_and_warm_boots() {
        let outcome = run_image(&operational_program(), CpmConfig::default()).unwrap();
        assert_eq!(outcome.output, "CPU IS OPERATIONAL");
        assert!(outcome.printed_message);
        assert_eq!(outcome.exit_from, 0x010b);
        assert_eq!(outcome.instructions, 6);
        // LXI + LXI + MVI + CALL + RET + JMP
        assert_eq!(outcome.cycles, 10 + 10 + 7 + 17 + 10 + 10);
    }

    #[test]
    fn console_output_function() {
        let program = [
            0x31, 0x00, 0xf0, // LXI SP,$F000
            0x0e, 0x02, // MVI C,2
            0x1e, b'O', // MVI E,'O'
            0xcd, 0x05, 0x00, // CALL 5
            0x1e, b'K', // MVI E,'K'
            0xcd, 0x05, 0x00, // CALL 5
            0xc3, 0x00, 0x00, // JMP 0
        ];
        let outcome = run_image(&program, CpmConfig::default()).unwrap();
        assert_eq!(outcome.output, "OK");
        assert!(!outcome.printed_message);

        let config = CpmConfig::builder().require_success(true).build();
        let err = run_image(&program, config).unwrap_err();
        assert!(err.to_string().contains("without printing"), "{err}");
    }

    #[test]
    fn halt_is_an_error() {
        let err = run_image(&[0x00, HLT], CpmConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "HLT reached at 0x0101");
    }

    #[test]
    fn instruction_budget_is_enforced() {
        // 0100 JMP $0100
        let config = CpmConfig::builder().max_instructions(1_000).build();
        let err = run_image(&[0xc3, 0x00, 0x01], config).unwrap_err();
        assert!(err.to_string().contains("budget"), "{err}");
    }

    #[test]
    fn patches_apply_after_load() {
        let config = CpmConfig::builder()
            .patches(vec![(0x0101, 0x0b), (0x0103, 0x00)])
            .build();
        let mut machine = CpmMachine::new(config);
        machine.load_image(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(machine.cpu().read_byte(0x0101), 0x0b);
        assert_eq!(machine.cpu().read_byte(BDOS_ENTRY), RET);
        assert_eq!(machine.cpu().pc(), TPA_START);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = run_file("does/not/exist.com", CpmConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.com"), "{err:#}");
    }

    fn rom_path(name: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("../../assets/roms/8080_tests");
        path.push(name);
        path
    }

    // These need the diagnostic ROMs under assets/roms/8080_tests, so they
    // are ignored by default. Run them explicitly, e.g.:
    // `cargo test -p retroboy_i8080 -- --ignored cpudiag`.

    #[test]
    #[ignore]
    fn cpudiag() {
        let config = CpmConfig::builder()
            .patches(vec![(0x0170, 0x07)])
            .require_success(true)
            .build();
        let outcome = run_file(rom_path("cpudiag.bin"), config).unwrap();
        assert!(
            outcome.output.contains("CPU IS OPERATIONAL"),
            "{}",
            outcome.output
        );
    }

    #[test]
    #[ignore]
    fn tst8080() {
        let outcome = run_file(rom_path("TST8080.COM"), CpmConfig::default()).unwrap();
        assert!(
            outcome.output.contains("CPU IS OPERATIONAL"),
            "{}",
            outcome.output
        );
    }

    #[test]
    #[ignore]
    fn run_8080pre() {
        let outcome = run_file(rom_path("8080PRE.COM"), CpmConfig::default()).unwrap();
        assert!(
            outcome.output.contains("8080 Preliminary tests complete"),
            "{}",
            outcome.output
        );
    }

    #[test]
    #[ignore]
    fn run_8080exm() {
        let config = CpmConfig::builder().max_instructions(u64::MAX).build();
        let outcome = run_file(rom_path("8080EXM.COM"), config).unwrap();
        assert!(!outcome.output.contains("ERROR"), "{}", outcome.output);
    }
}
