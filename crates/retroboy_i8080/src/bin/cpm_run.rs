use std::path::PathBuf;

use anyhow::{Context, Result};
use retroboy_i8080::cpm::{self, CpmConfig, TPA_START};

const USAGE: &str = "Usage: cpm_run <image> [load_offset] [--cpudiag-fix]";

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("cpm_run: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut image: Option<PathBuf> = None;
    let mut offset = TPA_START;
    let mut cpudiag_fix = false;

    for arg in std::env::args().skip(1) {
        if arg == "--cpudiag-fix" {
            cpudiag_fix = true;
        } else if image.is_none() {
            image = Some(PathBuf::from(arg));
        } else {
            offset = parse_offset(&arg)?;
        }
    }

    let Some(image) = image else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let patches = if cpudiag_fix {
        vec![(0x0170, 0x07)]
    } else {
        Vec::new()
    };
    let config = CpmConfig::builder()
        .load_offset(offset)
        .patches(patches)
        .build();

    let outcome = cpm::run_file(&image, config)?;
    println!("{}", outcome.output);
    println!(
        "Warm boot from {:#06x} after {} instructions, {} cycles",
        outcome.exit_from, outcome.instructions, outcome.cycles
    );
    Ok(())
}

fn parse_offset(arg: &str) -> Result<u16> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .unwrap_or(arg);
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid load offset '{arg}'"))
}
