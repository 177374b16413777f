use std::fs;
use std::process::ExitCode;

use clap::Parser;
use i8080::bus::Bus;
use i8080::cpu::CpuState;
use i8080::disasm::disasm_at;
use i8080::error::EmuError;

/// Intel 8080 disassembler and step-executor.
#[derive(Parser)]
#[command(name = "i8080", version, about)]
struct Cli {
    /// Path to a raw 8080 binary image.
    image: String,

    /// Load address for the image, in hex (e.g. 0x100).
    #[arg(long, value_parser = parse_hex_u16, default_value = "0x0")]
    base: u16,

    /// Print a disassembly listing instead of executing.
    #[arg(short, long)]
    disassemble: bool,

    /// Number of instructions to execute before stopping.
    #[arg(long, default_value_t = 1_000_000)]
    steps: u64,

    /// Log each executed instruction at trace level (RUST_LOG=i8080=trace).
    #[arg(long)]
    trace: bool,
}

fn parse_hex_u16(s: &str) -> Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(s.trim_start_matches("0x"), 16)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), EmuError> {
    let bytes = fs::read(&cli.image)?;
    if bytes.len() > 0x1_0000 {
        return Err(EmuError::ImageTooLarge { len: bytes.len() });
    }

    if cli.disassemble {
        disassemble(&bytes, cli.base);
        return Ok(());
    }

    let mut bus = Bus::new();
    bus.load_image(&bytes, cli.base);
    let mut state = CpuState::new();
    state.pc = cli.base;

    for _ in 0..cli.steps {
        if state.halted {
            break;
        }
        if cli.trace {
            let (mnemonic, _) = disasm_at(&bytes, (state.pc.wrapping_sub(cli.base)) as usize);
            let pre = state;
            let pc = state.pc;
            i8080::step(&mut state, &mut bus);
            log::trace!("{:04x}  {mnemonic:<16}{}", pc, changed_registers(&pre, &state));
        } else {
            i8080::step(&mut state, &mut bus);
        }
    }

    Ok(())
}

/// Render the registers/flags that differ between `pre` and `post`, for
/// `--trace` output (§7: "PC, mnemonic, and the registers that changed").
fn changed_registers(pre: &CpuState, post: &CpuState) -> String {
    let mut parts = Vec::new();
    macro_rules! track8 {
        ($name:literal, $field:ident) => {
            if pre.$field != post.$field {
                parts.push(format!("{}={:02x}", $name, post.$field));
            }
        };
    }
    macro_rules! track16 {
        ($name:literal, $field:ident) => {
            if pre.$field != post.$field {
                parts.push(format!("{}={:04x}", $name, post.$field));
            }
        };
    }
    track8!("A", a);
    track8!("B", b);
    track8!("C", c);
    track8!("D", d);
    track8!("E", e);
    track8!("H", h);
    track8!("L", l);
    track16!("SP", sp);
    track8!("F", flags);
    parts.join(" ")
}

fn disassemble(bytes: &[u8], base: u16) {
    let mut offset = 0usize;
    while offset < bytes.len() {
        let (mnemonic, size) = disasm_at(bytes, offset);
        let raw: Vec<String> = bytes[offset..(offset + size).min(bytes.len())]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        println!("{:04x}\t{:<8}\t{}", base as usize + offset, raw.join(" "), mnemonic);
        offset += size;
    }
}
