#![doc = r#"
i8080 library crate.

This crate exposes an Intel 8080 CPU emulator core and disassembler for
use by the `i8080` binary and by tests.

Modules:
- bus: flat 64 KiB memory plus port-I/O hooks and the pending-interrupt slot
- cpu: CPU architectural state, ALU primitives, opcode field decoding,
  and the `step` dispatch entry point
- disasm: disassembler sharing `cpu::fields`' register/pair/condition
  taxonomy with the executor
- error: error types for the host shell (image loading, CLI)
"#]

pub mod bus;
pub mod cpu;
pub mod disasm;
pub mod error;

pub use bus::Bus;
pub use cpu::{CpuState, step};
