/*!
dispatch.rs - Orchestrator for a single 8080 CPU step.

Overview
========
Coordinates a single instruction step:
1. Services a pending interrupt, if the CPU is enabled to take one.
2. Applies the EI one-instruction delay: EI arms `ei_pending`, and INTE
   only flips on at the start of the *next* step.
3. Fetches the opcode and tries each family handler in turn until one
   claims it.

Architecture
============
Each family module (`mov`, `arith`, `misc`, `control_flow`, `stack_io`)
exposes a `pub(super) fn handle(opcode, state, bus) -> bool` that returns
whether it recognized and fully executed the opcode. The chain is a
boolean OR across handlers; an opcode unclaimed by every handler is a
bug in the table (every one of the 256 values is covered) rather than a
legitimate "unknown opcode" case, so that path is an assertion, not a
runtime failure mode.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;

pub(super) mod arith;
pub(super) mod control_flow;
pub(super) mod misc;
pub(super) mod mov;
pub(super) mod stack_io;

/// Execute one instruction, including interrupt servicing and the halted
/// short-circuit. Returns `true` if an instruction was actually executed
/// (as opposed to the CPU sitting halted with nothing pending).
pub fn step(state: &mut CpuState, bus: &mut Bus) -> bool {
    if service_pending_interrupt(state, bus) {
        return true;
    }

    if state.halted {
        return false;
    }

    let was_ei_pending = state.ei_pending;
    let opcode = state.fetch_u8(bus);
    dispatch_opcode(opcode, state, bus);
    if was_ei_pending {
        state.inte = true;
        state.ei_pending = false;
    }
    true
}

fn service_pending_interrupt(state: &mut CpuState, bus: &mut Bus) -> bool {
    if !state.inte {
        return false;
    }
    let Some(n) = bus.take_pending_interrupt() else {
        return false;
    };
    state.inte = false;
    state.halted = false;
    state.push_u16(bus, state.pc);
    state.pc = (n as u16) * 8;
    true
}

fn dispatch_opcode(opcode: u8, state: &mut CpuState, bus: &mut Bus) {
    let claimed = mov::handle(opcode, state, bus)
        || arith::handle(opcode, state, bus)
        || misc::handle(opcode, state, bus)
        || control_flow::handle(opcode, state, bus)
        || stack_io::handle(opcode, state, bus);
    debug_assert!(claimed, "opcode {opcode:#04x} unclaimed by every family handler");
}
