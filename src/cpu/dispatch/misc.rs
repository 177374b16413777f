/*!
misc.rs - Rotates and single-byte miscellaneous opcode family handler.

Covers (§4.1, §4.2):
    RLC/RRC/RAL/RAR   0x07/0x0F/0x17/0x1F
    CMA               0x2F  (complement A, flags untouched)
    CMC               0x3F  (complement carry)
    STC               0x37  (set carry)
    NOP               0x00, and the undocumented aliases (§9)
    HLT               0x76
    DI/EI             0xF3/0xFB
*/

use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::state::{CARRY, CpuState};

pub(super) fn handle(opcode: u8, state: &mut CpuState, _bus: &mut Bus) -> bool {
    match opcode {
        0x07 => {
            let (r, cy) = alu::rlc(state.a);
            state.a = r;
            state.assign_flag(CARRY, cy);
        }
        0x0F => {
            let (r, cy) = alu::rrc(state.a);
            state.a = r;
            state.assign_flag(CARRY, cy);
        }
        0x17 => {
            let (r, cy) = alu::ral(state.a, state.is_flag_set(CARRY));
            state.a = r;
            state.assign_flag(CARRY, cy);
        }
        0x1F => {
            let (r, cy) = alu::rar(state.a, state.is_flag_set(CARRY));
            state.a = r;
            state.assign_flag(CARRY, cy);
        }
        0x2F => state.a = !state.a,
        0x3F => {
            let cy = state.is_flag_set(CARRY);
            state.assign_flag(CARRY, !cy);
        }
        0x37 => state.assign_flag(CARRY, true),
        // NOP and the undocumented aliases that decode to a plain NOP (§9).
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => {}
        // HLT leaves PC pointing at itself: the CPU is meant to sit there
        // (re-fetching the same byte forever on real silicon); our `halted`
        // short-circuit in `dispatch::step` makes that refetch moot, but PC
        // still reads as the HLT's own address rather than the byte after it.
        0x76 => {
            state.halted = true;
            state.pc = state.pc.wrapping_sub(1);
        }
        0xF3 => {
            state.inte = false;
            state.ei_pending = false;
        }
        0xFB => state.ei_pending = true,
        _ => return false,
    }
    true
}
