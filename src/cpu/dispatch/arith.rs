/*!
arith.rs - Arithmetic/logic opcode family handler (part of the dispatch chain).

Covers (§4.2, using the primitives in `cpu::alu`):
    ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r   10-fff-rrr
    ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8  11-fff-110
    INR r / DCR r                       00-DDD-100 / 00-DDD-101
    INX rp / DCX rp                     00-RP0-011 / 00-RP0-1011 (RP1 bit = 1 for DCX)
    DAD rp                              00-RP1-001
    DAA                                 0x27
*/

use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::fields::{Reg, RegPair};
use crate::cpu::state::{AUX_CARRY, CARRY, CpuState};

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> bool {
    match opcode {
        0x27 => {
            let carry_in = state.is_flag_set(CARRY);
            let aux_in = state.is_flag_set(AUX_CARRY);
            let f = alu::daa(state.a, carry_in, aux_in);
            state.a = f.result;
            f.apply_all(state);
        }
        0x09 | 0x19 | 0x29 | 0x39 => {
            let rp = RegPair::decode((opcode >> 4) & 0b11);
            let (sum, carry) = alu::dad(state.hl(), rp.get(state));
            state.set_hl(sum);
            state.assign_flag(CARRY, carry);
        }
        // ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8: 11-fff-110
        _ if opcode & 0b1100_0111 == 0b1100_0110 => {
            let fff = (opcode >> 3) & 0b111;
            let v = state.fetch_u8(bus);
            apply_alu_family(state, fff, v);
        }
        // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r: 10-fff-rrr
        0x80..=0xBF => {
            let fff = (opcode >> 3) & 0b111;
            let src = Reg::decode(opcode & 0b111);
            let v = src.get(state, bus);
            apply_alu_family(state, fff, v);
        }
        // INR r / DCR r: 00-DDD-100 / 00-DDD-101
        _ if opcode & 0b1100_0110 == 0b0000_0100 => {
            let reg = Reg::decode((opcode >> 3) & 0b111);
            let old = reg.get(state, bus);
            let f = if opcode & 1 == 0 { alu::inr(old) } else { alu::dcr(old) };
            reg.set(state, bus, f.result);
            f.apply_no_carry(state);
        }
        // INX rp / DCX rp: 00-RP0-011 / 00-RP1-011
        _ if opcode & 0b1100_0011 == 0b0000_0011 => {
            let rp = RegPair::decode((opcode >> 4) & 0b11);
            let is_dcx = (opcode >> 3) & 1 == 1;
            let v = rp.get(state);
            rp.set(state, if is_dcx { v.wrapping_sub(1) } else { v.wrapping_add(1) });
        }
        _ => return false,
    }
    true
}

/// Apply one of the eight ALU-with-register/immediate families, selected by
/// the 3-bit `fff` field shared between the register form (10-fff-rrr) and
/// the immediate form (11-fff-110).
fn apply_alu_family(state: &mut CpuState, fff: u8, v: u8) {
    let carry_in = state.is_flag_set(CARRY);
    match fff {
        0b000 => {
            let f = alu::add(state.a, v, false);
            state.a = f.result;
            f.apply_all(state);
        }
        0b001 => {
            let f = alu::add(state.a, v, carry_in);
            state.a = f.result;
            f.apply_all(state);
        }
        0b010 => {
            let f = alu::sub(state.a, v, false);
            state.a = f.result;
            f.apply_all(state);
        }
        0b011 => {
            let f = alu::sub(state.a, v, carry_in);
            state.a = f.result;
            f.apply_all(state);
        }
        0b100 => {
            let f = alu::and(state.a, v);
            state.a = f.result;
            f.apply_all(state);
        }
        0b101 => {
            let f = alu::xor(state.a, v);
            state.a = f.result;
            f.apply_all(state);
        }
        0b110 => {
            let f = alu::or(state.a, v);
            state.a = f.result;
            f.apply_all(state);
        }
        0b111 => {
            // CMP/CPI: SUB but discard the result, keep only flags.
            let f = alu::sub(state.a, v, false);
            f.apply_all(state);
        }
        _ => unreachable!("3-bit field"),
    }
}
