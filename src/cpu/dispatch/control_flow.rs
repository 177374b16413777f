/*!
control_flow.rs - Branch/call/return opcode family handler.

Covers (§4.2, §9):
    JMP a16 / Jcond a16   0xC3 / 11-ccc-010
    CALL a16 / Ccond a16  0xCD / 11-ccc-100
    RET / Rcond           0xC9 / 11-ccc-000
    RST n                 11-nnn-111
    PCHL                  0xE9

Plus the undocumented CALL/RET aliases (§9): 0xCB behaves as an
unconditional JMP, 0xD9 as an unconditional RET, and 0xDD/0xED/0xFD as
unconditional CALL.
*/

use crate::bus::Bus;
use crate::cpu::fields::Condition;
use crate::cpu::state::CpuState;

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> bool {
    match opcode {
        0xC3 | 0xCB => {
            let target = state.fetch_u16(bus);
            state.pc = target;
        }
        0xC9 | 0xD9 => {
            state.pc = state.pop_u16(bus);
        }
        0xCD | 0xDD | 0xED | 0xFD => {
            let target = state.fetch_u16(bus);
            state.push_u16(bus, state.pc);
            state.pc = target;
        }
        0xE9 => state.pc = state.hl(),
        // Jcond a16: 11-ccc-010
        _ if opcode & 0b1100_0111 == 0b1100_0010 => {
            let cond = Condition::decode((opcode >> 3) & 0b111);
            let target = state.fetch_u16(bus);
            if cond.is_true(state) {
                state.pc = target;
            }
        }
        // Ccond a16: 11-ccc-100
        _ if opcode & 0b1100_0111 == 0b1100_0100 => {
            let cond = Condition::decode((opcode >> 3) & 0b111);
            let target = state.fetch_u16(bus);
            if cond.is_true(state) {
                state.push_u16(bus, state.pc);
                state.pc = target;
            }
        }
        // Rcond: 11-ccc-000
        _ if opcode & 0b1100_0111 == 0b1100_0000 => {
            let cond = Condition::decode((opcode >> 3) & 0b111);
            if cond.is_true(state) {
                state.pc = state.pop_u16(bus);
            }
        }
        // RST n: 11-nnn-111
        _ if opcode & 0b1100_0111 == 0b1100_0111 => {
            let n = (opcode >> 3) & 0b111;
            state.push_u16(bus, state.pc);
            state.pc = (n as u16) * 8;
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CpuState, Bus) {
        (CpuState::new(), Bus::new())
    }

    #[test]
    fn jmp_sets_pc() {
        let (mut s, mut bus) = setup();
        bus.write_word(0, 0x4000);
        s.pc = 0;
        assert!(handle(0xC3, &mut s, &mut bus));
        assert_eq!(s.pc, 0x4000);
    }

    #[test]
    fn jnz_takes_branch_when_not_zero() {
        let (mut s, mut bus) = setup();
        bus.write_word(0, 0x4000);
        s.pc = 0;
        // JNZ = 11 000 010 = 0xC2
        assert!(handle(0xC2, &mut s, &mut bus));
        assert_eq!(s.pc, 0x4000);
    }

    #[test]
    fn jz_falls_through_when_not_zero() {
        let (mut s, mut bus) = setup();
        bus.write_word(0, 0x4000);
        s.pc = 0;
        // JZ = 11 001 010 = 0xCA
        assert!(handle(0xCA, &mut s, &mut bus));
        assert_eq!(s.pc, 2); // advanced past the operand, branch not taken
    }

    #[test]
    fn call_pushes_return_address_and_jumps() {
        let (mut s, mut bus) = setup();
        s.sp = 0x4000;
        bus.write_word(0x1000, 0x2000);
        s.pc = 0x1000;
        assert!(handle(0xCD, &mut s, &mut bus));
        assert_eq!(s.pc, 0x2000);
        assert_eq!(s.sp, 0x3FFE);
        assert_eq!(bus.read_word(0x3FFE), 0x1002);
    }

    #[test]
    fn ret_pops_return_address() {
        let (mut s, mut bus) = setup();
        s.sp = 0x4000;
        bus.write_word(0x1000, 0x2000);
        s.pc = 0x1000;
        assert!(handle(0xCD, &mut s, &mut bus));
        assert!(handle(0xC9, &mut s, &mut bus));
        assert_eq!(s.pc, 0x1002);
        assert_eq!(s.sp, 0x4000);
    }

    #[test]
    fn rst_injects_call_to_fixed_vector() {
        let (mut s, mut bus) = setup();
        s.sp = 0x4000;
        s.pc = 0x1234;
        // RST 3 = 11 011 111 = 0xDF
        assert!(handle(0xDF, &mut s, &mut bus));
        assert_eq!(s.pc, 0x0018);
        assert_eq!(bus.read_word(0x3FFE), 0x1234);
    }

    #[test]
    fn pchl_loads_pc_from_hl() {
        let (mut s, mut bus) = setup();
        s.set_hl(0x9000);
        assert!(handle(0xE9, &mut s, &mut bus));
        assert_eq!(s.pc, 0x9000);
    }

    #[test]
    fn undocumented_aliases_behave_unconditionally() {
        let (mut s, mut bus) = setup();
        s.sp = 0x4000;
        bus.write_word(0, 0x5000);
        s.pc = 0;
        assert!(handle(0xCB, &mut s, &mut bus)); // JMP alias
        assert_eq!(s.pc, 0x5000);

        s.pc = 0x1000;
        bus.write_word(0x1000, 0x6000);
        assert!(handle(0xDD, &mut s, &mut bus)); // CALL alias
        assert_eq!(s.pc, 0x6000);

        assert!(handle(0xD9, &mut s, &mut bus)); // RET alias
        assert_eq!(s.pc, 0x1002);
    }
}
