/*!
stack_io.rs - Stack-pair transfer and port I/O opcode family handler.

Covers (§4.2, §6):
    PUSH rp / POP rp   11-RP0-101 / 11-RP0-001 (RP field 11 means PSW here,
                       not SP — handled explicitly rather than via
                       `RegPair::SpOrPsw`, whose `get`/`set` always mean SP)
    XTHL               0xE3
    SPHL               0xF9
    IN d8 / OUT d8     0xDB / 0xD3
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> bool {
    match opcode {
        // PUSH rp: 11-RP0-101
        _ if opcode & 0b1100_1111 == 0b1100_0101 => {
            let v = push_source((opcode >> 4) & 0b11, state);
            state.push_u16(bus, v);
        }
        // POP rp: 11-RP0-001
        _ if opcode & 0b1100_1111 == 0b1100_0001 => {
            let v = state.pop_u16(bus);
            pop_dest((opcode >> 4) & 0b11, state, v);
        }
        0xE3 => {
            let top = state.pop_u16(bus);
            state.push_u16(bus, state.hl());
            state.set_hl(top);
        }
        0xF9 => state.sp = state.hl(),
        0xDB => {
            let port = state.fetch_u8(bus);
            state.a = bus.port_in(port);
        }
        0xD3 => {
            let port = state.fetch_u8(bus);
            bus.port_out(port, state.a);
        }
        _ => return false,
    }
    true
}

fn push_source(rp: u8, state: &CpuState) -> u16 {
    match rp {
        0b00 => state.bc(),
        0b01 => state.de(),
        0b10 => state.hl(),
        0b11 => state.compose_psw(),
        _ => unreachable!("2-bit field"),
    }
}

fn pop_dest(rp: u8, state: &mut CpuState, value: u16) {
    match rp {
        0b00 => state.set_bc(value),
        0b01 => state.set_de(value),
        0b10 => state.set_hl(value),
        0b11 => state.load_psw(value),
        _ => unreachable!("2-bit field"),
    }
}
