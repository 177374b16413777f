/*!
disasm.rs - Intel 8080 disassembler (§4.3, §6).

`disasm_at` decodes a single instruction starting at `pc` within `buffer`
and returns its mnemonic text plus the number of bytes it consumed. It
shares the `cpu::fields` register/pair/condition taxonomy with the
executor so the two decoders cannot silently drift apart.

Truncated operand bytes (an instruction whose immediate/address operand
runs past the end of `buffer`) are read as zero rather than panicking;
callers that need to detect truncation can compare the returned byte
count against `buffer.len() - pc`.
*/

use crate::cpu::fields::{Condition, Reg, RegPair};

fn byte_at(buffer: &[u8], pc: usize, offset: usize) -> u8 {
    buffer.get(pc + offset).copied().unwrap_or(0)
}

fn word_at(buffer: &[u8], pc: usize) -> u16 {
    let lo = byte_at(buffer, pc, 1) as u16;
    let hi = byte_at(buffer, pc, 2) as u16;
    (hi << 8) | lo
}

/// Decode one instruction at `buffer[pc..]`, returning `(mnemonic, size)`.
/// `size` is always in 1..=3 and never exceeds `buffer.len() - pc` in
/// spirit (operand bytes past the buffer end are treated as zero).
pub fn disasm_at(buffer: &[u8], pc: usize) -> (String, usize) {
    let opcode = byte_at(buffer, pc, 0);

    // MOV r1,r2: 01-DDD-SSS, excluding 0x76 (HLT).
    if (0x40..=0x7F).contains(&opcode) && opcode != 0x76 {
        let dst = Reg::decode((opcode >> 3) & 0b111);
        let src = Reg::decode(opcode & 0b111);
        return (format!("MOV\t{},{}", dst.letter(), src.letter()), 1);
    }
    // MVI r,d8: 00-DDD-110
    if opcode & 0b1100_0111 == 0b0000_0110 {
        let dst = Reg::decode((opcode >> 3) & 0b111);
        let d8 = byte_at(buffer, pc, 1);
        return (format!("MVI\t{},#0x{:02x}", dst.letter(), d8), 2);
    }
    // LXI rp,d16: 00-RP0-001
    if opcode & 0b1100_1111 == 0b0000_0001 {
        let rp = RegPair::decode((opcode >> 4) & 0b11);
        return (format!("LXI\t{},#0x{:04x}", rp.letter(), word_at(buffer, pc)), 3);
    }
    // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r: 10-fff-rrr
    if (0x80..=0xBF).contains(&opcode) {
        let mnemonic = alu_mnemonic((opcode >> 3) & 0b111);
        let src = Reg::decode(opcode & 0b111);
        return (format!("{mnemonic}\t{}", src.letter()), 1);
    }
    // ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8: 11-fff-110
    if opcode & 0b1100_0111 == 0b1100_0110 {
        let mnemonic = immediate_alu_mnemonic((opcode >> 3) & 0b111);
        return (format!("{mnemonic}\t#0x{:02x}", byte_at(buffer, pc, 1)), 2);
    }
    // INR r / DCR r: 00-DDD-100 / 00-DDD-101
    if opcode & 0b1100_0110 == 0b0000_0100 {
        let reg = Reg::decode((opcode >> 3) & 0b111);
        let mnemonic = if opcode & 1 == 0 { "INR" } else { "DCR" };
        return (format!("{mnemonic}\t{}", reg.letter()), 1);
    }
    // INX rp / DCX rp: 00-RP0-011 / 00-RP1-011
    if opcode & 0b1100_0011 == 0b0000_0011 {
        let rp = RegPair::decode((opcode >> 4) & 0b11);
        let mnemonic = if (opcode >> 3) & 1 == 0 { "INX" } else { "DCX" };
        return (format!("{mnemonic}\t{}", rp.letter()), 1);
    }
    if opcode & 0b1100_1111 == 0b0000_1001 {
        let rp = RegPair::decode((opcode >> 4) & 0b11);
        return (format!("DAD\t{}", rp.letter()), 1);
    }
    // PUSH rp / POP rp: 11-RP0-101 / 11-RP0-001
    if opcode & 0b1100_1111 == 0b1100_0101 {
        return (format!("PUSH\t{}", push_pop_letter((opcode >> 4) & 0b11)), 1);
    }
    if opcode & 0b1100_1111 == 0b1100_0001 {
        return (format!("POP\t{}", push_pop_letter((opcode >> 4) & 0b11)), 1);
    }
    // Jcond/Ccond/Rcond: 11-ccc-010 / 11-ccc-100 / 11-ccc-000
    if opcode & 0b1100_0111 == 0b1100_0010 {
        let cond = Condition::decode((opcode >> 3) & 0b111);
        return (format!("J{}\t${:04x}", cond.mnemonic_suffix(), word_at(buffer, pc)), 3);
    }
    if opcode & 0b1100_0111 == 0b1100_0100 {
        let cond = Condition::decode((opcode >> 3) & 0b111);
        return (format!("C{}\t${:04x}", cond.mnemonic_suffix(), word_at(buffer, pc)), 3);
    }
    if opcode & 0b1100_0111 == 0b1100_0000 {
        let cond = Condition::decode((opcode >> 3) & 0b111);
        return (format!("R{}", cond.mnemonic_suffix()), 1);
    }
    // RST n: 11-nnn-111
    if opcode & 0b1100_0111 == 0b1100_0111 {
        let n = (opcode >> 3) & 0b111;
        return (format!("RST\t{n}"), 1);
    }

    match opcode {
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => ("NOP".into(), 1),
        0x07 => ("RLC".into(), 1),
        0x0F => ("RRC".into(), 1),
        0x17 => ("RAL".into(), 1),
        0x1F => ("RAR".into(), 1),
        0x22 => (format!("SHLD\t#${:04x}", word_at(buffer, pc)), 3),
        0x2A => (format!("LHLD\t#${:04x}", word_at(buffer, pc)), 3),
        0x27 => ("DAA".into(), 1),
        0x2F => ("CMA".into(), 1),
        0x32 => (format!("STA\t#${:04x}", word_at(buffer, pc)), 3),
        0x37 => ("STC".into(), 1),
        0x3A => (format!("LDA\t#${:04x}", word_at(buffer, pc)), 3),
        0x3F => ("CMC".into(), 1),
        0x02 => ("STAX\tB".into(), 1),
        0x0A => ("LDAX\tB".into(), 1),
        0x12 => ("STAX\tD".into(), 1),
        0x1A => ("LDAX\tD".into(), 1),
        0x76 => ("HLT".into(), 1),
        0xC3 | 0xCB => (format!("JMP\t${:04x}", word_at(buffer, pc)), 3),
        0xC9 | 0xD9 => ("RET".into(), 1),
        0xCD | 0xDD | 0xED | 0xFD => (format!("CALL\t${:04x}", word_at(buffer, pc)), 3),
        0xD3 => (format!("OUT\t#0x{:02x}", byte_at(buffer, pc, 1)), 2),
        0xDB => (format!("IN\t#0x{:02x}", byte_at(buffer, pc, 1)), 2),
        0xE3 => ("XTHL".into(), 1),
        0xE9 => ("PCHL".into(), 1),
        0xEB => ("XCHG".into(), 1),
        0xF3 => ("DI".into(), 1),
        0xF9 => ("SPHL".into(), 1),
        0xFB => ("EI".into(), 1),
        _ => (format!("; unknown opcode 0x{opcode:02x}"), 1),
    }
}

fn alu_mnemonic(fff: u8) -> &'static str {
    ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"][fff as usize]
}

fn immediate_alu_mnemonic(fff: u8) -> &'static str {
    ["ADI", "ACI", "SUI", "SBI", "ANI", "XRI", "ORI", "CPI"][fff as usize]
}

fn push_pop_letter(rp: u8) -> &'static str {
    match rp {
        0b00 => "B",
        0b01 => "D",
        0b10 => "H",
        0b11 => "PSW",
        _ => unreachable!("2-bit field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mov_between_registers() {
        let (text, size) = disasm_at(&[0x41], 0); // MOV B,C
        assert_eq!(text, "MOV\tB,C");
        assert_eq!(size, 1);
    }

    #[test]
    fn mvi_formats_immediate_operand() {
        let (text, size) = disasm_at(&[0x06, 0x55], 0);
        assert_eq!(text, "MVI\tB,#0x55");
        assert_eq!(size, 2);
    }

    #[test]
    fn lxi_formats_16bit_operand_as_single_hex_word() {
        let (text, size) = disasm_at(&[0x21, 0x34, 0x12], 0);
        assert_eq!(text, "LXI\tH,#0x1234");
        assert_eq!(size, 3);
    }

    #[test]
    fn jmp_and_undocumented_alias_share_mnemonic() {
        assert_eq!(disasm_at(&[0xC3, 0x00, 0x40], 0).0, "JMP\t$4000");
        assert_eq!(disasm_at(&[0xCB, 0x00, 0x40], 0).0, "JMP\t$4000");
    }

    #[test]
    fn direct_addressing_mnemonics_use_hash_dollar_prefix() {
        // LDA/STA/LHLD/SHLD render their address operand as `#$%04x`, unlike
        // the bare `$%04x` JMP/CALL/Jcond use.
        assert_eq!(disasm_at(&[0x3A, 0x00, 0x30], 0).0, "LDA\t#$3000");
        assert_eq!(disasm_at(&[0x32, 0x00, 0x30], 0).0, "STA\t#$3000");
        assert_eq!(disasm_at(&[0x2A, 0x00, 0x30], 0).0, "LHLD\t#$3000");
        assert_eq!(disasm_at(&[0x22, 0x00, 0x30], 0).0, "SHLD\t#$3000");
    }

    #[test]
    fn conditional_jump_uses_condition_suffix() {
        let (text, _) = disasm_at(&[0xCA, 0x00, 0x50], 0); // JZ
        assert_eq!(text, "JZ\t$5000");
    }

    #[test]
    fn rst_includes_vector_number() {
        assert_eq!(disasm_at(&[0xDF], 0).0, "RST\t3");
    }

    #[test]
    fn push_pop_psw_uses_psw_not_sp() {
        assert_eq!(disasm_at(&[0xF5], 0).0, "PUSH\tPSW");
        assert_eq!(disasm_at(&[0xF1], 0).0, "POP\tPSW");
    }

    #[test]
    fn truncated_operand_reads_as_zero_without_panicking() {
        let (text, size) = disasm_at(&[0x21], 0); // LXI H,d16 with no operand bytes
        assert_eq!(text, "LXI\tH,#0x0000");
        assert_eq!(size, 3);
    }

    #[test]
    fn every_opcode_decodes_without_panicking() {
        for opcode in 0..=255u8 {
            let (_, size) = disasm_at(&[opcode, 0, 0], 0);
            assert!((1..=3).contains(&size));
        }
    }
}
