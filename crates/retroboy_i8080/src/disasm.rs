//! Static opcode metadata and a one-instruction disassembler.
//!
//! Operand placeholders in the mnemonics: `d8` is an immediate byte, `d16`
//! an immediate word and `a16` an absolute address. Undocumented aliases are
//! prefixed with `*`.

/// Mnemonic and encoded length of one opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub mnemonic: &'static str,
    /// Total instruction length in bytes, opcode included (1 to 3).
    pub len: u8,
}

const fn op(mnemonic: &'static str, len: u8) -> OpInfo {
    OpInfo { mnemonic, len }
}

/// Opcode metadata indexed by opcode byte.
pub static OPCODES: [OpInfo; 256] = [
    op("NOP", 1), // 00
    op("LXI B,d16", 3), // 01
    op("STAX B", 1), // 02
    op("INX B", 1), // 03
    op("INR B", 1), // 04
    op("DCR B", 1), // 05
    op("MVI B,d8", 2), // 06
    op("RLC", 1), // 07
    op("*NOP", 1), // 08
    op("DAD B", 1), // 09
    op("LDAX B", 1), // 0A
    op("DCX B", 1), // 0B
    op("INR C", 1), // 0C
    op("DCR C", 1), // 0D
    op("MVI C,d8", 2), // 0E
    op("RRC", 1), // 0F
    op("*NOP", 1), // 10
    op("LXI D,d16", 3), // 11
    op("STAX D", 1), // 12
    op("INX D", 1), // 13
    op("INR D", 1), // 14
    op("DCR D", 1), // 15
    op("MVI D,d8", 2), // 16
    op("RAL", 1), // 17
    op("*NOP", 1), // 18
    op("DAD D", 1), // 19
    op("LDAX D", 1), // 1A
    op("DCX D", 1), // 1B
    op("INR E", 1), // 1C
    op("DCR E", 1), // 1D
    op("MVI E,d8", 2), // 1E
    op("RAR", 1), // 1F
    op("*NOP", 1), // 20
    op("LXI H,d16", 3), // 21
    op("SHLD a16", 3), // 22
    op("INX H", 1), // 23
    op("INR H", 1), // 24
    op("DCR H", 1), // 25
    op("MVI H,d8", 2), // 26
    op("DAA", 1), // 27
    op("*NOP", 1), // 28
    op("DAD H", 1), // 29
    op("LHLD a16", 3), // 2A
    op("DCX H", 1), // 2B
    op("INR L", 1), // 2C
    op("DCR L", 1), // 2D
    op("MVI L,d8", 2), // 2E
    op("CMA", 1), // 2F
    op("*NOP", 1), // 30
    op("LXI SP,d16", 3), // 31
    op("STA a16", 3), // 32
    op("INX SP", 1), // 33
    op("INR M", 1), // 34
    op("DCR M", 1), // 35
    op("MVI M,d8", 2), // 36
    op("STC", 1), // 37
    op("*NOP", 1), // 38
    op("DAD SP", 1), // 39
    op("LDA a16", 3), // 3A
    op("DCX SP", 1), // 3B
    op("INR A", 1), // 3C
    op("DCR A", 1), // 3D
    op("MVI A,d8", 2), // 3E
    op("CMC", 1), // 3F
    op("MOV B,B", 1), // 40
    op("MOV B,C", 1), // 41
    op("MOV B,D", 1), // 42
    op("MOV B,E", 1), // 43
    op("MOV B,H", 1), // 44
    op("MOV B,L", 1), // 45
    op("MOV B,M", 1), // 46
    op("MOV B,A", 1), // 47
    op("MOV C,B", 1), // 48
    op("MOV C,C", 1), // 49
    op("MOV C,D", 1), // 4A
    op("MOV C,E", 1), // 4B
    op("MOV C,H", 1), // 4C
    op("MOV C,L", 1), // 4D
    op("MOV C,M", 1), // 4E
    op("MOV C,A", 1), // 4F
    op("MOV D,B", 1), // 50
    op("MOV D,C", 1), // 51
    op("MOV D,D", 1), // 52
    op("MOV D,E", 1), // 53
    op("MOV D,H", 1), // 54
    op("MOV D,L", 1), // 55
    op("MOV D,M", 1), // 56
    op("MOV D,A", 1), // 57
    op("MOV E,B", 1), // 58
    op("MOV E,C", 1), // 59
    op("MOV E,D", 1), // 5A
    op("MOV E,E", 1), // 5B
    op("MOV E,H", 1), // 5C
    op("MOV E,L", 1), // 5D
    op("MOV E,M", 1), // 5E
    op("MOV E,A", 1), // 5F
    op("MOV H,B", 1), // 60
    op("MOV H,C", 1), // 61
    op("MOV H,D", 1), // 62
    op("MOV H,E", 1), // 63
    op("MOV H,H", 1), // 64
    op("MOV H,L", 1), // 65
    op("MOV H,M", 1), // 66
    op("MOV H,A", 1), // 67
    op("MOV L,B", 1), // 68
    op("MOV L,C", 1), // 69
    op("MOV L,D", 1), // 6A
    op("MOV L,E", 1), // 6B
    op("MOV L,H", 1), // 6C
    op("MOV L,L", 1), // 6D
    op("MOV L,M", 1), // 6E
    op("MOV L,A", 1), // 6F
    op("MOV M,B", 1), // 70
    op("MOV M,C", 1), // 71
    op("MOV M,D", 1), // 72
    op("MOV M,E", 1), // 73
    op("MOV M,H", 1), // 74
    op("MOV M,L", 1), // 75
    op("HLT", 1), // 76
    op("MOV M,A", 1), // 77
    op("MOV A,B", 1), // 78
    op("MOV A,C", 1), // 79
    op("MOV A,D", 1), // 7A
    op("MOV A,E", 1), // 7B
    op("MOV A,H", 1), // 7C
    op("MOV A,L", 1), // 7D
    op("MOV A,M", 1), // 7E
    op("MOV A,A", 1), // 7F
    op("ADD B", 1), // 80
    op("ADD C", 1), // 81
    op("ADD D", 1), // 82
    op("ADD E", 1), // 83
    op("ADD H", 1), // 84
    op("ADD L", 1), // 85
    op("ADD M", 1), // 86
    op("ADD A", 1), // 87
    op("ADC B", 1), // 88
    op("ADC C", 1), // 89
    op("ADC D", 1), // 8A
    op("ADC E", 1), // 8B
    op("ADC H", 1), // 8C
    op("ADC L", 1), // 8D
    op("ADC M", 1), // 8E
    op("ADC A", 1), // 8F
    op("SUB B", 1), // 90
    op("SUB C", 1), // 91
    op("SUB D", 1), // 92
    op("SUB E", 1), // 93
    op("SUB H", 1), // 94
    op("SUB L", 1), // 95
    op("SUB M", 1), // 96
    op("SUB A", 1), // 97
    op("SBB B", 1), // 98
    op("SBB C", 1), // 99
    op("SBB D", 1), // 9A
    op("SBB E", 1), // 9B
    op("SBB H", 1), // 9C
    op("SBB L", 1), // 9D
    op("SBB M", 1), // 9E
    op("SBB A", 1), // 9F
    op("ANA B", 1), // A0
    op("ANA C", 1), // A1
    op("ANA D", 1), // A2
    op("ANA E", 1), // A3
    op("ANA H", 1), // A4
    op("ANA L", 1), // A5
    op("ANA M", 1), // A6
    op("ANA A", 1), // A7
    op("XRA B", 1), // A8
    op("XRA C", 1), // A9
    op("XRA D", 1), // AA
    op("XRA E", 1), // AB
    op("XRA H", 1), // AC
    op("XRA L", 1), // AD
    op("XRA M", 1), // AE
    op("XRA A", 1), // AF
    op("ORA B", 1), // B0
    op("ORA C", 1), // B1
    op("ORA D", 1), // B2
    op("ORA E", 1), // B3
    op("ORA H", 1), // B4
    op("ORA L", 1), // B5
    op("ORA M", 1), // B6
    op("ORA A", 1), // B7
    op("CMP B", 1), // B8
    op("CMP C", 1), // B9
    op("CMP D", 1), // BA
    op("CMP E", 1), // BB
    op("CMP H", 1), // BC
    op("CMP L", 1), // BD
    op("CMP M", 1), // BE
    op("CMP A", 1), // BF
    op("RNZ", 1), // C0
    op("POP B", 1), // C1
    op("JNZ a16", 3), // C2
    op("JMP a16", 3), // C3
    op("CNZ a16", 3), // C4
    op("PUSH B", 1), // C5
    op("ADI d8", 2), // C6
    op("RST 0", 1), // C7
    op("RZ", 1), // C8
    op("RET", 1), // C9
    op("JZ a16", 3), // CA
    op("*JMP a16", 3), // CB
    op("CZ a16", 3), // CC
    op("CALL a16", 3), // CD
    op("ACI d8", 2), // CE
    op("RST 1", 1), // CF
    op("RNC", 1), // D0
    op("POP D", 1), // D1
    op("JNC a16", 3), // D2
    op("OUT d8", 2), // D3
    op("CNC a16", 3), // D4
    op("PUSH D", 1), // D5
    op("SUI d8", 2), // D6
    op("RST 2", 1), // D7
    op("RC", 1), // D8
    op("*RET", 1), // D9
    op("JC a16", 3), // DA
    op("IN d8", 2), // DB
    op("CC a16", 3), // DC
    op("*CALL a16", 3), // DD
    op("SBI d8", 2), // DE
    op("RST 3", 1), // DF
    op("RPO", 1), // E0
    op("POP H", 1), // E1
    op("JPO a16", 3), // E2
    op("XTHL", 1), // E3
    op("CPO a16", 3), // E4
    op("PUSH H", 1), // E5
    op("ANI d8", 2), // E6
    op("RST 4", 1), // E7
    op("RPE", 1), // E8
    op("PCHL", 1), // E9
    op("JPE a16", 3), // EA
    op("XCHG", 1), // EB
    op("CPE a16", 3), // EC
    op("*CALL a16", 3), // ED
    op("XRI d8", 2), // EE
    op("RST 5", 1), // EF
    op("RP", 1), // F0
    op("POP PSW", 1), // F1
    op("JP a16", 3), // F2
    op("DI", 1), // F3
    op("CP a16", 3), // F4
    op("PUSH PSW", 1), // F5
    op("ORI d8", 2), // F6
    op("RST 6", 1), // F7
    op("RM", 1), // F8
    op("SPHL", 1), // F9
    op("JM a16", 3), // FA
    op("EI", 1), // FB
    op("CM a16", 3), // FC
    op("*CALL a16", 3), // FD
    op("CPI d8", 2), // FE
    op("RST 7", 1), // FF
];

/// Look up metadata for `opcode`.
#[inline]
pub fn info(opcode: u8) -> OpInfo {
    OPCODES[opcode as usize]
}

/// Disassemble the instruction at `addr`.
///
/// Operand bytes are read with 16-bit wraparound. Returns the rendered text
/// and the instruction length.
pub fn disassemble(memory: &[u8], addr: u16) -> (String, u8) {
    let byte = |offset: u16| -> u8 {
        memory
            .get(addr.wrapping_add(offset) as usize)
            .copied()
            .unwrap_or(0)
    };
    let info = info(byte(0));

    let text = match info.len {
        2 => info.mnemonic.replace("d8", &format!("${:02X}", byte(1))),
        3 => {
            let word = u16::from_le_bytes([byte(1), byte(2)]);
            let operand = format!("${word:04X}");
            info.mnemonic
                .replace("d16", &operand)
                .replace("a16", &operand)
        }
        _ => info.mnemonic.to_string(),
    };

    (text, info.len)
}
