//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for decoding, execution and disassembly.
//!
//! The table covers:
//! - **180 WDC 65C02 opcodes**, including STZ, TRB, TSB, BRA, PHX/PHY/PLX/PLY,
//!   INC A/DEC A, the `(zp)` mode, STP and WAI
//! - **32 Rockwell bit opcodes** (RMBn, SMBn, BBRn, BBSn), run only when
//!   the Rockwell extensions are enabled
//! - **44 unimplemented slots** carrying the mnemonics the 65816 assigns them
//!
//! Each opcode entry includes:
//! - Mnemonic (instruction name)
//! - Addressing mode
//! - The `Operation` the executor dispatches on
//! - Base cycle cost, size in bytes and whether indexed reads pay a page-crossing cycle
//! - Implementation status flag
//!
//! Unimplemented slots keep the byte length and cycle cost the 65C02 actually
//! spends on them, so the no-op policy steps over them the way the silicon does.

use crate::addressing::AddressingMode;

/// What an opcode does, independent of how it addresses its operand.
///
/// The bit instructions carry the bit number they test or modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bbr(u8),
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rmb(u8),
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Smb(u8),
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
    Wai,
    /// No 65C02 semantics; handled by the unimplemented-opcode policy.
    Unimplemented,
}

impl Operation {
    /// True for the Rockwell bit instructions.
    pub const fn is_rockwell(self) -> bool {
        matches!(
            self,
            Operation::Bbr(_) | Operation::Bbs(_) | Operation::Rmb(_) | Operation::Smb(_)
        )
    }

    /// True for STP and WAI.
    pub const fn is_pausable(self) -> bool {
        matches!(self, Operation::Stp | Operation::Wai)
    }
}

/// Metadata for a single 65C02 opcode.
///
/// # Fields
///
/// - `mnemonic`: Instruction name (e.g., "LDA", "BBR3", or "COP" for a 65816-only slot)
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `operation`: What the executor does
/// - `base_cycles`: Minimum cycle cost (page-crossing, branch and decimal penalties added dynamically)
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `page_penalty`: Whether an indexed access crossing a page costs one more cycle
/// - `implemented`: False for slots without 65C02 semantics
///
/// # Examples
///
/// ```
/// use lib65c02::{OPCODE_TABLE, AddressingMode, Operation};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(lda_imm.implemented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Operation dispatched by the executor.
    pub operation: Operation,

    /// Base cycle cost (before page crossing penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Indexed reads pay +1 cycle when the effective address leaves the base page.
    pub page_penalty: bool,

    /// Whether this opcode has 65C02 semantics.
    pub implemented: bool,
}

impl OpcodeMetadata {
    const fn new(
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        operation: Operation,
        base_cycles: u8,
    ) -> Self {
        Self {
            mnemonic,
            addressing_mode,
            operation,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_len(),
            page_penalty: false,
            implemented: true,
        }
    }

    const fn paged(
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        operation: Operation,
        base_cycles: u8,
    ) -> Self {
        let mut metadata = Self::new(mnemonic, addressing_mode, operation, base_cycles);
        metadata.page_penalty = true;
        metadata
    }

    const fn stub(mnemonic: &'static str, size_bytes: u8, base_cycles: u8) -> Self {
        let addressing_mode = match size_bytes {
            1 => AddressingMode::Implicit,
            2 => AddressingMode::Immediate,
            _ => AddressingMode::Absolute,
        };
        Self {
            mnemonic,
            addressing_mode,
            operation: Operation::Unimplemented,
            base_cycles,
            size_bytes,
            page_penalty: false,
            implemented: false,
        }
    }
}

use AddressingMode as Mode;
use OpcodeMetadata as Meta;
use Operation as Op;

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use lib65c02::{Operation, OPCODE_TABLE};
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// // 65816-only slot
/// let cop = &OPCODE_TABLE[0x02];
/// assert_eq!(cop.mnemonic, "COP");
/// assert_eq!(cop.operation, Operation::Unimplemented);
/// assert_eq!((cop.size_bytes, cop.base_cycles), (2, 2));
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    Meta::new("BRK", Mode::Implicit, Op::Brk, 7),
    // 0x01
    Meta::new("ORA", Mode::IndirectX, Op::Ora, 6),
    // 0x02
    Meta::stub("COP", 2, 2),
    // 0x03
    Meta::stub("ORA", 1, 1),
    // 0x04
    Meta::new("TSB", Mode::ZeroPage, Op::Tsb, 5),
    // 0x05
    Meta::new("ORA", Mode::ZeroPage, Op::Ora, 3),
    // 0x06
    Meta::new("ASL", Mode::ZeroPage, Op::Asl, 5),
    // 0x07
    Meta::new("RMB0", Mode::ZeroPage, Op::Rmb(0), 5),
    // 0x08
    Meta::new("PHP", Mode::Implicit, Op::Php, 3),
    // 0x09
    Meta::new("ORA", Mode::Immediate, Op::Ora, 2),
    // 0x0A
    Meta::new("ASL", Mode::Accumulator, Op::Asl, 2),
    // 0x0B
    Meta::stub("PHD", 1, 1),
    // 0x0C
    Meta::new("TSB", Mode::Absolute, Op::Tsb, 6),
    // 0x0D
    Meta::new("ORA", Mode::Absolute, Op::Ora, 4),
    // 0x0E
    Meta::new("ASL", Mode::Absolute, Op::Asl, 6),
    // 0x0F
    Meta::new("BBR0", Mode::ZeroPageRelative, Op::Bbr(0), 5),
    // 0x10
    Meta::new("BPL", Mode::Relative, Op::Bpl, 2),
    // 0x11
    Meta::paged("ORA", Mode::IndirectY, Op::Ora, 5),
    // 0x12
    Meta::new("ORA", Mode::ZeroPageIndirect, Op::Ora, 5),
    // 0x13
    Meta::stub("ORA", 1, 1),
    // 0x14
    Meta::new("TRB", Mode::ZeroPage, Op::Trb, 5),
    // 0x15
    Meta::new("ORA", Mode::ZeroPageX, Op::Ora, 4),
    // 0x16
    Meta::new("ASL", Mode::ZeroPageX, Op::Asl, 6),
    // 0x17
    Meta::new("RMB1", Mode::ZeroPage, Op::Rmb(1), 5),
    // 0x18
    Meta::new("CLC", Mode::Implicit, Op::Clc, 2),
    // 0x19
    Meta::paged("ORA", Mode::AbsoluteY, Op::Ora, 4),
    // 0x1A
    Meta::new("INC", Mode::Accumulator, Op::Inc, 2),
    // 0x1B
    Meta::stub("TCS", 1, 1),
    // 0x1C
    Meta::new("TRB", Mode::Absolute, Op::Trb, 6),
    // 0x1D
    Meta::paged("ORA", Mode::AbsoluteX, Op::Ora, 4),
    // 0x1E
    Meta::paged("ASL", Mode::AbsoluteX, Op::Asl, 6),
    // 0x1F
    Meta::new("BBR1", Mode::ZeroPageRelative, Op::Bbr(1), 5),
    // 0x20
    Meta::new("JSR", Mode::Absolute, Op::Jsr, 6),
    // 0x21
    Meta::new("AND", Mode::IndirectX, Op::And, 6),
    // 0x22
    Meta::stub("JSL", 2, 2),
    // 0x23
    Meta::stub("AND", 1, 1),
    // 0x24
    Meta::new("BIT", Mode::ZeroPage, Op::Bit, 3),
    // 0x25
    Meta::new("AND", Mode::ZeroPage, Op::And, 3),
    // 0x26
    Meta::new("ROL", Mode::ZeroPage, Op::Rol, 5),
    // 0x27
    Meta::new("RMB2", Mode::ZeroPage, Op::Rmb(2), 5),
    // 0x28
    Meta::new("PLP", Mode::Implicit, Op::Plp, 4),
    // 0x29
    Meta::new("AND", Mode::Immediate, Op::And, 2),
    // 0x2A
    Meta::new("ROL", Mode::Accumulator, Op::Rol, 2),
    // 0x2B
    Meta::stub("PLD", 1, 1),
    // 0x2C
    Meta::new("BIT", Mode::Absolute, Op::Bit, 4),
    // 0x2D
    Meta::new("AND", Mode::Absolute, Op::And, 4),
    // 0x2E
    Meta::new("ROL", Mode::Absolute, Op::Rol, 6),
    // 0x2F
    Meta::new("BBR2", Mode::ZeroPageRelative, Op::Bbr(2), 5),
    // 0x30
    Meta::new("BMI", Mode::Relative, Op::Bmi, 2),
    // 0x31
    Meta::paged("AND", Mode::IndirectY, Op::And, 5),
    // 0x32
    Meta::new("AND", Mode::ZeroPageIndirect, Op::And, 5),
    // 0x33
    Meta::stub("AND", 1, 1),
    // 0x34
    Meta::new("BIT", Mode::ZeroPageX, Op::Bit, 4),
    // 0x35
    Meta::new("AND", Mode::ZeroPageX, Op::And, 4),
    // 0x36
    Meta::new("ROL", Mode::ZeroPageX, Op::Rol, 6),
    // 0x37
    Meta::new("RMB3", Mode::ZeroPage, Op::Rmb(3), 5),
    // 0x38
    Meta::new("SEC", Mode::Implicit, Op::Sec, 2),
    // 0x39
    Meta::paged("AND", Mode::AbsoluteY, Op::And, 4),
    // 0x3A
    Meta::new("DEC", Mode::Accumulator, Op::Dec, 2),
    // 0x3B
    Meta::stub("TSC", 1, 1),
    // 0x3C
    Meta::paged("BIT", Mode::AbsoluteX, Op::Bit, 4),
    // 0x3D
    Meta::paged("AND", Mode::AbsoluteX, Op::And, 4),
    // 0x3E
    Meta::paged("ROL", Mode::AbsoluteX, Op::Rol, 6),
    // 0x3F
    Meta::new("BBR3", Mode::ZeroPageRelative, Op::Bbr(3), 5),
    // 0x40
    Meta::new("RTI", Mode::Implicit, Op::Rti, 6),
    // 0x41
    Meta::new("EOR", Mode::IndirectX, Op::Eor, 6),
    // 0x42
    Meta::stub("WDM", 2, 2),
    // 0x43
    Meta::stub("EOR", 1, 1),
    // 0x44
    Meta::stub("MVP", 2, 3),
    // 0x45
    Meta::new("EOR", Mode::ZeroPage, Op::Eor, 3),
    // 0x46
    Meta::new("LSR", Mode::ZeroPage, Op::Lsr, 5),
    // 0x47
    Meta::new("RMB4", Mode::ZeroPage, Op::Rmb(4), 5),
    // 0x48
    Meta::new("PHA", Mode::Implicit, Op::Pha, 3),
    // 0x49
    Meta::new("EOR", Mode::Immediate, Op::Eor, 2),
    // 0x4A
    Meta::new("LSR", Mode::Accumulator, Op::Lsr, 2),
    // 0x4B
    Meta::stub("PHK", 1, 1),
    // 0x4C
    Meta::new("JMP", Mode::Absolute, Op::Jmp, 3),
    // 0x4D
    Meta::new("EOR", Mode::Absolute, Op::Eor, 4),
    // 0x4E
    Meta::new("LSR", Mode::Absolute, Op::Lsr, 6),
    // 0x4F
    Meta::new("BBR4", Mode::ZeroPageRelative, Op::Bbr(4), 5),
    // 0x50
    Meta::new("BVC", Mode::Relative, Op::Bvc, 2),
    // 0x51
    Meta::paged("EOR", Mode::IndirectY, Op::Eor, 5),
    // 0x52
    Meta::new("EOR", Mode::ZeroPageIndirect, Op::Eor, 5),
    // 0x53
    Meta::stub("EOR", 1, 1),
    // 0x54
    Meta::stub("MVN", 2, 4),
    // 0x55
    Meta::new("EOR", Mode::ZeroPageX, Op::Eor, 4),
    // 0x56
    Meta::new("LSR", Mode::ZeroPageX, Op::Lsr, 6),
    // 0x57
    Meta::new("RMB5", Mode::ZeroPage, Op::Rmb(5), 5),
    // 0x58
    Meta::new("CLI", Mode::Implicit, Op::Cli, 2),
    // 0x59
    Meta::paged("EOR", Mode::AbsoluteY, Op::Eor, 4),
    // 0x5A
    Meta::new("PHY", Mode::Implicit, Op::Phy, 3),
    // 0x5B
    Meta::stub("TCD", 1, 1),
    // 0x5C
    Meta::stub("JML", 3, 8),
    // 0x5D
    Meta::paged("EOR", Mode::AbsoluteX, Op::Eor, 4),
    // 0x5E
    Meta::paged("LSR", Mode::AbsoluteX, Op::Lsr, 6),
    // 0x5F
    Meta::new("BBR5", Mode::ZeroPageRelative, Op::Bbr(5), 5),
    // 0x60
    Meta::new("RTS", Mode::Implicit, Op::Rts, 6),
    // 0x61
    Meta::new("ADC", Mode::IndirectX, Op::Adc, 6),
    // 0x62
    Meta::stub("PER", 2, 2),
    // 0x63
    Meta::stub("ADC", 1, 1),
    // 0x64
    Meta::new("STZ", Mode::ZeroPage, Op::Stz, 3),
    // 0x65
    Meta::new("ADC", Mode::ZeroPage, Op::Adc, 3),
    // 0x66
    Meta::new("ROR", Mode::ZeroPage, Op::Ror, 5),
    // 0x67
    Meta::new("RMB6", Mode::ZeroPage, Op::Rmb(6), 5),
    // 0x68
    Meta::new("PLA", Mode::Implicit, Op::Pla, 4),
    // 0x69
    Meta::new("ADC", Mode::Immediate, Op::Adc, 2),
    // 0x6A
    Meta::new("ROR", Mode::Accumulator, Op::Ror, 2),
    // 0x6B
    Meta::stub("RTL", 1, 1),
    // 0x6C
    Meta::new("JMP", Mode::Indirect, Op::Jmp, 6),
    // 0x6D
    Meta::new("ADC", Mode::Absolute, Op::Adc, 4),
    // 0x6E
    Meta::new("ROR", Mode::Absolute, Op::Ror, 6),
    // 0x6F
    Meta::new("BBR6", Mode::ZeroPageRelative, Op::Bbr(6), 5),
    // 0x70
    Meta::new("BVS", Mode::Relative, Op::Bvs, 2),
    // 0x71
    Meta::paged("ADC", Mode::IndirectY, Op::Adc, 5),
    // 0x72
    Meta::new("ADC", Mode::ZeroPageIndirect, Op::Adc, 5),
    // 0x73
    Meta::stub("ADC", 1, 1),
    // 0x74
    Meta::new("STZ", Mode::ZeroPageX, Op::Stz, 4),
    // 0x75
    Meta::new("ADC", Mode::ZeroPageX, Op::Adc, 4),
    // 0x76
    Meta::new("ROR", Mode::ZeroPageX, Op::Ror, 6),
    // 0x77
    Meta::new("RMB7", Mode::ZeroPage, Op::Rmb(7), 5),
    // 0x78
    Meta::new("SEI", Mode::Implicit, Op::Sei, 2),
    // 0x79
    Meta::paged("ADC", Mode::AbsoluteY, Op::Adc, 4),
    // 0x7A
    Meta::new("PLY", Mode::Implicit, Op::Ply, 4),
    // 0x7B
    Meta::stub("TDC", 1, 1),
    // 0x7C
    Meta::new("JMP", Mode::AbsoluteIndexedIndirect, Op::Jmp, 6),
    // 0x7D
    Meta::paged("ADC", Mode::AbsoluteX, Op::Adc, 4),
    // 0x7E
    Meta::paged("ROR", Mode::AbsoluteX, Op::Ror, 6),
    // 0x7F
    Meta::new("BBR7", Mode::ZeroPageRelative, Op::Bbr(7), 5),
    // 0x80
    Meta::new("BRA", Mode::Relative, Op::Bra, 3),
    // 0x81
    Meta::new("STA", Mode::IndirectX, Op::Sta, 6),
    // 0x82
    Meta::stub("BRL", 2, 2),
    // 0x83
    Meta::stub("STA", 1, 1),
    // 0x84
    Meta::new("STY", Mode::ZeroPage, Op::Sty, 3),
    // 0x85
    Meta::new("STA", Mode::ZeroPage, Op::Sta, 3),
    // 0x86
    Meta::new("STX", Mode::ZeroPage, Op::Stx, 3),
    // 0x87
    Meta::new("SMB0", Mode::ZeroPage, Op::Smb(0), 5),
    // 0x88
    Meta::new("DEY", Mode::Implicit, Op::Dey, 2),
    // 0x89
    Meta::new("BIT", Mode::Immediate, Op::Bit, 2),
    // 0x8A
    Meta::new("TXA", Mode::Implicit, Op::Txa, 2),
    // 0x8B
    Meta::stub("PHB", 1, 1),
    // 0x8C
    Meta::new("STY", Mode::Absolute, Op::Sty, 4),
    // 0x8D
    Meta::new("STA", Mode::Absolute, Op::Sta, 4),
    // 0x8E
    Meta::new("STX", Mode::Absolute, Op::Stx, 4),
    // 0x8F
    Meta::new("BBS0", Mode::ZeroPageRelative, Op::Bbs(0), 5),
    // 0x90
    Meta::new("BCC", Mode::Relative, Op::Bcc, 2),
    // 0x91
    Meta::new("STA", Mode::IndirectY, Op::Sta, 6),
    // 0x92
    Meta::new("STA", Mode::ZeroPageIndirect, Op::Sta, 5),
    // 0x93
    Meta::stub("STA", 1, 1),
    // 0x94
    Meta::new("STY", Mode::ZeroPageX, Op::Sty, 4),
    // 0x95
    Meta::new("STA", Mode::ZeroPageX, Op::Sta, 4),
    // 0x96
    Meta::new("STX", Mode::ZeroPageY, Op::Stx, 4),
    // 0x97
    Meta::new("SMB1", Mode::ZeroPage, Op::Smb(1), 5),
    // 0x98
    Meta::new("TYA", Mode::Implicit, Op::Tya, 2),
    // 0x99
    Meta::new("STA", Mode::AbsoluteY, Op::Sta, 5),
    // 0x9A
    Meta::new("TXS", Mode::Implicit, Op::Txs, 2),
    // 0x9B
    Meta::stub("TXY", 1, 1),
    // 0x9C
    Meta::new("STZ", Mode::Absolute, Op::Stz, 4),
    // 0x9D
    Meta::new("STA", Mode::AbsoluteX, Op::Sta, 5),
    // 0x9E
    Meta::new("STZ", Mode::AbsoluteX, Op::Stz, 5),
    // 0x9F
    Meta::new("BBS1", Mode::ZeroPageRelative, Op::Bbs(1), 5),
    // 0xA0
    Meta::new("LDY", Mode::Immediate, Op::Ldy, 2),
    // 0xA1
    Meta::new("LDA", Mode::IndirectX, Op::Lda, 6),
    // 0xA2
    Meta::new("LDX", Mode::Immediate, Op::Ldx, 2),
    // 0xA3
    Meta::stub("LDA", 1, 1),
    // 0xA4
    Meta::new("LDY", Mode::ZeroPage, Op::Ldy, 3),
    // 0xA5
    Meta::new("LDA", Mode::ZeroPage, Op::Lda, 3),
    // 0xA6
    Meta::new("LDX", Mode::ZeroPage, Op::Ldx, 3),
    // 0xA7
    Meta::new("SMB2", Mode::ZeroPage, Op::Smb(2), 5),
    // 0xA8
    Meta::new("TAY", Mode::Implicit, Op::Tay, 2),
    // 0xA9
    Meta::new("LDA", Mode::Immediate, Op::Lda, 2),
    // 0xAA
    Meta::new("TAX", Mode::Implicit, Op::Tax, 2),
    // 0xAB
    Meta::stub("PLB", 1, 1),
    // 0xAC
    Meta::new("LDY", Mode::Absolute, Op::Ldy, 4),
    // 0xAD
    Meta::new("LDA", Mode::Absolute, Op::Lda, 4),
    // 0xAE
    Meta::new("LDX", Mode::Absolute, Op::Ldx, 4),
    // 0xAF
    Meta::new("BBS2", Mode::ZeroPageRelative, Op::Bbs(2), 5),
    // 0xB0
    Meta::new("BCS", Mode::Relative, Op::Bcs, 2),
    // 0xB1
    Meta::paged("LDA", Mode::IndirectY, Op::Lda, 5),
    // 0xB2
    Meta::new("LDA", Mode::ZeroPageIndirect, Op::Lda, 5),
    // 0xB3
    Meta::stub("LDA", 1, 1),
    // 0xB4
    Meta::new("LDY", Mode::ZeroPageX, Op::Ldy, 4),
    // 0xB5
    Meta::new("LDA", Mode::ZeroPageX, Op::Lda, 4),
    // 0xB6
    Meta::new("LDX", Mode::ZeroPageY, Op::Ldx, 4),
    // 0xB7
    Meta::new("SMB3", Mode::ZeroPage, Op::Smb(3), 5),
    // 0xB8
    Meta::new("CLV", Mode::Implicit, Op::Clv, 2),
    // 0xB9
    Meta::paged("LDA", Mode::AbsoluteY, Op::Lda, 4),
    // 0xBA
    Meta::new("TSX", Mode::Implicit, Op::Tsx, 2),
    // 0xBB
    Meta::stub("TYX", 1, 1),
    // 0xBC
    Meta::paged("LDY", Mode::AbsoluteX, Op::Ldy, 4),
    // 0xBD
    Meta::paged("LDA", Mode::AbsoluteX, Op::Lda, 4),
    // 0xBE
    Meta::paged("LDX", Mode::AbsoluteY, Op::Ldx, 4),
    // 0xBF
    Meta::new("BBS3", Mode::ZeroPageRelative, Op::Bbs(3), 5),
    // 0xC0
    Meta::new("CPY", Mode::Immediate, Op::Cpy, 2),
    // 0xC1
    Meta::new("CMP", Mode::IndirectX, Op::Cmp, 6),
    // 0xC2
    Meta::stub("REP", 2, 2),
    // 0xC3
    Meta::stub("CMP", 1, 1),
    // 0xC4
    Meta::new("CPY", Mode::ZeroPage, Op::Cpy, 3),
    // 0xC5
    Meta::new("CMP", Mode::ZeroPage, Op::Cmp, 3),
    // 0xC6
    Meta::new("DEC", Mode::ZeroPage, Op::Dec, 5),
    // 0xC7
    Meta::new("SMB4", Mode::ZeroPage, Op::Smb(4), 5),
    // 0xC8
    Meta::new("INY", Mode::Implicit, Op::Iny, 2),
    // 0xC9
    Meta::new("CMP", Mode::Immediate, Op::Cmp, 2),
    // 0xCA
    Meta::new("DEX", Mode::Implicit, Op::Dex, 2),
    // 0xCB
    Meta::new("WAI", Mode::Implicit, Op::Wai, 3),
    // 0xCC
    Meta::new("CPY", Mode::Absolute, Op::Cpy, 4),
    // 0xCD
    Meta::new("CMP", Mode::Absolute, Op::Cmp, 4),
    // 0xCE
    Meta::new("DEC", Mode::Absolute, Op::Dec, 6),
    // 0xCF
    Meta::new("BBS4", Mode::ZeroPageRelative, Op::Bbs(4), 5),
    // 0xD0
    Meta::new("BNE", Mode::Relative, Op::Bne, 2),
    // 0xD1
    Meta::paged("CMP", Mode::IndirectY, Op::Cmp, 5),
    // 0xD2
    Meta::new("CMP", Mode::ZeroPageIndirect, Op::Cmp, 5),
    // 0xD3
    Meta::stub("CMP", 1, 1),
    // 0xD4
    Meta::stub("PEI", 2, 4),
    // 0xD5
    Meta::new("CMP", Mode::ZeroPageX, Op::Cmp, 4),
    // 0xD6
    Meta::new("DEC", Mode::ZeroPageX, Op::Dec, 6),
    // 0xD7
    Meta::new("SMB5", Mode::ZeroPage, Op::Smb(5), 5),
    // 0xD8
    Meta::new("CLD", Mode::Implicit, Op::Cld, 2),
    // 0xD9
    Meta::paged("CMP", Mode::AbsoluteY, Op::Cmp, 4),
    // 0xDA
    Meta::new("PHX", Mode::Implicit, Op::Phx, 3),
    // 0xDB
    Meta::new("STP", Mode::Implicit, Op::Stp, 3),
    // 0xDC
    Meta::stub("JML", 3, 4),
    // 0xDD
    Meta::paged("CMP", Mode::AbsoluteX, Op::Cmp, 4),
    // 0xDE
    Meta::paged("DEC", Mode::AbsoluteX, Op::Dec, 6),
    // 0xDF
    Meta::new("BBS5", Mode::ZeroPageRelative, Op::Bbs(5), 5),
    // 0xE0
    Meta::new("CPX", Mode::Immediate, Op::Cpx, 2),
    // 0xE1
    Meta::new("SBC", Mode::IndirectX, Op::Sbc, 6),
    // 0xE2
    Meta::stub("SEP", 2, 2),
    // 0xE3
    Meta::stub("SBC", 1, 1),
    // 0xE4
    Meta::new("CPX", Mode::ZeroPage, Op::Cpx, 3),
    // 0xE5
    Meta::new("SBC", Mode::ZeroPage, Op::Sbc, 3),
    // 0xE6
    Meta::new("INC", Mode::ZeroPage, Op::Inc, 5),
    // 0xE7
    Meta::new("SMB6", Mode::ZeroPage, Op::Smb(6), 5),
    // 0xE8
    Meta::new("INX", Mode::Implicit, Op::Inx, 2),
    // 0xE9
    Meta::new("SBC", Mode::Immediate, Op::Sbc, 2),
    // 0xEA
    Meta::new("NOP", Mode::Implicit, Op::Nop, 2),
    // 0xEB
    Meta::stub("XBA", 1, 1),
    // 0xEC
    Meta::new("CPX", Mode::Absolute, Op::Cpx, 4),
    // 0xED
    Meta::new("SBC", Mode::Absolute, Op::Sbc, 4),
    // 0xEE
    Meta::new("INC", Mode::Absolute, Op::Inc, 6),
    // 0xEF
    Meta::new("BBS6", Mode::ZeroPageRelative, Op::Bbs(6), 5),
    // 0xF0
    Meta::new("BEQ", Mode::Relative, Op::Beq, 2),
    // 0xF1
    Meta::paged("SBC", Mode::IndirectY, Op::Sbc, 5),
    // 0xF2
    Meta::new("SBC", Mode::ZeroPageIndirect, Op::Sbc, 5),
    // 0xF3
    Meta::stub("SBC", 1, 1),
    // 0xF4
    Meta::stub("PEA", 2, 4),
    // 0xF5
    Meta::new("SBC", Mode::ZeroPageX, Op::Sbc, 4),
    // 0xF6
    Meta::new("INC", Mode::ZeroPageX, Op::Inc, 6),
    // 0xF7
    Meta::new("SMB7", Mode::ZeroPage, Op::Smb(7), 5),
    // 0xF8
    Meta::new("SED", Mode::Implicit, Op::Sed, 2),
    // 0xF9
    Meta::paged("SBC", Mode::AbsoluteY, Op::Sbc, 4),
    // 0xFA
    Meta::new("PLX", Mode::Implicit, Op::Plx, 4),
    // 0xFB
    Meta::stub("XCE", 1, 1),
    // 0xFC
    Meta::stub("JSR", 3, 4),
    // 0xFD
    Meta::paged("SBC", Mode::AbsoluteX, Op::Sbc, 4),
    // 0xFE
    Meta::paged("INC", Mode::AbsoluteX, Op::Inc, 6),
    // 0xFF
    Meta::new("BBS7", Mode::ZeroPageRelative, Op::Bbs(7), 5),
];
