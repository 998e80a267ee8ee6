//! 65C02 Disassembler Module
//!
//! Turns machine code back into assembly text, driven by `OPCODE_TABLE`.
//! Opcodes the 65C02 does not implement come out as `.byte` directives, as do
//! instructions cut short by the end of the input.

pub mod decoder;
pub mod formatter;

pub use decoder::decode_instruction;
pub use formatter::format_instruction;

use crate::addressing::AddressingMode;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "BBR3", ".byte")
    pub mnemonic: &'static str,

    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing and branch penalties)
    pub base_cycles: u8,
}

impl Instruction {
    /// A one-byte `.byte` directive for an opcode that does not decode.
    pub fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
        }
    }

    pub fn is_data(&self) -> bool {
        self.mnemonic == ".byte"
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte (affects addresses and branch targets)
    pub start_address: u16,

    /// Prefix each line with the instruction's raw bytes
    pub hex_dump: bool,

    /// Prefix each line with its address
    pub show_offsets: bool,
}

/// Disassemble a byte slice into a vector of instructions
///
/// # Examples
///
/// ```
/// use lib65c02::disassembler::{disassemble, format_instruction, DisassemblyOptions};
///
/// let options = DisassemblyOptions { start_address: 0x0200, ..Default::default() };
/// let listing: Vec<String> = disassemble(&[0x0F, 0x12, 0xFD, 0x02], options)
///     .iter()
///     .map(format_instruction)
///     .collect();
///
/// assert_eq!(listing, vec!["BBR0 $12,$0200", ".byte $02"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[pc]));
        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Disassembles `bytes` into listing lines, honouring the display options.
pub fn listing(bytes: &[u8], options: DisassemblyOptions) -> Vec<String> {
    disassemble(bytes, options)
        .iter()
        .map(|instr| formatter::format_line(instr, &options))
        .collect()
}
