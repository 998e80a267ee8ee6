//! Instruction decoder for the 65C02 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Returns
///
/// None when the opcode has no 65C02 semantics or the slice ends before the
/// instruction does.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = OPCODE_TABLE[opcode as usize];

    if !metadata.implemented {
        return None;
    }

    let operand_len = (metadata.size_bytes - 1) as usize;
    let operand_bytes = rest.get(..operand_len)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;

    #[test]
    fn test_decode_lda_immediate() {
        let instr = decode_instruction(&[0xA9, 0x42], 0x8000).unwrap();

        assert_eq!(instr.address, 0x8000);
        assert_eq!(instr.opcode, 0xA9);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.size_bytes, 2);
    }

    #[test]
    fn test_decode_zero_page_indirect() {
        let instr = decode_instruction(&[0xB2, 0x20], 0x0000).unwrap();

        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::ZeroPageIndirect);
        assert_eq!(instr.base_cycles, 5);
    }

    #[test]
    fn test_decode_bit_branch() {
        let instr = decode_instruction(&[0xFF, 0x10, 0x05], 0x0400).unwrap();

        assert_eq!(instr.mnemonic, "BBS7");
        assert_eq!(instr.addressing_mode, AddressingMode::ZeroPageRelative);
        assert_eq!(instr.operand_bytes, vec![0x10, 0x05]);
        assert_eq!(instr.size_bytes, 3);
    }

    #[test]
    fn test_unimplemented_opcode_does_not_decode() {
        assert!(decode_instruction(&[0x02, 0x00], 0x0000).is_none());
        assert!(decode_instruction(&[0xFC, 0x00, 0x00], 0x0000).is_none());
    }

    #[test]
    fn test_short_slice_does_not_decode() {
        assert!(decode_instruction(&[], 0x0000).is_none());
        assert!(decode_instruction(&[0x8D, 0x00], 0x0000).is_none());
    }
}
