//! Formatting functions for disassembled instructions

use crate::addressing::{branch_target, AddressingMode};
use crate::disassembler::{DisassemblyOptions, Instruction};

/// Format a single instruction as assembly text
///
/// Branch operands are shown as their resolved target address.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// One listing line: optional address and raw bytes, then the instruction.
pub fn format_line(instr: &Instruction, options: &DisassemblyOptions) -> String {
    let mut line = String::new();

    if options.show_offsets {
        line.push_str(&format!("${:04X}  ", instr.address));
    }
    if options.hex_dump {
        let bytes: Vec<String> = std::iter::once(instr.opcode)
            .chain(instr.operand_bytes.iter().copied())
            .map(|byte| format!("{:02X}", byte))
            .collect();
        line.push_str(&format!("{:<10}", bytes.join(" ")));
    }

    line.push_str(&format_instruction(instr));
    line
}

fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.is_data() {
        return format!("${:02X}", instr.opcode);
    }

    let bytes = instr.operand_bytes.as_slice();
    let byte = || bytes.first().map(|b| format!("${:02X}", b));
    let word = || match bytes {
        [lo, hi, ..] => Some(format!("${:04X}", u16::from_le_bytes([*lo, *hi]))),
        _ => None,
    };
    // Branch displacements count from the end of the instruction.
    let target = |offset: u8| {
        let next = instr.address.wrapping_add(instr.size_bytes as u16);
        format!("${:04X}", branch_target(next, offset))
    };

    let operand = match instr.addressing_mode {
        Implicit => Some(String::new()),
        Accumulator => Some("A".to_string()),
        Immediate => byte().map(|b| format!("#{}", b)),
        ZeroPage => byte(),
        ZeroPageX => byte().map(|b| format!("{},X", b)),
        ZeroPageY => byte().map(|b| format!("{},Y", b)),
        ZeroPageIndirect => byte().map(|b| format!("({})", b)),
        Relative => bytes.first().map(|offset| target(*offset)),
        ZeroPageRelative => match bytes {
            [zp, offset, ..] => Some(format!("${:02X},{}", zp, target(*offset))),
            _ => None,
        },
        Absolute => word(),
        AbsoluteX => word().map(|w| format!("{},X", w)),
        AbsoluteY => word().map(|w| format!("{},Y", w)),
        Indirect => word().map(|w| format!("({})", w)),
        AbsoluteIndexedIndirect => word().map(|w| format!("({},X)", w)),
        IndirectX => byte().map(|b| format!("({},X)", b)),
        IndirectY => byte().map(|b| format!("({}),Y", b)),
    };

    operand.unwrap_or_else(|| "?".to_string())
}
