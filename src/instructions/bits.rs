//! # Rockwell Bit Instructions
//!
//! RMBn/SMBn clear or set bit n of a page-zero byte. BBRn/BBSn test bit n of a
//! page-zero byte and branch relative to the address after the three-byte
//! instruction. All cost 5 cycles and touch no flags.
//!
//! The dispatcher only gets here with the Rockwell extensions enabled.

use super::{read_operand, write_operand, Instruction};
use crate::addressing::Operand;
use crate::{Cpu, ExecutionError, MemoryBus};

pub(crate) fn execute_rmb<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    bit: u8,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand) & !(1 << bit);
    write_operand(cpu, inst.operand, value);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_smb<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    bit: u8,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand) | (1 << bit);
    write_operand(cpu, inst.operand, value);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Branch if bit `bit` is reset.
pub(crate) fn execute_bbr<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    bit: u8,
) -> Result<u16, ExecutionError> {
    bit_branch(cpu, inst, bit, false)
}

/// Branch if bit `bit` is set.
pub(crate) fn execute_bbs<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    bit: u8,
) -> Result<u16, ExecutionError> {
    bit_branch(cpu, inst, bit, true)
}

fn bit_branch<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    bit: u8,
    branch_if_set: bool,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    let is_set = value & (1 << bit) != 0;

    cpu.charge(inst.cycles())?;
    match inst.operand {
        Operand::BitBranch { target, .. } if is_set == branch_if_set => Ok(target),
        _ => Ok(inst.next),
    }
}
