//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA, STX, STY: Store a register
//! - STZ: Store Zero
//!
//! Stores never pay the page-crossing cycle, so their table entries carry no
//! page penalty and their cost is the base cycle count.

use super::{read_operand, Instruction};
use crate::addressing::Operand;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.a = read_operand(cpu, inst.operand);
    cpu.p.update_nz(cpu.a);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes the LDX (Load X Register) instruction. Updates Z and N.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = read_operand(cpu, inst.operand);
    cpu.p.update_nz(cpu.x);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes the LDY (Load Y Register) instruction. Updates Z and N.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.y = read_operand(cpu, inst.operand);
    cpu.p.update_nz(cpu.y);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Stores `value` at the effective address (STA, STX, STY, STZ).
///
/// Flags affected: None
pub(crate) fn execute_store<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    value: u8,
) -> Result<u16, ExecutionError> {
    if let Operand::Memory { address, .. } = inst.operand {
        cpu.memory.write(address, value);
    }

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
