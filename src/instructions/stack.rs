//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PHA, PHX, PHY, PHP: Push a register (PHP pushes the status with B set)
//! - PLA, PLX, PLY: Pull a register, updating Z and N
//! - PLP: Pull the status register
//!
//! The stack lives in page 1 (0x0100-0x01FF) and grows downward; SP wraps.

use super::Instruction;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Pushes `value` (PHA, PHX, PHY, PHP).
///
/// Cycle timing: 3 cycles
pub(crate) fn execute_push<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    value: u8,
) -> Result<u16, ExecutionError> {
    cpu.push(value);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.a = cpu.pull();
    cpu.p.update_nz(cpu.a);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_plx<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = cpu.pull();
    cpu.p.update_nz(cpu.x);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_ply<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.y = cpu.pull();
    cpu.p.update_nz(cpu.y);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes PLP (Pull Processor Status).
///
/// Every flag except B and U is replaced by the pulled byte; B and U keep their
/// live value.
///
/// Cycle timing: 4 cycles
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let pulled = cpu.pull();
    cpu.p.restore(pulled);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
