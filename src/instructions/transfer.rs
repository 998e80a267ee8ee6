//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update Z and N.
//! TXS copies X into the stack pointer and leaves the flags alone.

use super::Instruction;
use crate::{Cpu, ExecutionError, MemoryBus};

pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = cpu.a;
    cpu.p.update_nz(cpu.x);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.y = cpu.a;
    cpu.p.update_nz(cpu.y);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.a = cpu.x;
    cpu.p.update_nz(cpu.a);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.a = cpu.y;
    cpu.p.update_nz(cpu.a);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = cpu.sp;
    cpu.p.update_nz(cpu.x);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// TXS does not touch the flags.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.sp = cpu.x;
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
