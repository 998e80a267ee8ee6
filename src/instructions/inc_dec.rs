//! # Increment and Decrement Instructions
//!
//! INC/DEC work on memory or, new on the 65C02, on the accumulator (INC A, DEC A).
//! INX, INY, DEX and DEY work on the index registers. All of them wrap and update
//! only N and Z.

use super::{read_operand, write_operand, Instruction};
use crate::{Cpu, ExecutionError, MemoryBus};

pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let result = read_operand(cpu, inst.operand).wrapping_add(1);
    cpu.p.update_nz(result);
    write_operand(cpu, inst.operand, result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let result = read_operand(cpu, inst.operand).wrapping_sub(1);
    cpu.p.update_nz(result);
    write_operand(cpu, inst.operand, result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.p.update_nz(cpu.x);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.p.update_nz(cpu.y);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.p.update_nz(cpu.x);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.p.update_nz(cpu.y);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
