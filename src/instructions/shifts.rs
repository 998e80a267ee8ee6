//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR on the accumulator or on memory. All four are
//! read-modify-write: the bit shifted out lands in C, and N and Z follow the result.

use super::{read_operand, write_operand, Instruction};
use crate::{Cpu, ExecutionError, MemoryBus, StatusFlags};

fn modify<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    shift: impl FnOnce(u8, bool) -> (u8, bool),
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    let (result, carry) = shift(value, cpu.p.contains(StatusFlags::CARRY));

    cpu.p.set(StatusFlags::CARRY, carry);
    cpu.p.update_nz(result);
    write_operand(cpu, inst.operand, result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Arithmetic shift left: bit 7 to C, 0 into bit 0.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    modify(cpu, inst, |value, _| (value << 1, value & 0x80 != 0))
}

/// Logical shift right: bit 0 to C, 0 into bit 7.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    modify(cpu, inst, |value, _| (value >> 1, value & 0x01 != 0))
}

/// Rotate left through carry.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    modify(cpu, inst, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

/// Rotate right through carry.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    modify(cpu, inst, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}
