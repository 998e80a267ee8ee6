//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: Add/subtract with carry, binary or decimal
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//! - TRB, TSB: Test and reset/set memory bits against the accumulator

use super::{read_operand, write_operand, Instruction};
use crate::addressing::Operand;
use crate::{arithmetic, Cpu, ExecutionError, MemoryBus, StatusFlags};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator through the
/// arithmetic engine, which honours decimal mode.
///
/// Cycle timing: base cycles, +1 on an indexed page crossing, +1 in decimal mode.
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    let decimal = cpu.p.contains(StatusFlags::DECIMAL);

    cpu.a = arithmetic::add(cpu.a, value, &mut cpu.p);

    cpu.charge(inst.cycles() + decimal as u64)?;
    Ok(inst.next)
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the inverted carry (borrow) from the accumulator.
///
/// Cycle timing: base cycles, +1 on an indexed page crossing, +1 in decimal mode.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    let decimal = cpu.p.contains(StatusFlags::DECIMAL);

    cpu.a = arithmetic::subtract(cpu.a, value, &mut cpu.p);

    cpu.charge(inst.cycles() + decimal as u64)?;
    Ok(inst.next)
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    cpu.a &= value;
    cpu.p.update_nz(cpu.a);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    cpu.a |= value;
    cpu.p.update_nz(cpu.a);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    cpu.a ^= value;
    cpu.p.update_nz(cpu.a);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes CMP, CPX or CPY against `register`.
///
/// # Flag Behavior
///
/// - Carry (C): Set if register >= operand (unsigned)
/// - Zero (Z): Set if register == operand
/// - Negative (N): Bit 7 of (register - operand)
pub(crate) fn execute_compare<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    register: u8,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    let result = register.wrapping_sub(value);

    cpu.p.set(StatusFlags::CARRY, register >= value);
    cpu.p.update_nz(result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from A & operand. The memory forms also copy operand bits 7 and 6
/// into N and V; BIT #imm touches Z only.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);

    cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
    if !matches!(inst.operand, Operand::Immediate(_)) {
        cpu.p.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
        cpu.p.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
    }

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes TRB (Test and Reset Bits): Z from A & M, then M &= !A.
pub(crate) fn execute_trb<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
    let result = value & !cpu.a;
    write_operand(cpu, inst.operand, result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes TSB (Test and Set Bits): Z from A & M, then M |= A.
pub(crate) fn execute_tsb<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let value = read_operand(cpu, inst.operand);
    cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
    let result = value | cpu.a;
    write_operand(cpu, inst.operand, result);

    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
