//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute, indirect, absolute indexed indirect)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - BRK: Software interrupt
//! - NOP
//! - STP / WAI: Stop the clock, wait for an interrupt
//! - The unimplemented-opcode policy
//!
//! BRK goes through the same service path as a hardware interrupt:
//! 1. Pushes the address of its opcode + 2 (high byte first, then low byte)
//! 2. Pushes the processor status with B set
//! 3. Sets I and clears D
//! 4. Loads the PC from the IRQ/BRK vector at $FFFE/F

use tracing::{debug, warn};

use super::Instruction;
use crate::addressing::Operand;
use crate::cpu::IRQ_VECTOR;
use crate::{Cpu, ExecutionError, MemoryBus, StatusFlags, UnimplementedPolicy};

fn jump_target(inst: &Instruction) -> u16 {
    match inst.operand {
        Operand::Memory { address, .. } => address,
        _ => inst.next,
    }
}

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234, 3 cycles
/// - Indirect (0x6C): JMP ($1234), 6 cycles
/// - Absolute indexed indirect (0x7C): JMP ($1234,X), 6 cycles
///
/// Unlike the NMOS part, the 65C02 reads an indirect pointer at $xxFF from
/// $xxFF and the first byte of the next page.
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.charge(inst.cycles())?;
    Ok(jump_target(inst))
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR (opcode + 2), then jumps.
/// RTS adds one to the pulled address.
///
/// Cycle timing: 6 cycles
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.push_u16(inst.address.wrapping_add(2));
    cpu.charge(inst.cycles())?;
    Ok(jump_target(inst))
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let target = cpu.pull_u16().wrapping_add(1);
    cpu.charge(inst.cycles())?;
    Ok(target)
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status (U and B come back set whatever the stacked copy held), then
/// the PC low and high bytes. No +1 adjustment, unlike RTS.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let status = cpu.pull();
    cpu.p = StatusFlags::from_bits_retain(status) | StatusFlags::PINNED;
    let target = cpu.pull_u16();

    cpu.charge(inst.cycles())?;
    Ok(target)
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    debug!(pc = inst.address, "BRK");
    cpu.pc = inst.address.wrapping_add(2);
    let status = cpu.p.pushed_by_software();
    cpu.service_interrupt(IRQ_VECTOR, status)?;
    Ok(cpu.pc)
}

pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}

/// Executes STP (Stop the Clock).
///
/// Charges 3 cycles, then blocks the run loop until a reset request arrives or the
/// processor loses power. The reset itself is serviced at the next boundary.
pub(crate) fn execute_stp<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.charge(inst.cycles())?;
    debug!(pc = inst.address, "STP: clock stopped");
    cpu.signals
        .wait_while(|s| s.powered() && !s.reset_requested())?;
    cpu.resync_pacer();
    Ok(inst.next)
}

/// Executes WAI (Wait for Interrupt).
///
/// Charges 3 cycles, then blocks until a reset request, an NMI request or a low
/// IRQ line. A low IRQ line releases WAI even with I set; in that case execution
/// simply resumes after the WAI.
pub(crate) fn execute_wai<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    cpu.charge(inst.cycles())?;
    debug!(pc = inst.address, "WAI: waiting for interrupt");
    cpu.signals.wait_while(|s| {
        s.powered() && !s.reset_requested() && !s.nmi_requested() && !s.irq_asserted()
    })?;
    cpu.resync_pacer();
    Ok(inst.next)
}

/// Applies the unimplemented-opcode policy to the opcode at `address`.
///
/// `Fail` stops with `UnimplementedOpcode`; `Nop` skips `size` bytes and charges
/// `cycles` cycles.
pub(crate) fn execute_unimplemented<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    opcode: u8,
    address: u16,
    size: u8,
    cycles: u8,
) -> Result<u16, ExecutionError> {
    if cpu.signals.unimplemented_policy() == UnimplementedPolicy::Fail {
        return Err(ExecutionError::UnimplementedOpcode { opcode, address });
    }

    warn!(
        "Unimplemented instruction at ${:04x}: ${:02x}, skipped as NOP",
        address, opcode
    );
    cpu.charge(cycles as u64)?;
    Ok(address.wrapping_add(size as u16))
}
