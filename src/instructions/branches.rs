//! # Branch Instructions
//!
//! The eight conditional branches test a single flag; BRA always branches.
//! The condition is evaluated by the dispatcher and passed in.
//!
//! Cycle timing:
//! - Not taken: 2 cycles
//! - Taken: 3 cycles, 4 when the target lies in a different page than the
//!   instruction that follows the branch
//! - BRA: 3 cycles, 4 on a page crossing

use super::Instruction;
use crate::addressing::Operand;
use crate::{Cpu, ExecutionError, MemoryBus};

fn target(inst: &Instruction) -> (u16, bool) {
    match inst.operand {
        Operand::Branch {
            target,
            page_crossed,
        } => (target, page_crossed),
        _ => (inst.next, false),
    }
}

/// Executes BCC, BCS, BEQ, BNE, BMI, BPL, BVC or BVS.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    taken: bool,
) -> Result<u16, ExecutionError> {
    let base = inst.meta.base_cycles as u64;
    if !taken {
        cpu.charge(base)?;
        return Ok(inst.next);
    }

    let (target, page_crossed) = target(inst);
    cpu.charge(base + 1 + page_crossed as u64)?;
    Ok(target)
}

/// Executes BRA (Branch Always).
pub(crate) fn execute_bra<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
) -> Result<u16, ExecutionError> {
    let (target, page_crossed) = target(inst);
    cpu.charge(inst.meta.base_cycles as u64 + page_crossed as u64)?;
    Ok(target)
}
