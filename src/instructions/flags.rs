//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear one flag. 2 cycles.
//!
//! A CLI takes effect at the next boundary: an IRQ already held low is serviced
//! right after it.

use super::Instruction;
use crate::{Cpu, ExecutionError, MemoryBus, StatusFlags};

pub(crate) fn execute_flag<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    inst: &Instruction,
    flag: StatusFlags,
    value: bool,
) -> Result<u16, ExecutionError> {
    cpu.p.set(flag, value);
    cpu.charge(inst.cycles())?;
    Ok(inst.next)
}
