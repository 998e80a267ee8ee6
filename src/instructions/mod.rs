//! # 65C02 Instruction Implementations
//!
//! This module contains the implementations of all 65C02 instructions, organized by category.
//! [`execute`] decodes one opcode through `OPCODE_TABLE`, resolves its operand and hands
//! a decoded [`Instruction`] to the family function, which charges its cycles and
//! returns the address of the next instruction.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT, TRB, TSB)
//! - **bits**: Rockwell bit operations (RMBn, SMBn, BBRn, BBSn)
//! - **branches**: Conditional branches and BRA
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP, STP, WAI)
//! - **stack**: Stack operations (PHA, PHP, PHX, PHY, PLA, PLP, PLX, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod bits;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::addressing::{self, Operand};
use crate::{Cpu, ExecutionError, MemoryBus, OpcodeMetadata, Operation, StatusFlags, OPCODE_TABLE};

/// Opcode slots switched off by configuration cost one byte and one cycle.
const DISABLED_SIZE: u8 = 1;
const DISABLED_CYCLES: u8 = 1;

/// One decoded instruction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Instruction {
    /// Address of the opcode byte.
    pub address: u16,
    pub meta: OpcodeMetadata,
    pub operand: Operand,
    /// Address of the following instruction.
    pub next: u16,
}

impl Instruction {
    /// Base cycles plus the page-crossing penalty where the opcode pays one.
    pub fn cycles(&self) -> u64 {
        let penalty = self.meta.page_penalty && self.operand.page_crossed();
        self.meta.base_cycles as u64 + penalty as u64
    }
}

/// Executes the opcode fetched from `address` and returns the next PC.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    opcode: u8,
    address: u16,
) -> Result<u16, ExecutionError> {
    let meta = OPCODE_TABLE[opcode as usize];
    let operation = meta.operation;

    if (operation.is_rockwell() && !cpu.signals.rockwell_extensions())
        || (operation.is_pausable() && !cpu.signals.pausable())
    {
        return control::execute_unimplemented(
            cpu,
            opcode,
            address,
            DISABLED_SIZE,
            DISABLED_CYCLES,
        );
    }
    if operation == Operation::Unimplemented {
        return control::execute_unimplemented(
            cpu,
            opcode,
            address,
            meta.size_bytes,
            meta.base_cycles,
        );
    }

    let cursor = address.wrapping_add(1);
    let operand = addressing::resolve(meta.addressing_mode, cursor, cpu.x, cpu.y, &cpu.memory);
    let inst = Instruction {
        address,
        meta,
        operand,
        next: address.wrapping_add(meta.size_bytes as u16),
    };

    let (a, x, y, p) = (cpu.a, cpu.x, cpu.y, cpu.p);
    match operation {
        // Arithmetic and logic
        Operation::Adc => alu::execute_adc(cpu, &inst),
        Operation::Sbc => alu::execute_sbc(cpu, &inst),
        Operation::And => alu::execute_and(cpu, &inst),
        Operation::Ora => alu::execute_ora(cpu, &inst),
        Operation::Eor => alu::execute_eor(cpu, &inst),
        Operation::Cmp => alu::execute_compare(cpu, &inst, a),
        Operation::Cpx => alu::execute_compare(cpu, &inst, x),
        Operation::Cpy => alu::execute_compare(cpu, &inst, y),
        Operation::Bit => alu::execute_bit(cpu, &inst),
        Operation::Trb => alu::execute_trb(cpu, &inst),
        Operation::Tsb => alu::execute_tsb(cpu, &inst),

        // Shifts
        Operation::Asl => shifts::execute_asl(cpu, &inst),
        Operation::Lsr => shifts::execute_lsr(cpu, &inst),
        Operation::Rol => shifts::execute_rol(cpu, &inst),
        Operation::Ror => shifts::execute_ror(cpu, &inst),

        // Increments
        Operation::Inc => inc_dec::execute_inc(cpu, &inst),
        Operation::Dec => inc_dec::execute_dec(cpu, &inst),
        Operation::Inx => inc_dec::execute_inx(cpu, &inst),
        Operation::Iny => inc_dec::execute_iny(cpu, &inst),
        Operation::Dex => inc_dec::execute_dex(cpu, &inst),
        Operation::Dey => inc_dec::execute_dey(cpu, &inst),

        // Loads and stores
        Operation::Lda => load_store::execute_lda(cpu, &inst),
        Operation::Ldx => load_store::execute_ldx(cpu, &inst),
        Operation::Ldy => load_store::execute_ldy(cpu, &inst),
        Operation::Sta => load_store::execute_store(cpu, &inst, a),
        Operation::Stx => load_store::execute_store(cpu, &inst, x),
        Operation::Sty => load_store::execute_store(cpu, &inst, y),
        Operation::Stz => load_store::execute_store(cpu, &inst, 0),

        // Branches
        Operation::Bcc => branches::execute_branch(cpu, &inst, !p.contains(StatusFlags::CARRY)),
        Operation::Bcs => branches::execute_branch(cpu, &inst, p.contains(StatusFlags::CARRY)),
        Operation::Bne => branches::execute_branch(cpu, &inst, !p.contains(StatusFlags::ZERO)),
        Operation::Beq => branches::execute_branch(cpu, &inst, p.contains(StatusFlags::ZERO)),
        Operation::Bpl => branches::execute_branch(cpu, &inst, !p.contains(StatusFlags::NEGATIVE)),
        Operation::Bmi => branches::execute_branch(cpu, &inst, p.contains(StatusFlags::NEGATIVE)),
        Operation::Bvc => branches::execute_branch(cpu, &inst, !p.contains(StatusFlags::OVERFLOW)),
        Operation::Bvs => branches::execute_branch(cpu, &inst, p.contains(StatusFlags::OVERFLOW)),
        Operation::Bra => branches::execute_bra(cpu, &inst),

        // Rockwell bit instructions
        Operation::Rmb(bit) => bits::execute_rmb(cpu, &inst, bit),
        Operation::Smb(bit) => bits::execute_smb(cpu, &inst, bit),
        Operation::Bbr(bit) => bits::execute_bbr(cpu, &inst, bit),
        Operation::Bbs(bit) => bits::execute_bbs(cpu, &inst, bit),

        // Control flow
        Operation::Jmp => control::execute_jmp(cpu, &inst),
        Operation::Jsr => control::execute_jsr(cpu, &inst),
        Operation::Rts => control::execute_rts(cpu, &inst),
        Operation::Rti => control::execute_rti(cpu, &inst),
        Operation::Brk => control::execute_brk(cpu, &inst),
        Operation::Nop => control::execute_nop(cpu, &inst),
        Operation::Stp => control::execute_stp(cpu, &inst),
        Operation::Wai => control::execute_wai(cpu, &inst),

        // Stack
        Operation::Pha => stack::execute_push(cpu, &inst, a),
        Operation::Phx => stack::execute_push(cpu, &inst, x),
        Operation::Phy => stack::execute_push(cpu, &inst, y),
        Operation::Php => stack::execute_push(cpu, &inst, p.pushed_by_software()),
        Operation::Pla => stack::execute_pla(cpu, &inst),
        Operation::Plx => stack::execute_plx(cpu, &inst),
        Operation::Ply => stack::execute_ply(cpu, &inst),
        Operation::Plp => stack::execute_plp(cpu, &inst),

        // Flags
        Operation::Clc => flags::execute_flag(cpu, &inst, StatusFlags::CARRY, false),
        Operation::Sec => flags::execute_flag(cpu, &inst, StatusFlags::CARRY, true),
        Operation::Cli => flags::execute_flag(cpu, &inst, StatusFlags::IRQ_DISABLE, false),
        Operation::Sei => flags::execute_flag(cpu, &inst, StatusFlags::IRQ_DISABLE, true),
        Operation::Cld => flags::execute_flag(cpu, &inst, StatusFlags::DECIMAL, false),
        Operation::Sed => flags::execute_flag(cpu, &inst, StatusFlags::DECIMAL, true),
        Operation::Clv => flags::execute_flag(cpu, &inst, StatusFlags::OVERFLOW, false),

        // Transfers
        Operation::Tax => transfer::execute_tax(cpu, &inst),
        Operation::Tay => transfer::execute_tay(cpu, &inst),
        Operation::Txa => transfer::execute_txa(cpu, &inst),
        Operation::Tya => transfer::execute_tya(cpu, &inst),
        Operation::Tsx => transfer::execute_tsx(cpu, &inst),
        Operation::Txs => transfer::execute_txs(cpu, &inst),

        Operation::Unimplemented => control::execute_unimplemented(
            cpu,
            opcode,
            address,
            meta.size_bytes,
            meta.base_cycles,
        ),
    }
}

/// Reads the data operand: memory, an immediate constant or the accumulator.
pub(crate) fn read_operand<M: MemoryBus>(cpu: &Cpu<M>, operand: Operand) -> u8 {
    match operand {
        Operand::Memory { address, .. } | Operand::BitBranch { address, .. } => {
            cpu.memory.read(address)
        }
        Operand::Immediate(value) => value,
        Operand::Accumulator => cpu.a,
        // No data operand
        Operand::Implied | Operand::Branch { .. } => 0,
    }
}

/// Writes back a read-modify-write result to memory or the accumulator.
pub(crate) fn write_operand<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand, value: u8) {
    match operand {
        Operand::Memory { address, .. } | Operand::BitBranch { address, .. } => {
            cpu.memory.write(address, value)
        }
        Operand::Accumulator => cpu.a = value,
        Operand::Immediate(_) | Operand::Implied | Operand::Branch { .. } => {}
    }
}
