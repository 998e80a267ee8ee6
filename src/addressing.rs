//! # Addressing Modes
//!
//! This module defines the 16 addressing modes of the 65C02 and the resolver that
//! turns the operand bytes of an instruction into an [`Operand`].
//!
//! Resolution is pure: it only reads memory, never writes it, and cannot fail.
//! Every address computation wraps, page-zero pointers wrap within page zero and
//! the indirect jumps read their pointers without the NMOS page-wrap bug.

use crate::MemoryBus;

/// 65C02 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, ZeroPageIndirect, Relative,
///   IndirectX, IndirectY
/// - **2 bytes**: ZeroPageRelative, Absolute, AbsoluteX, AbsoluteY, Indirect,
///   AbsoluteIndexedIndirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, INC A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Pointer stored in zero page, no index.
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Zero page address followed by a signed branch offset (BBRn/BBSn).
    ///
    /// Example: BBR3 $12,label
    ZeroPageRelative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indirect jump through a pointer at a 16-bit base plus X.
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::ZeroPageIndirect
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::ZeroPageRelative
            | AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect
            | AddressingMode::AbsoluteIndexedIndirect => 2,
        }
    }
}

/// A resolved instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Effective memory address. For JMP and JSR this is the jump target.
    Memory { address: u16, page_crossed: bool },

    /// Constant from the instruction stream.
    Immediate(u8),

    /// The accumulator register.
    Accumulator,

    /// No operand.
    Implied,

    /// Relative branch target. `page_crossed` compares the target with the
    /// address of the following instruction.
    Branch { target: u16, page_crossed: bool },

    /// Page-zero byte to test and the branch target of BBRn/BBSn.
    BitBranch { address: u16, target: u16 },
}

impl Operand {
    /// True when an indexed access or a branch crossed into another page.
    pub fn page_crossed(&self) -> bool {
        match *self {
            Operand::Memory { page_crossed, .. } | Operand::Branch { page_crossed, .. } => {
                page_crossed
            }
            _ => false,
        }
    }
}

/// Resolves the operand of an instruction.
///
/// `cursor` is the address just past the opcode byte.
///
/// # Examples
///
/// ```
/// use lib65c02::{addressing, AddressingMode, FlatMemory, MemoryBus, Operand};
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x8001, &[0xF0, 0x12]); // $12F0
///
/// let operand = addressing::resolve(AddressingMode::AbsoluteX, 0x8001, 0x20, 0, &mem);
/// assert_eq!(operand, Operand::Memory { address: 0x1310, page_crossed: true });
/// ```
pub fn resolve<M: MemoryBus + ?Sized>(
    mode: AddressingMode,
    cursor: u16,
    x: u8,
    y: u8,
    memory: &M,
) -> Operand {
    match mode {
        AddressingMode::Implicit => Operand::Implied,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => Operand::Immediate(memory.read(cursor)),
        AddressingMode::ZeroPage => direct(memory.read(cursor) as u16),
        AddressingMode::ZeroPageX => direct(memory.read(cursor).wrapping_add(x) as u16),
        AddressingMode::ZeroPageY => direct(memory.read(cursor).wrapping_add(y) as u16),
        AddressingMode::ZeroPageIndirect => direct(zero_page_pointer(memory, memory.read(cursor))),
        AddressingMode::IndirectX => {
            direct(zero_page_pointer(memory, memory.read(cursor).wrapping_add(x)))
        }
        AddressingMode::IndirectY => {
            indexed(zero_page_pointer(memory, memory.read(cursor)), y)
        }
        AddressingMode::Absolute => direct(memory.read_u16(cursor)),
        AddressingMode::AbsoluteX => indexed(memory.read_u16(cursor), x),
        AddressingMode::AbsoluteY => indexed(memory.read_u16(cursor), y),
        AddressingMode::Indirect => direct(memory.read_u16(memory.read_u16(cursor))),
        AddressingMode::AbsoluteIndexedIndirect => {
            let pointer = memory.read_u16(cursor).wrapping_add(x as u16);
            direct(memory.read_u16(pointer))
        }
        AddressingMode::Relative => {
            let next = cursor.wrapping_add(1);
            let target = branch_target(next, memory.read(cursor));
            Operand::Branch {
                target,
                page_crossed: pages_differ(next, target),
            }
        }
        AddressingMode::ZeroPageRelative => {
            let next = cursor.wrapping_add(2);
            Operand::BitBranch {
                address: memory.read(cursor) as u16,
                target: branch_target(next, memory.read(cursor.wrapping_add(1))),
            }
        }
    }
}

/// Applies a signed 8-bit displacement to the address of the next instruction.
pub fn branch_target(next: u16, offset: u8) -> u16 {
    next.wrapping_add(offset as i8 as u16)
}

/// True when the two addresses lie in different 256-byte pages.
pub fn pages_differ(a: u16, b: u16) -> bool {
    (a ^ b) & 0xFF00 != 0
}

fn direct(address: u16) -> Operand {
    Operand::Memory {
        address,
        page_crossed: false,
    }
}

fn indexed(base: u16, index: u8) -> Operand {
    let address = base.wrapping_add(index as u16);
    Operand::Memory {
        address,
        page_crossed: pages_differ(base, address),
    }
}

// High byte comes from (zp + 1) & 0xFF
fn zero_page_pointer<M: MemoryBus + ?Sized>(memory: &M, zp: u8) -> u16 {
    let lo = memory.read(zp as u16) as u16;
    let hi = memory.read(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
