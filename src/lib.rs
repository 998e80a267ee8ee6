//! # 65C02 CPU Emulator Core
//!
//! A cycle-counting WDC 65C02 emulator with a signal-driven run loop.
//!
//! This crate provides the processor execution engine (registers, the 256-entry
//! opcode dispatch table, addressing-mode resolution, binary and decimal
//! arithmetic), the reset/NMI/IRQ line protocol sampled at instruction boundaries,
//! an optional real-time cycle pacer and a worker-thread `Processor` that owns the
//! run loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65c02::{Cpu, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Point the reset vector at the program
//! memory.write_u16(0xFFFC, 0x8000);
//! memory.load(0x8000, &[0xF8, 0x18, 0xA9, 0x99, 0x69, 0x01]); // SED; CLC; LDA #$99; ADC #$01
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.reset().unwrap();
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//!
//! for _ in 0..4 {
//!     cpu.step().unwrap();
//! }
//! assert_eq!(cpu.a(), 0x00);
//! assert!(cpu.flag_c());
//! assert!(cpu.flag_z());
//! ```
//!
//! ## Threaded Execution
//!
//! ```rust
//! use lib65c02::{Config, FlatMemory, MemoryBus, PowerState, Processor};
//!
//! let mut memory = FlatMemory::new();
//! memory.write_u16(0xFFFC, 0x0200);
//! memory.load(0x0200, &[0x80, 0xFE]); // BRA *
//!
//! let mut processor = Processor::new(memory, Config::default());
//! processor.power_on().unwrap();
//! processor.reset_low();
//! processor.reset_high();
//! processor.power_off().unwrap();
//!
//! assert_eq!(processor.state(), PowerState::Halted);
//! assert_eq!(processor.cpu().map(|cpu| cpu.pc()), Some(0));
//! ```
//!
//! ## Modules
//!
//! - `cpu` - Register state and the single-step engine
//! - `memory` - MemoryBus trait and the flat 64KB implementation
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing modes and effective-address resolution
//! - `arithmetic` - Binary and decimal ADC/SBC
//! - `signals` - Control lines, latches and runtime options shared with the run loop
//! - `pacer` - Real-time cycle throttle
//! - `processor` - Worker thread owning the run loop
//! - `config` - Construction-time options
//! - `disassembler` - Table-driven disassembly

pub mod addressing;
pub mod arithmetic;
pub mod config;
pub mod cpu;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod pacer;
pub mod processor;
pub mod signals;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::{AddressingMode, Operand};
pub use config::{Config, UnimplementedPolicy};
pub use cpu::Cpu;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use processor::Processor;
pub use signals::{PowerState, Signals};
pub use status::StatusFlags;

use thiserror::Error;

/// Errors that stop the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// An opcode without 65C02 semantics was fetched while the policy is `Fail`.
    ///
    /// `address` is where the opcode byte was fetched from.
    #[error("Unimplemented instruction at ${address:04x}: ${opcode:02x}")]
    UnimplementedOpcode { opcode: u8, address: u16 },

    /// A blocking wait (pacer sleep, STP, WAI) was cancelled.
    #[error("wait cancelled")]
    WaitCancelled,
}

/// Errors raised while managing the run-loop thread.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The operating system refused to start the worker thread.
    #[error("failed to spawn the processor thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread panicked; the CPU and its memory are lost.
    #[error("the processor thread panicked")]
    WorkerPanicked,
}
