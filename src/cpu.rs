//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 65C02 processor state and
//! the single-step engine shared by synchronous callers and the threaded
//! [`Processor`](crate::Processor).
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: packed [`StatusFlags`]
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Signals**: the shared control lines and runtime options
//!
//! ## Execution Model
//!
//! - `attend()`: service at most one pending reset, NMI or IRQ
//! - `execute_next()`: execute one instruction
//! - `step()`: both, which is one instruction boundary of the run loop
//! - `run_for_cycles()`: step until a cycle budget is exhausted

use std::sync::Arc;

use tracing::{debug, trace};

use crate::pacer::Pacer;
use crate::signals::Signals;
use crate::{instructions, Config, ExecutionError, MemoryBus, StatusFlags, OPCODE_TABLE};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

const STACK_PAGE: u16 = 0x0100;
const INTERRUPT_CYCLES: u64 = 7;

/// 65C02 CPU state and execution context.
///
/// A new `Cpu` has every register zeroed, exactly like a halted processor. Call
/// [`reset`](Cpu::reset) to run the power-up reset sequence, or hand it to a
/// [`Processor`](crate::Processor) and drive the reset line.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use lib65c02::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_u16(0xFFFC, 0x8000);
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x0000);
///
/// cpu.reset().unwrap();
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// assert_eq!(cpu.cycles(), 7);
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status register
    pub(crate) p: StatusFlags,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    pub(crate) signals: Arc<Signals>,

    pacer: Pacer,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU with the default [`Config`].
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, Config::default())
    }

    /// Creates a CPU whose runtime options start from `config`.
    pub fn with_config(memory: M, config: Config) -> Self {
        Self::with_signals(memory, Arc::new(Signals::new(&config)))
    }

    /// Creates a CPU attached to existing control lines.
    ///
    /// Useful when a memory device needs the same `Signals` to raise interrupts.
    pub fn with_signals(memory: M, signals: Arc<Signals>) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0,
            p: StatusFlags::empty(),
            cycles: 0,
            memory,
            signals,
            pacer: Pacer::new(),
        }
    }

    // ========== Execution ==========

    /// Runs the reset sequence: U and B are forced set, pending requests are
    /// dropped and the reset is serviced through $FFFC.
    ///
    /// The reset service pushes PC and status like any other interrupt, so from
    /// zeroed registers the stack pointer ends at 0xFD.
    pub fn reset(&mut self) -> Result<(), ExecutionError> {
        self.power_up();
        self.signals.discard_requests();
        let status = self.p.bits();
        self.service_interrupt(RESET_VECTOR, status)
    }

    /// Checks the lines at an instruction boundary and services at most one
    /// request, by priority reset > NMI > IRQ.
    ///
    /// Returns true when an interrupt was serviced.
    pub fn attend(&mut self) -> Result<bool, ExecutionError> {
        if !self.signals.needs_attention() {
            return Ok(false);
        }

        if self.signals.take_reset_request() {
            debug!("servicing reset");
            let status = self.p.bits();
            self.service_interrupt(RESET_VECTOR, status)?;
            return Ok(true);
        }

        if self.signals.take_nmi_request() {
            debug!(pc = self.pc, "servicing NMI");
            let status = self.p.pushed_by_hardware();
            self.service_interrupt(NMI_VECTOR, status)?;
            return Ok(true);
        }

        if self.signals.irq_asserted() && !self.p.contains(StatusFlags::IRQ_DISABLE) {
            debug!(pc = self.pc, "servicing IRQ");
            let status = self.p.pushed_by_hardware();
            self.service_interrupt(IRQ_VECTOR, status)?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Executes the instruction at PC, without looking at the lines.
    pub fn execute_next(&mut self) -> Result<(), ExecutionError> {
        let address = self.pc;
        let opcode = self.memory.read(address);
        trace!(
            pc = address,
            opcode,
            mnemonic = OPCODE_TABLE[opcode as usize].mnemonic,
            a = self.a,
            x = self.x,
            y = self.y,
            sp = self.sp,
            p = self.p.bits(),
            "execute"
        );
        self.pc = instructions::execute(self, opcode, address)?;
        Ok(())
    }

    /// One instruction boundary: service a pending interrupt, then execute one
    /// instruction and publish the stack pointer.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::{Cpu, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write_u16(0xFFFC, 0x8000);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = Cpu::new(mem);
    /// cpu.reset().unwrap();
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.pc(), 0x8001);
    /// assert_eq!(cpu.cycles(), 7 + 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.attend()?;
        self.execute_next()?;
        self.signals.publish_stack_pointer(self.sp);
        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error occurs.
    /// Returns the actual number of cycles consumed (may be slightly more than budget
    /// due to instruction granularity).
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::{Cpu, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write_u16(0xFFFC, 0x8000);
    /// mem.load(0x8000, &[0x80, 0xFE]); // BRA *
    ///
    /// let mut cpu = Cpu::new(mem);
    /// cpu.reset().unwrap();
    /// let used = cpu.run_for_cycles(30).unwrap();
    /// assert!(used >= 30);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Internal Helpers ==========

    /// Power-up state of the status register.
    pub(crate) fn power_up(&mut self) {
        self.p.insert(StatusFlags::UNUSED | StatusFlags::BREAK);
        self.pacer.restart();
    }

    /// Drops the cycle debt accrued while the clock was stopped.
    pub(crate) fn resync_pacer(&mut self) {
        self.pacer.restart();
    }

    /// Halted state: every register, P included, reads zero.
    pub(crate) fn zero_registers(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0;
        self.pc = 0;
        self.p = StatusFlags::empty();
    }

    /// Pushes PC and `status`, masks IRQ, leaves decimal mode and jumps through `vector`.
    pub(crate) fn service_interrupt(
        &mut self,
        vector: u16,
        status: u8,
    ) -> Result<(), ExecutionError> {
        self.push_u16(self.pc);
        self.push(status);
        self.p.insert(StatusFlags::IRQ_DISABLE);
        self.p.remove(StatusFlags::DECIMAL);
        self.pc = self.memory.read_u16(vector);
        self.charge(INTERRUPT_CYCLES)
    }

    /// Adds cycles to the counter and lets the pacer catch up with them.
    pub(crate) fn charge(&mut self, cycles: u64) -> Result<(), ExecutionError> {
        self.cycles = self.cycles.wrapping_add(cycles);
        self.pacer.charge(cycles, &self.signals)
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_PAGE | self.sp as u16)
    }

    /// High byte first, so the word sits little-endian in memory.
    pub(crate) fn push_u16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_u16(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    pub fn status(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the status register as flags.
    pub fn flags(&self) -> StatusFlags {
        self.p
    }

    /// Returns the total number of CPU cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// The control lines this CPU samples.
    pub fn signals(&self) -> &Arc<Signals> {
        &self.signals
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.p.contains(StatusFlags::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.p.contains(StatusFlags::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.p.contains(StatusFlags::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.p.contains(StatusFlags::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.p.contains(StatusFlags::IRQ_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.p.contains(StatusFlags::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.p.contains(StatusFlags::CARRY)
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the status register. U and B are kept set once powered up.
    pub fn set_status(&mut self, value: u8) {
        self.p.restore(value);
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.p.set(StatusFlags::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.p.set(StatusFlags::OVERFLOW, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.p.set(StatusFlags::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.p.set(StatusFlags::IRQ_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.p.set(StatusFlags::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.p.set(StatusFlags::CARRY, value);
    }
}

impl<M: MemoryBus> std::fmt::Debug for Cpu<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("pc", &self.pc)
            .field("sp", &self.sp)
            .field("p", &self.p)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}
