//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations. The CPU only ever issues byte reads and writes; the wider
//! little-endian accessors are provided as default methods built from those bytes, so
//! a memory-mapped device observes every individual access.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 65C02 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Every address wraps modulo 65536, including the bytes of multi-byte accesses
//! - Writes to ROM/unmapped regions may be ignored by the implementation

/// Memory bus trait for CPU to read/write bytes.
///
/// Implementations of this trait provide the memory backend for the CPU.
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 65C02 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use lib65c02::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write_u16(0xFFFC, 0x8000);
/// assert_eq!(mem.read(0xFFFC), 0x00);
/// assert_eq!(mem.read(0xFFFD), 0x80);
/// assert_eq!(mem.read_u16(0xFFFC), 0x8000);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib65c02::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic. If the address is unmapped,
    /// implementations may return garbage data (matching hardware behavior).
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. If the address is read-only or unmapped,
    /// implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian 16-bit word. The high byte address wraps at 0xFFFF.
    fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes a little-endian 16-bit word, low byte first.
    fn write_u16(&mut self, addr: u16, value: u16) {
        self.write(addr, value as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Reads a little-endian 32-bit value.
    fn read_u32(&self, addr: u16) -> u32 {
        let lo = self.read_u16(addr) as u32;
        let hi = self.read_u16(addr.wrapping_add(2)) as u32;
        (hi << 16) | lo
    }

    /// Writes a little-endian 32-bit value.
    fn write_u32(&mut self, addr: u16, value: u32) {
        self.write_u16(addr, value as u16);
        self.write_u16(addr.wrapping_add(2), (value >> 16) as u16);
    }

    /// Reads a little-endian 64-bit value.
    fn read_u64(&self, addr: u16) -> u64 {
        let lo = self.read_u32(addr) as u64;
        let hi = self.read_u32(addr.wrapping_add(4)) as u64;
        (hi << 32) | lo
    }

    /// Writes a little-endian 64-bit value.
    fn write_u64(&mut self, addr: u16, value: u64) {
        self.write_u32(addr, value as u32);
        self.write_u32(addr.wrapping_add(4), (value >> 32) as u32);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are mapped to a single contiguous RAM
/// array initialized to 0x00.
///
/// # Examples
///
/// ```
/// use lib65c02::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_u16(0xFFFC, 0x8000);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = Cpu::new(memory);
/// cpu.reset().unwrap();
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping past 0xFFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut target = addr;
        for &byte in bytes {
            self.data[target as usize] = byte;
            target = target.wrapping_add(1);
        }
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
