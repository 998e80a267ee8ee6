//! # Processor Status Register
//!
//! The 65C02 packs eight single-bit flags into the P register (NV-BDIZC):
//!
//! ```text
//! Bit 7: N (Negative)
//! Bit 6: V (Overflow)
//! Bit 5: U (unused, reads as 1 while powered)
//! Bit 4: B (Break)
//! Bit 3: D (Decimal)
//! Bit 2: I (Interrupt Disable)
//! Bit 1: Z (Zero)
//! Bit 0: C (Carry)
//! ```
//!
//! On real silicon U and B are never observed clear in the live register. B only
//! shows up clear in the copy pushed by a hardware interrupt.

use bitflags::bitflags;

bitflags! {
    /// Packed processor status byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        /// Carry
        const CARRY = 0b0000_0001;
        /// Zero
        const ZERO = 0b0000_0010;
        /// IRQ disable
        const IRQ_DISABLE = 0b0000_0100;
        /// Decimal mode
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused, hardwired high
        const UNUSED = 0b0010_0000;
        /// Overflow
        const OVERFLOW = 0b0100_0000;
        /// Negative
        const NEGATIVE = 0b1000_0000;
    }
}

impl StatusFlags {
    /// Bits a PLP cannot change.
    pub const PINNED: StatusFlags = StatusFlags::BREAK.union(StatusFlags::UNUSED);

    /// Updates Z and N from an 8-bit result.
    #[inline]
    pub fn update_nz(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    /// Replaces every flag except B and U with the pulled byte (PLP).
    pub fn restore(&mut self, pulled: u8) {
        let pinned = *self & Self::PINNED;
        *self = Self::from_bits_retain(pulled & !Self::PINNED.bits()) | pinned;
    }

    /// Copy pushed by a hardware interrupt: B clear.
    pub fn pushed_by_hardware(self) -> u8 {
        (self - StatusFlags::BREAK).bits()
    }

    /// Copy pushed by BRK and PHP: B set.
    pub fn pushed_by_software(self) -> u8 {
        (self | StatusFlags::BREAK).bits()
    }
}
