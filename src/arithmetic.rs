//! # Binary and Decimal Arithmetic
//!
//! ADC and SBC share this engine. Both read the live carry flag as their implicit
//! third input and derive C, V, N and Z from the operation.
//!
//! Decimal mode follows the 65C02 bit for bit, not a clean BCD model: the add
//! overflow flag compares the signed operands against the signed result, and the
//! subtract path carries a second borrow into the high nibble when the low nibble
//! correction itself goes negative (only possible with invalid BCD digits).

use crate::StatusFlags;

/// Adds `value` and the carry flag to `a`, honouring the decimal flag.
pub fn add(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    if flags.contains(StatusFlags::DECIMAL) {
        add_decimal(a, value, flags)
    } else {
        add_binary(a, value, flags)
    }
}

/// Subtracts `value` and the inverted carry (borrow) from `a`, honouring the
/// decimal flag.
pub fn subtract(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    if flags.contains(StatusFlags::DECIMAL) {
        subtract_decimal(a, value, flags)
    } else {
        subtract_binary(a, value, flags)
    }
}

pub fn add_binary(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    let carry_in = flags.contains(StatusFlags::CARRY) as u16;
    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    flags.set(StatusFlags::CARRY, sum > 0xFF);
    // Both operands share a sign the result does not
    flags.set(
        StatusFlags::OVERFLOW,
        (a ^ result) & (value ^ result) & 0x80 != 0,
    );
    flags.update_nz(result);
    result
}

pub fn add_decimal(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    let carry_in = flags.contains(StatusFlags::CARRY) as u16;
    flags.remove(StatusFlags::CARRY);

    let mut low = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in;
    let mut half_carry = 0;
    if low >= 0x0A {
        low = (low - 0x0A) & 0x0F;
        half_carry = 0x10;
    }

    let mut high = (a & 0xF0) as u16 + (value & 0xF0) as u16 + half_carry;
    if high >= 0xA0 {
        high -= 0xA0;
        flags.insert(StatusFlags::CARRY);
    }

    let result = (low as u8) | (high as u8);

    let signed_a = a as i8;
    let signed_value = value as i8;
    let signed_result = result as i8;
    let overflow = if signed_a <= 0 && signed_value <= 0 {
        signed_result > 0 || signed_result > signed_a || signed_result > signed_value
    } else if signed_a >= 0 && signed_value >= 0 {
        signed_result < 0 || signed_result < signed_a || signed_result < signed_value
    } else {
        false
    };
    flags.set(StatusFlags::OVERFLOW, overflow);

    flags.update_nz(result);
    result
}

pub fn subtract_binary(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    let borrow = !flags.contains(StatusFlags::CARRY) as i16;
    let difference = a as i16 - value as i16 - borrow;
    let result = difference as u8;

    flags.set(StatusFlags::CARRY, difference >= 0);
    flags.set(StatusFlags::OVERFLOW, signed_overflow(a, value, borrow));
    flags.update_nz(result);
    result
}

pub fn subtract_decimal(a: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    let borrow = !flags.contains(StatusFlags::CARRY) as u8;
    flags.set(
        StatusFlags::OVERFLOW,
        signed_overflow(a, value, borrow as i16),
    );
    flags.insert(StatusFlags::CARRY);

    let mut low = (a & 0x0F).wrapping_sub(value & 0x0F).wrapping_sub(borrow);
    let mut half_borrow = 0u8;
    let mut bad_borrow = 0u8;
    if (low as i8) < 0 {
        low = low.wrapping_add(0x0A);
        half_borrow = 1;
        if (low as i8) < 0 {
            bad_borrow = 1;
        }
        low &= 0x0F;
    }

    let mut high = (a >> 4).wrapping_sub(value >> 4).wrapping_sub(half_borrow);
    if (high as i8) < 0 {
        high = high.wrapping_add(0x0A);
        flags.remove(StatusFlags::CARRY);
    }
    high = high.wrapping_sub(bad_borrow);

    let result = low | (high << 4);
    flags.update_nz(result);
    result
}

/// Two's-complement overflow of `a - value - borrow`.
fn signed_overflow(a: u8, value: u8, borrow: i16) -> bool {
    let difference = a as i8 as i16 - value as i8 as i16 - borrow;
    !(-128..=127).contains(&difference)
}
