//! Fixed-point scalar multiplies for game logic.
//!
//! Q-format multiply-and-shift helpers: widen to 32 bits, multiply, shift
//! the fraction back out, truncate to 16 bits. The unsigned-operand variants
//! deliberately perform the multiply in unsigned 32-bit arithmetic with a
//! logical shift, matching the integer-promotion behavior game logic was
//! written against.

/// Q8.8 multiply of two signed values.
#[must_use]
pub const fn mul_q8_s16(a: i16, b: i16) -> i16 {
    ((a as i32 * b as i32) >> 8) as i16
}

/// Q8.8 multiply of a signed value by an unsigned 8-bit factor.
#[must_use]
pub const fn mul_q8_s16_by_u8(a: i16, b: u8) -> i16 {
    (((a as i32 as u32).wrapping_mul(b as u32)) >> 8) as i16
}

/// Q8.8 multiply of a signed value by an unsigned 16-bit factor.
#[must_use]
pub const fn mul_q8_s16_by_u16(a: i16, b: u16) -> i16 {
    (((a as i32 as u32).wrapping_mul(b as u32)) >> 8) as i16
}

/// Q16.16 multiply of two signed values.
#[must_use]
pub const fn mul_q16_s16(a: i16, b: i16) -> i16 {
    ((a as i32 * b as i32) >> 16) as i16
}

/// Q8.8 multiply of two unsigned values.
#[must_use]
pub const fn mul_q8_u16(a: u16, b: u16) -> u16 {
    ((a as u32 * b as u32) >> 8) as u16
}

/// Q8.8 multiply of an unsigned value by an 8-bit factor.
#[must_use]
pub const fn mul_q8_u16_by_u8(a: u16, b: u8) -> u16 {
    ((a as u32 * b as u32) >> 8) as u16
}

/// Q7 multiply of a signed value by a signed 8-bit factor.
#[must_use]
pub const fn mul_q7_s16(a: i16, b: i8) -> i16 {
    ((a as i32 * b as i32) >> 7) as i16
}

/// Q15 multiply of two signed values.
#[must_use]
pub const fn mul_q15_s16(a: i16, b: i16) -> i16 {
    ((a as i32 * b as i32) >> 15) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q8_identity_and_half() {
        // 256 is 1.0 in Q8.8
        assert_eq!(mul_q8_s16(1000, 256), 1000);
        assert_eq!(mul_q8_s16(1000, 128), 500);
        assert_eq!(mul_q8_s16(-1000, 128), -500);
        assert_eq!(mul_q8_u16(1000, 256), 1000);
    }

    #[test]
    fn test_q8_unsigned_factor() {
        assert_eq!(mul_q8_s16_by_u8(512, 128), 256);
        assert_eq!(mul_q8_s16_by_u16(512, 512), 1024);
    }

    #[test]
    fn test_q15_q16_scale() {
        // 32767 is just under 1.0 in Q15
        assert_eq!(mul_q15_s16(20000, 32767), 19999);
        assert_eq!(mul_q15_s16(20000, -32768), -20000);
        // 65536 would be 1.0 in Q16.16; i16 can only hold fractions
        assert_eq!(mul_q16_s16(20000, 16384), 5000);
    }

    #[test]
    fn test_q7_signed_factor() {
        // 128 is 1.0 in Q7, but i8 tops out at 127
        assert_eq!(mul_q7_s16(1000, 64), 500);
        assert_eq!(mul_q7_s16(1000, -64), -500);
    }
}
