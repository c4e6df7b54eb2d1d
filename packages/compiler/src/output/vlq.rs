//! Base64 VLQ
//!
//! Variable-length quantities as used by the `mappings` field of a
//! version 3 source map.

use crate::error::{MappingError, Result, VlqErrorReason};
use once_cell::sync::Lazy;
use smallvec::SmallVec;

const B64_DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE: u64 = 1 << VLQ_BASE_SHIFT;
const VLQ_BASE_MASK: u64 = VLQ_BASE - 1;
const VLQ_CONTINUATION_BIT: u64 = VLQ_BASE;

/// Reverse lookup from ASCII byte to digit value, `None` outside the alphabet.
static B64_VALUES: Lazy<[Option<u8>; 128]> = Lazy::new(|| {
    let mut table = [None; 128];
    for (value, &digit) in B64_DIGITS.iter().enumerate() {
        table[digit as usize] = Some(value as u8);
    }
    table
});

fn to_base64_digit(value: u64) -> char {
    B64_DIGITS[(value & 63) as usize] as char
}

fn from_base64_digit(c: char) -> Option<u64> {
    if c.is_ascii() {
        B64_VALUES[c as usize].map(u64::from)
    } else {
        None
    }
}

/// Encodes `value` as Base64 VLQ.
///
/// The magnitude is shifted left by one and the sign stored in bit 0, so the
/// whole `i64` range (including `i64::MIN`) fits in the unsigned fold.
pub fn encode_vlq(value: i64) -> String {
    let mut out = String::with_capacity(2);
    encode_vlq_into(&mut out, value);
    out
}

/// Appends the Base64 VLQ encoding of `value` to `out`.
pub fn encode_vlq_into(out: &mut String, value: i64) {
    let mut vlq = (value.unsigned_abs() << 1) | u64::from(value < 0);
    // i64::MIN loses its top bit in the shift above; restore it in a 65th bit.
    let mut high_bit = value == i64::MIN;

    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if high_bit {
            vlq |= 1 << (64 - VLQ_BASE_SHIFT);
            high_bit = false;
        }
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(to_base64_digit(digit));

        if vlq == 0 {
            break;
        }
    }
}

/// Decodes one VLQ value from the start of `input`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_vlq(input: &str) -> Result<(i64, usize)> {
    let malformed = |reason| MappingError::MalformedVlq {
        input: input.to_string(),
        reason,
    };

    let mut vlq: u128 = 0;
    let mut shift = 0u32;

    for (i, c) in input.char_indices() {
        let digit = from_base64_digit(c).ok_or_else(|| malformed(VlqErrorReason::InvalidDigit(c)))?;
        let payload = digit & VLQ_BASE_MASK;
        // Zero groups past the 65th bit are padding and add nothing.
        if payload != 0 {
            if shift > 65 {
                return Err(malformed(VlqErrorReason::Overflow));
            }
            vlq |= u128::from(payload) << shift;
        }
        shift = shift.saturating_add(VLQ_BASE_SHIFT);

        if digit & VLQ_CONTINUATION_BIT == 0 {
            let negative = vlq & 1 == 1;
            let magnitude = vlq >> 1;
            let value = if negative {
                if magnitude > i64::MAX as u128 + 1 {
                    return Err(malformed(VlqErrorReason::Overflow));
                }
                (magnitude as i128).wrapping_neg() as i64
            } else {
                if magnitude > i64::MAX as u128 {
                    return Err(malformed(VlqErrorReason::Overflow));
                }
                magnitude as i64
            };
            return Ok((value, i + 1));
        }
    }

    Err(malformed(VlqErrorReason::UnexpectedEnd))
}

/// Decodes every field of a single segment such as `"AAgBC"`.
pub fn decode_vlq_segment(segment: &str) -> Result<SmallVec<[i64; 5]>> {
    let mut fields = SmallVec::new();
    let mut rest = segment;
    while !rest.is_empty() {
        let (value, consumed) = decode_vlq(rest).map_err(|err| match err {
            MappingError::MalformedVlq { reason, .. } => MappingError::MalformedVlq {
                input: segment.to_string(),
                reason,
            },
            other => other,
        })?;
        fields.push(value);
        rest = &rest[consumed..];
    }
    Ok(fields)
}
