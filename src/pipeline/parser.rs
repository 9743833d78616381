/*!
 * Integer Parser
 * Whitespace-delimited decimal integers, stopping at the first malformed token
 */

use crate::core::limits::INITIAL_ARRAY_CAPACITY;
use crate::core::types::Value;

/// Parse every leading well-formed integer in `bytes`
///
/// Each token is optional ASCII whitespace, an optional sign, and one or
/// more decimal digits; a token ends at the first non-digit. Scanning stops
/// at the first token that does not parse (including one that overflows),
/// and everything after it is ignored. Never fails.
pub fn parse(bytes: &[u8]) -> Vec<Value> {
    let mut values = Vec::with_capacity(INITIAL_ARRAY_CAPACITY);
    let mut pos = 0;
    while let Some((value, next)) = next_value(bytes, pos) {
        values.push(value);
        pos = next;
    }
    values
}

/// Scan one integer starting at `pos`, returning it and the offset after it
fn next_value(bytes: &[u8], mut pos: usize) -> Option<(Value, usize)> {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits_start = pos;
    let mut magnitude: Value = 0;
    while let Some(&b) = bytes.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = Value::from(b - b'0');
        // Accumulate toward the sign so Value::MIN stays representable
        magnitude = magnitude.checked_mul(10)?;
        magnitude = if negative {
            magnitude.checked_sub(digit)?
        } else {
            magnitude.checked_add(digit)?
        };
        pos += 1;
    }

    if pos == digits_start {
        return None;
    }
    Some((magnitude, pos))
}

/// C `isspace` in the default locale
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
