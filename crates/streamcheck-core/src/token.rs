//! Byte classification and integer token checks.

use std::num::IntErrorKind;

use crate::error::Rejection;

/// Whitespace as the C `isspace` function defines it in the "C" locale.
///
/// Unlike [`u8::is_ascii_whitespace`] this includes vertical tab.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Render a single byte for a diagnostic, wrapped in double quotes.
///
/// Printable ASCII is shown as-is. Control bytes and bytes from 0x80 up are
/// escaped so the diagnostic stays on one line.
pub fn quote(b: u8) -> String {
    match b {
        b'\t' => "\"\\t\"".to_string(),
        b'\n' => "\"\\n\"".to_string(),
        b'\r' => "\"\\r\"".to_string(),
        0x20..=0x7E => format!("\"{}\"", char::from(b)),
        _ => format!("\"\\x{:02x}\"", b),
    }
}

/// Check the character classes of an integer token without converting it.
///
/// The first byte must be `-` or a digit and all later bytes digits. This
/// deliberately accepts `-`, `007` and `-0`.
pub fn check_integer_shape(token: &str) -> Result<(), Rejection> {
    let bytes = token.as_bytes();
    match bytes.first() {
        Some(b'-') | Some(b'0'..=b'9') => {}
        _ => {
            return Err(Rejection::Mismatch {
                expected: "integer with leading digit or minus sign".to_string(),
                found: token.to_string(),
            })
        }
    }

    if bytes[1..].iter().all(u8::is_ascii_digit) {
        Ok(())
    } else {
        Err(Rejection::Mismatch {
            expected: "integer".to_string(),
            found: token.to_string(),
        })
    }
}

/// Convert a shape-checked token to `i64`.
pub fn parse_integer(token: &str) -> Result<i64, Rejection> {
    token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Rejection::Overflow {
            token: token.to_string(),
        },
        _ => Rejection::Malformed {
            token: token.to_string(),
        },
    })
}
