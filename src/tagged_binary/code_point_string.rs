//! 4-byte-per-character string fields of the tagged container.
//!
//! Titles, variable names and zone names are stored as a run of little-endian
//! `u32` code points closed by a zero code point. Only code points up to
//! [`MAX_ASCII_CODE_POINT`] are kept: anything above is dropped from the decoded
//! string without a replacement character. Existing archives are read back with
//! this exact lossy rule, so it must not be widened to full Unicode.
use nom::{number::complete::le_u32, IResult};

use crate::constants::MAX_ASCII_CODE_POINT;

/// Parse one zero-terminated code point string.
///
/// Arguments
/// -----------------
/// * `input`: bytes starting at the first code point of the field.
///
/// Return
/// ----------
/// * `(remaining, text)` where `remaining` starts right after the zero terminator.
///   A buffer ending before the terminator fails with `ErrorKind::Eof`.
pub fn code_point_string(input: &[u8]) -> IResult<&[u8], String> {
    let mut text = String::new();
    let mut rest = input;
    loop {
        let (next, code) = le_u32(rest)?;
        rest = next;
        match code {
            0 => return Ok((rest, text)),
            c if c <= MAX_ASCII_CODE_POINT => text.push(char::from(c as u8)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod test_code_point_string {
    use super::*;

    fn encode(codes: &[u32]) -> Vec<u8> {
        codes.iter().flat_map(|c| c.to_le_bytes()).collect()
    }

    #[test]
    fn test_ascii_string() {
        let mut bytes = encode(&[b'F' as u32, b'O' as u32, b'O' as u32, 0]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let (rest, text) = code_point_string(&bytes).unwrap();
        assert_eq!(text, "FOO");
        assert_eq!(rest, &[0xAA, 0xBB]);
    }

    #[test]
    fn test_extended_code_points_are_dropped() {
        let bytes = encode(&[b'T' as u32, 0xE9, 128, b'X' as u32, 0x1F600, 0]);
        let (_, text) = code_point_string(&bytes).unwrap();
        assert_eq!(text, "TX");
    }

    #[test]
    fn test_empty_string() {
        let bytes = encode(&[0]);
        let (rest, text) = code_point_string(&bytes).unwrap();
        assert!(text.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_missing_terminator_is_an_error() {
        let bytes = encode(&[b'A' as u32, b'B' as u32]);
        assert!(code_point_string(&bytes).is_err());
    }
}
