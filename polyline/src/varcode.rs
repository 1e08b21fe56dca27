//! # Polyline VarCode: Variable-Length Signed Integer Encoding
//!
//! This module implements the integer layer of the Encoded Polyline format.
//! A signed 32-bit integer is zig-zag mapped onto an unsigned value and then
//! written as a run of printable ASCII characters, five bits at a time,
//! least-significant group first.
//!
//! ## Encoding Format
//!
//! Each character carries:
//! - Lower 5 bits for value data
//! - Bit 0x20 as continuation flag
//! - An offset of 63 so that every character lands in `'?'..='~'`
//!
//! For example, decimal `-179` zig-zags to `357` and encodes as `"dJ"`:
//! - `'d'` = 100 - 63 = 0b10_0101: continuation set + bits 0-4 of value
//! - `'J'` = 74 - 63 = 0b00_1011: continuation clear (final) + bits 5-9
//!
//! Small deltas are the common case when encoding paths, and values in
//! `-16..=15` fit in a single character.

use std::io::Cursor;

/// Maximum number of characters required to encode a zig-zagged `u32`.
/// Each character provides 5 bits, so 7 characters cover 35 bits.
pub const MAX_CHARS: usize = 7;

/// Number of value bits stored in each character.
const BITS_PER_CHAR: u32 = 5;

/// Bit mask to extract the lower 5 bits (value data) from a character.
const LOWER_BITS_MASK: u32 = 0x1F;

/// Flag bit indicating that more characters follow in the run.
const CONTINUATION_FLAG: u32 = 0x20;

/// Offset added to every 6-bit group so the output is printable ASCII.
pub const CHAR_OFFSET: u8 = 63;

/// Largest byte a well-formed encoding can contain (`'~'`).
pub const MAX_CHAR: u8 = CHAR_OFFSET + 0x3F;

/// Errors that can occur while decoding a VarCode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The run was incomplete (the last character had the continuation bit).
    #[error("incomplete varcode sequence")]
    IncompleteSequence,

    /// A byte outside of the printable range used by the format.
    #[error("invalid character 0x{byte:02x} at offset {position}")]
    InvalidCharacter {
        /// The offending byte
        byte: u8,
        /// Offset of the byte relative to the start of the run
        position: usize,
    },

    /// Attempted to decode from an empty input.
    #[error("empty input")]
    EmptyInput,

    /// The run is longer than any zig-zagged 32-bit value can be.
    #[error("attempted to decode a value exceeding {} bits", u32::BITS)]
    ValueOutOfBounds,

    /// Attempted to access an index outside the bounds of the input.
    #[error("attempted to access an index outside the bounds of the input")]
    IndexOutOfBounds,
}

/// Maps a signed integer onto an unsigned one so that small magnitudes of
/// either sign stay small. Negative values become odd, non-negative even.
///
/// Bit-identical to `if n < 0 { !(n << 1) } else { n << 1 }` on 32-bit
/// two's complement.
#[inline]
pub fn zigzag(value: i32) -> u32 {
    (value.wrapping_shl(1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Utility for VarCode encoding/decoding operations.
#[derive(Debug, Clone)]
pub struct VarCode;

impl VarCode {
    /// Encodes a signed integer, appending the characters to `out`.
    ///
    /// ## Parameters
    /// * `value` - The integer to encode
    /// * `out` - The buffer to append the encoded characters to
    pub fn encode_into(value: i32, out: &mut String) {
        let mut shifted = zigzag(value);

        while shifted >= CONTINUATION_FLAG {
            let group = (CONTINUATION_FLAG | (shifted & LOWER_BITS_MASK)) as u8;
            out.push(char::from(group + CHAR_OFFSET));
            shifted >>= BITS_PER_CHAR;
        }

        // The loop above leaves at most 5 bits behind.
        out.push(char::from(shifted as u8 + CHAR_OFFSET));
    }

    /// Decodes one VarCode run from the start of `bytes`.
    ///
    /// ## Returns
    /// * `Ok((value, bytes_read))` - The decoded value and consumed bytes
    /// * `Err(Error)` - If decoding fails
    pub fn try_decode(bytes: &[u8]) -> Result<(i32, usize), Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut result: u32 = 0;
        let mut shift = 0;

        for (position, &byte) in bytes.iter().enumerate() {
            if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
                return Err(Error::InvalidCharacter { byte, position });
            }

            if position == MAX_CHARS {
                return Err(Error::ValueOutOfBounds);
            }

            let group = u32::from(byte - CHAR_OFFSET);

            // The seventh character only has room for the top two bits of
            // a u32, anything above that is dropped.
            result |= (group & LOWER_BITS_MASK).wrapping_shl(shift);
            shift += BITS_PER_CHAR;

            if group & CONTINUATION_FLAG == 0 {
                return Ok((unzigzag(result), position + 1));
            }
        }

        Err(Error::IncompleteSequence)
    }

    /// Calculates the number of characters a value occupies when encoded,
    /// without performing the encoding.
    pub fn calculate_size(value: i32) -> usize {
        let mut shifted = zigzag(value);
        let mut size = 1;
        while shifted >= CONTINUATION_FLAG {
            size += 1;
            shifted >>= BITS_PER_CHAR;
        }
        size
    }
}

/// Encodes a single signed integer into its VarCode representation.
///
/// ```
/// assert_eq!(polyline::encode_signed(-179), "dJ");
/// assert_eq!(polyline::encode_signed(0), "?");
/// ```
pub fn encode_signed(value: i32) -> String {
    let mut out = String::with_capacity(VarCode::calculate_size(value));
    VarCode::encode_into(value, &mut out);
    out
}

/// Trait for reading VarCode values from a data source.
pub trait ReadVarCode {
    /// Reads a VarCode value from the source and advances past it.
    fn read_varcode(&mut self) -> Result<i32, Error>;
}

/// Reads VarCode runs from a byte cursor while advancing the position,
/// enabling sequential decoding of multiple values. The position is left
/// untouched when a read fails.
impl ReadVarCode for Cursor<&[u8]> {
    fn read_varcode(&mut self) -> Result<i32, Error> {
        let start_pos: usize = self
            .position()
            .try_into()
            .map_err(|_| Error::IndexOutOfBounds)?;

        let buffer = self.get_ref();

        if start_pos >= buffer.len() {
            return Err(Error::IndexOutOfBounds);
        }

        let (value, bytes_read) = VarCode::try_decode(&buffer[start_pos..])?;

        self.set_position((start_pos + bytes_read) as u64);

        Ok(value)
    }
}
