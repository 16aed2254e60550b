//! Fixed-width record codec
//!
//! Every `Student` encodes to exactly [`RECORD_SIZE`] bytes at the offsets
//! below. Offsets are spelled out rather than taken from a `#[repr(C)]`
//! struct, so the format does not depend on the compiler's layout.
//!
//! ## Text truncation
//! A text field with capacity `C` keeps at most `C - 1` bytes, so the field
//! always contains a NUL terminator. The cut falls on the last UTF-8
//! character boundary at or below `C - 1` bytes; text after an embedded NUL
//! is dropped as well. See [`fit_text`].

use bytes::{Buf, BufMut};

use super::{Amendment, Student};

// =============================================================================
// Layout Constants
// =============================================================================

pub const ROLL_OFFSET: usize = 0;
const ROLL_SIZE: usize = std::mem::size_of::<i32>();

pub const NAME_OFFSET: usize = ROLL_OFFSET + ROLL_SIZE;
pub const NAME_CAPACITY: usize = 50;

pub const CLASS_OFFSET: usize = NAME_OFFSET + NAME_CAPACITY;
pub const CLASS_CAPACITY: usize = 30;

pub const ADDRESS_OFFSET: usize = CLASS_OFFSET + CLASS_CAPACITY;
pub const ADDRESS_CAPACITY: usize = 100;

pub const SCORE_OFFSET: usize = ADDRESS_OFFSET + ADDRESS_CAPACITY;
const SCORE_SIZE: usize = std::mem::size_of::<f32>();

pub const FEE_OFFSET: usize = SCORE_OFFSET + SCORE_SIZE;
const FEE_SIZE: usize = 1;

/// Trailing pad to a multiple of 4 bytes, as in existing data files
const PADDING_SIZE: usize = 3;

/// Width of one encoded record in bytes
pub const RECORD_SIZE: usize = FEE_OFFSET + FEE_SIZE + PADDING_SIZE;

const _: () = assert!(RECORD_SIZE == 192);
const _: () = assert!(RECORD_SIZE % 4 == 0);

// =============================================================================
// Encoding
// =============================================================================

/// Encode a student into one fixed-width block.
///
/// Over-long text is truncated (see [`fit_text`]), never rejected.
pub fn encode(student: &Student) -> [u8; RECORD_SIZE] {
    let mut block = [0u8; RECORD_SIZE];
    let mut buf = &mut block[..];

    buf.put_i32_le(student.roll_number);
    put_text(&mut buf, &student.name, NAME_CAPACITY);
    put_text(&mut buf, &student.student_class, CLASS_CAPACITY);
    put_text(&mut buf, &student.address, ADDRESS_CAPACITY);
    buf.put_f32_le(student.total_score);
    buf.put_u8(u8::from(student.fee_paid));
    buf.put_bytes(0, PADDING_SIZE);

    debug_assert!(buf.is_empty());
    block
}

/// Cut `text` so that it fits a NUL-terminated field of `capacity` bytes.
///
/// Returns the prefix that [`encode`] actually stores: everything before the
/// first `'\0'`, then at most `capacity - 1` bytes ending on a char boundary.
pub fn fit_text(text: &str, capacity: usize) -> &str {
    let text = match text.find('\0') {
        Some(nul) => &text[..nul],
        None => text,
    };

    let limit = capacity.saturating_sub(1);
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn put_text(buf: &mut &mut [u8], text: &str, capacity: usize) {
    let stored = fit_text(text, capacity).as_bytes();
    buf.put_slice(stored);
    buf.put_bytes(0, capacity - stored.len());
}

/// Overwrite the score and fee bytes of an encoded block.
///
/// Every other byte, including undecodable text and padding, is left as it
/// was read.
pub fn amend(block: &mut [u8; RECORD_SIZE], amendment: Amendment) {
    let mut buf = &mut block[SCORE_OFFSET..FEE_OFFSET + FEE_SIZE];

    buf.put_f32_le(amendment.total_score);
    buf.put_u8(u8::from(amendment.fee_paid));
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one fixed-width block.
///
/// Text stops at the first NUL; invalid UTF-8 (possible in files written by
/// other tools) is replaced rather than rejected. Any non-zero fee byte reads
/// as paid. Padding is ignored.
pub fn decode(block: &[u8; RECORD_SIZE]) -> Student {
    let mut buf = &block[..];

    let roll_number = buf.get_i32_le();
    let name = take_text(&mut buf, NAME_CAPACITY);
    let student_class = take_text(&mut buf, CLASS_CAPACITY);
    let address = take_text(&mut buf, ADDRESS_CAPACITY);
    let total_score = buf.get_f32_le();
    let fee_paid = buf.get_u8() != 0;

    Student {
        roll_number,
        name,
        student_class,
        address,
        total_score,
        fee_paid,
    }
}

fn take_text(buf: &mut &[u8], capacity: usize) -> String {
    let field = &buf[..capacity];
    let end = field.iter().position(|&b| b == 0).unwrap_or(capacity);
    let text = String::from_utf8_lossy(&field[..end]).into_owned();
    buf.advance(capacity);
    text
}
