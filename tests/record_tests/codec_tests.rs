//! Tests for the fixed-width record codec
//!
//! These tests verify:
//! - The 192-byte layout and field offsets
//! - Round trips for in-bound values
//! - Text truncation at capacity - 1 bytes on a char boundary
//! - Decoding of blocks written by older tools
//! - Patching the score and fee bytes in place

use rollstore::record::{
    amend, decode, encode, fit_text, ADDRESS_CAPACITY, ADDRESS_OFFSET, CLASS_CAPACITY,
    CLASS_OFFSET, FEE_OFFSET, NAME_CAPACITY, NAME_OFFSET, RECORD_SIZE, ROLL_OFFSET, SCORE_OFFSET,
};
use rollstore::{Amendment, Student};

// =============================================================================
// Helper Functions
// =============================================================================

fn ana() -> Student {
    Student::new(101, "Ana", "10th Grade", "12 Elm Street", 88.5, true)
}

/// Build a block the way older writers left it: text followed by a NUL
/// and then arbitrary bytes up to the end of the field.
fn legacy_block(roll: i32, name: &str, score: f32, fee: u8) -> [u8; RECORD_SIZE] {
    let mut block = [0xAAu8; RECORD_SIZE];
    block[ROLL_OFFSET..ROLL_OFFSET + 4].copy_from_slice(&roll.to_le_bytes());

    block[NAME_OFFSET..NAME_OFFSET + name.len()].copy_from_slice(name.as_bytes());
    block[NAME_OFFSET + name.len()] = 0;
    block[CLASS_OFFSET] = 0;
    block[ADDRESS_OFFSET] = 0;

    block[SCORE_OFFSET..SCORE_OFFSET + 4].copy_from_slice(&score.to_le_bytes());
    block[FEE_OFFSET] = fee;
    block
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_record_size_matches_legacy_struct() {
    assert_eq!(RECORD_SIZE, 192);
    assert_eq!(ROLL_OFFSET, 0);
    assert_eq!(NAME_OFFSET, 4);
    assert_eq!(CLASS_OFFSET, 54);
    assert_eq!(ADDRESS_OFFSET, 84);
    assert_eq!(SCORE_OFFSET, 184);
    assert_eq!(FEE_OFFSET, 188);
}

#[test]
fn test_encode_field_placement() {
    let block = encode(&ana());

    assert_eq!(&block[0..4], &101i32.to_le_bytes());
    assert_eq!(&block[NAME_OFFSET..NAME_OFFSET + 3], b"Ana");
    assert!(block[NAME_OFFSET + 3..CLASS_OFFSET].iter().all(|&b| b == 0));
    assert_eq!(&block[CLASS_OFFSET..CLASS_OFFSET + 10], b"10th Grade");
    assert_eq!(&block[ADDRESS_OFFSET..ADDRESS_OFFSET + 13], b"12 Elm Street");
    assert_eq!(&block[SCORE_OFFSET..SCORE_OFFSET + 4], &88.5f32.to_le_bytes());
    assert_eq!(block[FEE_OFFSET], 1);
    assert_eq!(&block[FEE_OFFSET + 1..], &[0, 0, 0]);
}

#[test]
fn test_encode_unpaid_fee_is_zero_byte() {
    let mut student = ana();
    student.fee_paid = false;

    assert_eq!(encode(&student)[FEE_OFFSET], 0);
}

#[test]
fn test_encode_is_deterministic() {
    assert_eq!(encode(&ana()), encode(&ana()));
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip() {
    let student = ana();
    assert_eq!(decode(&encode(&student)), student);
}

#[test]
fn test_round_trip_empty_text_and_zero_score() {
    let student = Student::new(1, "", "", "", 0.0, false);
    assert_eq!(decode(&encode(&student)), student);
}

#[test]
fn test_round_trip_negative_roll_number() {
    // The codec itself accepts any i32; validation happens in the store
    let student = Student::new(-7, "Neg", "X", "Y", 1.25, false);
    assert_eq!(decode(&encode(&student)), student);
}

#[test]
fn test_round_trip_fields_at_exact_bound() {
    let student = Student::new(
        5,
        "n".repeat(NAME_CAPACITY - 1),
        "c".repeat(CLASS_CAPACITY - 1),
        "a".repeat(ADDRESS_CAPACITY - 1),
        450.75,
        true,
    );

    let block = encode(&student);
    assert_eq!(block[NAME_OFFSET + NAME_CAPACITY - 1], 0);
    assert_eq!(decode(&block), student);
}

#[test]
fn test_round_trip_multibyte_text() {
    let student = Student::new(9, "Zoë Ñúñez", "Klasse 10", "Straße 5, Köln", 77.0, true);
    assert_eq!(decode(&encode(&student)), student);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_overlong_name_truncated_to_49_bytes() {
    let student = Student::new(1, "x".repeat(80), "c", "a", 1.0, true);

    let block = encode(&student);
    let decoded = decode(&block);

    assert_eq!(decoded.name, "x".repeat(49));
    assert_eq!(block[NAME_OFFSET + 49], 0, "terminator must survive");
    assert_eq!(decoded.student_class, "c");
}

#[test]
fn test_overlong_fields_do_not_bleed_into_neighbours() {
    let student = Student::new(
        2,
        "n".repeat(200),
        "c".repeat(200),
        "a".repeat(200),
        3.5,
        false,
    );

    let decoded = decode(&encode(&student));

    assert_eq!(decoded.roll_number, 2);
    assert_eq!(decoded.name.len(), 49);
    assert_eq!(decoded.student_class.len(), 29);
    assert_eq!(decoded.address.len(), 99);
    assert_eq!(decoded.total_score, 3.5);
    assert!(!decoded.fee_paid);
}

#[test]
fn test_truncation_respects_char_boundary() {
    // 'é' is two bytes; 30 of them is 60 bytes, the 49-byte limit splits one
    let name = "é".repeat(30);

    assert_eq!(fit_text(&name, NAME_CAPACITY), "é".repeat(24));

    let decoded = decode(&encode(&Student::new(1, name, "", "", 0.0, false)));
    assert_eq!(decoded.name, "é".repeat(24));
}

#[test]
fn test_fit_text_stops_at_embedded_nul() {
    assert_eq!(fit_text("Ana\0Hidden", NAME_CAPACITY), "Ana");

    let decoded = decode(&encode(&Student::new(1, "Ana\0Hidden", "", "", 0.0, false)));
    assert_eq!(decoded.name, "Ana");
}

#[test]
fn test_fit_text_short_input_unchanged() {
    assert_eq!(fit_text("Ben", CLASS_CAPACITY), "Ben");
    assert_eq!(fit_text("", CLASS_CAPACITY), "");
}

// =============================================================================
// Legacy / Malformed Block Tests
// =============================================================================

#[test]
fn test_decode_legacy_block_ignores_bytes_after_terminator() {
    let block = legacy_block(102, "Ben", 70.0, 0);

    let student = decode(&block);

    assert_eq!(student.roll_number, 102);
    assert_eq!(student.name, "Ben");
    assert_eq!(student.student_class, "");
    assert_eq!(student.address, "");
    assert_eq!(student.total_score, 70.0);
    assert!(!student.fee_paid);
}

#[test]
fn test_decode_any_nonzero_fee_byte_is_paid() {
    assert!(decode(&legacy_block(1, "A", 1.0, 1)).fee_paid);
    assert!(decode(&legacy_block(1, "A", 1.0, 7)).fee_paid);
}

#[test]
fn test_decode_ignores_padding() {
    let clean = encode(&ana());
    let mut dirty = clean;
    dirty[FEE_OFFSET + 1..].copy_from_slice(&[0xFF, 0xEE, 0xDD]);

    assert_eq!(decode(&dirty), decode(&clean));
}

#[test]
fn test_decode_unterminated_field_uses_full_capacity() {
    let mut block = encode(&ana());
    block[CLASS_OFFSET..CLASS_OFFSET + CLASS_CAPACITY].fill(b'z');

    let student = decode(&block);

    assert_eq!(student.student_class, "z".repeat(CLASS_CAPACITY));
    assert_eq!(student.address, "12 Elm Street");
}

#[test]
fn test_decode_invalid_utf8_is_replaced() {
    let mut block = encode(&ana());
    block[NAME_OFFSET] = 0xFF;

    let student = decode(&block);

    assert_eq!(student.name, "\u{FFFD}na");
}

// =============================================================================
// Amend Tests
// =============================================================================

#[test]
fn test_amend_touches_only_score_and_fee() {
    let mut block = legacy_block(102, "Ben", 70.0, 0);
    let before = block;

    amend(
        &mut block,
        Amendment {
            total_score: 95.25,
            fee_paid: true,
        },
    );

    assert_eq!(&block[..SCORE_OFFSET], &before[..SCORE_OFFSET]);
    assert_eq!(&block[FEE_OFFSET + 1..], &before[FEE_OFFSET + 1..]);
    assert_eq!(&block[SCORE_OFFSET..SCORE_OFFSET + 4], &95.25f32.to_le_bytes());
    assert_eq!(block[FEE_OFFSET], 1);

    let student = decode(&block);
    assert_eq!(student.total_score, 95.25);
    assert!(student.fee_paid);
}
