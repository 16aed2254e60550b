//! Record Module
//!
//! The `Student` entity and its fixed-width on-disk encoding.
//!
//! ## Record Layout (192 bytes, little-endian)
//! ```text
//! ┌──────────┬───────────┬────────────┬──────────────┬───────────┬─────────┬─────────┐
//! │ Roll (4) │ Name (50) │ Class (30) │ Address(100) │ Score (4) │ Fee (1) │ Pad (3) │
//! └──────────┴───────────┴────────────┴──────────────┴───────────┴─────────┴─────────┘
//!   i32        NUL-term    NUL-term     NUL-term       f32         0 / 1     zero
//! ```
//!
//! The layout matches existing `student_records.dat` files byte for byte so
//! they stay readable. There is no header, magic or record count.

mod codec;
mod student;

pub use codec::{
    amend, decode, encode, fit_text, ADDRESS_CAPACITY, ADDRESS_OFFSET, CLASS_CAPACITY,
    CLASS_OFFSET, FEE_OFFSET, NAME_CAPACITY, NAME_OFFSET, RECORD_SIZE, ROLL_OFFSET, SCORE_OFFSET,
};
pub use student::{Amendment, Student};
