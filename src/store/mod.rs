//! Store Module
//!
//! The record-storage engine over a single flat file.
//!
//! ## Responsibilities
//! - Append encoded records at end of file
//! - Lazy linear scans from offset 0 (trailing partial block = end of data)
//! - First-match point lookup, in-place update and copy-and-replace delete
//! - Repair an interrupted delete when the store is opened
//!
//! ## Delete Protocol
//! ```text
//!  student_records.dat ──scan──► skip first match ──► temp_records.dat
//!                                                         │
//!                      match?  yes: rename temp over data ┘
//!                              no:  remove temp
//! ```
//!
//! Every operation opens the file, does its work and closes it again. Nothing
//! is cached between calls and there is no locking: callers sharing a file
//! across processes must serialize access themselves.

mod record_store;
mod replace;
mod scan;

pub use record_store::RecordStore;
pub use replace::Recovery;
pub use scan::Scan;

/// Result of a keyed mutation. A missing key is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The first record with the key was changed
    Found,
    /// No record has the key (or the store is empty); nothing was modified
    NotFound,
}

impl Outcome {
    pub fn is_found(self) -> bool {
        matches!(self, Outcome::Found)
    }
}
