//! # rollstore
//!
//! A single-user record store for student entities:
//! - Fixed-width 192-byte records in a headerless flat file
//! - Linear-scan lookup, in-place update, copy-and-replace delete
//! - Byte-compatible with legacy `student_records.dat` files
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       rollstore-cli                          │
//! │              (add / list / find / update / delete)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      RecordStore                             │
//! │        (open → operate → close, no cache, no locks)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌──────────────┐         ┌────────────────────┐
//!   │ Record Codec │         │     Data File      │
//!   │ (192 bytes)  │         │ (+ temp on delete) │
//!   └──────────────┘         └────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rollstore::{RecordStore, Student};
//!
//! let store = RecordStore::open_path("student_records.dat")?;
//! store.append(&Student::new(101, "Ana", "10th Grade", "12 Elm St", 88.5, true))?;
//! let ana = store.find_by_key(101)?;
//! assert_eq!(ana.map(|s| s.name), Some("Ana".to_string()));
//! # Ok::<(), rollstore::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, SyncStrategy};
pub use record::{Amendment, Student, RECORD_SIZE};
pub use store::{Outcome, RecordStore, Recovery, Scan};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rollstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
