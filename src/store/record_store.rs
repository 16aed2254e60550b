//! Record Store
//!
//! Append, scan, lookup, update and delete over one fixed-width data file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, SyncStrategy};
use crate::error::{IoResultExt, Result, StoreError};
use crate::record::{amend, decode, encode, Amendment, Student, RECORD_SIZE};

use super::replace::{self, Recovery};
use super::{Outcome, Scan};

/// The record-storage engine.
///
/// Holds only configuration; every call opens the data file, works on it and
/// closes it before returning.
///
/// Roll numbers are not unique unless [`Config::enforce_unique_keys`] is set.
/// With duplicates present, lookup, update and delete all act on the first
/// matching record in file order and never see the later ones.
#[derive(Debug)]
pub struct RecordStore {
    config: Config,
    /// Resolved scratch file for delete
    temp_path: PathBuf,
    /// What `open` repaired on disk
    recovery: Recovery,
}

impl RecordStore {
    /// Open a store with the given config
    ///
    /// Does not create the data file; the first append does. Repairs the
    /// leftovers of an interrupted delete before returning.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let temp_path = config.temp_path();
        let recovery = replace::recover(&config.data_path, &temp_path)?;

        tracing::debug!(
            data = %config.data_path.display(),
            temp = %temp_path.display(),
            ?recovery,
            "record store opened"
        );

        Ok(Self {
            config,
            temp_path,
            recovery,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::builder().data_path(path).build())
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Append one record at the end of the data file, creating it if needed.
    ///
    /// Existing records are never touched. Stray bytes from an earlier torn
    /// write (a tail shorter than one record) are cut off first so the new
    /// record lands on a record boundary.
    pub fn append(&self, student: &Student) -> Result<()> {
        student.validate()?;

        if self.config.enforce_unique_keys && self.find_by_key(student.roll_number)?.is_some() {
            return Err(StoreError::DuplicateKey(student.roll_number));
        }

        let path = self.data_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .at(path)?;

        let len = file.metadata().at(path)?.len();
        let aligned = len - len % RECORD_SIZE as u64;
        if aligned != len {
            tracing::warn!(
                path = %path.display(),
                stray_bytes = len - aligned,
                "truncating partial record before append"
            );
            file.set_len(aligned).at(path)?;
        }

        file.write_all(&encode(student)).at(path)?;
        self.sync(&file, path)?;

        tracing::debug!(
            roll_number = student.roll_number,
            index = aligned / RECORD_SIZE as u64,
            "record appended"
        );
        Ok(())
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Lazily iterate over every record in append order.
    ///
    /// A missing data file yields an empty scan. Call again (or
    /// [`Scan::rewind`]) to start over.
    pub fn scan_all(&self) -> Result<Scan> {
        Scan::open(self.data_path())
    }

    /// First record whose roll number equals `roll_number`
    pub fn find_by_key(&self, roll_number: i32) -> Result<Option<Student>> {
        let mut scan = self.scan_all()?;
        let found = locate(&mut scan, roll_number)?;

        tracing::debug!(roll_number, found = found.is_some(), "lookup");
        Ok(found.map(|(_, block)| decode(&block)))
    }

    /// Number of complete records in the data file
    pub fn count(&self) -> Result<usize> {
        self.scan_all()?
            .try_fold(0, |count, next| next.map(|_| count + 1))
    }

    /// True when the data file is missing or holds no complete record
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.scan_all()?.next().transpose()?.is_none())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Change the score and fee status of the first record with `roll_number`.
    ///
    /// `mutate` sees the current record and returns the new mutable fields.
    /// Only the score and fee bytes of the stored block are patched; the block
    /// is written back at the same offset, so no other byte of the file
    /// changes and its length stays the same.
    pub fn update_by_key<F>(&self, roll_number: i32, mutate: F) -> Result<Outcome>
    where
        F: FnOnce(&Student) -> Amendment,
    {
        let path = self.data_path();
        let mut file = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(roll_number, "update on missing data file");
                return Ok(Outcome::NotFound);
            }
            Err(e) => return Err(StoreError::unavailable(path, e)),
        };

        let mut scan = Scan::from_file(path, file.try_clone().at(path)?);
        let (index, mut block) = match locate(&mut scan, roll_number)? {
            Some(found) => found,
            None => {
                tracing::debug!(roll_number, "update target not found");
                return Ok(Outcome::NotFound);
            }
        };
        drop(scan);

        let amendment = mutate(&decode(&block));
        amendment.validate()?;
        amend(&mut block, amendment);

        let offset = index * RECORD_SIZE as u64;
        file.seek(SeekFrom::Start(offset)).at(path)?;
        file.write_all(&block).at(path)?;
        self.sync(&file, path)?;

        tracing::debug!(roll_number, offset, "record updated in place");
        Ok(Outcome::Found)
    }

    /// Set the score and fee status of the first record with `roll_number`
    pub fn set_score_and_fee(
        &self,
        roll_number: i32,
        total_score: f32,
        fee_paid: bool,
    ) -> Result<Outcome> {
        self.update_by_key(roll_number, |_| Amendment {
            total_score,
            fee_paid,
        })
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Remove the first record with `roll_number`.
    ///
    /// Copies every other record, in order and byte for byte, to the scratch
    /// file, then moves the scratch file over the data file. If the key is
    /// absent the scratch file is removed and the data file is left alone.
    pub fn delete_by_key(&self, roll_number: i32) -> Result<Outcome> {
        let path = self.data_path();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(roll_number, "delete on missing data file");
                return Ok(Outcome::NotFound);
            }
            Err(e) => return Err(StoreError::unavailable(path, e)),
        };

        let mut scan = Scan::from_file(path, file);
        let copied = self.copy_without(&mut scan, roll_number);
        drop(scan);

        match copied {
            Ok(Some(index)) => {
                let sync = self.config.sync_strategy == SyncStrategy::EveryWrite;
                if let Err(e) = replace::commit(&self.temp_path, path, sync) {
                    replace::abandon(&self.temp_path, path);
                    return Err(e);
                }
                tracing::info!(roll_number, index, "record deleted");
                Ok(Outcome::Found)
            }
            Ok(None) => {
                replace::discard(&self.temp_path);
                tracing::debug!(roll_number, "delete target not found");
                Ok(Outcome::NotFound)
            }
            Err(e) => {
                replace::discard(&self.temp_path);
                Err(e)
            }
        }
    }

    /// Stream `scan` into the scratch file, skipping the first record with
    /// `roll_number`. Returns the index of the skipped record, if any.
    fn copy_without(&self, scan: &mut Scan, roll_number: i32) -> Result<Option<u64>> {
        let temp = self.temp_path.as_path();
        let mut writer = BufWriter::new(File::create(temp).at(temp)?);
        let mut removed = None;

        while let Some(next) = scan.next_block() {
            let (index, block) = next?;
            if removed.is_none() && decode(&block).roll_number == roll_number {
                removed = Some(index);
                continue;
            }
            writer.write_all(&block).at(temp)?;
        }

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::unavailable(temp, e.into_error()))?;
        self.sync(&file, temp)?;

        Ok(removed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data file path
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Get the scratch file path used by delete
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Width of every record on disk
    pub fn record_width(&self) -> usize {
        RECORD_SIZE
    }

    /// What was repaired when this store was opened
    pub fn recovery(&self) -> Recovery {
        self.recovery
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn sync(&self, file: &File, path: &Path) -> Result<()> {
        match self.config.sync_strategy {
            SyncStrategy::EveryWrite => file.sync_data().at(path),
            SyncStrategy::OsBuffered => Ok(()),
        }
    }
}

/// Advance `scan` to the first record with `roll_number`, returning its
/// index and raw block
fn locate(scan: &mut Scan, roll_number: i32) -> Result<Option<(u64, [u8; RECORD_SIZE])>> {
    while let Some(next) = scan.next_block() {
        let (index, block) = next?;
        if decode(&block).roll_number == roll_number {
            return Ok(Some((index, block)));
        }
    }
    Ok(None)
}
