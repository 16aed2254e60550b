//! Record Scan
//!
//! Sequential, lazy iteration over the fixed-width records of a data file.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, Result, StoreError};
use crate::record::{decode, Student, RECORD_SIZE};

/// Iterator over the records of a data file, oldest first.
///
/// The file stays open for as long as the `Scan` lives. A missing file yields
/// an empty scan. A trailing block shorter than [`RECORD_SIZE`] ends the scan
/// without an error.
pub struct Scan {
    /// `None` when the data file does not exist
    reader: Option<BufReader<File>>,
    /// Path for error reporting and logs
    path: PathBuf,
    /// Index of the next record to read
    index: u64,
    /// Set once end of data (or an error) has been reached
    done: bool,
}

impl Scan {
    /// Open a scan over `path`; a missing file gives an empty scan
    pub(crate) fn open(path: &Path) -> Result<Self> {
        match File::open(path) {
            Ok(file) => Ok(Self::from_file(path, file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self {
                reader: None,
                path: path.to_path_buf(),
                index: 0,
                done: true,
            }),
            Err(e) => Err(StoreError::unavailable(path, e)),
        }
    }

    /// Scan an already open handle, starting at its current position
    /// (callers pass freshly opened files, i.e. offset 0)
    pub(crate) fn from_file(path: &Path, file: File) -> Self {
        Self {
            reader: Some(BufReader::new(file)),
            path: path.to_path_buf(),
            index: 0,
            done: false,
        }
    }

    /// Restart from the first record
    pub fn rewind(&mut self) -> Result<()> {
        self.index = 0;
        match &mut self.reader {
            Some(reader) => {
                reader.seek(SeekFrom::Start(0)).at(&self.path)?;
                self.done = false;
            }
            None => self.done = true,
        }
        Ok(())
    }

    /// Index of the next record the scan will return
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Next raw block together with its record index
    pub(crate) fn next_block(&mut self) -> Option<Result<(u64, [u8; RECORD_SIZE])>> {
        if self.done {
            return None;
        }
        let reader = self.reader.as_mut()?;

        let mut block = [0u8; RECORD_SIZE];
        let filled = match fill_block(reader, &mut block) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(StoreError::unavailable(&self.path, e)));
            }
        };

        if filled < RECORD_SIZE {
            self.done = true;
            if filled > 0 {
                tracing::warn!(
                    path = %self.path.display(),
                    records = self.index,
                    stray_bytes = filled,
                    "ignoring trailing partial record"
                );
            }
            return None;
        }

        let index = self.index;
        self.index += 1;
        Some(Ok((index, block)))
    }
}

impl Iterator for Scan {
    type Item = Result<Student>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block()
            .map(|next| next.map(|(_, block)| decode(&block)))
    }
}

/// Read until `block` is full or the reader is exhausted; returns bytes read
fn fill_block(reader: &mut impl Read, block: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < block.len() {
        match reader.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
