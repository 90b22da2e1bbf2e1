//! File-backed log storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Log storage backed by a single append-only file.
///
/// Writes go through a handle opened in append mode, so every record
/// lands at the end of the file no matter what replay has done.
/// Replay goes through a separate buffered read handle that scans the
/// file front to back; the two handles never fight over a shared seek
/// position.
///
/// `sync` maps to `File::sync_all`, so an allocation acknowledged with
/// `sync_on_write` enabled has reached the disk, not just the OS cache.
///
/// # Example
///
/// ```no_run
/// use seqid_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("counters.log")).unwrap();
/// backend.append(b"record bytes").unwrap();
/// backend.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    writer: File,
    reader: BufReader<File>,
    read_pos: u64,
    size: u64,
}

impl FileBackend {
    /// Opens the log file at `path`, creating it if missing.
    ///
    /// An existing file is never truncated; its contents are what the
    /// replay cursor will walk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let writer = OpenOptions::new().append(true).create(true).open(path)?;
        let size = writer.metadata()?.len();
        let reader = BufReader::new(File::open(path)?);

        Ok(Self {
            writer,
            reader,
            read_pos: 0,
            size,
        })
    }
}

impl StorageBackend for FileBackend {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        let offset = self.size;
        self.writer.write_all(data)?;
        self.size += data.len() as u64;
        Ok(offset)
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.writer.sync_all()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.size)
    }

    fn rewind(&mut self) -> StorageResult<()> {
        // Seeking through the BufReader discards its stale buffer
        self.reader.seek(SeekFrom::Start(0))?;
        self.read_pos = 0;
        Ok(())
    }

    fn read_next(&mut self, len: usize) -> StorageResult<Vec<u8>> {
        if self.read_pos.saturating_add(len as u64) > self.size {
            return Err(StorageError::ReadPastEnd {
                offset: self.read_pos,
                len,
                size: self.size,
            });
        }

        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf)?;
        self.read_pos += len as u64;
        Ok(buf)
    }
}
