use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::document::Document;

/// Append-only record log. Appending a record is the backend's commit
/// point: a record is either fully on disk or ignored on replay.
#[derive(Debug)]
pub struct RecordLog {
    pub file: File,
    pub position: u64,
    pub sync_mode: SyncMode,
    unsynced: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Immediate,  // fsync after every record
    Batch,      // fsync every ~1MB
    None,       // Let OS handle it
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub operation: Operation,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    AddDocument { id: DocId, doc: Document },
}

/// Record framing: [len: u32 LE][crc32: u32 LE][bincode payload].
const RECORD_HEADER: u64 = 8;
const BATCH_SYNC_BYTES: u64 = 1024 * 1024;

impl RecordLog {
    /// Open the log at `path`, replaying every intact record. A
    /// truncated or corrupt tail is cut off so later appends land
    /// after the last good record.
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<(Self, Vec<Operation>)> {
        let (operations, valid_len) = if path.exists() {
            Self::replay(path)?
        } else {
            (Vec::new(), 0)
        };

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;

        if file.metadata()?.len() > valid_len {
            warn!(
                "dropping damaged tail of {} after byte {}",
                path.display(),
                valid_len
            );
            file.set_len(valid_len)?;
        }
        file.seek(SeekFrom::End(0))?;

        let log = RecordLog {
            file,
            position: valid_len,
            sync_mode,
            unsynced: 0,
        };

        Ok((log, operations))
    }

    /// Append one record. On success the record is durable under the
    /// configured sync mode; on failure nothing before it is affected.
    pub fn append(&mut self, operation: &Operation) -> Result<()> {
        let record = LogRecord {
            operation: operation.clone(),
            timestamp: Utc::now(),
        };

        let data = bincode::serialize(&record)?;
        let len = data.len() as u32;
        let crc = crc32fast::hash(&data);

        self.file.write_all(&len.to_le_bytes())?;
        self.file.write_all(&crc.to_le_bytes())?;
        self.file.write_all(&data)?;

        self.position += RECORD_HEADER + data.len() as u64;
        self.unsynced += RECORD_HEADER + data.len() as u64;

        match self.sync_mode {
            SyncMode::Immediate => self.sync()?,
            SyncMode::Batch if self.unsynced >= BATCH_SYNC_BYTES => self.sync()?,
            _ => {}
        }

        Ok(())
    }

    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        self.unsynced = 0;
        Ok(())
    }

    fn replay(path: &Path) -> Result<(Vec<Operation>, u64)> {
        let mut operations = Vec::new();
        let mut file = File::open(path)?;
        let mut position = 0u64;

        loop {
            let mut header = [0u8; 8];
            if file.read_exact(&mut header).is_err() {
                break; // End of file, or a torn header
            }

            let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
            let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            let mut data = vec![0u8; len];
            if file.read_exact(&mut data).is_err() {
                break; // Torn record body
            }

            if crc32fast::hash(&data) != crc {
                warn!("checksum mismatch in {} at byte {}", path.display(), position);
                break;
            }

            match bincode::deserialize::<LogRecord>(&data) {
                Ok(record) => operations.push(record.operation),
                Err(err) => {
                    warn!("undecodable record in {} at byte {}: {}", path.display(), position, err);
                    break;
                }
            }

            position += RECORD_HEADER + len as u64;
        }

        Ok((operations, position))
    }
}
