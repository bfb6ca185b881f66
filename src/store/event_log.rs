//! Append-only event log file.
//!
//! Between operations the file holds only complete, newline-terminated
//! records and the cursor sits at end-of-file.

use super::record::{decode, encode};
use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventType};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of `In` and `Out` records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub in_count: usize,
    pub out_count: usize,
}

impl Counts {
    pub fn bump(&mut self, kind: EventType) {
        match kind {
            EventType::In => self.in_count += 1,
            EventType::Out => self.out_count += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.in_count + self.out_count
    }

    pub fn tally<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut counts = Counts::default();
        for ev in events {
            counts.bump(ev.kind());
        }
        counts
    }
}

pub struct EventLog {
    file: File,
    path: PathBuf,
}

impl EventLog {
    /// Open for read/write, creating the file if absent.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.seek(SeekFrom::End(0))?;
        debug!(path = %path.display(), "event log opened");
        Ok(Self { file, path })
    }

    /// Read every event of an existing log without opening it for writing.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Vec<Event>> {
        let file = File::open(path.as_ref())?;
        let length = file.metadata()?.len();
        decode_all(BufReader::new(file.take(length)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> AppResult<u64> {
        Ok(self.file.metadata()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Decode every record in file order. Fails at the first bad line.
    pub fn read_all(&mut self) -> AppResult<Vec<Event>> {
        let length = self.len()?;
        self.file.seek(SeekFrom::Start(0))?;
        // bounded by the current length: device files may never hit EOF
        let result = decode_all(BufReader::new((&mut self.file).take(length)));
        // restore the end-of-file cursor even when decoding failed
        self.file.seek(SeekFrom::End(0))?;
        result
    }

    pub fn counts(&mut self) -> AppResult<Counts> {
        let events = self.read_all()?;
        Ok(Counts::tally(&events))
    }

    /// Write one record at the end of the file and sync it to disk.
    pub fn append(&mut self, event: &Event) -> AppResult<()> {
        event.validate()?;
        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(encode(event).as_bytes())?;
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }

    /// Remove the final record, including its trailing newline.
    ///
    /// Records are variable-length, so the boundary is found by scanning
    /// backwards from the byte before the final newline. The file keeps
    /// every byte up to and including the previous newline; with no
    /// earlier newline the file held a single record and becomes empty.
    pub fn truncate_last(&mut self) -> AppResult<()> {
        let length = self.len()?;
        if length < 2 {
            return Ok(());
        }

        let mut offset = length - 2;
        let mut byte = [0u8; 1];
        let new_length = loop {
            self.file.seek(SeekFrom::Start(offset))?;
            self.file.read_exact(&mut byte)?;
            if byte[0] == b'\n' {
                break offset + 1;
            }
            if offset == 0 {
                break 0;
            }
            offset -= 1;
        };

        self.file.set_len(new_length)?;
        self.file.seek(SeekFrom::End(0))?;
        self.file.sync_data()?;
        debug!(from = length, to = new_length, "truncated last record");
        Ok(())
    }

    /// Flush file contents and metadata, then release the handle.
    pub fn close(self) -> AppResult<()> {
        self.file.sync_all()?;
        debug!(path = %self.path.display(), "event log closed");
        Ok(())
    }
}

fn decode_all<R: BufRead>(mut reader: R) -> AppResult<Vec<Event>> {
    let mut events = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = std::str::from_utf8(&buf).map_err(|e| AppError::MalformedRecord {
            line: line_number,
            reason: format!("not valid UTF-8: {e}"),
        })?;
        events.push(decode(line, line_number)?);
    }
    Ok(events)
}
