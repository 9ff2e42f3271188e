//! Recorded cabinet streams.
//!
//! A recording holds one received message per line, prefixed with its receive
//! time in epoch milliseconds: `<epochMs>,<raw message>`. That is the same
//! optional epoch prefix the decoder already understands, so recorded lines
//! decode with their original timestamps.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::error::RecordingError;

/// Format one recording line for a message received at `received_at`.
pub fn record_line(received_at: DateTime<Utc>, raw: &str) -> String {
    format!("{},{}", received_at.timestamp_millis(), raw)
}

/// Streams lines from a recording in file order, skipping blank lines.
pub struct RecordingReader {
    lines: Lines<BufReader<File>>,
}

impl RecordingReader {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    pub async fn next_line(&mut self) -> Result<Option<String>, RecordingError> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim_end_matches('\r');
            if !line.trim().is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
        Ok(None)
    }
}

/// Load a whole recording into memory.
pub async fn read_recording(path: impl AsRef<Path>) -> Result<Vec<String>, RecordingError> {
    let path = path.as_ref();
    let mut reader = RecordingReader::open(path).await?;
    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await? {
        lines.push(line);
    }
    if lines.is_empty() {
        return Err(RecordingError::Empty(path.display().to_string()));
    }
    Ok(lines)
}
