//! Decoder for the Killer Queen cabinet stats feed.
//!
//! Turns each raw line the cabinet broadcasts into a typed [`Event`]. The
//! decoder is pure per line: no I/O, no state carried between calls. Callers
//! feed lines in arrival order and decide what to do with failures.

pub mod decoder;
pub mod error;
pub mod event;
pub mod grammar;
pub mod payload;
pub mod recording;
pub mod replay;
pub mod stats;
pub mod timestamp;
pub mod types;

pub use decoder::{decode_at, Decoder};
pub use error::{DecodeError, FieldError, RecordingError};
pub use event::{Event, Payload, StatKind};
pub use recording::{read_recording, record_line, RecordingReader};
pub use replay::Replay;
pub use stats::DecodeStats;
pub use timestamp::{Clock, FixedClock, SystemClock};
pub use types::*;
