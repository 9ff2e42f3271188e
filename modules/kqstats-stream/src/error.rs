use crate::event::StatKind;

/// Result type alias for decoding a single line.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a line produced no event. Always local to that one line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Line does not match the stats grammar: {0:?}")]
    Validation(String),

    #[error("Unknown event kind: {0:?}")]
    UnknownEventKind(String),

    #[error("Bad {kind} value at position {position}: {source}")]
    FieldParse {
        kind: StatKind,
        position: usize,
        #[source]
        source: FieldError,
    },
}

impl DecodeError {
    /// Short class name, stable across messages. Used for log fields and counters.
    pub fn class(&self) -> &'static str {
        match self {
            DecodeError::Validation(_) => "validation",
            DecodeError::UnknownEventKind(_) => "unknown_event_kind",
            DecodeError::FieldParse { .. } => "field_parse",
        }
    }
}

/// A single positional token that failed its expected parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("missing value")]
    Missing,

    #[error("invalid decimal {0:?}")]
    Decimal(String),

    #[error("invalid integer {0:?}")]
    Integer(String),

    #[error("player id {0} outside 1..=10")]
    PlayerOutOfRange(i64),

    #[error("invalid boolean {0:?}")]
    Boolean(String),

    #[error("invalid duration {0:?}")]
    Duration(String),

    #[error("invalid time of day {0:?}")]
    TimeOfDay(String),
}

/// Errors loading a recorded stream from disk.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("Recording {0} contains no messages")]
    Empty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
