//! Line decoder: grammar → tokens → timestamp → kind → payload → event.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::error::{DecodeError, Result};
use crate::event::{Event, StatKind};
use crate::grammar;
use crate::payload;
use crate::timestamp::{self, Clock, SystemClock};

/// Decodes one stats line at a time. Holds no per-line state, so a single
/// decoder can be shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct Decoder<C = SystemClock> {
    clock: C,
}

impl Decoder<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> Decoder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn decode(&self, line: &str) -> Result<Event> {
        decode_at(line, self.clock.now())
    }
}

/// Decode `line` against a fixed "now". Same input and `now` always give the same event.
pub fn decode_at(line: &str, now: DateTime<Utc>) -> Result<Event> {
    let result = decode_inner(line, now);
    match &result {
        Ok(event) => trace!(kind = %event.kind(), ts = %event.timestamp(), "Decoded stat"),
        Err(e) => debug!(class = e.class(), error = %e, raw = line, "Rejected stat line"),
    }
    result
}

fn decode_inner(line: &str, now: DateTime<Utc>) -> Result<Event> {
    let tokens = grammar::tokenize(line)?;
    let ts = timestamp::resolve(tokens.epoch, now);
    let kind = StatKind::from_key(&tokens.key)
        .ok_or_else(|| DecodeError::UnknownEventKind(tokens.key.clone()))?;
    let payload = payload::build(kind, &tokens.values)?;
    Ok(Event::new(line, ts, payload))
}
