use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DecodeError;
use crate::event::{Event, StatKind};

/// Per-run tally of decoded events and rejected lines. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub decoded: BTreeMap<StatKind, u64>,
    pub rejected: BTreeMap<&'static str, u64>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &Result<Event, DecodeError>) {
        match result {
            Ok(event) => *self.decoded.entry(event.kind()).or_default() += 1,
            Err(e) => *self.rejected.entry(e.class()).or_default() += 1,
        }
    }

    pub fn total_decoded(&self) -> u64 {
        self.decoded.values().sum()
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }
}
