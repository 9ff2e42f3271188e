use std::time::Duration;

/// Plays back a loaded recording in order, one line per call.
///
/// When `looping` is set the replay wraps around to the first line once
/// exhausted and never ends. Pacing is left to the caller; `interval` is only
/// carried so a replay can be handed around with its intended cadence.
#[derive(Debug, Clone)]
pub struct Replay {
    lines: Vec<String>,
    cursor: usize,
    looping: bool,
    interval: Duration,
}

impl Replay {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: 0,
            looping: false,
            interval: Duration::from_secs(1),
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn next_line(&mut self) -> Option<&str> {
        if self.lines.is_empty() {
            return None;
        }
        if self.cursor >= self.lines.len() {
            if !self.looping {
                return None;
            }
            self.cursor = 0;
        }
        let line = &self.lines[self.cursor];
        self.cursor += 1;
        Some(line.as_str())
    }
}
