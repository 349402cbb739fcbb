//! Labeled elapsed-time entries for benchmark reports

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// One measured phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingEntry {
    pub label: String,
    pub nanos: u128,
}

/// Ordered list of measured phases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timings {
    entries: Vec<TimingEntry>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-measured duration
    pub fn mark(&mut self, label: impl Into<String>, elapsed: Duration) {
        self.entries.push(TimingEntry {
            label: label.into(),
            nanos: elapsed.as_nanos(),
        });
    }

    /// Run `f`, record how long it took under `label`, and pass its result through
    pub fn time<T>(&mut self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = f();
        self.mark(label, started.elapsed());
        out
    }

    pub fn entries(&self) -> &[TimingEntry] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<u128> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.nanos)
    }
}

impl fmt::Display for Timings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}: {} ns", entry.label, entry.nanos)?;
        }
        Ok(())
    }
}
