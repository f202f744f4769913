//! history.rs: in-memory log of status snapshots for quick diagnostics.

use std::sync::Mutex;

use crate::snapshot::StatusSnapshot;
use crate::status::Status;

pub const MAX_HISTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub ts_unix: i64,
    pub score: u8,
    pub status: Status,
    pub temperature: f64,
    pub aqi: f64,
}

#[derive(Debug)]
pub struct AssessmentHistory {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl AssessmentHistory {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, MAX_HISTORY_CAPACITY);
        Self {
            inner: Mutex::new(Vec::with_capacity(cap)),
            cap,
        }
    }

    pub fn push(&self, snap: &StatusSnapshot) {
        let entry = HistoryEntry {
            ts_unix: snap.captured_at.timestamp(),
            score: snap.assessment.score,
            status: snap.assessment.status,
            temperature: snap.reading.temperature,
            aqi: snap.reading.aqi,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let start = v.len().saturating_sub(n);
        v[start..].to_vec()
    }
}
