//! timeline.rs: day segmentation and recovery windows.
//!
//! Hourly readings are scored with the simulation engine and sampled every
//! `n` hours; contiguous safe stretches become recovery windows.

use serde::{Deserialize, Serialize};

use crate::reading::EnvironmentalReading;
use crate::scoring::assess;
use crate::status::Status;

/// One hourly input row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub hour: u8,
    pub reading: EnvironmentalReading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub hour: u8,
    pub label: String,
    pub score: u8,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    pub average_score: f64,
}

/// `0 → "12 AM"`, `13 → "1 PM"`. Hours wrap modulo 24.
pub fn hour_label(hour: u8) -> String {
    let h = hour % 24;
    let suffix = if h < 12 { "AM" } else { "PM" };
    let twelve = match h % 12 {
        0 => 12,
        x => x,
    };
    format!("{twelve} {suffix}")
}

/// Score every `every_n_hours`-th reading (by position). Zero is treated as one.
pub fn segment_day(readings: &[HourlyReading], every_n_hours: usize) -> Vec<Segment> {
    let step = every_n_hours.max(1);
    readings
        .iter()
        .step_by(step)
        .map(|r| {
            let a = assess(&r.reading);
            Segment {
                hour: r.hour,
                label: hour_label(r.hour),
                score: a.score,
                status: a.status,
            }
        })
        .collect()
}

/// Contiguous runs of safe segments.
pub fn recovery_windows(segments: &[Segment]) -> Vec<RecoveryWindow> {
    segments
        .split(|s| s.status != Status::Safe)
        .filter_map(|run| {
            let (first, last) = (run.first()?, run.last()?);
            let total: u32 = run.iter().map(|s| u32::from(s.score)).sum();
            Some(RecoveryWindow {
                start_hour: first.hour,
                end_hour: last.hour,
                average_score: f64::from(total) / run.len() as f64,
            })
        })
        .collect()
}
