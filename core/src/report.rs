use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::engine::CompletionRecord;

/// Width of one completion-distribution bucket.
pub const BUCKET_MINUTES: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
    Met,
    Exceeded,
}

/// Tables finished within [start_minute, start_minute + BUCKET_MINUTES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub start_minute: u64,
    pub tables: u64,
}

/// One step of the cumulative completion curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub offset_minutes: f64,
    pub completed: u32,
}

/// Everything the rendering layer shows about a finished run, derived from
/// the completion records and the externally chosen target duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub target_minutes: f64,
    /// Offset of the last completion; the run's realized duration.
    pub realized_minutes: f64,
    /// target - realized; negative when the target was blown.
    pub slack_minutes: f64,
    pub status: TargetStatus,
    pub tables_served: u32,
    pub histogram: Vec<HistogramBucket>,
    pub curve: Vec<CurvePoint>,
}

impl RunReport {
    /// Records are expected in the driver's output order (offset ascending).
    pub fn from_records(records: &[CompletionRecord], target_minutes: f64) -> Self {
        let realized_minutes = records
            .iter()
            .map(|r| r.offset_minutes)
            .fold(0.0, f64::max);
        let status = if realized_minutes <= target_minutes {
            TargetStatus::Met
        } else {
            TargetStatus::Exceeded
        };

        Self {
            target_minutes,
            realized_minutes,
            slack_minutes: target_minutes - realized_minutes,
            status,
            tables_served: records.len() as u32,
            histogram: bucket_completions(records),
            curve: records
                .iter()
                .enumerate()
                .map(|(i, r)| CurvePoint {
                    offset_minutes: r.offset_minutes,
                    completed: i as u32 + 1,
                })
                .collect(),
        }
    }
}

/// Distribution of completions over 5-minute intervals. Only non-empty
/// buckets are reported.
fn bucket_completions(records: &[CompletionRecord]) -> Vec<HistogramBucket> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut offsets = Histogram::<u64>::new(3).expect("3 significant figures is in range");
    for record in records {
        let seconds = (record.offset_minutes * 60.0).floor() as u64;
        offsets
            .record(seconds)
            .expect("auto-resizing histogram rejects nothing");
    }

    offsets
        .iter_linear(BUCKET_MINUTES * 60)
        .enumerate()
        .filter(|(_, step)| step.count_since_last_iteration() > 0)
        .map(|(i, step)| HistogramBucket {
            start_minute: i as u64 * BUCKET_MINUTES,
            tables: step.count_since_last_iteration(),
        })
        .collect()
}
