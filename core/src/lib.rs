pub mod config;
pub mod engine;
pub mod error;
pub mod process;
pub mod report;
pub mod resource;

pub use config::{Config, StageParams, STAGE_NAMES};
pub use engine::{CompletionRecord, EventKind, PendingEvent, Simulation};
pub use error::ConfigError;
pub use process::{Phase, TableProcess};
pub use report::{CurvePoint, HistogramBucket, RunReport, TargetStatus};
pub use resource::{Admission, StagePool};

/// Tables are numbered 1..=N by the driver.
pub type TableId = u32;

/// Fixed service pipeline: plating -> carrying -> rice.
pub const STAGE_COUNT: usize = 3;

/// Virtual-clock resolution (the clock counts Microseconds)
pub const US_PER_MINUTE: u64 = 60_000_000;
