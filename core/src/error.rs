use thiserror::Error;

/// Everything that can make a run config unusable. Raised once, up front;
/// a run that has started cannot fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one table is required, got {0}")]
    NoTables(u32),

    #[error("the {stage} stage needs at least one server, got {servers}")]
    NoServers { stage: &'static str, servers: u32 },

    #[error("the {stage} stage mean must be a finite, non-negative number of minutes, got {mean}")]
    BadMean { stage: &'static str, mean: f64 },

    #[error("the {stage} stage jitter must be a finite, non-negative number of minutes, got {jitter}")]
    BadJitter { stage: &'static str, jitter: f64 },

    #[error("the {stage} stage jitter ({jitter} min) must stay below its mean ({mean} min)")]
    JitterSwallowsMean {
        stage: &'static str,
        jitter: f64,
        mean: f64,
    },

    #[error("start clock must be an HH:MM wall-clock time, got {0:?}")]
    BadStartClock(String),

    #[error("config JSON is malformed: {0}")]
    Malformed(String),
}
