use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::STAGE_COUNT;

/// Stage names in pipeline order, used for error messages and reporting.
pub const STAGE_NAMES: [&str; STAGE_COUNT] = ["plating", "carrying", "rice"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    /// Number of interchangeable servers staffing the stage.
    pub servers: u32,
    /// Mean service duration in minutes.
    pub mean_minutes: f64,
    /// Half-width of the uniform sampling window around the mean.
    pub jitter_minutes: f64,
}

impl StageParams {
    pub fn new(servers: u32, mean_minutes: f64, jitter_minutes: f64) -> Self {
        Self {
            servers,
            mean_minutes,
            jitter_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of tables to push through the pipeline.
    pub tables: u32,
    /// Per-stage staffing and timing, pipeline order.
    pub stages: [StageParams; STAGE_COUNT],
    /// Wall-clock reference for the start of service, "HH:MM".
    pub start_clock: String,
    /// RNG seed; a fixed (config, seed) pair reproduces a run bit-for-bit.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Canonical mess-hall staffing: 7 servers split 2/3/2.
        Self {
            tables: 60,
            stages: [
                StageParams::new(2, 0.8, 0.2),
                StageParams::new(3, 0.5, 0.1),
                StageParams::new(2, 0.8, 0.2),
            ],
            start_clock: "07:00".to_string(),
            seed: 0,
        }
    }
}

impl Config {
    /// Decode a config from JSON supplied by the rendering layer.
    /// The decoded value is validated before it is handed back.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric bound before a run is allowed to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tables < 1 {
            return Err(ConfigError::NoTables(self.tables));
        }
        for (idx, params) in self.stages.iter().enumerate() {
            let stage = STAGE_NAMES[idx];
            if params.servers < 1 {
                return Err(ConfigError::NoServers {
                    stage,
                    servers: params.servers,
                });
            }
            if !params.mean_minutes.is_finite() || params.mean_minutes < 0.0 {
                return Err(ConfigError::BadMean {
                    stage,
                    mean: params.mean_minutes,
                });
            }
            if !params.jitter_minutes.is_finite() || params.jitter_minutes < 0.0 {
                return Err(ConfigError::BadJitter {
                    stage,
                    jitter: params.jitter_minutes,
                });
            }
            // The sampling window floor is mean - jitter; it must stay above zero.
            if params.jitter_minutes >= params.mean_minutes {
                return Err(ConfigError::JitterSwallowsMean {
                    stage,
                    jitter: params.jitter_minutes,
                    mean: params.mean_minutes,
                });
            }
        }
        self.start_time()?;
        Ok(())
    }

    /// Parse the start-of-service wall-clock reference.
    pub fn start_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.start_clock, "%H:%M")
            .map_err(|_| ConfigError::BadStartClock(self.start_clock.clone()))
    }
}
