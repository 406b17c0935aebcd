#![allow(dead_code)] // each test root pulls in the parts it needs

use servery_core::*;

/// Builder around [`Config`] so cases read as staffing decisions.
pub struct TestHarness {
    pub config: Config,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut harness = Self::new();
        harness.config.seed = seed;
        harness
    }

    pub fn tables(mut self, tables: u32) -> Self {
        self.config.tables = tables;
        self
    }

    pub fn stage(mut self, stage: usize, servers: u32, mean: f64, jitter: f64) -> Self {
        self.config.stages[stage] = StageParams::new(servers, mean, jitter);
        self
    }

    pub fn servers(mut self, servers: [u32; STAGE_COUNT]) -> Self {
        for (stage, count) in servers.into_iter().enumerate() {
            self.config.stages[stage].servers = count;
        }
        self
    }

    pub fn run(&self) -> Vec<CompletionRecord> {
        Simulation::run(&self.config).expect("test config should be valid")
    }
}

pub fn realized(records: &[CompletionRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.offset_minutes)
        .fold(0.0, f64::max)
}
