use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{Config, StageParams, STAGE_NAMES};
use crate::error::ConfigError;
use crate::process::TableProcess;
use crate::resource::{Admission, StagePool};
use crate::{TableId, STAGE_COUNT, US_PER_MINUTE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A table shows up at the head of the pipeline.
    Arrival { table: TableId },
    /// A table's service at a stage ran its sampled duration.
    ServiceComplete { table: TableId, stage: usize },
}

/// A scheduled future action. Dispatch order is strictly (time, seq):
/// the insertion sequence is the deterministic tie-break for events due
/// at the same instant.
#[derive(Debug, Clone)]
pub struct PendingEvent {
    pub time: u64,
    pub seq: u64,
    pub kind: EventKind,
}

impl PartialEq for PendingEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl Eq for PendingEvent {}
impl PartialOrd for PendingEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PendingEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// One finished table, as handed back to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub table: TableId,
    /// Minutes elapsed from the start of service.
    pub offset_minutes: f64,
    /// Wall-clock completion time, "HH:MM:SS".
    pub finished_at: String,
}

pub struct Simulation {
    pub time: u64,
    next_seq: u64,
    events: BinaryHeap<Reverse<PendingEvent>>,
    pools: [StagePool; STAGE_COUNT],
    stages: [StageParams; STAGE_COUNT],
    tables: Vec<TableProcess>,
    rng: StdRng,
    served: Vec<(u64, TableId)>,
}

impl Simulation {
    /// Build the run context for an already-validated config.
    /// [`Simulation::run`] is the checked entry point.
    pub fn new(config: &Config) -> Self {
        Self {
            time: 0,
            next_seq: 0,
            events: BinaryHeap::new(),
            pools: config.stages.map(|params| StagePool::new(params.servers)),
            stages: config.stages,
            tables: (1..=config.tables).map(TableProcess::new).collect(),
            rng: StdRng::seed_from_u64(config.seed),
            served: Vec::with_capacity(config.tables as usize),
        }
    }

    /// Validate the config, push every table through the pipeline, and
    /// return one completion record per table, sorted by (offset, id).
    pub fn run(config: &Config) -> Result<Vec<CompletionRecord>, ConfigError> {
        config.validate()?;
        let start = config.start_time()?;

        let mut sim = Self::new(config);
        debug!(tables = config.tables, seed = config.seed, "seating tables");
        for table in 1..=config.tables {
            sim.schedule_in(0, EventKind::Arrival { table });
        }
        while sim.step() {}
        debug_assert!(sim.tables.iter().all(TableProcess::is_done));

        sim.served.sort_unstable();
        let realized_us = sim.served.last().map_or(0, |&(time, _)| time);
        debug!(
            served = sim.served.len(),
            realized_us, "service run complete"
        );

        Ok(sim
            .served
            .iter()
            .map(|&(time_us, table)| CompletionRecord {
                table,
                offset_minutes: time_us as f64 / US_PER_MINUTE as f64,
                finished_at: (start + Duration::microseconds(time_us as i64))
                    .format("%H:%M:%S")
                    .to_string(),
            })
            .collect())
    }

    /// Register an event `delay_us` after the current time. Never advances
    /// the clock. Delays are unsigned by construction; the signed boundary
    /// is checked in [`Simulation::sample_service`].
    pub fn schedule_in(&mut self, delay_us: u64, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Reverse(PendingEvent {
            time: self.time + delay_us,
            seq,
            kind,
        }));
    }

    /// Dispatch the earliest pending event. Returns false once the event
    /// set is drained, which is the only way a run ends.
    pub fn step(&mut self) -> bool {
        if let Some(Reverse(event)) = self.events.pop() {
            self.time = event.time;
            trace!(time_us = self.time, kind = ?event.kind, "dispatch");
            match event.kind {
                EventKind::Arrival { table } => self.request_stage(table, 0),
                EventKind::ServiceComplete { table, stage } => {
                    // The freed server goes to the oldest waiter, whose
                    // service starts at the current instant.
                    if let Some(waiter) = self.pools[stage].vacate() {
                        self.begin_service(waiter, stage);
                    }
                    let next = stage + 1;
                    if next < STAGE_COUNT {
                        self.request_stage(table, next);
                    } else {
                        self.complete(table);
                    }
                }
            }
            return true;
        }
        false
    }

    fn request_stage(&mut self, table: TableId, stage: usize) {
        self.table_mut(table).queue_at(stage);
        if self.pools[stage].admit(table) == Admission::Seated {
            self.begin_service(table, stage);
        }
    }

    fn begin_service(&mut self, table: TableId, stage: usize) {
        self.table_mut(table).begin_service(stage);
        let duration_us = self.sample_service(stage);
        self.schedule_in(duration_us, EventKind::ServiceComplete { table, stage });
    }

    fn complete(&mut self, table: TableId) {
        self.table_mut(table).finish();
        self.served.push((self.time, table));
    }

    /// Uniform draw from [mean - jitter, mean + jitter] minutes, floored at
    /// zero, converted to the integer clock. A negative or non-finite value
    /// surviving to the conversion is a sampling defect, not a run error.
    fn sample_service(&mut self, stage: usize) -> u64 {
        let params = &self.stages[stage];
        let low = params.mean_minutes - params.jitter_minutes;
        let high = params.mean_minutes + params.jitter_minutes;
        let minutes = self.rng.gen_range(low..=high).max(0.0);
        assert!(
            minutes.is_finite(),
            "bad {} service duration: {} minutes",
            STAGE_NAMES[stage],
            minutes
        );
        (minutes * US_PER_MINUTE as f64) as u64
    }

    fn table_mut(&mut self, table: TableId) -> &mut TableProcess {
        &mut self.tables[(table - 1) as usize]
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
