use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::error::ChartResult;

use super::ProgressConfig;
use super::validation::validate_progress_config;

/// How the tracked job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Finished(JobOutcome),
}

/// Point-in-time view handed to progress observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub stage_index: usize,
    pub stage_name: String,
    pub stage_count: usize,
    pub running: bool,
}

/// Elapsed-time approximation of an opaque multi-stage job.
///
/// The stage only reflects how long the job has been running, never what the
/// backend is actually doing. Reaching the last stage says nothing about
/// completion; the stage simply stops advancing there.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    stages: SmallVec<[String; 8]>,
    interval: Duration,
    stage: usize,
    phase: Phase,
    timer_clears: u64,
}

impl ProgressSimulator {
    pub fn new(config: &ProgressConfig) -> ChartResult<Self> {
        validate_progress_config(config)?;
        Ok(Self {
            stages: config.stages.clone(),
            interval: config.interval(),
            stage: 0,
            phase: Phase::Idle,
            timer_clears: 0,
        })
    }

    #[must_use]
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage
    }

    #[must_use]
    pub fn stage_name(&self) -> &str {
        &self.stages[self.stage]
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[must_use]
    pub fn outcome(&self) -> Option<JobOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            Phase::Idle | Phase::Running => None,
        }
    }

    /// Number of times a running timer has been cleared over this
    /// simulator's lifetime; one per finished job.
    #[must_use]
    pub fn timer_clears(&self) -> u64 {
        self.timer_clears
    }

    #[must_use]
    fn last_stage(&self) -> usize {
        self.stages.len() - 1
    }

    /// Stage expected after `elapsed` of uninterrupted ticking.
    #[must_use]
    pub fn stage_at(&self, elapsed: Duration) -> usize {
        let ticks = elapsed.as_nanos() / self.interval.as_nanos().max(1);
        usize::try_from(ticks).map_or(self.last_stage(), |ticks| ticks.min(self.last_stage()))
    }

    /// Resets to the first stage and arms the timer.
    pub fn start(&mut self) -> ProgressSnapshot {
        self.stage = 0;
        self.phase = Phase::Running;
        debug!(stages = self.stages.len(), "progress started");
        self.snapshot()
    }

    /// Advances one stage, holding at the last one. Ignored unless running.
    pub fn tick(&mut self) -> ProgressSnapshot {
        if self.phase == Phase::Running {
            self.stage = (self.stage + 1).min(self.last_stage());
            trace!(stage = self.stage, name = %self.stage_name(), "progress tick");
        }
        self.snapshot()
    }

    /// Clears the timer. Returns `true` only for the call that actually
    /// stopped a running timer.
    pub fn finish(&mut self, outcome: JobOutcome) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Finished(outcome);
        self.timer_clears += 1;
        debug!(stage = self.stage, ?outcome, "progress timer cleared");
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stage_index: self.stage,
            stage_name: self.stage_name().to_owned(),
            stage_count: self.stages.len(),
            running: self.is_running(),
        }
    }
}

/// Runs `job` while advancing `simulator` on its fixed interval.
///
/// `observer` sees the reset snapshot, every tick, and the final snapshot
/// after the timer is cleared. The timer is cleared whether the job succeeds
/// or fails.
pub async fn run_with_progress<F, T, E, O>(
    simulator: &mut ProgressSimulator,
    job: F,
    mut observer: O,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    O: FnMut(&ProgressSnapshot),
{
    observer(&simulator.start());

    let period = simulator.interval();
    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(job);
    let result = loop {
        tokio::select! {
            biased;
            result = &mut job => break result,
            _ = timer.tick() => observer(&simulator.tick()),
        }
    };
    drop(timer);

    let outcome = if result.is_ok() {
        JobOutcome::Succeeded
    } else {
        JobOutcome::Failed
    };
    simulator.finish(outcome);
    observer(&simulator.snapshot());
    result
}
