//! Fixed-step progress driver shared by every station.
//!
//! Progress and the derived metric are kept in tenths of a percent so that
//! fractional steps (0.2, 0.3, 0.4 per tick) add up exactly. Real time enters
//! only through `advance`, which feeds an accumulator and fires whole ticks;
//! tests call `tick` directly.

use super::verdict::{evaluate, Verdict, VerdictThresholds};
use tracing::info;

/// Progress value (in tenths) at which a run completes.
pub const PROGRESS_FULL: u32 = 1000;

/// Upper bound on the time fed into one `advance` call, so a stalled frame
/// loop does not burst through a whole run at once.
pub const MAX_ADVANCE_MS: u64 = 100;

/// Station-specific rates. Implementations receive the raw control value and
/// clamp it themselves when deriving a rate.
pub trait RateModel {
    fn name(&self) -> &'static str;

    /// Milliseconds of simulated time per tick at this control value.
    fn tick_interval_ms(&self, control: f64) -> u64;

    /// Progress added per tick, in tenths.
    fn progress_step(&self) -> u32;

    /// Derived metric at run start, in tenths.
    fn initial_metric(&self) -> u32;

    /// Derived metric after a tick that brought progress to `progress`.
    fn next_metric(&self, metric: u32, progress: u32, control: f64) -> u32;

    /// Whether the metric reaching zero ends the run.
    fn metric_bounded(&self) -> bool {
        false
    }

    fn thresholds(&self) -> VerdictThresholds;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Progress reached 100.
    Completed,
    /// The derived metric ran out first.
    Depleted,
    /// The user stopped the run.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Finished {
        reason: FinishReason,
        verdict: Verdict,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the tick was discarded.
    Skipped,
    Advanced,
    Finished(FinishReason),
}

/// State owned by one simulator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    progress: u32,
    metric: u32,
    control_value: f64,
    is_running: bool,
}

impl SimulationState {
    fn new(control_value: f64, metric: u32) -> Self {
        Self {
            progress: 0,
            metric,
            control_value,
            is_running: false,
        }
    }

    /// Progress in percent, `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress as f64 / 10.0
    }

    pub fn progress_tenths(&self) -> u32 {
        self.progress
    }

    /// Derived metric in percent (moisture, pressure gauge, leaves remaining).
    pub fn derived_metric(&self) -> f64 {
        self.metric as f64 / 10.0
    }

    pub fn metric_tenths(&self) -> u32 {
        self.metric
    }

    pub fn control_value(&self) -> f64 {
        self.control_value
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }
}

#[derive(Debug, Clone)]
pub struct ProgressDriver<M> {
    model: M,
    state: SimulationState,
    phase: RunPhase,
    accumulated_ms: u64,
    tick_count: u64,
}

impl<M: RateModel> ProgressDriver<M> {
    pub fn new(model: M, control_value: f64) -> Self {
        let metric = model.initial_metric();
        Self {
            model,
            state: SimulationState::new(control_value, metric),
            phase: RunPhase::Idle,
            accumulated_ms: 0,
            tick_count: 0,
        }
    }

    /// Begin a run. Returns `false` and leaves everything untouched when a
    /// run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            return false;
        }

        self.state.progress = 0;
        self.state.metric = self.model.initial_metric();
        self.state.is_running = true;
        self.phase = RunPhase::Running;
        self.accumulated_ms = 0;
        self.tick_count = 0;

        info!(
            station = self.model.name(),
            control = self.state.control_value,
            "run started"
        );
        true
    }

    /// Advance one fixed step.
    ///
    /// Both stop conditions are checked after the update, progress first, so
    /// a tick that completes progress and exhausts the metric together ends
    /// as `Completed`.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;
        self.state.progress = (self.state.progress + self.model.progress_step()).min(PROGRESS_FULL);
        self.state.metric = self.model.next_metric(
            self.state.metric,
            self.state.progress,
            self.state.control_value,
        );

        if self.state.progress >= PROGRESS_FULL {
            self.finish(FinishReason::Completed);
            return TickOutcome::Finished(FinishReason::Completed);
        }
        if self.model.metric_bounded() && self.state.metric == 0 {
            self.finish(FinishReason::Depleted);
            return TickOutcome::Finished(FinishReason::Depleted);
        }

        TickOutcome::Advanced
    }

    /// Feed `dt_ms` of elapsed time and fire every tick that fits. The tick
    /// interval is re-read after each tick, so a control change takes effect
    /// on the next step. Returns the number of ticks fired.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        if !self.state.is_running {
            return 0;
        }

        self.accumulated_ms += dt_ms.min(MAX_ADVANCE_MS);
        let mut fired = 0;

        loop {
            let interval = self
                .model
                .tick_interval_ms(self.state.control_value)
                .max(1);
            if self.accumulated_ms < interval {
                break;
            }
            self.accumulated_ms -= interval;
            fired += 1;

            if let TickOutcome::Finished(_) = self.tick() {
                break;
            }
        }

        fired
    }

    /// Cancel a running run, keep its progress and metric, and evaluate it.
    ///
    /// Returns `None` if no run was ever started and the recorded verdict if
    /// the run already finished.
    pub fn stop(&mut self) -> Option<Verdict> {
        match self.phase {
            RunPhase::Idle => None,
            RunPhase::Finished { verdict, .. } => Some(verdict),
            RunPhase::Running => Some(self.finish(FinishReason::Stopped)),
        }
    }

    /// Classify the current state without changing it.
    pub fn evaluate(&self) -> Verdict {
        let metric = self
            .model
            .metric_bounded()
            .then(|| self.state.derived_metric());
        evaluate(
            &self.model.thresholds(),
            self.state.progress(),
            self.state.control_value,
            metric,
        )
    }

    fn finish(&mut self, reason: FinishReason) -> Verdict {
        self.state.is_running = false;
        self.accumulated_ms = 0;

        let verdict = self.evaluate();
        self.phase = RunPhase::Finished { reason, verdict };

        info!(
            station = self.model.name(),
            ?reason,
            ?verdict,
            progress = self.state.progress(),
            metric = self.state.derived_metric(),
            control = self.state.control_value,
            ticks = self.tick_count,
            "run finished"
        );
        verdict
    }

    /// Store a new control value as given. Clamping happens in the model.
    pub fn set_control(&mut self, value: f64) {
        self.state.control_value = value;
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Verdict of the last finished run, if any.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.phase {
            RunPhase::Finished { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self.phase {
            RunPhase::Finished { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
