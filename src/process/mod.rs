//! Shared process-simulation core.
//!
//! Every station (steaming, grinding, pressing) is a `ProgressDriver` over a
//! station-specific `RateModel`, a static `StageTable` for its status labels
//! and visual ramps, and a set of `VerdictThresholds` for the final verdict.

pub mod driver;
pub mod rate;
pub mod stage;
pub mod verdict;

pub use driver::{
    FinishReason, ProgressDriver, RateModel, RunPhase, SimulationState, TickOutcome,
    PROGRESS_FULL,
};
pub use rate::{clamp_control, BandEdges, BandRates, ControlBand};
pub use stage::{Ramp, StageDescriptor, StageTable, VisualParams};
pub use verdict::{evaluate, Verdict, VerdictThresholds};
