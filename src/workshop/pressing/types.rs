//! Pressing station data: gauge model, stage table with press geometry.

use crate::process::{
    ProgressDriver, RateModel, Ramp, StageDescriptor, StageTable, VerdictThresholds, VisualParams,
};

/// One pressing tick per 100ms.
pub const PRESS_TICK_MS: u64 = 100;

/// Progress per tick in tenths (1%).
pub const PROGRESS_STEP: u32 = 10;

/// The gauge follows progress until this point (tenths), then holds.
pub const GAUGE_RISE_UNTIL: u32 = 700;

/// Gauge gain: 1.4% of pressure per 1% of progress, as fourteen tenths.
pub const GAUGE_GAIN_TENTHS: u32 = 14;

/// Delay between completion and the cake appearing.
pub const CAKE_REVEAL_MS: u64 = 500;

/// Leaf pile height before pressing starts.
pub const LEAF_HEIGHT_FULL: f64 = 140.0;

/// Total downward travel of the press plate.
pub const PRESS_TRAVEL: f64 = 30.0;

/// The press has no user control; the driver carries this neutral value.
pub const PRESSING_CONTROL: f64 = 50.0;

pub const PRESSING_THRESHOLDS: VerdictThresholds = VerdictThresholds {
    minimum: 40.0,
    ceiling: 99.0,
    ideal_low: 0.0,
    ideal_high: 100.0,
};

const RESTING: VisualParams = VisualParams {
    offset: Ramp::flat(0.0),
    size: Ramp::flat(LEAF_HEIGHT_FULL),
};

pub const PRESSING_STAGES: StageTable = StageTable::new(&[
    StageDescriptor {
        lower_bound: 0.0,
        upper_bound: 20.0,
        label: "Preparing leaves",
        visual: RESTING,
    },
    StageDescriptor {
        lower_bound: 20.0,
        upper_bound: 40.0,
        label: "Steaming to soften",
        visual: RESTING,
    },
    StageDescriptor {
        lower_bound: 40.0,
        upper_bound: 60.0,
        label: "Pressing begins",
        visual: VisualParams {
            offset: Ramp::new(0.0, 1.5),
            size: Ramp::new(LEAF_HEIGHT_FULL, -2.0),
        },
    },
    StageDescriptor {
        lower_bound: 60.0,
        upper_bound: 80.0,
        label: "Holding pressure",
        visual: VisualParams {
            offset: Ramp::flat(PRESS_TRAVEL),
            size: Ramp::new(80.0, -1.5),
        },
    },
    StageDescriptor {
        lower_bound: 80.0,
        upper_bound: 100.0,
        label: "Pressed, cooling",
        visual: VisualParams {
            offset: Ramp::flat(PRESS_TRAVEL),
            size: Ramp::new(50.0, -0.5),
        },
    },
]);

/// Gauge reading in tenths for a progress value in tenths.
pub fn gauge_for_progress(progress: u32) -> u32 {
    let percent = (progress * GAUGE_GAIN_TENTHS / 100).min(100);
    percent * 10
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressingModel;

impl RateModel for PressingModel {
    fn name(&self) -> &'static str {
        "pressing"
    }

    fn tick_interval_ms(&self, _control: f64) -> u64 {
        PRESS_TICK_MS
    }

    fn progress_step(&self) -> u32 {
        PROGRESS_STEP
    }

    fn initial_metric(&self) -> u32 {
        0
    }

    fn next_metric(&self, metric: u32, progress: u32, _control: f64) -> u32 {
        if progress <= GAUGE_RISE_UNTIL {
            gauge_for_progress(progress)
        } else {
            metric
        }
    }

    fn thresholds(&self) -> VerdictThresholds {
        PRESSING_THRESHOLDS
    }
}

/// What the press looks like right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressView {
    pub plate_offset: f64,
    pub leaf_height: f64,
    /// Gauge reading, percent.
    pub gauge: f64,
    pub cake_visible: bool,
    pub status: &'static str,
}

#[derive(Debug, Clone)]
pub struct PressingStation {
    pub driver: ProgressDriver<PressingModel>,
    /// Countdown to the cake reveal after a completed run.
    pub reveal_in_ms: Option<u64>,
    pub cake_visible: bool,
    pub last_stage: usize,
}

impl PressingStation {
    pub fn new() -> Self {
        Self {
            driver: ProgressDriver::new(PressingModel, PRESSING_CONTROL),
            reveal_in_ms: None,
            cake_visible: false,
            last_stage: 0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.driver.state().progress()
    }

    pub fn gauge(&self) -> f64 {
        self.driver.state().derived_metric()
    }
}

impl Default for PressingStation {
    fn default() -> Self {
        Self::new()
    }
}
