//! Steaming station data: heat-driven rates, stage table and thresholds.

use crate::process::{
    clamp_control, BandEdges, BandRates, ProgressDriver, RateModel, StageDescriptor, StageTable,
    VerdictThresholds,
};
use serde::{Deserialize, Serialize};

/// Progress per tick in tenths (0.2%).
pub const PROGRESS_STEP: u32 = 2;

/// Moisture starts full.
pub const INITIAL_MOISTURE: u32 = 1000;

/// Heat at which a fresh station starts.
pub const DEFAULT_HEAT: f64 = 50.0;

/// Heat change per key press.
pub const HEAT_STEP: f64 = 5.0;

/// Moisture loss bands: gentle heat below 30, fierce heat above 70.
pub const MOISTURE_EDGES: BandEdges = BandEdges::new(30.0, 70.0);

/// Moisture loss per tick in tenths for gentle / moderate / fierce heat.
pub const MOISTURE_LOSS: BandRates = BandRates::new(1, 2, 3);

/// Heat range with the fastest steaming tick.
pub const IDEAL_HEAT_LOW: f64 = 40.0;
pub const IDEAL_HEAT_HIGH: f64 = 60.0;

pub const STEAMING_THRESHOLDS: VerdictThresholds = VerdictThresholds {
    minimum: 60.0,
    ceiling: 95.0,
    ideal_low: IDEAL_HEAT_LOW,
    ideal_high: IDEAL_HEAT_HIGH,
};

pub const STEAMING_STAGES: StageTable = StageTable::new(&[
    StageDescriptor::labelled(0.0, 20.0, "Leaves softening"),
    StageDescriptor::labelled(20.0, 40.0, "Aroma releasing"),
    StageDescriptor::labelled(40.0, 60.0, "Leaves darkening"),
    StageDescriptor::labelled(60.0, 80.0, "Shape settling"),
    StageDescriptor::labelled(80.0, 100.0, "Nearly done"),
    StageDescriptor::labelled(100.0, 100.0, "Steaming complete"),
]);

/// Milliseconds per steaming tick. Moderate heat steams fastest; gentle heat
/// slows down linearly, fierce heat slows down at half that slope.
pub fn tick_interval_for_heat(heat: f64) -> u64 {
    let heat = clamp_control(heat);
    let ms = if (IDEAL_HEAT_LOW..=IDEAL_HEAT_HIGH).contains(&heat) {
        30.0
    } else if heat < IDEAL_HEAT_LOW {
        50.0 + (IDEAL_HEAT_LOW - heat)
    } else {
        40.0 + (heat - IDEAL_HEAT_HIGH) * 0.5
    };
    ms.round() as u64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteamingModel;

impl RateModel for SteamingModel {
    fn name(&self) -> &'static str {
        "steaming"
    }

    fn tick_interval_ms(&self, control: f64) -> u64 {
        tick_interval_for_heat(control)
    }

    fn progress_step(&self) -> u32 {
        PROGRESS_STEP
    }

    fn initial_metric(&self) -> u32 {
        INITIAL_MOISTURE
    }

    fn next_metric(&self, metric: u32, _progress: u32, control: f64) -> u32 {
        metric.saturating_sub(MOISTURE_LOSS.rate(&MOISTURE_EDGES, control))
    }

    fn metric_bounded(&self) -> bool {
        true
    }

    fn thresholds(&self) -> VerdictThresholds {
        STEAMING_THRESHOLDS
    }
}

/// Heat label shown beside the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatLevel {
    Gentle,
    Moderate,
    Fierce,
}

impl HeatLevel {
    pub fn from_heat(heat: f64) -> Self {
        if heat < 30.0 {
            Self::Gentle
        } else if heat > 70.0 {
            Self::Fierce
        } else {
            Self::Moderate
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gentle => "Gentle fire",
            Self::Moderate => "Moderate fire",
            Self::Fierce => "Fierce fire",
        }
    }
}

/// Colour band of the moisture indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureBand {
    Ample,
    Adequate,
    Low,
    Critical,
}

impl MoistureBand {
    pub fn from_moisture(moisture: f64) -> Self {
        if moisture > 70.0 {
            Self::Ample
        } else if moisture > 40.0 {
            Self::Adequate
        } else if moisture > 20.0 {
            Self::Low
        } else {
            Self::Critical
        }
    }
}

/// One flame of the five-flame fire under the steamer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flame {
    pub height: f64,
    pub width: f64,
    /// Flicker period in seconds.
    pub flicker_s: f64,
}

/// Steam and fire parameters derived from the heat setting alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamVisuals {
    pub heat_level: HeatLevel,
    /// Number of steam wisps, 5 to 25.
    pub particle_count: usize,
    /// Wisp size range before scaling by intensity.
    pub particle_size: (f64, f64),
    /// Seconds for one wisp to rise.
    pub particle_duration_s: f64,
    pub flames: [Flame; 5],
}

/// A steaming station.
#[derive(Debug, Clone)]
pub struct SteamingStation {
    pub driver: ProgressDriver<SteamingModel>,
    /// Stage index seen on the previous tick, for transition logging.
    pub last_stage: usize,
}

impl SteamingStation {
    pub fn new(heat: f64) -> Self {
        Self {
            driver: ProgressDriver::new(SteamingModel, heat),
            last_stage: 0,
        }
    }

    pub fn heat(&self) -> f64 {
        self.driver.state().control_value()
    }

    pub fn progress(&self) -> f64 {
        self.driver.state().progress()
    }

    pub fn moisture(&self) -> f64 {
        self.driver.state().derived_metric()
    }
}

impl Default for SteamingStation {
    fn default() -> Self {
        Self::new(DEFAULT_HEAT)
    }
}
