//! Grinding station data.

use super::particles::{ParticleField, PressureLevel};
use crate::assets::Sprite;
use crate::process::{
    BandEdges, BandRates, ProgressDriver, RateModel, StageDescriptor, StageTable,
    VerdictThresholds,
};

/// One animation frame every 20ms.
pub const FRAME_MS: u64 = 20;

/// Progress per frame in tenths: 250 frames, a five second run.
pub const PROGRESS_STEP: u32 = 4;

pub const INITIAL_LEAVES: u32 = 1000;

pub const LEAF_EDGES: BandEdges = BandEdges::new(30.0, 70.0);

/// Leaf pile consumed per frame in tenths for light / medium / heavy pressure.
pub const LEAF_LOSS: BandRates = BandRates::new(1, 2, 3);

/// Stone wobble radius in canvas units.
pub const WOBBLE_AMPLITUDE: f64 = 10.0;

/// Milliseconds per radian of stone wobble.
pub const WOBBLE_RATE_MS: f64 = 200.0;

pub const GRINDING_THRESHOLDS: VerdictThresholds = VerdictThresholds {
    minimum: 50.0,
    ceiling: 95.0,
    ideal_low: 40.0,
    ideal_high: 60.0,
};

pub const GRINDING_STAGES: StageTable = StageTable::new(&[
    StageDescriptor::labelled(0.0, 35.0, "Crushing leaves"),
    StageDescriptor::labelled(35.0, 70.0, "Grinding into paste"),
    StageDescriptor::labelled(70.0, 100.0, "Working the paste fine"),
]);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrindingModel;

impl RateModel for GrindingModel {
    fn name(&self) -> &'static str {
        "grinding"
    }

    fn tick_interval_ms(&self, _control: f64) -> u64 {
        FRAME_MS
    }

    fn progress_step(&self) -> u32 {
        PROGRESS_STEP
    }

    fn initial_metric(&self) -> u32 {
        INITIAL_LEAVES
    }

    fn next_metric(&self, metric: u32, _progress: u32, control: f64) -> u32 {
        metric.saturating_sub(LEAF_LOSS.rate(&LEAF_EDGES, control))
    }

    fn metric_bounded(&self) -> bool {
        true
    }

    fn thresholds(&self) -> VerdictThresholds {
        GRINDING_THRESHOLDS
    }
}

/// Grindstone and leaf-pile sprites, loaded on first display.
#[derive(Debug, Clone)]
pub struct GrindingAssets {
    pub stone: Sprite,
    pub leaves: Sprite,
}

#[derive(Debug, Clone)]
pub struct GrindingStation {
    pub driver: ProgressDriver<GrindingModel>,
    pub pressure: PressureLevel,
    pub field: ParticleField,
    pub assets: Option<GrindingAssets>,
    /// Wall time fed to the station, drives the stone wobble.
    pub clock_ms: u64,
    pub last_stage: usize,
}

impl GrindingStation {
    pub fn new(pressure: PressureLevel) -> Self {
        Self {
            driver: ProgressDriver::new(GrindingModel, pressure.control_value()),
            pressure,
            field: ParticleField::default(),
            assets: None,
            clock_ms: 0,
            last_stage: 0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.driver.state().progress()
    }

    /// Leaf pile remaining, percent.
    pub fn leaves_remaining(&self) -> f64 {
        self.driver.state().derived_metric()
    }
}

impl Default for GrindingStation {
    fn default() -> Self {
        Self::new(PressureLevel::default())
    }
}
