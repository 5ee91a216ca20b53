//! Three-band rate functions shared by the stations.
//!
//! User controls are not validated when they are set. They are clamped to
//! `[0, 100]` here, at the point a rate is derived from them.

use serde::{Deserialize, Serialize};

pub const CONTROL_MIN: f64 = 0.0;
pub const CONTROL_MAX: f64 = 100.0;

/// Clamp a raw control value into `[0, 100]`. NaN reads as the minimum.
pub fn clamp_control(value: f64) -> f64 {
    if value.is_nan() {
        CONTROL_MIN
    } else {
        value.clamp(CONTROL_MIN, CONTROL_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlBand {
    Low,
    Medium,
    High,
}

/// Band boundaries. Values strictly below `low_below` are `Low`, values
/// strictly above `high_above` are `High`, everything between is `Medium`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEdges {
    pub low_below: f64,
    pub high_above: f64,
}

impl BandEdges {
    pub const fn new(low_below: f64, high_above: f64) -> Self {
        Self {
            low_below,
            high_above,
        }
    }

    pub fn classify(&self, control: f64) -> ControlBand {
        let control = clamp_control(control);
        if control > self.high_above {
            ControlBand::High
        } else if control < self.low_below {
            ControlBand::Low
        } else {
            ControlBand::Medium
        }
    }
}

/// Per-band step sizes, in tenths of a percent per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRates {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl BandRates {
    pub const fn new(low: u32, medium: u32, high: u32) -> Self {
        Self { low, medium, high }
    }

    pub fn for_band(&self, band: ControlBand) -> u32 {
        match band {
            ControlBand::Low => self.low,
            ControlBand::Medium => self.medium,
            ControlBand::High => self.high,
        }
    }

    /// Classify `control` with `edges` and return that band's rate.
    pub fn rate(&self, edges: &BandEdges, control: f64) -> u32 {
        self.for_band(edges.classify(control))
    }
}
