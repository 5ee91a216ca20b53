//! Simulation configuration.

use crate::workshop::CraftStep;

/// Configuration for a simulation sweep.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Stations to sweep.
    pub stations: Vec<CraftStep>,

    /// Heat step between steaming runs.
    pub heat_step: f64,

    /// Random seed for the particle field.
    pub seed: u64,

    /// Simulated frame length fed to the stations, like the terminal loop.
    pub frame_ms: u64,

    /// Simulated time after which a run is abandoned.
    pub max_run_ms: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = every run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            stations: CraftStep::ALL.to_vec(),
            heat_step: 10.0,
            seed: 42,
            frame_ms: 10,
            max_run_ms: 600_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Sweep a single station.
    pub fn station(step: CraftStep) -> Self {
        Self {
            stations: vec![step],
            ..Default::default()
        }
    }

    /// Control values to try for `step`.
    pub fn sweep(&self, step: CraftStep) -> Vec<f64> {
        match step {
            CraftStep::Steaming => {
                let step = if self.heat_step > 0.0 { self.heat_step } else { 10.0 };
                let count = (100.0 / step).floor() as usize;
                let mut values: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
                if values.last().is_some_and(|&v| v < 100.0) {
                    values.push(100.0);
                }
                values
            }
            CraftStep::Grinding => crate::workshop::PressureLevel::ALL
                .iter()
                .map(|level| level.control_value())
                .collect(),
            CraftStep::Pressing => vec![crate::workshop::pressing::PRESSING_CONTROL],
        }
    }
}
