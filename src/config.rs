//! Workshop configuration, stored as JSON in ~/.teacraft/config.json.

use crate::utils::persistence::{load_json_or_default, save_json, teacraft_dir};
use crate::workshop::{CraftStep, PressureLevel};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";

/// Frame interval of the terminal loop.
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    /// Stations to build. Input for a station left out here is ignored.
    pub stations: Vec<CraftStep>,
    /// Where `grind-stone.txt` and `tea-leaves.txt` live. Defaults to
    /// ~/.teacraft/assets.
    pub assets_dir: Option<PathBuf>,
    pub initial_heat: f64,
    pub initial_pressure: PressureLevel,
    pub frame_ms: u64,
    /// `tracing` filter used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            stations: CraftStep::ALL.to_vec(),
            assets_dir: None,
            initial_heat: crate::workshop::steaming::DEFAULT_HEAT,
            initial_pressure: PressureLevel::default(),
            frame_ms: DEFAULT_FRAME_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl WorkshopConfig {
    /// Load from ~/.teacraft/config.json; a missing or malformed file gives
    /// the defaults.
    pub fn load() -> Self {
        load_json_or_default(CONFIG_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(CONFIG_FILE, self)
    }

    pub fn has_station(&self, step: CraftStep) -> bool {
        self.stations.contains(&step)
    }

    pub fn resolved_assets_dir(&self) -> Option<PathBuf> {
        match &self.assets_dir {
            Some(dir) => Some(dir.clone()),
            None => teacraft_dir().ok().map(|dir| dir.join("assets")),
        }
    }
}
