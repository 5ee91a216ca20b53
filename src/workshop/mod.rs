//! The tea workshop: three process stations behind one timeline.
//!
//! `Workshop` owns a handle per configured station and routes input to the
//! station of the selected craft step. Stations left out of the config have
//! no handle and ignore everything sent to them.

pub mod grinding;
pub mod pressing;
pub mod steaming;

pub use grinding::{GrindingInput, GrindingStation, PressureLevel};
pub use pressing::{PressingInput, PressingStation};
pub use steaming::{SteamingInput, SteamingStation};

use crate::config::WorkshopConfig;
use crate::process::Verdict;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Steps of the tea-making timeline, in workshop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftStep {
    Steaming,
    Grinding,
    Pressing,
}

impl CraftStep {
    pub const ALL: [CraftStep; 3] = [Self::Steaming, Self::Grinding, Self::Pressing];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Steaming => "Steaming",
            Self::Grinding => "Grinding",
            Self::Pressing => "Pressing",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Steaming => 0,
            Self::Grinding => 1,
            Self::Pressing => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next step on the timeline, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// UI-agnostic workshop actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopInput {
    NextStep,
    PrevStep,
    SelectStep(CraftStep),
    /// Start or stop the selected station.
    Toggle,
    /// Raise the selected station's control (heat, pressure).
    Increase,
    Decrease,
}

pub struct Workshop {
    selected: CraftStep,
    steaming: Option<SteamingStation>,
    grinding: Option<GrindingStation>,
    pressing: Option<PressingStation>,
    assets_dir: Option<PathBuf>,
    /// Verdict of the most recently finished run and the step it came from.
    last_verdict: Option<(CraftStep, Verdict)>,
}

impl Workshop {
    /// Build the configured stations. Shows the first configured step, and
    /// loads grinding assets right away if that step is grinding.
    pub fn new<R: Rng>(config: &WorkshopConfig, rng: &mut R) -> Self {
        let mut workshop = Self {
            selected: CraftStep::Steaming,
            steaming: config
                .has_station(CraftStep::Steaming)
                .then(|| SteamingStation::new(config.initial_heat)),
            grinding: config
                .has_station(CraftStep::Grinding)
                .then(|| GrindingStation::new(config.initial_pressure)),
            pressing: config
                .has_station(CraftStep::Pressing)
                .then(PressingStation::new),
            assets_dir: config.resolved_assets_dir(),
            last_verdict: None,
        };

        let first = CraftStep::ALL
            .into_iter()
            .find(|step| workshop.has_station(*step))
            .unwrap_or(CraftStep::Steaming);
        workshop.select_step(first, rng);

        info!(
            stations = ?config.stations,
            selected = first.name(),
            "workshop opened"
        );
        workshop
    }

    pub fn has_station(&self, step: CraftStep) -> bool {
        match step {
            CraftStep::Steaming => self.steaming.is_some(),
            CraftStep::Grinding => self.grinding.is_some(),
            CraftStep::Pressing => self.pressing.is_some(),
        }
    }

    /// Show a step. Runs on other steps keep going in the background.
    pub fn select_step<R: Rng>(&mut self, step: CraftStep, rng: &mut R) {
        if step != self.selected {
            debug!(from = self.selected.name(), to = step.name(), "step selected");
        }
        self.selected = step;

        if step == CraftStep::Grinding {
            if let Some(station) = self.grinding.as_mut() {
                grinding::ensure_assets(station, self.assets_dir.as_deref(), rng);
            }
        }
    }

    /// Apply one input. Returns the verdict when the input stopped a run.
    pub fn handle_input<R: Rng>(&mut self, input: WorkshopInput, rng: &mut R) -> Option<Verdict> {
        let verdict = match input {
            WorkshopInput::NextStep => {
                self.select_step(self.selected.next(), rng);
                None
            }
            WorkshopInput::PrevStep => {
                self.select_step(self.selected.prev(), rng);
                None
            }
            WorkshopInput::SelectStep(step) => {
                self.select_step(step, rng);
                None
            }
            WorkshopInput::Toggle => self.toggle_selected(),
            WorkshopInput::Increase => {
                self.adjust_selected(true);
                None
            }
            WorkshopInput::Decrease => {
                self.adjust_selected(false);
                None
            }
        };

        if let Some(verdict) = verdict {
            self.last_verdict = Some((self.selected, verdict));
        }
        verdict
    }

    fn toggle_selected(&mut self) -> Option<Verdict> {
        match self.selected {
            CraftStep::Steaming => {
                let station = self.steaming.as_mut()?;
                steaming::process_input(station, SteamingInput::Toggle)
            }
            CraftStep::Grinding => {
                let station = self.grinding.as_mut()?;
                grinding::process_input(station, GrindingInput::Toggle)
            }
            CraftStep::Pressing => {
                let station = self.pressing.as_mut()?;
                let input = if station.driver.is_running() {
                    PressingInput::Stop
                } else {
                    PressingInput::Start
                };
                pressing::process_input(station, input)
            }
        }
    }

    fn adjust_selected(&mut self, up: bool) {
        match self.selected {
            CraftStep::Steaming => {
                if let Some(station) = self.steaming.as_mut() {
                    let input = if up {
                        SteamingInput::RaiseHeat
                    } else {
                        SteamingInput::LowerHeat
                    };
                    steaming::process_input(station, input);
                }
            }
            CraftStep::Grinding => {
                if let Some(station) = self.grinding.as_mut() {
                    let input = if up {
                        GrindingInput::Heavier
                    } else {
                        GrindingInput::Lighter
                    };
                    grinding::process_input(station, input);
                }
            }
            // The press has no adjustable control.
            CraftStep::Pressing => {}
        }
    }

    /// Feed elapsed time to every station. Returns true if anything changed.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        let mut changed = false;

        if let Some(station) = self.steaming.as_mut() {
            let was_running = station.driver.is_running();
            changed |= steaming::tick_steaming(station, dt_ms);
            if was_running && !station.driver.is_running() {
                self.last_verdict = station.driver.verdict().map(|v| (CraftStep::Steaming, v));
            }
        }
        if let Some(station) = self.grinding.as_mut() {
            let was_running = station.driver.is_running();
            changed |= grinding::tick_grinding(station, dt_ms, rng);
            if was_running && !station.driver.is_running() {
                self.last_verdict = station.driver.verdict().map(|v| (CraftStep::Grinding, v));
            }
        }
        if let Some(station) = self.pressing.as_mut() {
            let was_running = station.driver.is_running();
            changed |= pressing::tick_pressing(station, dt_ms);
            if was_running && !station.driver.is_running() {
                self.last_verdict = station.driver.verdict().map(|v| (CraftStep::Pressing, v));
            }
        }

        changed
    }

    pub fn selected(&self) -> CraftStep {
        self.selected
    }

    pub fn steaming(&self) -> Option<&SteamingStation> {
        self.steaming.as_ref()
    }

    pub fn grinding(&self) -> Option<&GrindingStation> {
        self.grinding.as_ref()
    }

    pub fn grinding_mut(&mut self) -> Option<&mut GrindingStation> {
        self.grinding.as_mut()
    }

    pub fn pressing(&self) -> Option<&PressingStation> {
        self.pressing.as_ref()
    }

    pub fn last_verdict(&self) -> Option<(CraftStep, Verdict)> {
        self.last_verdict
    }

    /// Whether the station of `step` is mid-run.
    pub fn is_running(&self, step: CraftStep) -> bool {
        match step {
            CraftStep::Steaming => self.steaming.as_ref().is_some_and(|s| s.driver.is_running()),
            CraftStep::Grinding => self.grinding.as_ref().is_some_and(|s| s.driver.is_running()),
            CraftStep::Pressing => self.pressing.as_ref().is_some_and(|s| s.driver.is_running()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_step_navigation_wraps() {
        assert_eq!(CraftStep::Pressing.next(), CraftStep::Steaming);
        assert_eq!(CraftStep::Steaming.prev(), CraftStep::Pressing);
        assert_eq!(CraftStep::from_index(1), Some(CraftStep::Grinding));
        assert_eq!(CraftStep::from_index(3), None);
    }

    #[test]
    fn test_first_configured_step_is_selected() {
        let config = WorkshopConfig {
            stations: vec![CraftStep::Pressing],
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let workshop = Workshop::new(&config, &mut rng);
        assert_eq!(workshop.selected(), CraftStep::Pressing);
        assert!(!workshop.has_station(CraftStep::Steaming));
    }

    #[test]
    fn test_increase_on_pressing_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut workshop = Workshop::new(&WorkshopConfig::default(), &mut rng);
        workshop.select_step(CraftStep::Pressing, &mut rng);
        assert_eq!(workshop.handle_input(WorkshopInput::Increase, &mut rng), None);
        assert!(!workshop.is_running(CraftStep::Pressing));
    }
}
