//! Headless process simulator.
//!
//! Sweeps control values for each station and runs every setting to its
//! natural end with a seeded RNG, to check where the optimal band sits:
//! - Steaming: heat from 0 to 100 in steps
//! - Grinding: each pressure level
//! - Pressing: the single fixed run
//!
//! Runs go through the same station tick functions as the terminal workshop.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_station, RunRecord};
