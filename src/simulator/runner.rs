//! Simulation runner: drives each station to the end of its run.

use super::config::SimConfig;
use super::report::SimReport;
use crate::process::{FinishReason, Verdict};
use crate::workshop::{grinding, pressing, steaming, CraftStep, PressureLevel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub station: CraftStep,
    pub control: f64,
    /// `None` when the run hit `max_run_ms` without finishing.
    pub verdict: Option<Verdict>,
    pub reason: Option<FinishReason>,
    pub ticks: u64,
    pub progress: f64,
    pub metric: f64,
    pub elapsed_ms: u64,
}

/// Run one station at one control value until it finishes.
pub fn simulate_station(
    config: &SimConfig,
    step: CraftStep,
    control: f64,
    rng: &mut ChaCha8Rng,
) -> RunRecord {
    let frame_ms = config.frame_ms.max(1);
    let mut elapsed_ms = 0;

    match step {
        CraftStep::Steaming => {
            let mut station = steaming::SteamingStation::new(control);
            steaming::process_input(&mut station, steaming::SteamingInput::Toggle);
            while station.driver.is_running() && elapsed_ms < config.max_run_ms {
                steaming::tick_steaming(&mut station, frame_ms);
                elapsed_ms += frame_ms;
            }
            record(step, &station.driver, elapsed_ms)
        }
        CraftStep::Grinding => {
            let level = PressureLevel::ALL
                .into_iter()
                .find(|level| level.control_value() == control)
                .unwrap_or_default();
            let mut station = grinding::GrindingStation::new(level);
            grinding::process_input(&mut station, grinding::GrindingInput::Toggle);
            while station.driver.is_running() && elapsed_ms < config.max_run_ms {
                grinding::tick_grinding(&mut station, frame_ms, rng);
                elapsed_ms += frame_ms;
            }
            record(step, &station.driver, elapsed_ms)
        }
        CraftStep::Pressing => {
            let mut station = pressing::PressingStation::new();
            pressing::process_input(&mut station, pressing::PressingInput::Start);
            while station.driver.is_running() && elapsed_ms < config.max_run_ms {
                pressing::tick_pressing(&mut station, frame_ms);
                elapsed_ms += frame_ms;
            }
            record(step, &station.driver, elapsed_ms)
        }
    }
}

fn record<M: crate::process::RateModel>(
    station: CraftStep,
    driver: &crate::process::ProgressDriver<M>,
    elapsed_ms: u64,
) -> RunRecord {
    let state = driver.state();
    RunRecord {
        station,
        control: state.control_value(),
        verdict: driver.verdict(),
        reason: driver.finish_reason(),
        ticks: driver.tick_count(),
        progress: state.progress(),
        metric: state.derived_metric(),
        elapsed_ms,
    }
}

/// Sweep every configured station and collect the report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut records = Vec::new();

    for &step in &config.stations {
        for control in config.sweep(step) {
            let run = simulate_station(config, step, control, &mut rng);
            if config.verbosity >= 2 {
                eprintln!(
                    "  {:<9} control={:>5.1} ticks={:>4} progress={:>5.1} -> {}",
                    step.name(),
                    run.control,
                    run.ticks,
                    run.progress,
                    run.verdict.map(|v| v.name()).unwrap_or("unfinished"),
                );
            }
            records.push(run);
        }
    }

    SimReport::from_runs(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(step: CraftStep, control: f64) -> RunRecord {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        simulate_station(&config, step, control, &mut rng)
    }

    #[test]
    fn test_steaming_runs_end_naturally() {
        let ideal = run(CraftStep::Steaming, 50.0);
        assert_eq!(ideal.verdict, Some(Verdict::Optimal));
        assert_eq!(ideal.ticks, 500);
        assert_eq!(ideal.elapsed_ms, 15_000);

        let fierce = run(CraftStep::Steaming, 90.0);
        assert_eq!(fierce.reason, Some(FinishReason::Depleted));
        assert_eq!(fierce.verdict, Some(Verdict::OverProcessed));
    }

    #[test]
    fn test_pressing_takes_ten_seconds() {
        let press = run(CraftStep::Pressing, 50.0);
        assert_eq!(press.verdict, Some(Verdict::Optimal));
        assert_eq!(press.ticks, 100);
        assert_eq!(press.elapsed_ms, 10_000);
    }

    #[test]
    fn test_grinding_maps_control_to_pressure() {
        assert_eq!(run(CraftStep::Grinding, 80.0).verdict, Some(Verdict::OverProcessed));
        assert_eq!(run(CraftStep::Grinding, 20.0).verdict, Some(Verdict::UnderProcessed));
    }

    #[test]
    fn test_sweep_covers_every_setting() {
        let report = run_simulation(&SimConfig {
            verbosity: 0,
            ..Default::default()
        });
        assert_eq!(report.runs.len(), 11 + 3 + 1);
        assert_eq!(report.unfinished, 0);
    }
}
