//! Grinding station logic.

use super::particles::PressureLevel;
use super::types::*;
use crate::assets::{load_or_fallback, AssetKind};
use crate::process::{RunPhase, Verdict};
use rand::Rng;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrindingInput {
    /// Start when idle or finished, stop when running.
    Toggle,
    SetPressure(PressureLevel),
    Heavier,
    Lighter,
}

/// Apply one input. Returns the verdict when the input stopped a run.
pub fn process_input(station: &mut GrindingStation, input: GrindingInput) -> Option<Verdict> {
    match input {
        GrindingInput::Toggle => {
            if station.driver.is_running() {
                return station.driver.stop();
            }
            if station.driver.start() {
                station.field.clear();
                station.last_stage = 0;
            }
            None
        }
        GrindingInput::SetPressure(level) => {
            set_pressure(station, level);
            None
        }
        GrindingInput::Heavier => {
            set_pressure(station, station.pressure.heavier());
            None
        }
        GrindingInput::Lighter => {
            set_pressure(station, station.pressure.lighter());
            None
        }
    }
}

fn set_pressure(station: &mut GrindingStation, level: PressureLevel) {
    station.pressure = level;
    station.driver.set_control(level.control_value());
}

/// Advance the grinding run by `dt_ms`. Each fired tick is one particle
/// frame; the field freezes when the run ends.
pub fn tick_grinding<R: Rng>(station: &mut GrindingStation, dt_ms: u64, rng: &mut R) -> bool {
    station.clock_ms += dt_ms;

    let fired = station.driver.advance(dt_ms);
    for _ in 0..fired {
        station.field.frame(rng, station.pressure);
    }
    if fired == 0 {
        return false;
    }

    let stage = GRINDING_STAGES.position(station.progress());
    if stage != station.last_stage {
        debug!(
            stage = GRINDING_STAGES.stages()[stage].label,
            particles = station.field.len(),
            "grinding stage changed"
        );
        station.last_stage = stage;
    }
    true
}

/// Load both sprites the first time the station is shown.
pub fn ensure_assets<R: Rng>(station: &mut GrindingStation, dir: Option<&Path>, rng: &mut R) {
    if station.assets.is_some() {
        return;
    }
    station.assets = Some(GrindingAssets {
        stone: load_or_fallback(dir, AssetKind::GrindStone, rng),
        leaves: load_or_fallback(dir, AssetKind::TeaLeaves, rng),
    });
}

/// Stone displacement from its rest position, in canvas units. The stone
/// only wobbles while grinding.
pub fn stone_offset(station: &GrindingStation) -> (f64, f64) {
    if !station.driver.is_running() {
        return (0.0, 0.0);
    }
    let t = station.clock_ms as f64 / WOBBLE_RATE_MS;
    (t.sin() * WOBBLE_AMPLITUDE, t.cos() * WOBBLE_AMPLITUDE)
}

pub fn status_text(station: &GrindingStation) -> &'static str {
    match station.driver.phase() {
        RunPhase::Idle => "Ready to grind",
        RunPhase::Running => GRINDING_STAGES.lookup(station.progress()).label,
        RunPhase::Finished { verdict, .. } => verdict_message(verdict),
    }
}

pub fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::InsufficientProcess => "Leaves barely crushed",
        Verdict::Optimal => "Smooth, even paste",
        Verdict::OverProcessed => "Ground too hard, paste scorched",
        Verdict::UnderProcessed => "Ground too lightly, paste coarse",
        Verdict::Partial => "Paste still lumpy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::FinishReason;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(pressure: PressureLevel) -> GrindingStation {
        let mut station = GrindingStation::new(pressure);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        process_input(&mut station, GrindingInput::Toggle);
        while station.driver.is_running() {
            tick_grinding(&mut station, FRAME_MS, &mut rng);
        }
        station
    }

    #[test]
    fn test_medium_pressure_is_optimal() {
        let station = run(PressureLevel::Medium);
        assert_eq!(station.driver.finish_reason(), Some(FinishReason::Completed));
        assert_eq!(station.driver.verdict(), Some(Verdict::Optimal));
        assert_eq!(station.driver.tick_count(), 250);
        assert!((station.leaves_remaining() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_and_light_pressure() {
        assert_eq!(
            run(PressureLevel::Heavy).driver.verdict(),
            Some(Verdict::OverProcessed)
        );
        assert_eq!(
            run(PressureLevel::Light).driver.verdict(),
            Some(Verdict::UnderProcessed)
        );
    }

    #[test]
    fn test_particles_only_while_running() {
        let mut station = GrindingStation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            tick_grinding(&mut station, FRAME_MS, &mut rng);
        }
        assert!(station.field.is_empty());

        process_input(&mut station, GrindingInput::Toggle);
        for _ in 0..50 {
            tick_grinding(&mut station, FRAME_MS, &mut rng);
        }
        assert!(!station.field.is_empty());
    }

    #[test]
    fn test_restart_clears_particles() {
        let mut station = run(PressureLevel::Heavy);
        assert!(!station.field.is_empty());
        process_input(&mut station, GrindingInput::Toggle);
        assert!(station.field.is_empty());
        assert!(station.driver.is_running());
    }

    #[test]
    fn test_pressure_buttons_update_control() {
        let mut station = GrindingStation::default();
        process_input(&mut station, GrindingInput::Heavier);
        assert_eq!(station.pressure, PressureLevel::Heavy);
        assert_eq!(station.driver.state().control_value(), 80.0);
        process_input(&mut station, GrindingInput::SetPressure(PressureLevel::Light));
        assert_eq!(station.driver.state().control_value(), 20.0);
    }

    #[test]
    fn test_stone_rests_when_idle() {
        let mut station = GrindingStation::default();
        station.clock_ms = 1234;
        assert_eq!(stone_offset(&station), (0.0, 0.0));
        process_input(&mut station, GrindingInput::Toggle);
        let (dx, dy) = stone_offset(&station);
        assert!((dx.hypot(dy) - WOBBLE_AMPLITUDE).abs() < 1e-9);
    }

    #[test]
    fn test_assets_load_once() {
        let mut station = GrindingStation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        ensure_assets(&mut station, None, &mut rng);
        let first = station.assets.clone().map(|a| a.leaves);
        ensure_assets(&mut station, None, &mut rng);
        assert_eq!(station.assets.map(|a| a.leaves), first);
    }
}
