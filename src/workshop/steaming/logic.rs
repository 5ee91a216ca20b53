//! Steaming station logic: input handling, ticking and derived visuals.

use super::types::*;
use crate::process::{clamp_control, RunPhase, Verdict};
use tracing::debug;

/// UI-agnostic input actions for the steaming station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteamingInput {
    /// Start when idle or finished, stop when running.
    Toggle,
    RaiseHeat,
    LowerHeat,
    /// Set the heat directly. Stored as given; rates clamp it.
    SetHeat(f64),
}

/// Apply one input. Returns the verdict when the input stopped a run.
pub fn process_input(station: &mut SteamingStation, input: SteamingInput) -> Option<Verdict> {
    match input {
        SteamingInput::Toggle => {
            if station.driver.is_running() {
                station.driver.stop()
            } else {
                station.driver.start();
                station.last_stage = 0;
                None
            }
        }
        SteamingInput::RaiseHeat => {
            let heat = (station.heat() + HEAT_STEP).min(100.0);
            station.driver.set_control(heat);
            None
        }
        SteamingInput::LowerHeat => {
            let heat = (station.heat() - HEAT_STEP).max(0.0);
            station.driver.set_control(heat);
            None
        }
        SteamingInput::SetHeat(heat) => {
            station.driver.set_control(heat);
            None
        }
    }
}

/// Advance the station by `dt_ms`. Returns true if any tick fired.
pub fn tick_steaming(station: &mut SteamingStation, dt_ms: u64) -> bool {
    let fired = station.driver.advance(dt_ms);
    if fired == 0 {
        return false;
    }

    let stage = STEAMING_STAGES.position(station.progress());
    if stage != station.last_stage {
        debug!(
            stage = STEAMING_STAGES.stages()[stage].label,
            moisture = station.moisture(),
            "steaming stage changed"
        );
        station.last_stage = stage;
    }
    true
}

/// Status line under the steamer: the current stage while running, the
/// verdict once a run has ended.
pub fn status_text(station: &SteamingStation) -> &'static str {
    match station.driver.phase() {
        RunPhase::Idle => "Not steamed",
        RunPhase::Running => STEAMING_STAGES.lookup(station.progress()).label,
        RunPhase::Finished { verdict, .. } => verdict_message(verdict),
    }
}

pub fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::InsufficientProcess => "Under-steamed, leaves still raw",
        Verdict::Optimal => "Perfectly steamed, colour and aroma intact",
        Verdict::OverProcessed => "Fire too fierce, aroma lost",
        Verdict::UnderProcessed => "Fire too gentle, grassiness remains",
        Verdict::Partial => "Steaming mostly done",
    }
}

/// Steam wisps and flames for a heat setting.
pub fn steam_visuals(heat: f64) -> SteamVisuals {
    let intensity = clamp_control(heat) / 100.0;

    let flames = std::array::from_fn(|k| {
        let k = k as f64;
        let flicker_s = if intensity < 0.3 {
            3.0 - k * 0.2
        } else if intensity > 0.7 {
            1.5 - k * 0.1
        } else {
            2.0 - k * 0.15
        };
        Flame {
            height: (30.0 + k * 5.0) * (0.7 + intensity * 0.6),
            width: (15.0 + k * 3.0) * (0.8 + intensity * 0.4),
            flicker_s,
        }
    });

    SteamVisuals {
        heat_level: HeatLevel::from_heat(heat),
        particle_count: (intensity * 20.0).floor() as usize + 5,
        particle_size: (2.0 * intensity, 6.0 * intensity),
        particle_duration_s: 4.0 - intensity * 2.0,
        flames,
    }
}

/// How green the leaves still look, 0 (cooked) to 100 (fresh).
pub fn leaf_greenness(progress: f64) -> f64 {
    (120.0 - progress).clamp(0.0, 100.0)
}

/// Leaf colour as RGB, shifting from green to olive as steaming proceeds.
pub fn leaf_rgb(progress: f64) -> (u8, u8, u8) {
    let greenness = leaf_greenness(progress);
    (
        (120.0 - greenness * 0.4).round() as u8,
        (100.0 + greenness).round() as u8,
        20,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::FinishReason;

    #[test]
    fn test_toggle_starts_then_stops() {
        let mut station = SteamingStation::default();
        assert_eq!(process_input(&mut station, SteamingInput::Toggle), None);
        assert!(station.driver.is_running());

        let verdict = process_input(&mut station, SteamingInput::Toggle);
        assert_eq!(verdict, Some(Verdict::InsufficientProcess));
        assert_eq!(station.driver.finish_reason(), Some(FinishReason::Stopped));
    }

    #[test]
    fn test_heat_buttons_stay_on_slider() {
        let mut station = SteamingStation::new(98.0);
        process_input(&mut station, SteamingInput::RaiseHeat);
        assert_eq!(station.heat(), 100.0);

        let mut station = SteamingStation::new(2.0);
        process_input(&mut station, SteamingInput::LowerHeat);
        assert_eq!(station.heat(), 0.0);
    }

    #[test]
    fn test_set_heat_is_not_validated() {
        let mut station = SteamingStation::default();
        process_input(&mut station, SteamingInput::SetHeat(140.0));
        assert_eq!(station.heat(), 140.0);
    }

    #[test]
    fn test_heat_change_mid_run_changes_rate_not_direction() {
        let mut station = SteamingStation::new(50.0);
        process_input(&mut station, SteamingInput::Toggle);
        for _ in 0..10 {
            station.driver.tick();
        }
        let moisture_before = station.moisture();
        let progress_before = station.progress();

        process_input(&mut station, SteamingInput::SetHeat(90.0));
        station.driver.tick();

        assert!((moisture_before - station.moisture() - 0.3).abs() < 1e-9);
        assert!(station.progress() > progress_before);
    }

    #[test]
    fn test_tick_steaming_reports_changes() {
        let mut station = SteamingStation::new(50.0);
        assert!(!tick_steaming(&mut station, 50));
        process_input(&mut station, SteamingInput::Toggle);
        assert!(!tick_steaming(&mut station, 20));
        assert!(tick_steaming(&mut station, 20));
    }

    #[test]
    fn test_status_text_follows_phase() {
        let mut station = SteamingStation::new(50.0);
        assert_eq!(status_text(&station), "Not steamed");
        process_input(&mut station, SteamingInput::Toggle);
        assert_eq!(status_text(&station), "Leaves softening");
        while station.driver.is_running() {
            station.driver.tick();
        }
        assert_eq!(status_text(&station), verdict_message(Verdict::Optimal));
    }

    #[test]
    fn test_steam_visuals_scale_with_heat() {
        let low = steam_visuals(0.0);
        let high = steam_visuals(100.0);
        assert_eq!(low.particle_count, 5);
        assert_eq!(high.particle_count, 25);
        assert!((low.particle_duration_s - 4.0).abs() < f64::EPSILON);
        assert!((high.particle_duration_s - 2.0).abs() < f64::EPSILON);
        assert!(high.flames[0].height > low.flames[0].height);
        assert_eq!(steam_visuals(50.0).heat_level, HeatLevel::Moderate);
    }

    #[test]
    fn test_leaf_colour_shifts() {
        assert_eq!(leaf_greenness(0.0), 100.0);
        assert_eq!(leaf_greenness(120.0), 0.0);
        assert_eq!(leaf_rgb(0.0), (80, 200, 20));
        assert_eq!(leaf_rgb(100.0), (112, 120, 20));
    }
}
