//! Pressing station logic.

use super::types::*;
use crate::process::{FinishReason, RunPhase, Verdict};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressingInput {
    Start,
    Stop,
}

/// Apply one input. Returns the verdict when the input stopped a run.
pub fn process_input(station: &mut PressingStation, input: PressingInput) -> Option<Verdict> {
    match input {
        PressingInput::Start => {
            if station.driver.start() {
                station.cake_visible = false;
                station.reveal_in_ms = None;
                station.last_stage = 0;
            }
            None
        }
        PressingInput::Stop => {
            if station.driver.is_running() {
                station.driver.stop()
            } else {
                None
            }
        }
    }
}

/// Advance the press and the cake-reveal countdown. Returns true if anything
/// visible changed.
pub fn tick_pressing(station: &mut PressingStation, dt_ms: u64) -> bool {
    let mut changed = false;

    if let Some(remaining) = station.reveal_in_ms {
        let left = remaining.saturating_sub(dt_ms);
        if left == 0 {
            station.reveal_in_ms = None;
            station.cake_visible = true;
            info!("tea cake revealed");
        } else {
            station.reveal_in_ms = Some(left);
        }
        changed = true;
    }

    if station.driver.advance(dt_ms) > 0 {
        changed = true;

        let stage = PRESSING_STAGES.position(station.progress());
        if stage != station.last_stage {
            debug!(
                stage = PRESSING_STAGES.stages()[stage].label,
                gauge = station.gauge(),
                "pressing stage changed"
            );
            station.last_stage = stage;
        }

        if station.driver.finish_reason() == Some(FinishReason::Completed) {
            station.reveal_in_ms = Some(CAKE_REVEAL_MS);
        }
    }

    changed
}

/// Current geometry and label of the press.
pub fn press_view(station: &PressingStation) -> PressView {
    let progress = station.progress();
    let stage = PRESSING_STAGES.lookup(progress);
    let mut view = PressView {
        plate_offset: stage.offset_at(progress),
        leaf_height: stage.size_at(progress),
        gauge: station.gauge(),
        cake_visible: station.cake_visible,
        status: stage.label,
    };

    match station.driver.phase() {
        RunPhase::Idle => {
            view.status = "Ready";
        }
        RunPhase::Running => {}
        RunPhase::Finished {
            reason: FinishReason::Stopped,
            verdict,
        } => {
            view.status = verdict_message(verdict);
        }
        RunPhase::Finished { .. } => {
            if station.cake_visible {
                view.leaf_height = 0.0;
                view.status = "Tea cake pressed!";
            }
        }
    }

    view
}

pub fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::InsufficientProcess => "Stopped before the leaves were pressed",
        Verdict::Partial => "Cake half-formed, pressing cut short",
        Verdict::Optimal => "Tea cake pressed!",
        Verdict::OverProcessed => "Pressed too hard",
        Verdict::UnderProcessed => "Pressed too lightly",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(station: &mut PressingStation) {
        while station.driver.is_running() {
            station.driver.tick();
        }
    }

    #[test]
    fn test_idle_view() {
        let station = PressingStation::new();
        let view = press_view(&station);
        assert_eq!(view.status, "Ready");
        assert_eq!(view.plate_offset, 0.0);
        assert_eq!(view.leaf_height, LEAF_HEIGHT_FULL);
        assert!(!view.cake_visible);
    }

    #[test]
    fn test_press_descends_during_pressing_stage() {
        let mut station = PressingStation::new();
        process_input(&mut station, PressingInput::Start);
        for _ in 0..50 {
            station.driver.tick();
        }
        let view = press_view(&station);
        assert_eq!(view.status, "Pressing begins");
        assert!((view.plate_offset - 15.0).abs() < 1e-9);
        assert!((view.leaf_height - 120.0).abs() < 1e-9);
        assert!((view.gauge - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_holds_after_seventy() {
        let mut station = PressingStation::new();
        process_input(&mut station, PressingInput::Start);
        for _ in 0..70 {
            station.driver.tick();
        }
        assert!((station.gauge() - 98.0).abs() < 1e-9);
        run_to_end(&mut station);
        assert!((station.gauge() - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_cake_revealed_after_delay() {
        let mut station = PressingStation::new();
        process_input(&mut station, PressingInput::Start);
        // 100 ticks at 100ms each; advance is capped at 100ms per call.
        for _ in 0..100 {
            tick_pressing(&mut station, PRESS_TICK_MS);
        }
        assert!(!station.driver.is_running());
        assert_eq!(station.driver.verdict(), Some(Verdict::Optimal));
        assert_eq!(station.reveal_in_ms, Some(CAKE_REVEAL_MS));
        assert!(!press_view(&station).cake_visible);

        for _ in 0..5 {
            tick_pressing(&mut station, 100);
        }
        let view = press_view(&station);
        assert!(view.cake_visible);
        assert_eq!(view.leaf_height, 0.0);
        assert_eq!(view.status, "Tea cake pressed!");
    }

    #[test]
    fn test_restart_hides_cake() {
        let mut station = PressingStation::new();
        station.cake_visible = true;
        process_input(&mut station, PressingInput::Start);
        assert!(!station.cake_visible);
    }

    #[test]
    fn test_stop_early_is_insufficient() {
        let mut station = PressingStation::new();
        process_input(&mut station, PressingInput::Start);
        for _ in 0..10 {
            station.driver.tick();
        }
        let verdict = process_input(&mut station, PressingInput::Stop);
        assert_eq!(verdict, Some(Verdict::InsufficientProcess));
        assert_eq!(
            press_view(&station).status,
            verdict_message(Verdict::InsufficientProcess)
        );
    }

    #[test]
    fn test_stop_when_idle_is_ignored() {
        let mut station = PressingStation::new();
        assert_eq!(process_input(&mut station, PressingInput::Stop), None);
        assert_eq!(station.driver.phase(), RunPhase::Idle);
    }
}
