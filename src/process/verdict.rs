//! Completion evaluation: classifies a finished or aborted run.

use serde::{Deserialize, Serialize};

/// Final quality classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Stopped before the minimum progress.
    InsufficientProcess,
    /// Finished with the control inside the ideal band.
    Optimal,
    /// Finished with the control above the ideal band.
    OverProcessed,
    /// Finished with the control below the ideal band.
    UnderProcessed,
    /// Stopped between the minimum and the ceiling.
    Partial,
}

impl Verdict {
    pub const ALL: [Verdict; 5] = [
        Verdict::InsufficientProcess,
        Verdict::Optimal,
        Verdict::OverProcessed,
        Verdict::UnderProcessed,
        Verdict::Partial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InsufficientProcess => "Insufficient",
            Self::Optimal => "Optimal",
            Self::OverProcessed => "Over-processed",
            Self::UnderProcessed => "Under-processed",
            Self::Partial => "Partial",
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal)
    }
}

/// Station-specific thresholds. Defined once per station and read by both
/// the evaluator and the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictThresholds {
    /// Below this progress the run is insufficient.
    pub minimum: f64,
    /// Above this progress the run counts as complete.
    pub ceiling: f64,
    pub ideal_low: f64,
    pub ideal_high: f64,
}

impl VerdictThresholds {
    pub fn in_ideal_band(&self, control: f64) -> bool {
        control >= self.ideal_low && control <= self.ideal_high
    }
}

/// Classify a run from its final progress and control value.
///
/// `derived_metric` is passed only by stations whose metric can run out; an
/// exhausted metric (<= 0) counts as a finished run even below the ceiling.
pub fn evaluate(
    thresholds: &VerdictThresholds,
    progress: f64,
    control: f64,
    derived_metric: Option<f64>,
) -> Verdict {
    if progress < thresholds.minimum {
        return Verdict::InsufficientProcess;
    }

    let exhausted = derived_metric.is_some_and(|metric| metric <= 0.0);
    if progress > thresholds.ceiling || exhausted {
        if thresholds.in_ideal_band(control) {
            Verdict::Optimal
        } else if control > thresholds.ideal_high {
            Verdict::OverProcessed
        } else {
            Verdict::UnderProcessed
        }
    } else {
        Verdict::Partial
    }
}
