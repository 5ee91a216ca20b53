//! Stage lookup for the process simulators.
//!
//! A station declares a static table of contiguous stages covering `[0, 100]`.
//! Every stage is half-open `[lower, upper)` except the last, which is closed,
//! so each progress value maps to exactly one stage.

/// A linear quantity evaluated relative to the start of a stage:
/// `base + (progress - lower_bound) * slope`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub base: f64,
    pub slope: f64,
}

impl Ramp {
    pub const fn new(base: f64, slope: f64) -> Self {
        Self { base, slope }
    }

    /// A ramp that holds one value for the whole stage.
    pub const fn flat(value: f64) -> Self {
        Self { base: value, slope: 0.0 }
    }

    pub fn at(&self, delta: f64) -> f64 {
        self.base + delta * self.slope
    }
}

/// Visual quantities a stage drives. Stations that only show a label leave
/// both ramps flat at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    /// Vertical offset of the moving part (press plate, stone).
    pub offset: Ramp,
    /// Height/size of the material being processed.
    pub size: Ramp,
}

impl VisualParams {
    pub const NONE: VisualParams = VisualParams {
        offset: Ramp::flat(0.0),
        size: Ramp::flat(0.0),
    };
}

/// One discrete phase of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageDescriptor {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub label: &'static str,
    pub visual: VisualParams,
}

impl StageDescriptor {
    pub const fn labelled(lower_bound: f64, upper_bound: f64, label: &'static str) -> Self {
        Self {
            lower_bound,
            upper_bound,
            label,
            visual: VisualParams::NONE,
        }
    }

    pub fn offset_at(&self, progress: f64) -> f64 {
        self.visual.offset.at(progress - self.lower_bound)
    }

    pub fn size_at(&self, progress: f64) -> f64 {
        self.visual.size.at(progress - self.lower_bound)
    }
}

/// A static, non-empty stage table.
#[derive(Debug, Clone, Copy)]
pub struct StageTable {
    stages: &'static [StageDescriptor],
}

impl StageTable {
    /// Tables are declared as constants next to each station; they must not be empty.
    pub const fn new(stages: &'static [StageDescriptor]) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &'static [StageDescriptor] {
        self.stages
    }

    /// Index of the stage containing `progress`. Values outside `[0, 100]`
    /// are clamped onto the first or last stage.
    pub fn position(&self, progress: f64) -> usize {
        let last = self.stages.len() - 1;
        let progress = progress.clamp(0.0, 100.0);
        self.stages[..last]
            .iter()
            .position(|stage| progress < stage.upper_bound)
            .unwrap_or(last)
    }

    pub fn lookup(&self, progress: f64) -> &'static StageDescriptor {
        &self.stages[self.position(progress)]
    }

    /// True when the stages are contiguous, non-overlapping and span `[0, 100]`.
    pub fn is_partition(&self) -> bool {
        let (Some(first), Some(last)) = (self.stages.first(), self.stages.last()) else {
            return false;
        };
        if first.lower_bound != 0.0 || last.upper_bound != 100.0 {
            return false;
        }
        self.stages
            .windows(2)
            .all(|pair| pair[0].upper_bound == pair[1].lower_bound)
            && self
                .stages
                .iter()
                .all(|stage| stage.lower_bound <= stage.upper_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: StageTable = StageTable::new(&[
        StageDescriptor::labelled(0.0, 50.0, "first"),
        StageDescriptor {
            lower_bound: 50.0,
            upper_bound: 100.0,
            label: "second",
            visual: VisualParams {
                offset: Ramp::new(10.0, 2.0),
                size: Ramp::flat(4.0),
            },
        },
    ]);

    #[test]
    fn test_lookup_boundaries() {
        assert_eq!(TABLE.lookup(0.0).label, "first");
        assert_eq!(TABLE.lookup(49.9).label, "first");
        assert_eq!(TABLE.lookup(50.0).label, "second");
        assert_eq!(TABLE.lookup(100.0).label, "second");
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(TABLE.lookup(-5.0).label, "first");
        assert_eq!(TABLE.lookup(250.0).label, "second");
        assert_eq!(TABLE.lookup(f64::NAN).label, "second");
    }

    #[test]
    fn test_ramp_relative_to_stage_start() {
        let stage = TABLE.lookup(60.0);
        assert!((stage.offset_at(60.0) - 30.0).abs() < f64::EPSILON);
        assert!((stage.size_at(60.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_partition() {
        assert!(TABLE.is_partition());

        const GAP: StageTable = StageTable::new(&[
            StageDescriptor::labelled(0.0, 40.0, "a"),
            StageDescriptor::labelled(50.0, 100.0, "b"),
        ]);
        assert!(!GAP.is_partition());
    }
}
