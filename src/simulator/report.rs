//! Simulation report generation.

use super::runner::RunRecord;
use crate::process::Verdict;
use crate::workshop::CraftStep;
use std::collections::HashMap;
use std::fmt::Write;

/// Aggregated results of a sweep.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub runs: Vec<RunRecord>,
    /// Runs that hit the time limit without finishing.
    pub unfinished: u32,
    pub verdict_counts: HashMap<(CraftStep, Verdict), u32>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunRecord>) -> Self {
        let unfinished = runs.iter().filter(|r| r.verdict.is_none()).count() as u32;

        let mut verdict_counts = HashMap::new();
        for run in &runs {
            if let Some(verdict) = run.verdict {
                *verdict_counts.entry((run.station, verdict)).or_insert(0) += 1;
            }
        }

        Self {
            runs,
            unfinished,
            verdict_counts,
        }
    }

    pub fn count(&self, station: CraftStep, verdict: Verdict) -> u32 {
        self.verdict_counts
            .get(&(station, verdict))
            .copied()
            .unwrap_or(0)
    }

    /// Lowest and highest control value that produced an optimal run.
    pub fn optimal_range(&self, station: CraftStep) -> Option<(f64, f64)> {
        self.runs
            .iter()
            .filter(|r| r.station == station && r.verdict == Some(Verdict::Optimal))
            .fold(None, |range, r| match range {
                None => Some((r.control, r.control)),
                Some((lo, hi)) => Some((f64::min(lo, r.control), f64::max(hi, r.control))),
            })
    }

    /// One line per station.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut stations: Vec<CraftStep> = Vec::new();
        for run in &self.runs {
            if !stations.contains(&run.station) {
                stations.push(run.station);
            }
        }

        stations
            .into_iter()
            .map(|station| {
                let total = self.runs.iter().filter(|r| r.station == station).count();
                let mut line = format!("{:<9} {:>3} runs", station.name(), total);
                for verdict in Verdict::ALL {
                    let n = self.count(station, verdict);
                    if n > 0 {
                        let _ = write!(line, "  {}={}", verdict.name(), n);
                    }
                }
                if let Some((lo, hi)) = self.optimal_range(station) {
                    let _ = write!(line, "  optimal at {lo:.0}-{hi:.0}");
                }
                line
            })
            .collect()
    }

    /// Full per-run table.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<9} {:>7} {:>6} {:>8} {:>7} {:>8}  Verdict",
            "Station", "Control", "Ticks", "Progress", "Metric", "Time"
        );
        for run in &self.runs {
            let _ = writeln!(
                out,
                "{:<9} {:>7.1} {:>6} {:>8.1} {:>7.1} {:>7.1}s  {}",
                run.station.name(),
                run.control,
                run.ticks,
                run.progress,
                run.metric,
                run.elapsed_ms as f64 / 1000.0,
                run.verdict.map(|v| v.name()).unwrap_or("unfinished"),
            );
        }
        out
    }
}
