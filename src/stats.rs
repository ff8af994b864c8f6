//! Aggregate statistics over a finished simulation.
//!
//! # Metrics Computed
//!
//! - **Turnaround / waiting distributions**: min/max/mean over processes
//!   that completed (killed processes have neither)
//! - **CPU utilisation**: busy ticks over total ticks
//! - **Outcome counts**: completed vs killed

use std::fmt;

use serde::Serialize;

use crate::engine::SimulationResult;
use crate::process::ProcState;
use crate::types::Tick;

/// Summary statistics for a distribution of tick counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    /// Minimum value (or 0 if empty).
    pub min: Tick,
    /// Maximum value (or 0 if empty).
    pub max: Tick,
    pub sum: Tick,
}

impl DistributionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: Tick) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    /// Mean value (or 0 if empty).
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Whole-run statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimStats {
    pub total_ticks: Tick,
    pub busy_ticks: Tick,
    pub idle_ticks: Tick,
    pub completed: usize,
    pub killed: usize,
    pub turnaround: DistributionStats,
    pub waiting: DistributionStats,
}

impl SimStats {
    pub fn new(result: &SimulationResult) -> Self {
        let mut turnaround = DistributionStats::new();
        let mut waiting = DistributionStats::new();
        let mut completed = 0;
        let mut killed = 0;

        for pcb in result.table().iter_sorted() {
            match pcb.state {
                ProcState::Terminated => {
                    completed += 1;
                    if let Some(t) = pcb.turnaround {
                        turnaround.add(t);
                    }
                    if let Some(w) = pcb.waiting {
                        waiting.add(w);
                    }
                }
                ProcState::Killed => killed += 1,
                _ => {}
            }
        }

        let total_ticks = result.end_tick();
        let busy_ticks = result.busy_ticks();
        SimStats {
            total_ticks,
            busy_ticks,
            idle_ticks: total_ticks - busy_ticks,
            completed,
            killed,
            turnaround,
            waiting,
        }
    }

    /// Busy ticks as a percentage of all ticks (0 for an empty run).
    pub fn utilization_percent(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            100.0 * self.busy_ticks as f64 / self.total_ticks as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Summary:")?;
        writeln!(f, "  total_ticks:      {}", self.total_ticks)?;
        writeln!(f, "  busy_ticks:       {}", self.busy_ticks)?;
        writeln!(f, "  idle_ticks:       {}", self.idle_ticks)?;
        writeln!(f, "  cpu_utilization:  {:.1}%", self.utilization_percent())?;
        writeln!(f, "  completed:        {}", self.completed)?;
        writeln!(f, "  killed:           {}", self.killed)?;
        writeln!(
            f,
            "  turnaround:       min={} max={} mean={:.2}",
            self.turnaround.min,
            self.turnaround.max,
            self.turnaround.mean()
        )?;
        writeln!(
            f,
            "  waiting:          min={} max={} mean={:.2}",
            self.waiting.min,
            self.waiting.max,
            self.waiting.mean()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution() {
        let mut d = DistributionStats::new();
        assert_eq!(d.mean(), 0.0);
        d.add(3);
        d.add(5);
        d.add(1);
        assert_eq!(d.count, 3);
        assert_eq!(d.min, 1);
        assert_eq!(d.max, 5);
        assert_eq!(d.sum, 9);
        assert!((d.mean() - 3.0).abs() < f64::EPSILON);
    }
}
