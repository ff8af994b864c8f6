//! Monitor trait for per-tick state sampling.
//!
//! The engine calls every monitor once at the end of each tick, after I/O
//! has advanced and before the clock moves on. Tests use this to check
//! invariants that must hold at every tick.

use crate::queue::QueueSet;
use crate::table::ProcessTable;
use crate::trace::Trace;
use crate::types::{Pid, Tick};

/// Read-only view of the simulation at the end of a tick.
pub struct ProbeContext<'a> {
    /// The tick that just finished.
    pub tick: Tick,
    /// Process holding the CPU going into the next tick, if any.
    pub running: Option<Pid>,
    pub table: &'a ProcessTable,
    pub queues: &'a QueueSet,
    /// Processes that reached Terminated or Killed so far.
    pub terminated: usize,
    /// Read-only access to the trace accumulated so far.
    pub trace: &'a Trace,
}

/// Implement this to sample simulation state at every tick and accumulate
/// it for post-simulation assertions.
pub trait Monitor {
    fn sample(&mut self, ctx: &ProbeContext);
}

/// Monitor that samples nothing.
pub struct NoMonitor;

impl Monitor for NoMonitor {
    fn sample(&mut self, _ctx: &ProbeContext) {}
}
