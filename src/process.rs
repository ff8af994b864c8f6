//! Process control blocks.
//!
//! A [`Pcb`] is built once from a [`ProcessDef`] before the simulation
//! starts and is mutated only by the engine during the tick loop.

use std::fmt;

use serde::Serialize;

use crate::error::SimError;
use crate::types::{Pid, Tick};

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProcState {
    /// Queued for the CPU.
    Ready,
    /// Holding the CPU this tick.
    Running,
    /// Blocked on I/O.
    Waiting,
    /// Finished its whole burst.
    Terminated,
    /// Removed by a kill event before finishing.
    Killed,
}

impl ProcState {
    /// Terminated and Killed are absorbing.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcState::Terminated | ProcState::Killed)
    }

    /// Whether `self -> next` is a legal lifecycle transition.
    pub fn can_become(self, next: ProcState) -> bool {
        use ProcState::*;
        matches!(
            (self, next),
            (Ready, Running)
                | (Ready, Killed)
                | (Running, Waiting)
                | (Running, Terminated)
                | (Running, Killed)
                | (Waiting, Ready)
                | (Waiting, Killed)
        )
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcState::Ready => "ready",
            ProcState::Running => "running",
            ProcState::Waiting => "waiting",
            ProcState::Terminated => "terminated",
            ProcState::Killed => "killed",
        };
        f.write_str(s)
    }
}

/// When and for how long a process blocks on I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoSpec {
    /// Executed CPU units after which the process blocks.
    pub start_after: u64,
    /// Ticks spent waiting, not counting the grace tick.
    pub duration: u64,
}

impl IoSpec {
    /// Returns `None` for a zero-length I/O, which never blocks.
    pub fn new(start_after: u64, duration: u64) -> Option<Self> {
        (duration > 0).then_some(IoSpec {
            start_after,
            duration,
        })
    }
}

/// Definition of a process for scenario creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDef {
    pub name: String,
    pub pid: Pid,
    /// Total CPU units required.
    pub burst: u64,
    pub io: Option<IoSpec>,
}

/// A simulated process at runtime.
#[derive(Debug, Clone)]
pub struct Pcb {
    pub pid: Pid,
    pub name: String,
    pub burst: u64,
    pub remaining: u64,
    pub cpu_executed: u64,
    pub io: Option<IoSpec>,
    pub io_remaining: u64,
    /// Set for the tick in which the process entered Waiting; that tick
    /// does not count toward its I/O duration.
    pub io_grace: bool,
    pub state: ProcState,
    /// `None` until the process terminates; stays `None` if it is killed.
    pub turnaround: Option<Tick>,
    pub waiting: Option<Tick>,
}

impl Pcb {
    pub fn new(def: &ProcessDef) -> Self {
        Pcb {
            pid: def.pid,
            name: def.name.clone(),
            burst: def.burst,
            remaining: def.burst,
            cpu_executed: 0,
            io: def.io,
            io_remaining: 0,
            io_grace: false,
            state: ProcState::Ready,
            turnaround: None,
            waiting: None,
        }
    }

    /// I/O duration for reporting; 0 when the process never blocks.
    pub fn io_duration(&self) -> u64 {
        self.io.map_or(0, |io| io.duration)
    }

    /// Move to `next`, rejecting transitions outside the lifecycle table.
    pub fn transition(&mut self, next: ProcState) -> Result<(), SimError> {
        if !self.state.can_become(next) {
            return Err(SimError::IllegalTransition {
                pid: self.pid,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Consume one CPU unit.
    pub fn execute_one(&mut self) {
        self.cpu_executed += 1;
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Whether the process must block now, given what it has executed.
    pub fn io_due(&self) -> bool {
        self.remaining > 0
            && self
                .io
                .is_some_and(|io| io.start_after == self.cpu_executed)
    }

    pub(crate) fn block(&mut self) -> Result<(), SimError> {
        self.transition(ProcState::Waiting)?;
        self.io_remaining = self.io_duration();
        self.io_grace = true;
        Ok(())
    }

    /// Record completion at tick boundary `end`.
    pub(crate) fn complete(&mut self, end: Tick) -> Result<(), SimError> {
        self.transition(ProcState::Terminated)?;
        self.turnaround = Some(end);
        self.waiting = Some(end.saturating_sub(self.burst));
        Ok(())
    }

    pub(crate) fn kill(&mut self) -> Result<(), SimError> {
        self.transition(ProcState::Killed)?;
        self.turnaround = None;
        self.waiting = None;
        Ok(())
    }

    /// Advance the I/O countdown by one tick. Returns true once the I/O
    /// has finished and the process should go back to Ready.
    pub(crate) fn tick_io(&mut self) -> bool {
        if self.io_grace {
            self.io_grace = false;
            return false;
        }
        self.io_remaining = self.io_remaining.saturating_sub(1);
        self.io_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(burst: u64, io: Option<IoSpec>) -> ProcessDef {
        ProcessDef {
            name: "p".into(),
            pid: Pid(1),
            burst,
            io,
        }
    }

    #[test]
    fn test_transition_table() {
        use ProcState::*;
        assert!(Ready.can_become(Running));
        assert!(Ready.can_become(Killed));
        assert!(Running.can_become(Waiting));
        assert!(Waiting.can_become(Ready));
        assert!(!Ready.can_become(Waiting));
        assert!(!Waiting.can_become(Running));
        assert!(!Terminated.can_become(Ready));
        assert!(!Killed.can_become(Killed));
        assert!(!Running.can_become(Running));
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let mut pcb = Pcb::new(&def(3, None));
        let err = pcb.transition(ProcState::Waiting).unwrap_err();
        assert_eq!(
            err,
            SimError::IllegalTransition {
                pid: Pid(1),
                from: ProcState::Ready,
                to: ProcState::Waiting,
            }
        );
        assert_eq!(pcb.state, ProcState::Ready);
    }

    #[test]
    fn test_zero_duration_io_is_none() {
        assert_eq!(IoSpec::new(2, 0), None);
        assert!(IoSpec::new(0, 1).is_some());
    }

    #[test]
    fn test_io_due_only_with_work_left() {
        let mut pcb = Pcb::new(&def(2, IoSpec::new(2, 3)));
        pcb.execute_one();
        assert!(!pcb.io_due());
        pcb.execute_one();
        // Burst is exhausted at the I/O point: the process finishes instead.
        assert_eq!(pcb.remaining, 0);
        assert!(!pcb.io_due());
    }

    #[test]
    fn test_io_countdown_with_grace_tick() {
        let mut pcb = Pcb::new(&def(4, IoSpec::new(1, 2)));
        pcb.transition(ProcState::Running).unwrap();
        pcb.execute_one();
        assert!(pcb.io_due());
        pcb.block().unwrap();
        assert!(!pcb.tick_io()); // grace
        assert_eq!(pcb.io_remaining, 2);
        assert!(!pcb.tick_io());
        assert!(pcb.tick_io());
    }

    #[test]
    fn test_complete_sets_results() {
        let mut pcb = Pcb::new(&def(3, None));
        pcb.transition(ProcState::Running).unwrap();
        pcb.complete(7).unwrap();
        assert_eq!(pcb.turnaround, Some(7));
        assert_eq!(pcb.waiting, Some(4));
    }
}
