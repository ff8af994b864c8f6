//! Fatal simulation errors.
//!
//! Every variant is an internal invariant violation: the engine only ever
//! runs on a validated [`Scenario`](crate::Scenario), so none of these is
//! reachable from user input. They abort the run with a diagnostic.

use crate::process::ProcState;
use crate::types::{Pid, Tick};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Dispatch found the Ready queue empty after checking it was not.
    EmptyReadyQueue { tick: Tick },
    /// A queue or the running slot referenced a pid missing from the table.
    UnknownPid { pid: Pid, tick: Tick },
    /// A process was moved along an edge outside the lifecycle table.
    IllegalTransition {
        pid: Pid,
        from: ProcState,
        to: ProcState,
    },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::EmptyReadyQueue { tick } => {
                write!(f, "tick {tick}: dequeue from empty ready queue")
            }
            SimError::UnknownPid { pid, tick } => {
                write!(f, "tick {tick}: pid {pid} is not in the process table")
            }
            SimError::IllegalTransition { pid, from, to } => {
                write!(f, "pid {pid}: illegal transition {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for SimError {}
