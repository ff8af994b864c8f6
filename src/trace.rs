//! Trace event recording for the simulator.
//!
//! Every lifecycle change (dispatch, I/O block, I/O completion, completion,
//! kill, idle CPU) is recorded as a [`TraceEvent`] stamped with the tick
//! boundary at which it takes effect. Dispatches and kills happen at the
//! start of a tick, so they carry that tick; blocks, completions and I/O
//! completions happen after the tick's work, so they carry the next one.

use crate::process::ProcState;
use crate::types::{Pid, Tick};

/// A single trace event produced by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Tick boundary at which the event takes effect.
    pub tick: Tick,
    pub kind: TraceKind,
}

/// The type of lifecycle event recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceKind {
    /// A process was taken from the Ready queue and given the CPU.
    Dispatched { pid: Pid },
    /// The running process started I/O and moved to Waiting.
    Blocked { pid: Pid },
    /// A waiting process finished I/O and rejoined the Ready queue.
    IoCompleted { pid: Pid },
    /// The running process finished its burst.
    Completed { pid: Pid },
    /// A kill event removed the process from `from`.
    Killed { pid: Pid, from: ProcState },
    /// A kill event found nothing to kill.
    KillIgnored { pid: Pid },
    /// The CPU went idle with nothing to dispatch.
    CpuIdle,
}

/// A complete simulation trace, containing all events in chronological order.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub(crate) fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn record(&mut self, tick: Tick, kind: TraceKind) {
        self.events.push(TraceEvent { tick, kind });
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Total CPU ticks a process held the CPU.
    ///
    /// Sums the intervals between `Dispatched` and the next
    /// `Blocked`/`Completed`/`Killed` for that pid.
    pub fn total_runtime(&self, pid: Pid) -> Tick {
        let mut total: Tick = 0;
        let mut running_since: Option<Tick> = None;

        for event in &self.events {
            match &event.kind {
                TraceKind::Dispatched { pid: p } if *p == pid => {
                    running_since = Some(event.tick);
                }
                TraceKind::Blocked { pid: p }
                | TraceKind::Completed { pid: p }
                | TraceKind::Killed { pid: p, .. }
                    if *p == pid =>
                {
                    if let Some(start) = running_since.take() {
                        total += event.tick - start;
                    }
                }
                _ => {}
            }
        }

        total
    }

    /// Number of times a process was dispatched.
    pub fn schedule_count(&self, pid: Pid) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceKind::Dispatched { pid: p } if p == pid))
            .count()
    }

    /// Pids in the order they were dispatched, repeats included.
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                TraceKind::Dispatched { pid } => Some(pid),
                _ => None,
            })
            .collect()
    }

    /// Tick at which `pid` completed or was killed.
    pub fn end_tick(&self, pid: Pid) -> Option<Tick> {
        self.events.iter().find_map(|e| match e.kind {
            TraceKind::Completed { pid: p } | TraceKind::Killed { pid: p, .. } if p == pid => {
                Some(e.tick)
            }
            _ => None,
        })
    }

    pub fn idle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceKind::CpuIdle))
            .count()
    }

    /// Pretty-print the trace for debugging.
    pub fn dump(&self) {
        for event in &self.events {
            let desc = match &event.kind {
                TraceKind::Dispatched { pid } => format!("DISPATCH pid={pid}"),
                TraceKind::Blocked { pid } => format!("BLOCK    pid={pid}"),
                TraceKind::IoCompleted { pid } => format!("IO_DONE  pid={pid}"),
                TraceKind::Completed { pid } => format!("COMPLETE pid={pid}"),
                TraceKind::Killed { pid, from } => format!("KILL     pid={pid} from={from}"),
                TraceKind::KillIgnored { pid } => format!("KILL_NOP pid={pid}"),
                TraceKind::CpuIdle => "IDLE".to_string(),
            };
            eprintln!("[t={:>8}] {}", event.tick, desc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_runtime_across_bursts() {
        let mut trace = Trace::new();
        trace.record(0, TraceKind::Dispatched { pid: Pid(1) });
        trace.record(2, TraceKind::Blocked { pid: Pid(1) });
        trace.record(2, TraceKind::CpuIdle);
        trace.record(5, TraceKind::IoCompleted { pid: Pid(1) });
        trace.record(5, TraceKind::Dispatched { pid: Pid(1) });
        trace.record(7, TraceKind::Completed { pid: Pid(1) });

        assert_eq!(trace.total_runtime(Pid(1)), 4);
        assert_eq!(trace.schedule_count(Pid(1)), 2);
        assert_eq!(trace.end_tick(Pid(1)), Some(7));
        assert_eq!(trace.idle_count(), 1);
        assert_eq!(trace.total_runtime(Pid(2)), 0);
    }

    #[test]
    fn test_kill_while_ready_has_no_runtime() {
        let mut trace = Trace::new();
        trace.record(
            3,
            TraceKind::Killed {
                pid: Pid(2),
                from: ProcState::Ready,
            },
        );
        assert_eq!(trace.total_runtime(Pid(2)), 0);
        assert_eq!(trace.end_tick(Pid(2)), Some(3));
        assert!(trace.dispatch_order().is_empty());
    }
}
