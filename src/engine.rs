//! Tick-driven FCFS simulation engine.
//!
//! The engine owns all mutable simulation state (process table, the three
//! queues, the running slot and the clock) and advances it one tick per
//! loop iteration. Each tick performs, in order:
//!
//! 1. apply kill events due at this tick, in input order;
//! 2. dispatch the head of the Ready queue if the CPU is free;
//! 3. execute one CPU unit of the running process, which may block it on
//!    I/O or complete it;
//! 4. advance the I/O countdown of every waiting process;
//! 5. advance the clock.
//!
//! The loop ends once every process is Terminated or Killed.

use tracing::{debug, info};

use crate::error::SimError;
use crate::fmt::set_sim_clock;
use crate::kill::KillList;
use crate::monitor::{Monitor, NoMonitor, ProbeContext};
use crate::process::{Pcb, ProcState};
use crate::queue::{QueueKind, QueueSet};
use crate::report::Report;
use crate::scenario::Scenario;
use crate::stats::SimStats;
use crate::table::ProcessTable;
use crate::trace::{Trace, TraceKind};
use crate::types::{Pid, Tick};

/// Mutable state of one simulation run.
struct SimState {
    clock: Tick,
    running: Option<Pid>,
    table: ProcessTable,
    queues: QueueSet,
    /// Processes that reached Terminated or Killed.
    terminated: usize,
    total: usize,
    trace: Trace,
    busy_ticks: Tick,
    /// Whether a `CpuIdle` event has been recorded for the current idle period.
    cpu_idle: bool,
}

fn lookup_mut(table: &mut ProcessTable, pid: Pid, tick: Tick) -> Result<&mut Pcb, SimError> {
    table
        .get_mut(pid)
        .ok_or(SimError::UnknownPid { pid, tick })
}

/// Outcome of a completed simulation.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    table: ProcessTable,
    trace: Trace,
    end_tick: Tick,
    busy_ticks: Tick,
}

impl SimulationResult {
    /// Final PCBs, every one Terminated or Killed.
    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn pcb(&self, pid: Pid) -> Option<&Pcb> {
        self.table.get(pid)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Clock value when the loop ended.
    pub fn end_tick(&self) -> Tick {
        self.end_tick
    }

    /// Ticks in which some process executed.
    pub fn busy_ticks(&self) -> Tick {
        self.busy_ticks
    }

    /// Results table in ascending pid order.
    pub fn report(&self) -> Report {
        Report::new(&self.table)
    }

    pub fn stats(&self) -> SimStats {
        SimStats::new(self)
    }
}

/// The FCFS simulator.
#[derive(Debug, Default)]
pub struct Simulator;

impl Simulator {
    pub fn new() -> Self {
        Simulator
    }

    /// Run a scenario to completion.
    pub fn run(&self, scenario: Scenario) -> Result<SimulationResult, SimError> {
        self.run_monitored(scenario, &mut NoMonitor)
    }

    /// Run a scenario, sampling `monitor` at the end of every tick.
    pub fn run_monitored<M: Monitor>(
        &self,
        scenario: Scenario,
        monitor: &mut M,
    ) -> Result<SimulationResult, SimError> {
        let (table, arrival_order, kills) = scenario.into_parts();

        let mut queues = QueueSet::new();
        for &pid in &arrival_order {
            queues.enqueue(QueueKind::Ready, pid);
        }

        let mut state = SimState {
            clock: 0,
            running: None,
            total: table.len(),
            table,
            queues,
            terminated: 0,
            trace: Trace::new(),
            busy_ticks: 0,
            cpu_idle: false,
        };

        set_sim_clock(0);
        info!(
            processes = state.total,
            kills = kills.len(),
            "simulation start"
        );

        while state.terminated < state.total {
            set_sim_clock(state.clock);

            self.apply_kills(&kills, &mut state)?;
            self.dispatch(&mut state)?;
            self.execute(&mut state)?;
            self.advance_io(&mut state)?;

            monitor.sample(&ProbeContext {
                tick: state.clock,
                running: state.running,
                table: &state.table,
                queues: &state.queues,
                terminated: state.terminated,
                trace: &state.trace,
            });

            state.clock += 1;
        }

        set_sim_clock(state.clock);
        info!(
            ticks = state.clock,
            busy = state.busy_ticks,
            "simulation finished"
        );

        Ok(SimulationResult {
            table: state.table,
            trace: state.trace,
            end_tick: state.clock,
            busy_ticks: state.busy_ticks,
        })
    }

    /// Apply every kill event due at the current tick.
    ///
    /// Kills of unknown, finished or already-killed pids are no-ops.
    fn apply_kills(&self, kills: &KillList, state: &mut SimState) -> Result<(), SimError> {
        let tick = state.clock;

        for event in kills.due_at(tick) {
            let pid = event.pid;
            let from = match state.table.get(pid) {
                Some(pcb) if !pcb.state.is_terminal() => pcb.state,
                _ => {
                    debug!(pid = pid.0, "kill ignored");
                    state.trace.record(tick, TraceKind::KillIgnored { pid });
                    continue;
                }
            };

            if state.running == Some(pid) {
                state.running = None;
            } else if !(state.queues.remove_pid(QueueKind::Ready, pid)
                || state.queues.remove_pid(QueueKind::Waiting, pid))
            {
                debug!(pid = pid.0, state = %from, "kill ignored: not queued");
                state.trace.record(tick, TraceKind::KillIgnored { pid });
                continue;
            }

            let pcb = lookup_mut(&mut state.table, pid, tick)?;
            pcb.kill()?;
            info!(
                pid = pid.0,
                name = pcb.name.as_str(),
                from = %from,
                executed = pcb.cpu_executed,
                "KILLED"
            );

            state.queues.enqueue(QueueKind::Terminated, pid);
            state.terminated += 1;
            state.trace.record(tick, TraceKind::Killed { pid, from });
        }

        Ok(())
    }

    /// Give the CPU to the head of the Ready queue if nothing is running.
    fn dispatch(&self, state: &mut SimState) -> Result<(), SimError> {
        let tick = state.clock;

        if state.running.is_none() && !state.queues.is_empty(QueueKind::Ready) {
            let pid = state
                .queues
                .dequeue(QueueKind::Ready)
                .ok_or(SimError::EmptyReadyQueue { tick })?;
            lookup_mut(&mut state.table, pid, tick)?.transition(ProcState::Running)?;
            debug!(pid = pid.0, "dispatch");
            state.running = Some(pid);
            state.trace.record(tick, TraceKind::Dispatched { pid });
        }

        match state.running {
            None if !state.cpu_idle => {
                debug!("IDLE");
                state.cpu_idle = true;
                state.trace.record(tick, TraceKind::CpuIdle);
            }
            Some(_) => state.cpu_idle = false,
            None => {}
        }

        Ok(())
    }

    /// Run the current process for one CPU unit.
    fn execute(&self, state: &mut SimState) -> Result<(), SimError> {
        let Some(pid) = state.running else {
            return Ok(());
        };
        let tick = state.clock;
        let end = tick + 1;

        let pcb = lookup_mut(&mut state.table, pid, tick)?;
        pcb.execute_one();
        state.busy_ticks += 1;

        if pcb.io_due() {
            pcb.block()?;
            debug!(
                pid = pid.0,
                executed = pcb.cpu_executed,
                io = pcb.io_remaining,
                "block on I/O"
            );
            state.running = None;
            state.queues.enqueue(QueueKind::Waiting, pid);
            state.trace.record(end, TraceKind::Blocked { pid });
        } else if pcb.remaining == 0 {
            pcb.complete(end)?;
            info!(
                pid = pid.0,
                name = pcb.name.as_str(),
                turnaround = end,
                waiting = pcb.waiting.unwrap_or_default(),
                "COMPLETED"
            );
            state.running = None;
            state.queues.enqueue(QueueKind::Terminated, pid);
            state.terminated += 1;
            state.trace.record(end, TraceKind::Completed { pid });
        }

        Ok(())
    }

    /// Count down I/O for every waiting process; move finished ones to Ready.
    fn advance_io(&self, state: &mut SimState) -> Result<(), SimError> {
        let tick = state.clock;

        for pid in state.queues.get(QueueKind::Waiting).ordered_pids() {
            let pcb = lookup_mut(&mut state.table, pid, tick)?;
            if !pcb.tick_io() {
                continue;
            }
            pcb.transition(ProcState::Ready)?;
            debug!(pid = pid.0, "I/O complete");
            state.queues.remove_pid(QueueKind::Waiting, pid);
            state.queues.enqueue(QueueKind::Ready, pid);
            state.trace.record(tick + 1, TraceKind::IoCompleted { pid });
        }

        Ok(())
    }
}
