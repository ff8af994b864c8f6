//! Scenario definition and builder API.

use crate::kill::{KillEvent, KillList};
use crate::process::{IoSpec, Pcb, ProcessDef};
use crate::table::ProcessTable;
use crate::types::{Pid, Tick};

/// Reasons a set of process definitions cannot be simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// Two processes share a pid.
    DuplicatePid(Pid),
    /// A process needs no CPU time at all.
    ZeroBurst(Pid),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::DuplicatePid(pid) => write!(f, "duplicate pid {pid}"),
            ScenarioError::ZeroBurst(pid) => write!(f, "pid {pid}: burst time must be positive"),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// A validated simulation input: processes in arrival order plus kills.
///
/// Every process is Ready at tick 0, queued in the order it was added.
#[derive(Debug, Clone)]
pub struct Scenario {
    table: ProcessTable,
    arrival_order: Vec<Pid>,
    kills: KillList,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder {
            processes: Vec::new(),
            kills: KillList::default(),
            next_pid: Pid(1),
        }
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// Initial Ready-queue order.
    pub fn arrival_order(&self) -> &[Pid] {
        &self.arrival_order
    }

    pub fn kills(&self) -> &KillList {
        &self.kills
    }

    pub fn nr_processes(&self) -> usize {
        self.arrival_order.len()
    }

    pub(crate) fn into_parts(self) -> (ProcessTable, Vec<Pid>, KillList) {
        (self.table, self.arrival_order, self.kills)
    }
}

/// Builder for constructing scenarios.
pub struct ScenarioBuilder {
    processes: Vec<ProcessDef>,
    kills: KillList,
    next_pid: Pid,
}

impl ScenarioBuilder {
    /// Add a process with a full definition.
    pub fn process(mut self, def: ProcessDef) -> Self {
        if def.pid.0 >= self.next_pid.0 {
            self.next_pid = Pid(def.pid.0.saturating_add(1));
        }
        self.processes.push(def);
        self
    }

    /// Convenience: add a process with an auto-assigned pid.
    pub fn add_process(self, name: &str, burst: u64, io: Option<IoSpec>) -> Self {
        let pid = self.next_pid;
        self.process(ProcessDef {
            name: name.to_string(),
            pid,
            burst,
            io,
        })
    }

    /// Schedule a kill of `pid` at the start of tick `at`.
    pub fn kill(mut self, pid: Pid, at: Tick) -> Self {
        self.kills.push(KillEvent { pid, at });
        self
    }

    /// Validate and build the scenario.
    pub fn build(self) -> Result<Scenario, ScenarioError> {
        let mut table = ProcessTable::new();
        let mut arrival_order = Vec::with_capacity(self.processes.len());
        for def in &self.processes {
            if def.burst == 0 {
                return Err(ScenarioError::ZeroBurst(def.pid));
            }
            table
                .insert(Pcb::new(def))
                .map_err(|pcb| ScenarioError::DuplicatePid(pcb.pid))?;
            arrival_order.push(def.pid);
        }
        Ok(Scenario {
            table,
            arrival_order,
            kills: self.kills,
        })
    }
}
