//! Process table: pid -> PCB with deterministic iteration.
//!
//! Lookups go straight to a `HashMap` (O(1) average). Hash order is never
//! exposed: every iteration method sorts by pid first, so reports and
//! traces come out the same on every run.

use std::collections::HashMap;

use crate::process::Pcb;
use crate::types::Pid;

/// Owns every PCB of a simulation. Queues only hold pids.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable(HashMap<Pid, Pcb>);

impl ProcessTable {
    pub fn new() -> Self {
        ProcessTable(HashMap::new())
    }

    /// Register a PCB under its own pid.
    ///
    /// Duplicate pids are rejected: the existing entry is kept and the new
    /// PCB is handed back in `Err`.
    pub fn insert(&mut self, pcb: Pcb) -> Result<(), Pcb> {
        if self.contains(pcb.pid) {
            return Err(pcb);
        }
        self.0.insert(pcb.pid, pcb);
        Ok(())
    }

    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.0.get(&pid)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        self.0.get_mut(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.0.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over PCBs in ascending pid order.
    ///
    /// Sorts on every call, O(n log n).
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Pcb> {
        let mut pids: Vec<&Pid> = self.0.keys().collect();
        pids.sort();
        pids.into_iter().map(move |pid| &self.0[pid])
    }
}
