//! Process queues.
//!
//! Each queue is a FIFO of pids with O(1) enqueue/dequeue and O(n)
//! removal of an arbitrary pid (used by kill events). Queues never own
//! PCBs; the [`ProcessTable`](crate::ProcessTable) does.

use std::collections::VecDeque;

use crate::types::Pid;

/// A single FIFO queue of process ids.
#[derive(Debug, Clone, Default)]
pub struct ProcQueue {
    entries: VecDeque<Pid>,
}

impl ProcQueue {
    pub fn new() -> Self {
        ProcQueue {
            entries: VecDeque::new(),
        }
    }

    /// Append at the back.
    pub fn enqueue(&mut self, pid: Pid) {
        self.entries.push_back(pid);
    }

    /// Remove from the front.
    pub fn dequeue(&mut self) -> Option<Pid> {
        self.entries.pop_front()
    }

    /// Remove a specific pid, keeping the others in order. Returns true if found.
    pub fn remove_pid(&mut self, pid: Pid) -> bool {
        if let Some(pos) = self.entries.iter().position(|&p| p == pid) {
            self.entries.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains(&pid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All pids front to back, without consuming.
    pub fn ordered_pids(&self) -> Vec<Pid> {
        self.entries.iter().copied().collect()
    }
}

/// Which of the three queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    Ready,
    Waiting,
    Terminated,
}

/// The Ready, Waiting and Terminated queues of one simulation.
#[derive(Debug, Clone, Default)]
pub struct QueueSet {
    ready: ProcQueue,
    waiting: ProcQueue,
    terminated: ProcQueue,
}

impl QueueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: QueueKind) -> &ProcQueue {
        match kind {
            QueueKind::Ready => &self.ready,
            QueueKind::Waiting => &self.waiting,
            QueueKind::Terminated => &self.terminated,
        }
    }

    pub fn get_mut(&mut self, kind: QueueKind) -> &mut ProcQueue {
        match kind {
            QueueKind::Ready => &mut self.ready,
            QueueKind::Waiting => &mut self.waiting,
            QueueKind::Terminated => &mut self.terminated,
        }
    }

    pub fn enqueue(&mut self, kind: QueueKind, pid: Pid) {
        self.get_mut(kind).enqueue(pid);
    }

    pub fn dequeue(&mut self, kind: QueueKind) -> Option<Pid> {
        self.get_mut(kind).dequeue()
    }

    pub fn remove_pid(&mut self, kind: QueueKind, pid: Pid) -> bool {
        self.get_mut(kind).remove_pid(pid)
    }

    pub fn is_empty(&self, kind: QueueKind) -> bool {
        self.get(kind).is_empty()
    }

    /// Which queue holds `pid`, if any.
    pub fn find(&self, pid: Pid) -> Option<QueueKind> {
        [QueueKind::Ready, QueueKind::Waiting, QueueKind::Terminated]
            .into_iter()
            .find(|&kind| self.get(kind).contains(pid))
    }
}
