//! Scheduled kill events.

use crate::types::{Pid, Tick};

/// Force `pid` into the Killed state at the start of tick `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillEvent {
    pub pid: Pid,
    pub at: Tick,
}

/// Kill events in the order they were supplied. Never reordered: events
/// due at the same tick apply in input order.
#[derive(Debug, Clone, Default)]
pub struct KillList {
    events: Vec<KillEvent>,
}

impl KillList {
    pub fn new(events: Vec<KillEvent>) -> Self {
        KillList { events }
    }

    pub fn push(&mut self, event: KillEvent) {
        self.events.push(event);
    }

    /// Events due at `tick`, in input order.
    pub fn due_at(&self, tick: Tick) -> impl Iterator<Item = KillEvent> + '_ {
        self.events.iter().copied().filter(move |e| e.at == tick)
    }

    pub fn events(&self) -> &[KillEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_at_keeps_input_order() {
        let list = KillList::new(vec![
            KillEvent { pid: Pid(7), at: 3 },
            KillEvent { pid: Pid(2), at: 1 },
            KillEvent { pid: Pid(5), at: 3 },
            KillEvent { pid: Pid(1), at: 3 },
        ]);
        let due: Vec<Pid> = list.due_at(3).map(|e| e.pid).collect();
        assert_eq!(due, vec![Pid(7), Pid(5), Pid(1)]);
        assert_eq!(list.due_at(0).count(), 0);
        assert_eq!(list.len(), 4);
    }
}
