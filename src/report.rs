//! Final results table.
//!
//! One row per process, ascending pid. The text layout uses fixed-width
//! left-aligned columns; killed processes print `-1` for turnaround and
//! waiting since they never completed.

use std::fmt;

use serde::Serialize;

use crate::process::{Pcb, ProcState};
use crate::table::ProcessTable;
use crate::types::{Pid, Tick};

/// Outcome column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Killed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::Killed => f.write_str("KILLED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub pid: Pid,
    pub name: String,
    pub burst: u64,
    pub io_duration: u64,
    pub turnaround: Option<Tick>,
    pub waiting: Option<Tick>,
    pub status: Status,
}

impl ReportRow {
    fn from_pcb(pcb: &Pcb) -> Self {
        ReportRow {
            pid: pcb.pid,
            name: pcb.name.clone(),
            burst: pcb.burst,
            io_duration: pcb.io_duration(),
            turnaround: pcb.turnaround,
            waiting: pcb.waiting,
            status: if pcb.state == ProcState::Killed {
                Status::Killed
            } else {
                Status::Ok
            },
        }
    }
}

/// Rows in ascending pid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(table: &ProcessTable) -> Self {
        Report {
            rows: table.iter_sorted().map(ReportRow::from_pcb).collect(),
        }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn signed(v: Option<Tick>) -> String {
    v.map_or_else(|| "-1".to_string(), |t| t.to_string())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8}{:<15}{:<10}{:<10}{:<15}{:<12}{:<10}",
            "PID", "Name", "CPU", "IO", "Turnaround", "Waiting", "Status"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<8}{:<15}{:<10}{:<10}{:<15}{:<12}{:<10}",
                row.pid.0,
                row.name,
                row.burst,
                row.io_duration,
                signed(row.turnaround),
                signed(row.waiting),
                row.status.to_string()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{IoSpec, ProcessDef};

    fn table() -> ProcessTable {
        let mut table = ProcessTable::new();
        let mut done = Pcb::new(&ProcessDef {
            name: "editor".into(),
            pid: Pid(12),
            burst: 4,
            io: IoSpec::new(2, 3),
        });
        done.state = ProcState::Terminated;
        done.turnaround = Some(7);
        done.waiting = Some(3);
        let mut dead = Pcb::new(&ProcessDef {
            name: "daemon".into(),
            pid: Pid(3),
            burst: 9,
            io: None,
        });
        dead.state = ProcState::Killed;
        table.insert(done).unwrap();
        table.insert(dead).unwrap();
        table
    }

    #[test]
    fn test_rows_sorted_by_pid() {
        let report = Report::new(&table());
        let pids: Vec<Pid> = report.rows().iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![Pid(3), Pid(12)]);
        assert_eq!(report.rows()[0].status, Status::Killed);
        assert_eq!(report.rows()[1].io_duration, 3);
    }

    #[test]
    fn test_text_layout() {
        let text = Report::new(&table()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "PID     Name           CPU       IO        Turnaround     Waiting     Status    "
        );
        assert_eq!(lines[1].len(), 80);
        assert_eq!(
            lines[2],
            "3       daemon         9         0         -1             -1          KILLED    "
        );
        assert_eq!(
            lines[3],
            "12      editor         4         3         7              3           OK        "
        );
    }

    #[test]
    fn test_json_uses_null_for_killed() {
        let json = Report::new(&table()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["pid"], 3);
        assert!(value[0]["turnaround"].is_null());
        assert_eq!(value[0]["status"], "KILLED");
        assert_eq!(value[1]["waiting"], 3);
        assert_eq!(value[1]["status"], "OK");
    }
}
