//! fcfs_sim - Deterministic tick-driven FCFS CPU scheduling simulator.
//!
//! Processes are dispatched first-come-first-served from a single Ready
//! queue onto one simulated CPU. A process may block once on I/O after a
//! given amount of CPU work, and externally scheduled kill events can
//! remove a process at an exact tick.
//!
//! # Architecture
//!
//! - **Process table**: pid -> PCB, iterated in ascending pid order
//! - **Queues**: Ready, Waiting and Terminated FIFOs of pids
//! - **Kill list**: (pid, tick) events applied in input order
//! - **Engine**: the per-tick state machine that ties them together
//!
//! # Usage
//!
//! ```rust
//! use fcfs_sim::*;
//!
//! let scenario = Scenario::builder()
//!     .add_process("compile", 5, None)
//!     .add_process("backup", 4, IoSpec::new(2, 3))
//!     .kill(Pid(2), 6)
//!     .build()
//!     .unwrap();
//!
//! let result = Simulator::new().run(scenario).unwrap();
//! print!("{}", result.report());
//! ```

pub mod engine;
pub mod error;
pub mod fmt;
pub mod input;
pub mod kill;
pub mod monitor;
pub mod process;
pub mod queue;
pub mod report;
pub mod scenario;
pub mod stats;
pub mod table;
pub mod trace;
pub mod types;

// Re-export the main public types for convenience.
pub use engine::{SimulationResult, Simulator};
pub use error::SimError;
pub use fmt::{sim_clock, FmtTick, SimFormat};
pub use input::{load_workload, parse_workload, InputError};
pub use kill::{KillEvent, KillList};
pub use monitor::{Monitor, NoMonitor, ProbeContext};
pub use process::{IoSpec, Pcb, ProcState, ProcessDef};
pub use queue::{ProcQueue, QueueKind, QueueSet};
pub use report::{Report, ReportRow, Status};
pub use scenario::{Scenario, ScenarioBuilder, ScenarioError};
pub use stats::{DistributionStats, SimStats};
pub use table::ProcessTable;
pub use trace::{Trace, TraceEvent, TraceKind};
pub use types::{Pid, Tick};
