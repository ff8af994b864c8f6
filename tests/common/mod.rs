#![allow(dead_code)]

use fcfs_sim::{
    Monitor, Pid, ProbeContext, ProcState, QueueKind, Scenario, SimFormat, SimulationResult,
    Simulator, Tick,
};

/// Initialize tracing from `RUST_LOG`.
///
/// `try_init()` is idempotent: first call in the process succeeds,
/// subsequent calls are silently ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .event_format(SimFormat)
        .try_init();
}

/// Checks the per-tick invariants on every sample and records the
/// running pid of each tick.
#[derive(Default)]
pub struct InvariantMonitor {
    pub ticks: Vec<Tick>,
    pub running: Vec<Option<Pid>>,
}

impl Monitor for InvariantMonitor {
    fn sample(&mut self, ctx: &ProbeContext) {
        let mut nr_running = 0;
        let mut nr_terminal = 0;

        for pcb in ctx.table.iter_sorted() {
            assert_eq!(
                pcb.cpu_executed + pcb.remaining,
                pcb.burst,
                "tick {}: pid {} executed + remaining != burst",
                ctx.tick,
                pcb.pid
            );
            if pcb.io.is_none() {
                assert_ne!(
                    pcb.state,
                    ProcState::Waiting,
                    "tick {}: pid {} waits without I/O",
                    ctx.tick,
                    pcb.pid
                );
            }

            let queue = ctx.queues.find(pcb.pid);
            match pcb.state {
                ProcState::Running => {
                    nr_running += 1;
                    assert_eq!(ctx.running, Some(pcb.pid));
                    assert_eq!(queue, None, "running pid {} is queued", pcb.pid);
                }
                ProcState::Ready => assert_eq!(queue, Some(QueueKind::Ready)),
                ProcState::Waiting => assert_eq!(queue, Some(QueueKind::Waiting)),
                ProcState::Terminated | ProcState::Killed => {
                    nr_terminal += 1;
                    assert_eq!(queue, Some(QueueKind::Terminated));
                }
            }
        }

        assert!(nr_running <= 1, "tick {}: {nr_running} running", ctx.tick);
        assert_eq!(nr_terminal, ctx.terminated);

        self.ticks.push(ctx.tick);
        self.running.push(ctx.running);
    }
}

/// Run a scenario under the invariant monitor and check the exit state.
pub fn run_checked(scenario: Scenario) -> SimulationResult {
    let total = scenario.nr_processes();
    let mut monitor = InvariantMonitor::default();
    let result = Simulator::new()
        .run_monitored(scenario, &mut monitor)
        .expect("simulation failed");

    assert_eq!(result.table().len(), total);
    assert!(
        result.table().iter_sorted().all(|p| p.state.is_terminal()),
        "process left in a non-terminal state"
    );
    assert_eq!(monitor.ticks.len() as Tick, result.end_tick());
    for pcb in result.table().iter_sorted() {
        assert_eq!(result.trace().total_runtime(pcb.pid), pcb.cpu_executed);
    }
    result
}
