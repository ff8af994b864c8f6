//! Log formatting keyed to simulated time.

use std::cell::Cell;
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::types::Tick;

thread_local! {
    static SIM_CLOCK: Cell<Tick> = const { Cell::new(0) };
}

/// Current simulated tick on this thread, as last set by the engine.
pub fn sim_clock() -> Tick {
    SIM_CLOCK.with(|c| c.get())
}

pub(crate) fn set_sim_clock(tick: Tick) {
    SIM_CLOCK.with(|c| c.set(tick));
}

/// Tick stamp for log lines: `t=` followed by the tick right-aligned to 8.
pub struct FmtTick(pub Tick);

impl fmt::Display for FmtTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:>8}", self.0)
    }
}

/// Event formatter for simulation logs: `[t=    tick] LEVEL message k=v ...`.
///
/// The tick comes from [`sim_clock`], so log lines line up with trace
/// events rather than wall-clock time. Spans are not printed.
pub struct SimFormat;

impl<S, N> FormatEvent<S, N> for SimFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        write!(
            writer,
            "[{}] {:>5} {}",
            FmtTick(sim_clock()),
            event.metadata().level(),
            fields.message
        )?;
        for (key, value) in &fields.pairs {
            write!(writer, " {key}={value}")?;
        }
        writeln!(writer)
    }
}

/// Message plus key/value pairs of one event, in field order.
#[derive(Default)]
struct EventFields {
    message: String,
    pairs: Vec<(&'static str, String)>,
}

impl EventFields {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.pairs.push((field.name(), value));
        }
    }
}

// Engine and parser events carry pids (i64), ticks (u64), names (str) and
// `%`-formatted states, which arrive through `record_debug`.
impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_fmt_tick() {
        assert_eq!(FmtTick(0).to_string(), "t=       0");
        assert_eq!(FmtTick(12345).to_string(), "t=   12345");
        assert_eq!(FmtTick(123_456_789).to_string(), "t=123456789");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let buf = Capture::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .event_format(SimFormat)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_event_line_layout() {
        let out = capture_logs(|| {
            set_sim_clock(12);
            tracing::info!(pid = 3, name = "editor", turnaround = 13u64, "COMPLETED");
            set_sim_clock(13);
            tracing::debug!(pid = 4, from = %"ready", "kill");
        });
        assert_eq!(
            out,
            "[t=      12]  INFO COMPLETED pid=3 name=editor turnaround=13\n\
             [t=      13] DEBUG kill pid=4 from=ready\n"
        );
    }

    #[test]
    fn test_sim_clock_is_per_thread() {
        set_sim_clock(42);
        assert_eq!(sim_clock(), 42);
        let other = std::thread::spawn(sim_clock).join().unwrap();
        assert_eq!(other, 0);
    }
}
