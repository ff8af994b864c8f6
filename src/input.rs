//! Parser for the plain-text workload format.
//!
//! The input is a stream of whitespace-separated tokens; line breaks carry
//! no meaning. In order:
//!
//! ```text
//! N
//! name pid burst ioStart ioDuration     (N records)
//! K
//! pid time                              (K records)
//! ```
//!
//! `ioStart` / `ioDuration` may be `-` for "no I/O". A negative `ioStart`
//! or a non-positive `ioDuration` also means no I/O. If the input ends
//! where `K` is expected, or `K <= 0`, there are no kill events. A kill with
//! a negative time can never fire and is dropped.

use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::debug;

use crate::process::{IoSpec, ProcessDef};
use crate::scenario::{Scenario, ScenarioError};
use crate::types::{Pid, Tick};

/// Longest accepted process name, in bytes.
pub const MAX_NAME_LEN: usize = 99;

/// Sentinel for an absent I/O field.
const NO_IO: &str = "-";

/// Errors from parsing a workload.
#[derive(Debug)]
pub enum InputError {
    /// Input ended before a required field.
    Missing(String),
    /// A field could not be parsed or is out of range.
    InvalidValue(String),
    /// The records parse but do not form a valid scenario.
    Scenario(ScenarioError),
    /// The workload file could not be read.
    Io(std::io::Error),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Missing(what) => write!(f, "unexpected end of input: expected {what}"),
            InputError::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
            InputError::Scenario(e) => write!(f, "invalid scenario: {e}"),
            InputError::Io(e) => write!(f, "read error: {e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Scenario(e) => Some(e),
            InputError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScenarioError> for InputError {
    fn from(e: ScenarioError) -> Self {
        InputError::Scenario(e)
    }
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io(e)
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            inner: input.split_whitespace(),
        }
    }

    fn next_raw(&mut self, what: impl FnOnce() -> String) -> Result<&'a str, InputError> {
        self.inner.next().ok_or_else(|| InputError::Missing(what()))
    }

    fn next_parsed<T: FromStr>(&mut self, what: impl Fn() -> String) -> Result<T, InputError> {
        let tok = self.next_raw(&what)?;
        tok.parse()
            .map_err(|_| InputError::InvalidValue(format!("{}: {tok:?}", what())))
    }
}

/// Resolve the I/O fields of one record.
fn parse_io(start: &str, duration: &str, record: usize) -> Result<Option<IoSpec>, InputError> {
    if start == NO_IO || duration == NO_IO {
        return Ok(None);
    }
    let start: i64 = start.parse().map_err(|_| {
        InputError::InvalidValue(format!("process {record} I/O start: {start:?}"))
    })?;
    let duration: i64 = duration.parse().map_err(|_| {
        InputError::InvalidValue(format!("process {record} I/O duration: {duration:?}"))
    })?;
    if start < 0 || duration <= 0 {
        return Ok(None);
    }
    Ok(IoSpec::new(start as u64, duration as u64))
}

fn parse_process(tokens: &mut Tokens<'_>, record: usize) -> Result<ProcessDef, InputError> {
    let name = tokens.next_raw(|| format!("process {record} name"))?;
    if name.len() > MAX_NAME_LEN {
        return Err(InputError::InvalidValue(format!(
            "process {record} name longer than {MAX_NAME_LEN} bytes"
        )));
    }
    let pid: i32 = tokens.next_parsed(|| format!("process {record} pid"))?;
    let burst: u64 = tokens.next_parsed(|| format!("process {record} burst time"))?;
    let io_start = tokens.next_raw(|| format!("process {record} I/O start"))?;
    let io_duration = tokens.next_raw(|| format!("process {record} I/O duration"))?;

    Ok(ProcessDef {
        name: name.to_string(),
        pid: Pid(pid),
        burst,
        io: parse_io(io_start, io_duration, record)?,
    })
}

/// Parse a workload from text into a validated [`Scenario`].
pub fn parse_workload(input: &str) -> Result<Scenario, InputError> {
    let mut tokens = Tokens::new(input);
    let mut builder = Scenario::builder();

    let nr_processes: usize = tokens.next_parsed(|| "process count".to_string())?;
    for record in 1..=nr_processes {
        builder = builder.process(parse_process(&mut tokens, record)?);
    }

    let nr_kills: i64 = match tokens.inner.next() {
        None => 0,
        Some(tok) => tok
            .parse()
            .map_err(|_| InputError::InvalidValue(format!("kill event count: {tok:?}")))?,
    };
    for record in 1..=nr_kills {
        let pid: i32 = tokens.next_parsed(|| format!("kill event {record} pid"))?;
        let at: i64 = tokens.next_parsed(|| format!("kill event {record} time"))?;
        match Tick::try_from(at) {
            Ok(at) => builder = builder.kill(Pid(pid), at),
            Err(_) => debug!(pid, at, "dropping kill event with negative time"),
        }
    }

    Ok(builder.build()?)
}

/// Read and parse a workload file.
pub fn load_workload(path: &Path) -> Result<Scenario, InputError> {
    let text = std::fs::read_to_string(path)?;
    parse_workload(&text)
}
