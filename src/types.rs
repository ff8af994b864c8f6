//! Newtype wrappers and type aliases for domain concepts.
//!
//! Process identifiers get a newtype so they cannot be confused with tick
//! counts or CPU-unit quantities. Simulated time is a plain alias.

use std::fmt;

use serde::Serialize;

/// Process identifier. Signed, so negative ids from the input are legal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Pid(pub i32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated time, in ticks. One scheduler loop iteration is one tick.
pub type Tick = u64;
