//! Per-signal value sequences across simulation cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signal name paired with one boolean per simulation cycle.
///
/// Used both for the simulation inputs declared by a circuit and for the
/// output traces computed by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The signal this trace belongs to.
    pub signal: String,
    /// The value of the signal in each cycle.
    pub values: Vec<bool>,
}

impl Trace {
    /// Creates a trace from a signal name and its values.
    pub fn new(signal: impl Into<String>, values: Vec<bool>) -> Self {
        Self {
            signal: signal.into(),
            values,
        }
    }

    /// Creates a trace of the given length with every value `false`.
    pub fn zeroed(signal: impl Into<String>, len: usize) -> Self {
        Self::new(signal, vec![false; len])
    }

    /// Creates a trace from a string of `0`/`1` characters.
    ///
    /// Returns `None` if the string contains any other character.
    pub fn from_bits(signal: impl Into<String>, bits: &str) -> Option<Self> {
        let values = bits
            .chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(signal, values))
    }

    /// Returns the number of cycles covered by this trace.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the trace holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `cycle`, or `None` past the end of the trace.
    pub fn get(&self, cycle: usize) -> Option<bool> {
        self.values.get(cycle).copied()
    }

    /// Renders the values as a string of `0`/`1` characters.
    pub fn bits(&self) -> String {
        self.values.iter().map(|&v| if v { '1' } else { '0' }).collect()
    }
}

/// Formats as the bit string followed by a space and the signal name,
/// e.g. `0110 Q`.
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bits(), self.signal)
    }
}
