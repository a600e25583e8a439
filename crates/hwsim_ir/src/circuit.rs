//! Circuit-level declarations: function definitions, update rules, and the
//! top-level [`Circuit`].

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::trace::Trace;

/// Returns the name of the output binding of latch `latch`, i.e. the
/// latch name with a trailing prime (`Q` becomes `Q'`).
pub fn latch_output_name(latch: &str) -> String {
    format!("{latch}'")
}

/// A user-defined boolean function with a fixed number of parameters.
///
/// Example: `.def xor(A, B) = A * /B + /A * B`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Def {
    /// The function name, e.g. `xor`.
    pub name: String,
    /// Formal parameter names, e.g. `[A, B]`.
    pub params: Vec<String>,
    /// The function body.
    pub body: Expr,
}

impl Def {
    /// Creates a new definition.
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Expr) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }

    /// Returns the number of formal parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A single update rule `target = expr`, evaluated once per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// The signal being written.
    pub target: String,
    /// The expression whose value the signal receives.
    pub expr: Expr,
}

impl Update {
    /// Creates a new update rule.
    pub fn new(target: impl Into<String>, expr: Expr) -> Self {
        Self {
            target: target.into(),
            expr,
        }
    }
}

/// The complete description of a circuit and its simulation inputs.
///
/// Updates are kept in declaration order; that order is significant because
/// later updates observe values written by earlier ones in the same cycle.
/// The simulation length and output traces are not part of the description:
/// the simulator derives and produces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// The circuit name from the `.hardware` line.
    pub name: String,
    /// Declared input signal names, in order.
    pub inputs: Vec<String>,
    /// Declared output signal names, in order.
    pub outputs: Vec<String>,
    /// Declared latch names, in order. Each latch `L` also exposes `L'`.
    pub latches: Vec<String>,
    /// User function definitions.
    #[serde(default)]
    pub definitions: Vec<Def>,
    /// Update rules, in declaration order.
    pub updates: Vec<Update>,
    /// One trace per simulated input signal.
    pub siminputs: Vec<Trace>,
}

impl Circuit {
    /// Creates an empty circuit with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a definition by name. If several share a name, the last
    /// one declared is returned.
    pub fn find_def(&self, name: &str) -> Option<&Def> {
        self.definitions.iter().rev().find(|d| d.name == name)
    }

    /// Returns the simulation input trace for `signal`, if any.
    pub fn siminput(&self, signal: &str) -> Option<&Trace> {
        self.siminputs.iter().find(|t| t.signal == signal)
    }

    /// Returns the output binding names of all latches (`L'` for each `L`).
    pub fn latch_outputs(&self) -> Vec<String> {
        self.latches.iter().map(|l| latch_output_name(l)).collect()
    }
}
