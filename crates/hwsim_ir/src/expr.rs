//! Boolean expression trees.
//!
//! [`Expr`] is the closed set of expression forms the simulator understands.
//! Trees are built once (by the parser or by hand) and evaluated many times,
//! so they carry no evaluation state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A boolean expression over named signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a signal by name, e.g. `A` or `Q'`.
    Signal(String),
    /// Conjunction (`a * b`).
    And(Box<Expr>, Box<Expr>),
    /// Disjunction (`a + b`).
    Or(Box<Expr>, Box<Expr>),
    /// Negation (`/a`).
    Not(Box<Expr>),
    /// A call to a user-defined function, e.g. `xor(A, /B)`.
    Call {
        /// The function name.
        name: String,
        /// The actual argument expressions, in order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a signal reference.
    pub fn signal(name: impl Into<String>) -> Self {
        Expr::Signal(name.into())
    }

    /// Creates a conjunction of two expressions.
    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a disjunction of two expressions.
    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Collects the names of all signals referenced by this expression,
    /// in first-occurrence order and without duplicates.
    ///
    /// Signals read inside called function bodies are not included; only
    /// the argument expressions at the call site are walked.
    pub fn free_signals(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_signals(&mut out);
        out
    }

    fn collect_signals<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Signal(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_signals(out);
                r.collect_signals(out);
            }
            Expr::Not(e) => e.collect_signals(out),
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_signals(out);
                }
            }
        }
    }
}

/// Renders the expression in source syntax, fully parenthesising binary
/// operators so the output re-parses to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Signal(name) => write!(f, "{name}"),
            Expr::And(l, r) => write!(f, "({l} * {r})"),
            Expr::Or(l, r) => write!(f, "({l} + {r})"),
            Expr::Not(e) => write!(f, "/{e}"),
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
