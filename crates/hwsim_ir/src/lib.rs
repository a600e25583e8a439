//! Circuit description types for the hwsim boolean circuit simulator.
//!
//! This crate defines the abstract syntax consumed by the simulation engine:
//! boolean [`Expr`] trees, user function [`Def`]initions, per-cycle
//! [`Update`] rules, simulation input [`Trace`]s, and the top-level
//! [`Circuit`] that owns them all. Every type is plain data and serializable
//! with serde; nothing here evaluates anything.

#![warn(missing_docs)]

pub mod circuit;
pub mod expr;
pub mod trace;

pub use circuit::{latch_output_name, Circuit, Def, Update};
pub use expr::Expr;
pub use trace::Trace;
