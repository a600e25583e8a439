//! Simulation error types for the cycle-stepping simulator.
//!
//! All errors that can occur while evaluating expressions or running the
//! simulation kernel are variants of [`SimError`]. Every error is fatal to
//! the run that raised it.

use std::io;

/// Errors that can occur during simulation setup or execution.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A signal was read before being bound in the current environment.
    #[error("variable not defined: {name}")]
    UndefinedSignal {
        /// The signal name.
        name: String,
    },

    /// A function was called that has no definition.
    #[error("function not defined: {name}")]
    UndefinedFunction {
        /// The function name.
        name: String,
    },

    /// A function was called with the wrong number of arguments.
    #[error("function '{function}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        /// The function name.
        function: String,
        /// Number of formal parameters in the definition.
        expected: usize,
        /// Number of arguments at the call site.
        found: usize,
    },

    /// The circuit declares no simulation input traces.
    #[error("no simulation input traces")]
    NoInputTraces,

    /// A simulation input trace has no values.
    #[error("simulation input trace for '{signal}' is empty")]
    EmptyTrace {
        /// The signal whose trace is empty.
        signal: String,
    },

    /// Simulation input traces disagree on their length.
    #[error("simulation input trace for '{signal}' has length {found}, expected {expected}")]
    TraceLengthMismatch {
        /// The offending signal.
        signal: String,
        /// The simulation length taken from the first trace.
        expected: usize,
        /// The length of this signal's trace.
        found: usize,
    },

    /// An input trace has no value for the cycle being simulated.
    #[error("simulation input trace for '{signal}' has no value for cycle {cycle} (length {length})")]
    CycleOutOfBounds {
        /// The signal whose trace ran out.
        signal: String,
        /// The cycle being simulated.
        cycle: usize,
        /// The length of the trace.
        length: usize,
    },

    /// Nested function calls exceeded the configured depth limit.
    #[error("call depth limit of {limit} exceeded in call to '{function}'")]
    CallDepthExceeded {
        /// The function whose call crossed the limit.
        function: String,
        /// The configured limit.
        limit: usize,
    },

    /// The kernel was stepped after it finished or failed.
    #[error("simulation already {state}")]
    NotRunnable {
        /// The terminal state the kernel is in.
        state: &'static str,
    },

    /// An I/O error occurred while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),
}

/// Coarse classification of [`SimError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A signal or function name was not bound.
    Lookup,
    /// A call site's argument count differs from its definition.
    Arity,
    /// The simulation inputs are missing or inconsistent.
    Configuration,
    /// An input trace ran out before the simulation did.
    CycleBounds,
    /// A resource limit was hit.
    Resource,
    /// The kernel was misused or its output could not be written.
    Runtime,
}

impl SimError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::UndefinedSignal { .. } | SimError::UndefinedFunction { .. } => {
                ErrorCategory::Lookup
            }
            SimError::ArityMismatch { .. } => ErrorCategory::Arity,
            SimError::NoInputTraces
            | SimError::EmptyTrace { .. }
            | SimError::TraceLengthMismatch { .. } => ErrorCategory::Configuration,
            SimError::CycleOutOfBounds { .. } => ErrorCategory::CycleBounds,
            SimError::CallDepthExceeded { .. } => ErrorCategory::Resource,
            SimError::NotRunnable { .. } | SimError::WaveformIo(_) => ErrorCategory::Runtime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_signal_display() {
        let e = SimError::UndefinedSignal { name: "A".into() };
        assert_eq!(e.to_string(), "variable not defined: A");
        assert_eq!(e.category(), ErrorCategory::Lookup);
    }

    #[test]
    fn undefined_function_display() {
        let e = SimError::UndefinedFunction { name: "xor".into() };
        assert_eq!(e.to_string(), "function not defined: xor");
        assert_eq!(e.category(), ErrorCategory::Lookup);
    }

    #[test]
    fn arity_mismatch_display() {
        let e = SimError::ArityMismatch {
            function: "xor".into(),
            expected: 2,
            found: 3,
        };
        assert_eq!(e.to_string(), "function 'xor' expects 2 argument(s), got 3");
        assert_eq!(e.category(), ErrorCategory::Arity);
    }

    #[test]
    fn no_input_traces_display() {
        let e = SimError::NoInputTraces;
        assert_eq!(e.to_string(), "no simulation input traces");
        assert_eq!(e.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn empty_trace_display() {
        let e = SimError::EmptyTrace { signal: "In".into() };
        assert_eq!(e.to_string(), "simulation input trace for 'In' is empty");
        assert_eq!(e.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn trace_length_mismatch_display() {
        let e = SimError::TraceLengthMismatch {
            signal: "B".into(),
            expected: 3,
            found: 2,
        };
        assert_eq!(
            e.to_string(),
            "simulation input trace for 'B' has length 2, expected 3"
        );
        assert_eq!(e.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn cycle_out_of_bounds_display() {
        let e = SimError::CycleOutOfBounds {
            signal: "A".into(),
            cycle: 4,
            length: 4,
        };
        assert_eq!(
            e.to_string(),
            "simulation input trace for 'A' has no value for cycle 4 (length 4)"
        );
        assert_eq!(e.category(), ErrorCategory::CycleBounds);
    }

    #[test]
    fn call_depth_exceeded_display() {
        let e = SimError::CallDepthExceeded {
            function: "loop".into(),
            limit: 256,
        };
        assert_eq!(
            e.to_string(),
            "call depth limit of 256 exceeded in call to 'loop'"
        );
        assert_eq!(e.category(), ErrorCategory::Resource);
    }

    #[test]
    fn not_runnable_display() {
        let e = SimError::NotRunnable { state: "finished" };
        assert_eq!(e.to_string(), "simulation already finished");
    }

    #[test]
    fn waveform_io_display() {
        let e = SimError::WaveformIo(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(e.to_string().contains("waveform I/O error"));
        assert_eq!(e.category(), ErrorCategory::Runtime);
    }
}
