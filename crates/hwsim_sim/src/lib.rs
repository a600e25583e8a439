//! Cycle-stepping simulator for hwsim boolean circuits.
//!
//! This crate evaluates the boolean expressions of a [`Circuit`] and steps
//! it through one clock cycle per simulation input value, producing a trace
//! for every declared output.
//!
//! # Usage
//!
//! ```ignore
//! use hwsim_sim::{simulate, SimConfig};
//!
//! let result = simulate(&circuit, &SimConfig::default())?;
//! print!("{}", hwsim_sim::report::render_text(&result));
//! ```
//!
//! # Modules
//!
//! - `error`: Simulation error types
//! - `env`: Signal bindings and the shared function catalog
//! - `evaluator`: Expression evaluation and update execution
//! - `kernel`: Latch handling and the per-cycle simulation loop
//! - `waveform`: Waveform recording (VCD format)
//! - `report`: Text and JSON rendering of results

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod evaluator;
pub mod kernel;
pub mod report;
pub mod waveform;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use hwsim_ir::Circuit;

pub use env::{Environment, DEFAULT_MAX_CALL_DEPTH};
pub use error::{ErrorCategory, SimError};
pub use evaluator::{eval_expr, eval_update};
pub use kernel::{KernelState, SimKernel, SimResult, StepResult};
pub use waveform::{VcdRecorder, WaveformRecorder};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum nesting of user-function calls.
    pub max_call_depth: usize,
    /// Optional path for VCD waveform output.
    pub waveform_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            waveform_path: None,
        }
    }
}

/// Creates a [`SimKernel`] for `circuit`, applies the call-depth limit and
/// attaches a VCD recorder if a waveform path is configured.
pub fn prepare<'c>(circuit: &'c Circuit, config: &SimConfig) -> Result<SimKernel<'c>, SimError> {
    let mut kernel = SimKernel::new(circuit);
    kernel.set_max_call_depth(config.max_call_depth);

    if let Some(path) = &config.waveform_path {
        let writer = BufWriter::new(File::create(path)?);
        kernel.set_recorder(Box::new(VcdRecorder::new(writer)));
    }

    Ok(kernel)
}

/// High-level entry point: simulates `circuit` to completion.
pub fn simulate(circuit: &Circuit, config: &SimConfig) -> Result<SimResult, SimError> {
    prepare(circuit, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsim_ir::{Expr, Trace, Update};

    fn inverter() -> Circuit {
        let mut c = Circuit::new("inv");
        c.inputs = vec!["A".into()];
        c.outputs = vec!["B".into()];
        c.updates.push(Update::new("B", Expr::not(Expr::signal("A"))));
        c.siminputs.push(Trace::from_bits("A", "0110").unwrap());
        c
    }

    #[test]
    fn sim_config_default() {
        let config = SimConfig::default();
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
        assert!(config.waveform_path.is_none());
    }

    #[test]
    fn simulate_inverter() {
        let result = simulate(&inverter(), &SimConfig::default()).unwrap();
        assert_eq!(result.circuit, "inv");
        assert_eq!(result.output("B").unwrap().bits(), "1001");
    }

    #[test]
    fn prepared_kernel_outlives_config() {
        let circuit = inverter();
        let mut kernel = {
            let config = SimConfig {
                max_call_depth: 8,
                waveform_path: None,
            };
            prepare(&circuit, &config).unwrap()
        };
        let result = kernel.run().unwrap();
        assert_eq!(result.output("B").unwrap().bits(), "1001");
    }

    #[test]
    fn simulate_writes_waveform_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("inv.vcd");
        let config = SimConfig {
            waveform_path: Some(path.clone()),
            ..SimConfig::default()
        };
        simulate(&inverter(), &config).unwrap();
        let vcd = std::fs::read_to_string(&path).unwrap();
        assert!(vcd.contains("$var wire 1 ! A $end"));
        assert!(vcd.contains("#3"));
    }

    #[test]
    fn simulate_bad_waveform_path_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = SimConfig {
            waveform_path: Some(tmp.path().join("missing").join("x.vcd")),
            ..SimConfig::default()
        };
        let err = simulate(&inverter(), &config).unwrap_err();
        assert!(matches!(err, SimError::WaveformIo(_)));
    }
}
