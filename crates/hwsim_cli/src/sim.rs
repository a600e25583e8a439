//! `hwsim sim`: simulate a circuit and print its traces.
//!
//! Loads the circuit and configuration, runs every cycle, and prints the
//! input and output traces to stdout. Progress goes to stderr unless
//! `--quiet` is given; `--verbose` adds circuit statistics and the signal
//! bindings after every cycle.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use hwsim_config::{HwsimConfig, OutputFormat};
use hwsim_ir::Circuit;
use hwsim_sim::report::{render_json, render_text};
use hwsim_sim::{SimConfig, SimResult, StepResult};

use crate::pipeline::{load_circuit, resolve_config};
use crate::{GlobalArgs, ReportFormat, SimArgs};

/// Runs the `hwsim sim` command.
///
/// Returns exit code 0 on success; any load or simulation failure is
/// returned as an error.
pub fn run(args: &SimArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let path = Path::new(&args.file);
    let config = resolve_config(global, path)?;
    let circuit = load_circuit(path)?;

    if !global.quiet {
        eprintln!("   Simulating {}", circuit.name);
    }
    if global.verbose {
        eprintln!("   {}", summarize(&circuit));
    }

    let sim_config = make_sim_config(args, &config);
    let result = simulate(&circuit, &sim_config, global.verbose)?;

    let format = match args.format {
        Some(ReportFormat::Json) => OutputFormat::Json,
        Some(ReportFormat::Text) => OutputFormat::Text,
        None => config.output.format,
    };
    print!("{}", render(&result, format)?);

    if !global.quiet {
        eprintln!("   Simulated {} cycle(s)", result.simlength);
        if let Some(path) = &sim_config.waveform_path {
            eprintln!("   Waveform: {}", path.display());
        }
    }
    Ok(0)
}

/// Builds the simulator configuration; command-line flags override the
/// configuration file.
fn make_sim_config(args: &SimArgs, config: &HwsimConfig) -> SimConfig {
    SimConfig {
        max_call_depth: args
            .max_call_depth
            .map_or(config.simulation.max_call_depth, NonZeroUsize::get),
        waveform_path: args
            .vcd
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.output.waveform.clone()),
    }
}

/// Steps the kernel to completion, dumping the bindings after each cycle
/// when `verbose` is set.
fn simulate(
    circuit: &Circuit,
    config: &SimConfig,
    verbose: bool,
) -> Result<SimResult, Box<dyn std::error::Error>> {
    let mut kernel = hwsim_sim::prepare(circuit, config)?;
    loop {
        match kernel.step()? {
            StepResult::Cycle(cycle) => {
                if verbose {
                    eprintln!("   -- cycle {cycle} --");
                    eprint!("{}", kernel.env());
                }
            }
            StepResult::Done => break,
        }
    }
    Ok(kernel
        .result()
        .ok_or("simulation ended without a result")?)
}

fn render(result: &SimResult, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => Ok(render_json(result)? + "\n"),
    }
}

/// One-line description of a circuit's size.
pub(crate) fn summarize(circuit: &Circuit) -> String {
    format!(
        "{}: {} input(s), {} output(s), {} latch(es), {} definition(s), {} update(s)",
        circuit.name,
        circuit.inputs.len(),
        circuit.outputs.len(),
        circuit.latches.len(),
        circuit.definitions.len(),
        circuit.updates.len(),
    )
}
