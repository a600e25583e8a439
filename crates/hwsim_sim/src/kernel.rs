//! Cycle-stepping simulation kernel.
//!
//! [`SimKernel`] drives a [`Circuit`] through its simulation cycles. Cycle 0
//! seeds the inputs, gives every latch output `L'` the value `false`, runs
//! the updates and records the outputs. Every later cycle seeds the inputs,
//! copies each latch `L` into `L'`, runs the updates and records the
//! outputs. Updates always run in declaration order.

use hwsim_ir::{latch_output_name, Circuit, Trace};
use serde::{Deserialize, Serialize};

use crate::env::Environment;
use crate::error::SimError;
use crate::evaluator::eval_update;
use crate::waveform::WaveformRecorder;

/// Where the kernel is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    /// No cycle has been simulated yet.
    Uninitialized,
    /// The given cycle was the last one simulated.
    Cycle(usize),
    /// Every cycle has been simulated.
    Done,
    /// A cycle failed; the run cannot continue.
    Failed,
}

/// The outcome of a single [`SimKernel::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The given cycle was simulated.
    Cycle(usize),
    /// There were no cycles left; the run is complete.
    Done,
}

/// The traces produced by a completed simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimResult {
    /// Name of the simulated circuit.
    pub circuit: String,
    /// Number of simulated cycles.
    pub simlength: usize,
    /// The simulation input traces, unchanged.
    pub inputs: Vec<Trace>,
    /// One trace per declared output, in declaration order.
    pub outputs: Vec<Trace>,
}

impl SimResult {
    /// Returns the output trace for `signal`, if it is a declared output.
    pub fn output(&self, signal: &str) -> Option<&Trace> {
        self.outputs.iter().find(|t| t.signal == signal)
    }
}

/// Checks the simulation inputs and returns the simulation length.
///
/// There must be at least one input trace, none may be empty, and all must
/// have the length of the first.
pub fn check_siminputs(circuit: &Circuit) -> Result<usize, SimError> {
    let first = circuit.siminputs.first().ok_or(SimError::NoInputTraces)?;
    if let Some(empty) = circuit.siminputs.iter().find(|t| t.is_empty()) {
        return Err(SimError::EmptyTrace {
            signal: empty.signal.clone(),
        });
    }
    let simlength = first.len();
    for trace in &circuit.siminputs[1..] {
        if trace.len() != simlength {
            return Err(SimError::TraceLengthMismatch {
                signal: trace.signal.clone(),
                expected: simlength,
                found: trace.len(),
            });
        }
    }
    Ok(simlength)
}

/// Binds every latch output `L'` to `false`.
pub fn latches_init(circuit: &Circuit, env: &mut Environment) {
    for latch in &circuit.latches {
        env.set_variable(latch_output_name(latch), false);
    }
}

/// Copies the current value of every latch `L` into its output `L'`.
pub fn latches_update(circuit: &Circuit, env: &mut Environment) -> Result<(), SimError> {
    for latch in &circuit.latches {
        let value = env.get_variable(latch)?;
        env.set_variable(latch_output_name(latch), value);
    }
    Ok(())
}

/// Runs every update of `circuit` in declaration order.
pub fn run_updates(circuit: &Circuit, env: &mut Environment) -> Result<(), SimError> {
    for update in &circuit.updates {
        eval_update(env, update)?;
    }
    Ok(())
}

/// Binds every simulation input to its value in `cycle`.
fn seed_inputs(circuit: &Circuit, env: &mut Environment, cycle: usize) -> Result<(), SimError> {
    for trace in &circuit.siminputs {
        let value = trace.get(cycle).ok_or_else(|| SimError::CycleOutOfBounds {
            signal: trace.signal.clone(),
            cycle,
            length: trace.len(),
        })?;
        env.set_variable(trace.signal.as_str(), value);
    }
    Ok(())
}

/// The simulation engine for one circuit.
///
/// The kernel owns the environment and the output trace buffers for the
/// duration of the run; the finished traces are handed out as a
/// [`SimResult`].
pub struct SimKernel<'c> {
    circuit: &'c Circuit,
    env: Environment,
    simlength: usize,
    outputs: Vec<Trace>,
    state: KernelState,
    recorder: Option<Box<dyn WaveformRecorder>>,
    wave_signals: Vec<String>,
}

impl<'c> SimKernel<'c> {
    /// Creates a kernel for `circuit` with a root environment holding the
    /// circuit's function definitions.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            env: Environment::new(&circuit.definitions),
            simlength: 0,
            outputs: Vec::new(),
            state: KernelState::Uninitialized,
            recorder: None,
            wave_signals: Vec::new(),
        }
    }

    /// Sets the nesting limit for user-function calls.
    pub fn set_max_call_depth(&mut self, limit: usize) {
        self.env.set_max_call_depth(limit);
    }

    /// Attaches a waveform recorder that receives every cycle's values.
    pub fn set_recorder(&mut self, recorder: Box<dyn WaveformRecorder>) {
        self.recorder = Some(recorder);
    }

    /// Returns the circuit being simulated.
    pub fn circuit(&self) -> &'c Circuit {
        self.circuit
    }

    /// Returns the current state of the run.
    pub fn state(&self) -> KernelState {
        self.state
    }

    /// Returns the environment as left by the last simulated cycle.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Returns the simulation length, or 0 before the first cycle.
    pub fn simlength(&self) -> usize {
        self.simlength
    }

    /// Returns `true` once every cycle has been simulated.
    pub fn is_done(&self) -> bool {
        self.state == KernelState::Done
    }

    /// Simulates the next cycle, or completes the run if none are left.
    ///
    /// Any error moves the kernel into [`KernelState::Failed`]; stepping a
    /// failed or finished kernel is an error.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        let next = match self.state {
            KernelState::Uninitialized => 0,
            KernelState::Cycle(c) => c + 1,
            KernelState::Done => return Err(SimError::NotRunnable { state: "finished" }),
            KernelState::Failed => return Err(SimError::NotRunnable { state: "failed" }),
        };

        let outcome = if next == 0 {
            self.initialize().map(|()| StepResult::Cycle(0))
        } else if next < self.simlength {
            self.next_cycle(next).map(|()| StepResult::Cycle(next))
        } else {
            self.finish().map(|()| StepResult::Done)
        };

        match &outcome {
            Ok(StepResult::Cycle(c)) => self.state = KernelState::Cycle(*c),
            Ok(StepResult::Done) => self.state = KernelState::Done,
            Err(_) => self.state = KernelState::Failed,
        }
        outcome
    }

    /// Simulates every remaining cycle and returns the resulting traces.
    pub fn run(&mut self) -> Result<SimResult, SimError> {
        if self.circuit.siminputs.is_empty() {
            self.state = KernelState::Failed;
            return Err(SimError::NoInputTraces);
        }
        while self.step()? != StepResult::Done {}
        Ok(self.collect_result())
    }

    /// Returns the traces of a completed run, or `None` if the run has not
    /// finished.
    pub fn result(&self) -> Option<SimResult> {
        self.is_done().then(|| self.collect_result())
    }

    /// Cycle 0: validates the inputs, seeds them, initializes the latches,
    /// runs the updates and records the outputs.
    fn initialize(&mut self) -> Result<(), SimError> {
        let circuit = self.circuit;
        self.simlength = check_siminputs(circuit)?;

        seed_inputs(circuit, &mut self.env, 0)?;
        latches_init(circuit, &mut self.env);
        run_updates(circuit, &mut self.env)?;

        self.outputs = circuit
            .outputs
            .iter()
            .map(|name| Trace::zeroed(name.as_str(), self.simlength))
            .collect();
        self.record_outputs(0)?;

        self.open_waveform()?;
        self.record_waveform(0)
    }

    /// Cycles 1 and later: seeds the inputs, propagates the latches, runs
    /// the updates and records the outputs.
    fn next_cycle(&mut self, cycle: usize) -> Result<(), SimError> {
        let circuit = self.circuit;
        seed_inputs(circuit, &mut self.env, cycle)?;
        latches_update(circuit, &mut self.env)?;
        run_updates(circuit, &mut self.env)?;
        self.record_outputs(cycle)?;
        self.record_waveform(cycle)
    }

    fn finish(&mut self) -> Result<(), SimError> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.finalize()?;
        }
        Ok(())
    }

    fn record_outputs(&mut self, cycle: usize) -> Result<(), SimError> {
        for trace in &mut self.outputs {
            trace.values[cycle] = self.env.get_variable(&trace.signal)?;
        }
        Ok(())
    }

    /// Registers inputs, latch outputs, update targets and outputs with the
    /// recorder, in that order.
    fn open_waveform(&mut self) -> Result<(), SimError> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Ok(());
        };
        let circuit = self.circuit;
        let names = circuit
            .siminputs
            .iter()
            .map(|t| t.signal.clone())
            .chain(circuit.latch_outputs())
            .chain(circuit.updates.iter().map(|u| u.target.clone()))
            .chain(circuit.outputs.iter().cloned());

        recorder.begin_scope(&circuit.name)?;
        for name in names {
            if !self.wave_signals.contains(&name) {
                recorder.register_signal(&name)?;
                self.wave_signals.push(name);
            }
        }
        recorder.end_scope()
    }

    fn record_waveform(&mut self, cycle: usize) -> Result<(), SimError> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Ok(());
        };
        for name in &self.wave_signals {
            let value = self.env.get_variable(name)?;
            recorder.record(cycle, name, value)?;
        }
        Ok(())
    }

    fn collect_result(&self) -> SimResult {
        SimResult {
            circuit: self.circuit.name.clone(),
            simlength: self.simlength,
            inputs: self.circuit.siminputs.clone(),
            outputs: self.outputs.clone(),
        }
    }
}
