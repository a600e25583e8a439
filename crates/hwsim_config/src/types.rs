//! Configuration types deserialized from `hwsim.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// The top-level configuration parsed from `hwsim.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HwsimConfig {
    /// Simulation engine settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Result and waveform output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Simulation engine settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Maximum nesting of user-function calls before the run is aborted.
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

fn default_max_call_depth() -> usize {
    DEFAULT_MAX_CALL_DEPTH
}

/// Result and waveform output settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// How simulation results are printed.
    #[serde(default)]
    pub format: OutputFormat,
    /// Optional path of a VCD waveform file to write.
    #[serde(default)]
    pub waveform: Option<PathBuf>,
}

/// Output format for simulation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `<bits> <name>` line per trace.
    #[default]
    Text,
    /// The serialized result as JSON.
    Json,
}
