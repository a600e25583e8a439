//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps used by both `sim` and `check`: circuit file format
//! detection, circuit loading, and configuration resolution.

use std::path::Path;

use hwsim_config::HwsimConfig;
use hwsim_ir::Circuit;

use crate::GlobalArgs;

/// Circuit file format detected from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitFormat {
    /// Circuit description source text (anything but `.json`).
    Source,
    /// A serialized [`Circuit`] (`.json`).
    Json,
}

/// Detects the circuit file format from the path's extension.
pub fn detect_format(path: &Path) -> CircuitFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => CircuitFormat::Json,
        _ => CircuitFormat::Source,
    }
}

/// Reads and parses the circuit at `path`.
///
/// Parse errors are prefixed with the file path.
pub fn load_circuit(path: &Path) -> Result<Circuit, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let circuit: Circuit = match detect_format(path) {
        CircuitFormat::Json => serde_json::from_str(&content)
            .map_err(|e| format!("{}: invalid circuit JSON: {e}", path.display()))?,
        CircuitFormat::Source => hwsim_parser::parse_circuit(&content)
            .map_err(|e| format!("{}:{e}", path.display()))?,
    };
    Ok(circuit)
}

/// Resolves the configuration for a run on `circuit_path`.
///
/// An explicit `--config` file must exist; otherwise `hwsim.toml` is looked
/// up next to the circuit file and defaults apply if there is none.
pub fn resolve_config(
    global: &GlobalArgs,
    circuit_path: &Path,
) -> Result<HwsimConfig, Box<dyn std::error::Error>> {
    if let Some(config_path) = &global.config {
        return Ok(hwsim_config::load_config_file(Path::new(config_path))?);
    }
    let dir = circuit_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(hwsim_config::load_config(dir)?)
}
