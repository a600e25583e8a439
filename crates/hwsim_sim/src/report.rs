//! Rendering of simulation results.
//!
//! Text output lists every input trace followed by every output trace, one
//! per line as `<bits> <name>`. JSON output is the serialized [`SimResult`].

use std::fmt::Write;

use crate::kernel::SimResult;

/// Renders `result` as plain text, inputs first.
pub fn render_text(result: &SimResult) -> String {
    let mut out = String::new();
    for trace in result.inputs.iter().chain(&result.outputs) {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{trace}");
    }
    out
}

/// Renders `result` as pretty-printed JSON.
pub fn render_json(result: &SimResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
