//! `hwsim check`: validate a circuit without simulating it.
//!
//! Parses the circuit, verifies the simulation inputs, and warns about
//! problems that would otherwise only surface while simulating: inputs
//! without traces, calls to unknown functions or with the wrong number of
//! arguments, and signals read before anything assigns them.

use std::collections::HashSet;
use std::path::Path;

use hwsim_ir::{Circuit, Expr};
use hwsim_sim::kernel::check_siminputs;

use crate::pipeline::load_circuit;
use crate::sim::summarize;
use crate::{CheckArgs, GlobalArgs};

/// Runs the `hwsim check` command.
///
/// Prints a one-line summary to stdout. Returns an error if the circuit
/// cannot be loaded or its simulation inputs are inconsistent.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let circuit = load_circuit(Path::new(&args.file))?;
    let simlength = check_siminputs(&circuit)?;

    if !global.quiet {
        for warning in warnings(&circuit) {
            eprintln!("warning: {warning}");
        }
    }
    println!("{}, {simlength} cycle(s)", summarize(&circuit));
    Ok(0)
}

/// Every warning `check` reports for `circuit`, in a stable order.
fn warnings(circuit: &Circuit) -> Vec<String> {
    let mut out = input_warnings(circuit);
    out.extend(call_warnings(circuit));
    out.extend(binding_warnings(circuit));
    out
}

/// Lists calls to undefined functions and calls whose argument count does
/// not match the definition.
fn call_warnings(circuit: &Circuit) -> Vec<String> {
    let bodies = circuit.definitions.iter().map(|d| &d.body);
    let updates = circuit.updates.iter().map(|u| &u.expr);
    let mut warnings = Vec::new();
    let mut reported = HashSet::new();
    for expr in bodies.chain(updates) {
        check_calls(circuit, expr, &mut reported, &mut warnings);
    }
    warnings
}

fn check_calls<'a>(
    circuit: &Circuit,
    expr: &'a Expr,
    reported: &mut HashSet<&'a str>,
    warnings: &mut Vec<String>,
) {
    match expr {
        Expr::Signal(_) => {}
        Expr::And(l, r) | Expr::Or(l, r) => {
            check_calls(circuit, l, reported, warnings);
            check_calls(circuit, r, reported, warnings);
        }
        Expr::Not(e) => check_calls(circuit, e, reported, warnings),
        Expr::Call { name, args } => {
            match circuit.find_def(name) {
                None => {
                    if reported.insert(name.as_str()) {
                        warnings.push(format!("call to undefined function '{name}'"));
                    }
                }
                Some(def) if def.arity() != args.len() => {
                    warnings.push(format!(
                        "'{name}' called with {} argument(s) but defined with {}",
                        args.len(),
                        def.arity()
                    ));
                }
                Some(_) => {}
            }
            for arg in args {
                check_calls(circuit, arg, reported, warnings);
            }
        }
    }
}

/// Lists signals read before they are bound.
///
/// Function bodies may only read their parameters. Updates may read the
/// simulation inputs, the latch outputs and the targets of earlier updates.
/// Declared outputs must be assigned by some update.
fn binding_warnings(circuit: &Circuit) -> Vec<String> {
    let mut warnings = Vec::new();
    for def in &circuit.definitions {
        for signal in def.body.free_signals() {
            if !def.params.iter().any(|p| p == signal) {
                warnings.push(format!(
                    "function '{}' reads '{signal}', which is not a parameter",
                    def.name
                ));
            }
        }
    }

    let latch_outputs = circuit.latch_outputs();
    let mut bound: HashSet<&str> = circuit
        .siminputs
        .iter()
        .map(|t| t.signal.as_str())
        .chain(latch_outputs.iter().map(String::as_str))
        .collect();
    for update in &circuit.updates {
        for signal in update.expr.free_signals() {
            if !bound.contains(signal) {
                warnings.push(format!(
                    "update of '{}' reads '{signal}' before it is assigned",
                    update.target
                ));
            }
        }
        bound.insert(update.target.as_str());
    }

    for output in &circuit.outputs {
        if !bound.contains(output.as_str()) {
            warnings.push(format!("output '{output}' is never assigned"));
        }
    }
    warnings
}

/// Lists mismatches between declared inputs and simulation input traces.
fn input_warnings(circuit: &Circuit) -> Vec<String> {
    let mut warnings = Vec::new();
    for input in &circuit.inputs {
        if circuit.siminput(input).is_none() {
            warnings.push(format!("input '{input}' has no simulation trace"));
        }
    }
    for trace in &circuit.siminputs {
        if !circuit.inputs.contains(&trace.signal) {
            warnings.push(format!(
                "simulation trace for '{}' does not match a declared input",
                trace.signal
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(path: &Path) -> CheckArgs {
        CheckArgs {
            file: path.to_str().unwrap().to_string(),
        }
    }

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn check_valid_circuit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.hw");
        fs::write(
            &path,
            ".hardware inv .inputs A .outputs B .update B = /A .simulate A = 0110",
        )
        .unwrap();
        assert_eq!(run(&args(&path), &quiet()).unwrap(), 0);
    }

    #[test]
    fn check_rejects_missing_traces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("none.hw");
        fs::write(&path, ".hardware h .inputs A .outputs .update .simulate").unwrap();
        let err = run(&args(&path), &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "no simulation input traces");
    }

    #[test]
    fn warnings_for_mismatched_inputs() {
        let circuit = hwsim_parser::parse_circuit(
            ".hardware h .inputs A B .outputs .update .simulate A = 1 C = 0",
        )
        .unwrap();
        assert_eq!(
            input_warnings(&circuit),
            vec![
                "input 'B' has no simulation trace".to_string(),
                "simulation trace for 'C' does not match a declared input".to_string(),
            ]
        );
    }

    #[test]
    fn no_warnings_for_matching_inputs() {
        let circuit = hwsim_parser::parse_circuit(
            ".hardware h .inputs A .outputs .update .simulate A = 1",
        )
        .unwrap();
        assert!(input_warnings(&circuit).is_empty());
    }

    fn parse(src: &str) -> Circuit {
        hwsim_parser::parse_circuit(src).unwrap()
    }

    #[test]
    fn undefined_and_misused_functions() {
        let circuit = parse(
            ".hardware h .inputs A .outputs B C
             .def id(X) = X
             .update B = nand(A, id(A, A)) C = nand(A, A)
             .simulate A = 1",
        );
        assert_eq!(
            call_warnings(&circuit),
            vec![
                "call to undefined function 'nand'".to_string(),
                "'id' called with 2 argument(s) but defined with 1".to_string(),
            ]
        );
    }

    #[test]
    fn later_definition_decides_arity() {
        let circuit = parse(
            ".hardware h .inputs A .outputs B
             .def f(X, Y) = X * Y
             .def f(X) = X
             .update B = f(A)
             .simulate A = 1",
        );
        assert!(call_warnings(&circuit).is_empty());
    }

    #[test]
    fn signal_read_before_assignment() {
        let circuit = parse(
            ".hardware h .inputs A .outputs B C .latches L
             .update B = A * C C = /A + L' L = B
             .simulate A = 01",
        );
        assert_eq!(
            binding_warnings(&circuit),
            vec!["update of 'B' reads 'C' before it is assigned".to_string()]
        );
    }

    #[test]
    fn function_body_reads_non_parameter() {
        let circuit = parse(
            ".hardware h .inputs A .outputs B
             .def peek(X) = X * A
             .update B = peek(A)
             .simulate A = 1",
        );
        assert_eq!(
            binding_warnings(&circuit),
            vec!["function 'peek' reads 'A', which is not a parameter".to_string()]
        );
    }

    #[test]
    fn unassigned_output() {
        let circuit = parse(".hardware h .inputs A .outputs B Z .update B = A .simulate A = 1");
        assert_eq!(
            binding_warnings(&circuit),
            vec!["output 'Z' is never assigned".to_string()]
        );
    }

    #[test]
    fn well_formed_circuit_has_no_warnings() {
        let circuit = parse(
            ".hardware xor_latch .inputs In .outputs Q .latches Q
             .def xor(A, B) = A * /B + /A * B
             .update Q = xor(In, Q')
             .simulate In = 101",
        );
        assert!(warnings(&circuit).is_empty());
    }
}
