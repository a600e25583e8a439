//! Parser for the hwsim circuit description language.
//!
//! A description names the circuit, declares its inputs, outputs and
//! latches, defines boolean functions, lists the per-cycle updates, and
//! gives one bit string per simulated input:
//!
//! ```text
//! .hardware xor_latch
//! .inputs In
//! .outputs Q
//! .latches Q
//! .def xor(A, B) = A * /B + /A * B
//! .update
//! Q = xor(In, Q')
//! .simulate
//! In = 101
//! ```
//!
//! [`parse_circuit`] lexes and parses such text into a [`hwsim_ir::Circuit`],
//! stopping at the first error.

#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ParseError;
pub use parser::HwParser;

use hwsim_ir::{Circuit, Expr};

/// Parses a complete circuit description.
pub fn parse_circuit(source: &str) -> Result<Circuit, ParseError> {
    let tokens = lexer::lex(source)?;
    HwParser::new(tokens, source).parse_circuit()
}

/// Parses a single expression, e.g. `A * /B + f(C)`.
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::lex(source)?;
    let mut parser = HwParser::new(tokens, source);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_circuit_with_comments() {
        let src = "\
// traffic light style counter
.hardware count2
.inputs Tick
.outputs B0 B1
.latches B0 B1
.update
B0 = Tick * /B0' + /Tick * B0'   // low bit toggles on tick
B1 = Tick * B0' * /B1' + /(Tick * B0') * B1'
.simulate
Tick = 1111
";
        let c = parse_circuit(src).unwrap();
        assert_eq!(c.name, "count2");
        assert_eq!(c.latches, vec!["B0", "B1"]);
        assert_eq!(c.updates.len(), 2);
    }

    #[test]
    fn parse_expr_entry_point() {
        let e = parse_expr("/A + B").unwrap();
        assert_eq!(
            e,
            Expr::or(Expr::not(Expr::signal("A")), Expr::signal("B"))
        );
    }

    #[test]
    fn parse_expr_rejects_trailing_tokens() {
        assert!(parse_expr("A B").is_err());
    }

    #[test]
    fn lex_error_surfaces() {
        assert!(matches!(
            parse_circuit(".hardware h\n.inputs A$"),
            Err(ParseError::UnexpectedChar { ch: '$', line: 2, .. })
        ));
    }
}
