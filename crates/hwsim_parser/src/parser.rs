//! Recursive descent parser for circuit descriptions.
//!
//! The [`HwParser`] struct provides primitive operations (advance, expect,
//! eat) over the token stream, and the section rules that build a
//! [`Circuit`]. Expression precedence from loosest to tightest is `+`,
//! `*`, prefix `/`; both binary operators associate to the left.

use hwsim_ir::{latch_output_name, Circuit, Def, Expr, Trace, Update};

use crate::error::{line_col, ParseError};
use crate::token::{HwToken, Span, Token};

/// How deeply negations, parentheses and call arguments may nest.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A recursive descent parser over a lexed circuit description.
pub struct HwParser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    depth: usize,
}

impl<'src> HwParser<'src> {
    /// Creates a new parser from a token stream ending in [`HwToken::Eof`].
    pub fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            depth: 0,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> HwToken {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: HwToken) -> bool {
        self.current() == kind
    }

    fn advance(&mut self) {
        if !self.at(HwToken::Eof) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: HwToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn position(&self, span: Span) -> (usize, usize) {
        line_col(self.source, span.start)
    }

    fn expected(&self, what: &str) -> ParseError {
        let found = match self.current() {
            HwToken::Identifier | HwToken::Bits => {
                format!("{} '{}'", self.current().describe(), self.current_text())
            }
            other => other.describe().to_string(),
        };
        let (line, col) = self.position(self.current_span());
        ParseError::Expected {
            expected: what.to_string(),
            found,
            line,
            col,
        }
    }

    fn expect(&mut self, kind: HwToken) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.at(HwToken::Identifier) {
            let text = self.current_text().to_string();
            self.advance();
            Ok(text)
        } else {
            Err(self.expected("identifier"))
        }
    }

    fn ident_list(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        while self.at(HwToken::Identifier) {
            names.push(self.current_text().to_string());
            self.advance();
        }
        names
    }

    // ========================================================================
    // Sections
    // ========================================================================

    /// Parses a complete circuit description.
    pub fn parse_circuit(&mut self) -> Result<Circuit, ParseError> {
        self.expect(HwToken::Hardware)?;
        let mut circuit = Circuit::new(self.expect_ident()?);

        self.expect(HwToken::Inputs)?;
        circuit.inputs = self.ident_list();

        self.expect(HwToken::Outputs)?;
        circuit.outputs = self.ident_list();

        if self.eat(HwToken::Latches) {
            while self.at(HwToken::Identifier) {
                circuit.latches.push(self.parse_latch()?);
            }
        }

        while self.eat(HwToken::Def) {
            circuit.definitions.push(self.parse_def()?);
        }

        self.expect(HwToken::Update)?;
        while self.at(HwToken::Identifier) {
            circuit.updates.push(self.parse_update()?);
        }

        self.expect(HwToken::Simulate)?;
        while self.at(HwToken::Identifier) {
            circuit.siminputs.push(self.parse_siminput()?);
        }

        self.eat(HwToken::End);
        self.expect_eof()?;
        Ok(circuit)
    }

    /// Fails unless every token has been consumed.
    pub fn expect_eof(&self) -> Result<(), ParseError> {
        if self.at(HwToken::Eof) {
            Ok(())
        } else {
            Err(self.expected(HwToken::Eof.describe()))
        }
    }

    /// `L` or `L -> L'`.
    fn parse_latch(&mut self) -> Result<String, ParseError> {
        let latch = self.expect_ident()?;
        if self.eat(HwToken::Arrow) {
            let span = self.current_span();
            let output = self.expect_ident()?;
            if output != latch_output_name(&latch) {
                let (line, col) = self.position(span);
                return Err(ParseError::LatchOutputMismatch {
                    latch,
                    found: output,
                    line,
                    col,
                });
            }
        }
        Ok(latch)
    }

    /// `name(P1, ..., Pn) = expr`, after the `.def` directive.
    fn parse_def(&mut self) -> Result<Def, ParseError> {
        let name = self.expect_ident()?;
        self.expect(HwToken::LeftParen)?;
        let mut params = Vec::new();
        if !self.at(HwToken::RightParen) {
            loop {
                params.push(self.expect_ident()?);
                if !self.eat(HwToken::Comma) {
                    break;
                }
            }
        }
        self.expect(HwToken::RightParen)?;
        self.expect(HwToken::Equals)?;
        let body = self.parse_expr()?;
        Ok(Def::new(name, params, body))
    }

    /// `target = expr`.
    fn parse_update(&mut self) -> Result<Update, ParseError> {
        let target = self.expect_ident()?;
        self.expect(HwToken::Equals)?;
        let expr = self.parse_expr()?;
        Ok(Update::new(target, expr))
    }

    /// `Signal = 0110...`.
    fn parse_siminput(&mut self) -> Result<Trace, ParseError> {
        let signal = self.expect_ident()?;
        self.expect(HwToken::Equals)?;
        if !self.at(HwToken::Bits) {
            return Err(self.expected("bit string"));
        }
        let span = self.current_span();
        let bits = self.current_text();
        self.advance();
        match Trace::from_bits(signal.as_str(), bits) {
            Some(trace) => Ok(trace),
            None => {
                let (line, col) = self.position(span);
                Err(ParseError::InvalidBits { signal, line, col })
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parses an expression at the loosest precedence level.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat(HwToken::Plus) {
            let rhs = self.parse_and()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while self.eat(HwToken::Star) {
            let rhs = self.parse_unary()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let (line, col) = self.position(self.current_span());
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line,
                col,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(HwToken::Slash) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::not(operand));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        if self.eat(HwToken::LeftParen) {
            let inner = self.nested(Self::parse_expr)?;
            self.expect(HwToken::RightParen)?;
            return Ok(inner);
        }
        if !self.at(HwToken::Identifier) {
            return Err(self.expected("expression"));
        }
        let name = self.expect_ident()?;
        if !self.eat(HwToken::LeftParen) {
            return Ok(Expr::Signal(name));
        }
        let mut args = Vec::new();
        if !self.at(HwToken::RightParen) {
            loop {
                args.push(self.nested(Self::parse_expr)?);
                if !self.eat(HwToken::Comma) {
                    break;
                }
            }
        }
        self.expect(HwToken::RightParen)?;
        Ok(Expr::Call { name, args })
    }
}
