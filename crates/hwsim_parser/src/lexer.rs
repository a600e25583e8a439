//! Lexical analyzer for circuit descriptions.
//!
//! Converts source text into a sequence of [`Token`]s. Whitespace and
//! `//` line comments are skipped. Lexing stops at the first character that
//! cannot start a token.

use crate::error::{line_col, ParseError};
use crate::token::{lookup_directive, HwToken, Span, Token};

/// Lexes the given source text into a vector of tokens.
///
/// The returned vector always ends with a [`HwToken::Eof`] token.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    check_source_len(source.len())?;
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    lexer.lex_all()
}

/// Spans hold `u32` offsets, so longer sources are rejected up front.
fn check_source_len(len: usize) -> Result<(), ParseError> {
    let max = u32::MAX as usize;
    if len > max {
        return Err(ParseError::SourceTooLarge { len, max });
    }
    Ok(())
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn lex_all(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.pos >= self.bytes.len() {
                tokens.push(Token {
                    kind: HwToken::Eof,
                    span: Span::new(self.pos as u32, self.pos as u32),
                });
                return Ok(tokens);
            }
            tokens.push(self.next_token()?);
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            // Line comment: //
            if self.peek() == b'/' && self.peek_at(1) == b'/' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let b = self.peek();

        let kind = match b {
            b'.' => return self.lex_directive(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return Ok(self.lex_identifier()),
            b'0'..=b'9' => {
                while self.peek().is_ascii_digit() {
                    self.pos += 1;
                }
                return Ok(Token {
                    kind: HwToken::Bits,
                    span: self.span_from(start),
                });
            }
            b'-' if self.peek_at(1) == b'>' => {
                self.pos += 1;
                HwToken::Arrow
            }
            b'*' => HwToken::Star,
            b'+' => HwToken::Plus,
            b'/' => HwToken::Slash,
            b'=' => HwToken::Equals,
            b'(' => HwToken::LeftParen,
            b')' => HwToken::RightParen,
            b',' => HwToken::Comma,
            _ => {
                let ch = self.source[start..].chars().next().unwrap_or('\0');
                let (line, col) = line_col(self.source, start as u32);
                return Err(ParseError::UnexpectedChar { ch, line, col });
            }
        };
        self.pos += 1;
        Ok(Token {
            kind,
            span: self.span_from(start),
        })
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.pos += 1;
        }
        while self.peek() == b'\'' {
            self.pos += 1;
        }
        Token {
            kind: HwToken::Identifier,
            span: self.span_from(start),
        }
    }

    fn lex_directive(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1;
        while self.peek().is_ascii_alphabetic() {
            self.pos += 1;
        }
        let name = &self.source[start + 1..self.pos];
        match lookup_directive(name) {
            Some(kind) => Ok(Token {
                kind,
                span: self.span_from(start),
            }),
            None => {
                let (line, col) = line_col(self.source, start as u32);
                Err(ParseError::UnknownDirective {
                    name: name.to_string(),
                    line,
                    col,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<HwToken> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn source_length_limit() {
        let max = u32::MAX as usize;
        assert!(check_source_len(max).is_ok());
        assert!(matches!(
            check_source_len(max + 1),
            Err(ParseError::SourceTooLarge { len, .. }) if len == max + 1
        ));
    }

    #[test]
    fn empty_source_is_eof() {
        assert_eq!(kinds(""), vec![HwToken::Eof]);
        assert_eq!(kinds("  \n // only a comment\n"), vec![HwToken::Eof]);
    }

    #[test]
    fn directives() {
        assert_eq!(
            kinds(".hardware .inputs .outputs .latch .def .update .simulate .end"),
            vec![
                HwToken::Hardware,
                HwToken::Inputs,
                HwToken::Outputs,
                HwToken::Latches,
                HwToken::Def,
                HwToken::Update,
                HwToken::Simulate,
                HwToken::End,
                HwToken::Eof,
            ]
        );
    }

    #[test]
    fn expression_tokens() {
        assert_eq!(
            kinds("Q = /A * (B + f(C, Q'))"),
            vec![
                HwToken::Identifier,
                HwToken::Equals,
                HwToken::Slash,
                HwToken::Identifier,
                HwToken::Star,
                HwToken::LeftParen,
                HwToken::Identifier,
                HwToken::Plus,
                HwToken::Identifier,
                HwToken::LeftParen,
                HwToken::Identifier,
                HwToken::Comma,
                HwToken::Identifier,
                HwToken::RightParen,
                HwToken::RightParen,
                HwToken::Eof,
            ]
        );
    }

    #[test]
    fn primed_identifier_span() {
        let src = "Q'' x";
        let tokens = lex(src).unwrap();
        let span = tokens[0].span;
        assert_eq!(&src[span.start as usize..span.end as usize], "Q''");
    }

    #[test]
    fn arrow_and_bits() {
        assert_eq!(
            kinds("Q -> Q'\nIn = 0101"),
            vec![
                HwToken::Identifier,
                HwToken::Arrow,
                HwToken::Identifier,
                HwToken::Identifier,
                HwToken::Equals,
                HwToken::Bits,
                HwToken::Eof,
            ]
        );
    }

    #[test]
    fn comment_after_code() {
        assert_eq!(
            kinds("A // trailing\nB"),
            vec![HwToken::Identifier, HwToken::Identifier, HwToken::Eof]
        );
    }

    #[test]
    fn unexpected_char_reports_position() {
        let err = lex("A\n  #").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedChar {
                ch: '#',
                line: 2,
                col: 3
            }
        );
    }

    #[test]
    fn unknown_directive() {
        let err = lex(".module x").unwrap_err();
        assert!(matches!(err, ParseError::UnknownDirective { ref name, .. } if name == "module"));
    }
}
