//! Token types for the circuit description lexer.
//!
//! Defines the [`HwToken`] enum covering section directives, operators,
//! punctuation, identifiers, and bit strings, plus the [`Token`] struct
//! pairing a token kind with its source [`Span`].

use serde::{Deserialize, Serialize};

/// A byte offset range within the source text.
///
/// The `start` is inclusive and `end` is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span covering `start..end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// A token kind.
///
/// Identifier and bit-string contents are not stored in the token; they are
/// retrieved from the source text using the token's span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HwToken {
    // === Directives ===
    /// `.hardware`
    Hardware,
    /// `.inputs`
    Inputs,
    /// `.outputs`
    Outputs,
    /// `.latch` or `.latches`
    Latches,
    /// `.def`
    Def,
    /// `.update`
    Update,
    /// `.simulate`
    Simulate,
    /// `.end`
    End,

    // === Operators and punctuation ===
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `/`
    Slash,
    /// `=`
    Equals,
    /// `->`
    Arrow,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,

    // === Literals ===
    /// A signal or function name, possibly ending in primes (`Q'`).
    Identifier,
    /// A run of decimal digits, e.g. `0110`.
    Bits,

    /// End of input.
    Eof,
}

impl HwToken {
    /// Returns a human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            HwToken::Hardware => "'.hardware'",
            HwToken::Inputs => "'.inputs'",
            HwToken::Outputs => "'.outputs'",
            HwToken::Latches => "'.latches'",
            HwToken::Def => "'.def'",
            HwToken::Update => "'.update'",
            HwToken::Simulate => "'.simulate'",
            HwToken::End => "'.end'",
            HwToken::Star => "'*'",
            HwToken::Plus => "'+'",
            HwToken::Slash => "'/'",
            HwToken::Equals => "'='",
            HwToken::Arrow => "'->'",
            HwToken::LeftParen => "'('",
            HwToken::RightParen => "')'",
            HwToken::Comma => "','",
            HwToken::Identifier => "identifier",
            HwToken::Bits => "bit string",
            HwToken::Eof => "end of file",
        }
    }
}

/// Looks up a directive by its name without the leading dot.
pub fn lookup_directive(name: &str) -> Option<HwToken> {
    match name {
        "hardware" => Some(HwToken::Hardware),
        "inputs" => Some(HwToken::Inputs),
        "outputs" => Some(HwToken::Outputs),
        "latch" | "latches" => Some(HwToken::Latches),
        "def" => Some(HwToken::Def),
        "update" => Some(HwToken::Update),
        "simulate" => Some(HwToken::Simulate),
        "end" => Some(HwToken::End),
        _ => None,
    }
}

/// A token with its kind and source location.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    /// The token kind.
    pub kind: HwToken,
    /// The source span of this token.
    pub span: Span,
}
