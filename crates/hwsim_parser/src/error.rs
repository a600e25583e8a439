//! Parse error types.

/// Errors that can occur while lexing or parsing a circuit description.
///
/// Line and column numbers are 1-based; columns count bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("{line}:{col}: unexpected character '{ch}'")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// A directive name that is not part of the language.
    #[error("{line}:{col}: unknown directive '.{name}'")]
    UnknownDirective {
        /// The directive name without the dot.
        name: String,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// The parser found a different token than the grammar allows.
    #[error("{line}:{col}: expected {expected}, found {found}")]
    Expected {
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// A simulation input contains digits other than `0` and `1`.
    #[error("{line}:{col}: simulation input for '{signal}' must contain only 0 and 1")]
    InvalidBits {
        /// The signal the input belongs to.
        signal: String,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// A latch declared as `L -> X` where `X` is not `L'`.
    #[error("{line}:{col}: latch '{latch}' must output '{latch}'', found '{found}'")]
    LatchOutputMismatch {
        /// The latch name.
        latch: String,
        /// The declared output name.
        found: String,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// Parentheses, negations or call arguments nested deeper than the
    /// parser allows.
    #[error("{line}:{col}: expression nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
        /// Line number.
        line: usize,
        /// Column number.
        col: usize,
    },

    /// The source text is too long for 32-bit byte offsets.
    #[error("source is {len} bytes, larger than the supported {max} bytes")]
    SourceTooLarge {
        /// Length of the source in bytes.
        len: usize,
        /// The largest supported length.
        max: usize,
    },
}

/// Converts a byte offset into a 1-based `(line, column)` pair.
pub fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |p| p + 1);
    (line, offset - line_start + 1)
}
