//! Error types for parsing, env loading and interface synthesis.

use std::fmt;

use thiserror::Error;

/// Which grammar rule rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The text ended while a value, key or separator was still expected.
    UnexpectedEnd,
    /// A character that cannot start a value.
    UnexpectedChar(char),
    /// An object key did not start with `"`.
    ExpectedKey,
    /// An object key was not followed by `:`.
    ExpectedColon,
    /// An object member was followed by something other than `,` or `}`.
    ExpectedCommaOrBrace,
    /// An array element was followed by something other than `,` or `]`.
    ExpectedCommaOrBracket,
    /// A string literal had no closing quote.
    UnterminatedString,
    /// An object had no closing `}`.
    UnterminatedObject,
    /// An array had no closing `]`.
    UnterminatedArray,
    /// A `${` placeholder had no closing `}` inside its string.
    UnterminatedPlaceholder,
    /// Non-whitespace content after the root value.
    TrailingCharacters,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => f.write_str("unexpected end of input"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            Self::ExpectedKey => f.write_str("expected a quoted object key"),
            Self::ExpectedColon => f.write_str("expected ':' after object key"),
            Self::ExpectedCommaOrBrace => f.write_str("expected ',' or '}' after object member"),
            Self::ExpectedCommaOrBracket => f.write_str("expected ',' or ']' after array element"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::UnterminatedObject => f.write_str("unterminated object"),
            Self::UnterminatedArray => f.write_str("unterminated array"),
            Self::UnterminatedPlaceholder => f.write_str("unterminated ${...} placeholder"),
            Self::TrailingCharacters => f.write_str("trailing characters after document"),
        }
    }
}

/// A malformed document, with the position where scanning stopped.
///
/// `offset` is a byte offset into the input; `line` and `column` are 1-based
/// and count characters, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column} (offset {offset}): near `{snippet}`")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

/// Errors from reading `NAME=VALUE` env text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// A non-blank line with no `=` in it.
    #[error("env line {line} has no '=' separator: {content:?}")]
    MissingSeparator { line: usize, content: String },
}

/// Errors that can occur anywhere in the parse → synthesize pipeline.
#[derive(Error, Debug)]
pub enum TypeagenError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("env file error: {0}")]
    Env(#[from] EnvError),

    /// An array with no elements has no element type to infer.
    #[error("cannot infer element type of empty array at `{path}`")]
    EmptyArray { path: String },

    /// A key made only of `_`/`-` leaves no characters for a type name.
    #[error("key `{key}` at `{path}` does not produce a type name")]
    EmptyTypeName { key: String, path: String },

    /// The document root is neither an object nor an array of objects.
    #[error("document root must be an object or an array of objects, found {found}")]
    RootNotObject { found: String },

    /// Writing to the output sink failed.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout typeagen-core.
pub type Result<T> = std::result::Result<T, TypeagenError>;
