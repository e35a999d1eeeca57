//! Recursive-descent JSON parser that builds the [`Value`] document model.
//!
//! The grammar is a deliberately small JSON subset:
//!
//! - numbers are runs of ASCII digits (no sign, fraction or exponent)
//! - bare words are runs of letters; `null` is null, every other word is
//!   treated as a boolean
//! - strings end at the first unescaped `"`; a backslash keeps itself and the
//!   next character verbatim, there is no escape table
//! - with an [`EnvMap`], `${NAME}` inside a string value is replaced by the
//!   mapped value (or nothing, if the name is unknown)
//!
//! # Key design decisions
//!
//! - **Owned cursor**: all scanning state lives in one [`Parser`] that the
//!   recursive calls borrow mutably, so every grammar rule sees exactly where
//!   the previous one stopped.
//! - **Char-wise scanning**: the cursor is a byte offset that only ever moves
//!   by whole `char`s, so multi-byte text is never split.
//! - **Fail fast**: the first grammar violation ends the parse with a
//!   [`ParseError`] pointing at the offending position.

use tracing::{debug, warn};

use crate::env::EnvMap;
use crate::error::{ParseError, ParseErrorKind};
use crate::value::{Array, Object, Primitive, PrimitiveKind, Value};

/// Characters of context shown on each side of an error position.
const SNIPPET_RADIUS: usize = 12;

/// Parse a JSON document.
///
/// `env` enables `${NAME}` substitution inside string values; pass `None` to
/// keep placeholders as literal text.
///
/// ```
/// use typeagen_core::{parse, Value};
///
/// let doc = parse(r#"{"name": "Alice", "age": 30}"#, None).unwrap();
/// let Value::Object(root) = doc else { panic!("expected object") };
/// assert_eq!(root.len(), 2);
/// assert_eq!(root.get("name").and_then(Value::as_str), Some("Alice"));
/// ```
pub fn parse(text: &str, env: Option<&EnvMap>) -> Result<Value, ParseError> {
    let mut parser = Parser::new(text, env);
    let value = parser.parse_document()?;
    debug!(bytes = text.len(), root = value.kind_name(), "parsed document");
    Ok(value)
}

/// Scanning state for a single document.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
    env: Option<&'a EnvMap>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, env: Option<&'a EnvMap>) -> Self {
        Self { src, pos: 0, env }
    }

    /// Root value followed by nothing but whitespace.
    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_value(String::new())?;
        self.skip_whitespace();
        if self.pos < self.src.len() {
            return Err(self.error(ParseErrorKind::TrailingCharacters));
        }
        Ok(value)
    }

    /// Dispatch on the first significant character.
    fn parse_value(&mut self, key: String) -> Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            Some('{') => self.parse_object(key).map(Value::Object),
            Some('[') => self.parse_array(key).map(Value::Array),
            Some('"') => {
                let raw = self.scan_string(true)?;
                Ok(primitive(key, raw, PrimitiveKind::String))
            }
            Some(c) if c.is_ascii_digit() => {
                let raw = self.take_while(|c| c.is_ascii_digit());
                Ok(primitive(key, raw, PrimitiveKind::Number))
            }
            Some(c) if c.is_alphabetic() => {
                let raw = self.take_while(char::is_alphabetic);
                let kind = if raw == "null" {
                    PrimitiveKind::Null
                } else {
                    PrimitiveKind::Boolean
                };
                Ok(primitive(key, raw, kind))
            }
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedChar(c))),
        }
    }

    /// `{ "key": value, ... }`
    fn parse_object(&mut self, key: String) -> Result<Object, ParseError> {
        let start = self.pos;
        self.bump(); // '{'
        let mut object = Object::new(key);

        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(object);
        }

        loop {
            let name = self.read_key(start)?;

            self.skip_whitespace();
            match self.peek() {
                Some(':') => {
                    self.bump();
                }
                None => return Err(self.error_at(ParseErrorKind::UnterminatedObject, start)),
                Some(_) => return Err(self.error(ParseErrorKind::ExpectedColon)),
            }

            let value = self.parse_value(name.clone())?;
            object.members.insert(name, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(object);
                }
                None => return Err(self.error_at(ParseErrorKind::UnterminatedObject, start)),
                Some(_) => return Err(self.error(ParseErrorKind::ExpectedCommaOrBrace)),
            }
        }
    }

    /// `[ value, ... ]`
    fn parse_array(&mut self, key: String) -> Result<Array, ParseError> {
        let start = self.pos;
        self.bump(); // '['
        let mut array = Array::new(key);

        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(array);
        }

        loop {
            array.elements.push(self.parse_value(String::new())?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(array);
                }
                None => return Err(self.error_at(ParseErrorKind::UnterminatedArray, start)),
                Some(_) => return Err(self.error(ParseErrorKind::ExpectedCommaOrBracket)),
            }
        }
    }

    /// Quoted member name. Placeholders are never expanded in keys.
    fn read_key(&mut self, object_start: usize) -> Result<String, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('"') => self.scan_string(false),
            None => Err(self.error_at(ParseErrorKind::UnterminatedObject, object_start)),
            Some(_) => Err(self.error(ParseErrorKind::ExpectedKey)),
        }
    }

    /// Scan a string literal starting at its opening quote and return its
    /// contents without the quotes.
    fn scan_string(&mut self, interpolate: bool) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump(); // opening '"'
        let env = if interpolate { self.env } else { None };
        let mut out = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error_at(ParseErrorKind::UnterminatedString, start)),
                Some('"') => return Ok(out),
                Some('\\') => {
                    out.push('\\');
                    match self.bump() {
                        Some(c) => out.push(c),
                        None => {
                            return Err(self.error_at(ParseErrorKind::UnterminatedString, start))
                        }
                    }
                }
                Some('$') if env.is_some() && self.peek() == Some('{') => {
                    let placeholder_start = self.pos - 1;
                    self.bump(); // '{'
                    let name = self.read_placeholder_name(placeholder_start)?;
                    match env.and_then(|vars| vars.get(&name)) {
                        Some(value) => out.push_str(value),
                        None => warn!(name = %name, "no value for placeholder, substituting empty string"),
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Name between `${` and `}`. The placeholder may not cross the end of
    /// its string.
    fn read_placeholder_name(&mut self, placeholder_start: usize) -> Result<String, ParseError> {
        let mut name = String::new();
        loop {
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(name);
                }
                None | Some('"') => {
                    return Err(
                        self.error_at(ParseErrorKind::UnterminatedPlaceholder, placeholder_start)
                    )
                }
                Some(c) => {
                    name.push(c);
                    self.bump();
                }
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        let before = &self.src[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;

        ParseError {
            kind,
            offset,
            line,
            column,
            snippet: snippet(self.src, offset),
        }
    }
}

fn primitive(key: String, raw: String, kind: PrimitiveKind) -> Value {
    Value::Primitive(Primitive { key, raw, kind })
}

/// A few characters either side of `offset`, flattened to one line.
fn snippet(src: &str, offset: usize) -> String {
    let mut head: Vec<char> = src[..offset].chars().rev().take(SNIPPET_RADIUS).collect();
    head.reverse();
    head.into_iter()
        .chain(src[offset..].chars().take(SNIPPET_RADIUS))
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}
